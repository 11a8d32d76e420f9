// File: mod.rs
// Description:
//    Analysis session for one structure. The session owns every table built
//    during an analysis and runs the stages in order: descriptors, contacts
//    and knobs, complementarity, candidate assembly, register assignment.

pub mod assembly;
pub mod complementarity;
pub mod contact;
pub mod daisy;
pub mod duplicate;
pub mod graph;
pub mod knob;
pub mod orientation;
pub mod rasmol;
pub mod register;
pub mod report;
pub mod result;

use rustc_hash::FxHashMap;

use crate::cli::config::SocketConfig;
use crate::error::Result;
use crate::measure_time;
use crate::structure::core::HelicalStructure;
use crate::structure::descriptor::build_descriptors;
use crate::utils::log::Verbosity;

use assembly::CoiledCoil;
use contact::ContactTable;
use daisy::DaisyChain;
use knob::Knob;
use orientation::OrientationTable;
use register::{Heptad, RegisterBlock};
use result::AnalysisOutcome;

/// Knob and hole counts of one helix. Type counts are cumulative:
/// `knob_types[j]` counts knobs of type j or higher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelixTally {
    pub knobs: usize,
    pub holes: usize,
    pub knob_types: [usize; 7],
    pub hole_types: [usize; 7],
}

pub struct AnalysisSession {
    pub structure: HelicalStructure,
    pub config: SocketConfig,
    pub verbosity: Verbosity,
    pub contacts: ContactTable,
    pub knobs: Vec<Knob>,
    pub daisy_chains: Vec<DaisyChain>,
    /// Knob indices sharing one residue
    pub duplicates: Vec<Vec<usize>>,
    pub candidates: Vec<CoiledCoil>,
    pub orientations: OrientationTable,
    /// Heptad letter per residue key, for each true coiled coil
    pub registers: FxHashMap<usize, Vec<Option<Heptad>>>,
    pub register_blocks: Vec<RegisterBlock>,
    pub tallies: Vec<HelixTally>,
    /// Stdout report, empty when quiet
    pub summary: String,
    /// Verdict lines, printed regardless of verbosity
    pub result_lines: Vec<String>,
}

impl AnalysisSession {
    pub fn new(structure: HelicalStructure, config: SocketConfig) -> Self {
        let verbosity = config.verbosity();
        let contacts = ContactTable::new(structure.num_residues());
        let tallies = vec![HelixTally::default(); structure.num_helices()];
        let orientations = OrientationTable::new(config.limits.helix_pairs);
        AnalysisSession {
            structure,
            config,
            verbosity,
            contacts,
            knobs: Vec::new(),
            daisy_chains: Vec::new(),
            duplicates: Vec::new(),
            candidates: Vec::new(),
            orientations,
            registers: FxHashMap::default(),
            register_blocks: Vec::new(),
            tallies,
            summary: String::new(),
            result_lines: Vec::new(),
        }
    }

    /// Run every stage. Fatal conditions stop the analysis with an error;
    /// everything printed so far stays in `summary`.
    pub fn run(&mut self) -> Result<AnalysisOutcome> {
        let timed = self.verbosity >= Verbosity::Verbose;
        self.say(&format!(
            "using cutoff of {:4.1} Angstroms for centre of mass distances", self.config.packing_cutoff
        ));
        if self.structure.num_residues() == 0 {
            self.verbosity.info(&format!("no alpha-helical residues in {}", self.structure.code));
            let outcome = AnalysisOutcome::default();
            let line = self.result_line(&outcome);
            self.result_lines.push(line);
            return Ok(outcome);
        }
        let options = self.config.descriptor_options()?;
        if &options.reference_atom != b" CA " {
            self.say("- packing geometry cannot be calculated (requires C alpha atoms)");
        }
        measure_time!(build_descriptors(&mut self.structure, &options, self.verbosity), timed)?;
        measure_time!(self.find_knobs_and_holes(), timed)?;
        let candidates = measure_time!(self.determine_order(), timed)?;
        let coiled_coils = if candidates > 0 { measure_time!(self.find_register(), timed)? } else { 0 };
        let outcome = AnalysisOutcome {
            candidates,
            coiled_coils,
            interrupts: self.register_blocks.iter().map(|b| b.interrupts()).sum(),
        };
        let line = self.result_line(&outcome);
        self.result_lines.push(line);
        Ok(outcome)
    }

    /// Append a line to the stdout report
    pub(crate) fn say(&mut self, line: &str) {
        if self.verbosity > Verbosity::Quiet {
            self.summary.push_str(line);
            self.summary.push('\n');
        }
    }

    /// "LEU 12:A iCode=' '" description of a residue
    pub fn residue_text(&self, residue: usize) -> String {
        let r = &self.structure.residues[residue];
        format!(
            "{} {}:{} iCode='{}'",
            r.aa.three_letter(), r.id.serial, r.id.chain_char(), r.id.icode_char()
        )
    }

    /// Candidates reported as coiled coils
    pub fn true_coiled_coils(&self) -> impl Iterator<Item = (usize, &CoiledCoil)> {
        self.candidates.iter().enumerate().filter(|(_, c)| c.is_true())
    }
}
