// File: run.rs
// Description: Analyse one structure from a PDB file and its DSSP assignment

use crate::cli::config::SocketConfig;
use crate::cli::*;
use crate::controller::result::AnalysisOutcome;
use crate::prelude::*;
use crate::structure::io::StructureFileFormat;

pub const HELP_RUN: &str = "\
USAGE: coildisco run -f <PDB> -s <DSSP> [OPTIONS]
Options:
    -f, --pdb <PDB>                 Structure file (.pdb, .ent, optionally .gz)
    -s, --dssp <DSSP>               DSSP assignment of the same structure
    -c, --cutoff <ANGSTROM>         Packing cutoff for side-chain centroids (default 7.0)
    -e, --extend <N>                Extend every helix by N residues at each end, 0..=2 (default 0)
    -k, --knob-threshold <TYPE>     Lowest knob type reported, 0..=4 (default 3)
    -t, --ref-atom <ATOM>           Reference atom for packing angles (default CA)
    -a, --all-atoms                 Keep hydrogen atoms
    -i, --include-ca                Keep alpha hydrogens in side-chain centroids
    -o, --long-output <FILE>        Write per-residue long output
    -r, --rasmol <FILE>             Write a RasMol script
    --config <TOML>                 Read options from a configuration file; flags override it
    -q, --quiet                     Print only the result line
    -v, --verbose                   Print every stage
    --debug                         Print per-step traces
    -h, --help                      Print this help menu
";

/// A finished or failed analysis of one structure. The session keeps the
/// report written before a fatal condition stopped it.
pub struct StructureRun {
    pub session: AnalysisSession,
    pub outcome: Result<AnalysisOutcome>,
}

pub fn analyse_structure(pdb_path: &str, dssp_path: &str, config: &SocketConfig) -> Result<StructureRun> {
    let verbosity = config.verbosity();
    if StructureFileFormat::from_path(pdb_path) != StructureFileFormat::PDB {
        verbosity.verbose(&format!("{} does not look like a PDB file, reading it as one", pdb_path));
    }
    if StructureFileFormat::from_path(dssp_path) != StructureFileFormat::DSSP {
        verbosity.verbose(&format!("{} does not look like a DSSP file, reading it as one", dssp_path));
    }
    let code = get_code(pdb_path);
    let structure = load_structure(pdb_path, dssp_path, &code, &config.read_options())?;
    verbosity.verbose(&format!(
        "{}: {} helices, {} helical residues, {} atoms",
        code, structure.num_helices(), structure.num_residues(), structure.num_atoms()
    ));
    let mut session = AnalysisSession::new(structure, config.clone());
    let outcome = session.run();
    Ok(StructureRun { session, outcome })
}

pub fn run_socket(env: AppArgs) -> Result<()> {
    match env {
        AppArgs::Run { pdb_path, dssp_path, long_output, rasmol, overrides, help } => {
            if help {
                eprintln!("{}", HELP_RUN);
                return Ok(());
            }
            let (pdb_path, dssp_path) = match (pdb_path, dssp_path) {
                (Some(pdb), Some(dssp)) => (pdb, dssp),
                _ => {
                    eprintln!("{}", HELP_RUN);
                    return Err(SocketError::Config("both a PDB file and a DSSP file are required".to_string()));
                }
            };
            let config = overrides.resolve()?;
            let verbosity = config.verbosity();
            if verbosity > Verbosity::Quiet {
                print_logo();
            }

            let StructureRun { session, outcome } = analyse_structure(&pdb_path, &dssp_path, &config)?;
            print!("{}", session.summary);
            for line in &session.result_lines {
                println!("{}", line);
            }
            let outcome = outcome?;

            if let Some(path) = long_output {
                session.write_long_output(&path)?;
                verbosity.info(&format!("long output written to {}", path));
            }
            if let Some(path) = rasmol {
                session.write_rasmol_script(&path)?;
                verbosity.info(&format!("RasMol script written to {}", path));
            }
            if verbosity > Verbosity::Quiet {
                print_log_msg(DONE, &format!(
                    "{}: {} coiled coils in {} candidates",
                    session.structure.code, outcome.coiled_coils, outcome.candidates
                ));
            }
            Ok(())
        }
        _ => {
            eprintln!("{}", HELP_RUN);
            Ok(())
        }
    }
}
