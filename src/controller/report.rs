// File: report.rs
// Description: Per-helix, per-residue long output

use std::fmt::Write as _;

use crate::controller::graph::{create_helix_graph, helix_clusters};
use crate::controller::knob::MAX_TALLIED_TYPE;
use crate::controller::AnalysisSession;
use crate::geometry::core::centroid_distance;

pub const LONG_OUTPUT_TITLE: &str = "# coildisco long output: helices, residues, registers and knobs\n";

impl AnalysisSession {
    /// Centroid distance between two residues, NaN without centroids
    fn centre_distance(&self, a: usize, b: usize) -> f32 {
        centroid_distance(&self.structure.residues[a].descriptor, &self.structure.residues[b].descriptor)
            .unwrap_or(f32::NAN)
    }

    pub fn long_output(&self) -> String {
        let code = &self.structure.code;
        let mut out = String::from(LONG_OUTPUT_TITLE);
        for (i, helix) in self.structure.helices.iter().enumerate() {
            let tally = self.tallies.get(i).copied().unwrap_or_default();
            let _ = write!(
                out,
                "{} helix\t{} (chain {})\t{}(iCode='{}')..{}(iCode='{}')\tcutoff {:4.1}\t{} knobs",
                code, i, helix.chain as char, helix.start.serial, helix.start.icode_char(),
                helix.end.serial, helix.end.icode_char(), self.config.packing_cutoff, tally.knobs
            );
            for j in 0..=MAX_TALLIED_TYPE {
                let _ = write!(out, ", {} type {}", tally.knob_types[j], j);
            }
            out.push('\n');

            for r in helix.residues.clone() {
                let residue = &self.structure.residues[r];
                let _ = write!(
                    out,
                    "{} {}{:5}:{} iCode='{}'",
                    code, residue.aa.three_letter(), residue.id.serial, residue.id.chain_char(), residue.id.icode_char()
                );
                for (c, candidate) in self.candidates.iter().enumerate() {
                    if candidate.subset.is_some() {
                        continue;
                    }
                    let letter = self.registers.get(&c).and_then(|reg| reg[r]);
                    if let (Some(letter), Some(orientation)) = (letter, candidate.orientation) {
                        let _ = write!(out, "R{}[{}{}]", letter, candidate.len(), orientation.short());
                    }
                }
                if let Some(knob) = self.knobs.iter().find(|knob| knob.residue == r) {
                    let _ = write!(
                        out,
                        " T{:1} H{:3}:{:8.3} ; ",
                        knob.knob_type, self.structure.helix_of(knob.hole[0]), knob.angle.unwrap_or(f32::NAN)
                    );
                    for (c, candidate) in self.candidates.iter().enumerate() {
                        if candidate.subset.is_some() {
                            continue;
                        }
                        let register = match self.registers.get(&c) {
                            Some(register) if register[knob.hole[1]].is_some() => register,
                            _ => continue,
                        };
                        let letters: String = knob.hole.iter()
                            .map(|&h| register[h].map_or(' ', |x| x.letter()))
                            .collect();
                        let _ = write!(out, "hole ({}) ", letters);
                    }
                    let hole_chain = self.structure.helices[self.structure.helix_of(knob.hole[0])].chain as char;
                    let _ = write!(out, "chain {}: ", hole_chain);
                    for (m, &h) in knob.hole.iter().enumerate() {
                        let hole_residue = &self.structure.residues[h];
                        let _ = write!(
                            out,
                            " ({}) {}{:5}'{}' {:8.3}",
                            m, hole_residue.aa.three_letter(), hole_residue.id.serial,
                            hole_residue.id.icode_char(), knob.hole_distance[m]
                        );
                    }
                    let _ = write!(
                        out,
                        "; sides 0-1:{:8.3}, 0-2:{:8.3}, 1-3:{:8.3}, 2-3:{:8.3}",
                        self.centre_distance(knob.hole[0], knob.hole[1]),
                        self.centre_distance(knob.hole[0], knob.hole[2]),
                        self.centre_distance(knob.hole[1], knob.hole[3]),
                        self.centre_distance(knob.hole[2], knob.hole[3]),
                    );
                }
                out.push('\n');
            }
        }

        let graph = create_helix_graph(&self.structure, &self.knobs);
        for (n, cluster) in helix_clusters(&graph).iter().enumerate() {
            let members: Vec<String> = cluster.iter().map(|h| h.to_string()).collect();
            let _ = writeln!(out, "{} helix cluster {}: helices {}", code, n, members.join(","));
        }
        out
    }

    pub fn write_long_output(&self, path: &str) -> crate::error::Result<()> {
        std::fs::write(path, self.long_output())?;
        Ok(())
    }
}
