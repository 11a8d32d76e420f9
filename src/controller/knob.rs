// File: knob.rs
// Description: Knob and hole classification for one helix pair at a time

use crate::controller::contact::Contact;
use crate::controller::graph::{create_helix_graph, helix_clusters};
use crate::controller::AnalysisSession;
use crate::error::{Result, SocketError};
use crate::geometry::core::{mean_insertion_distance, packing_angle};
use crate::structure::core::HelicalStructure;
use crate::utils::log::Verbosity;

/// Knob types are tallied up to this value; higher types count as this one
pub const MAX_TALLIED_TYPE: usize = 6;

/// A side chain packing into a hole of four residues on another helix.
#[derive(Debug, Clone, PartialEq)]
pub struct Knob {
    /// Residue key of the knob
    pub residue: usize,
    /// Residue keys x, y, y+1, z; positions 1 and 2 are the sides
    pub hole: [usize; 4],
    /// Centroid distances from the knob to each hole residue
    pub hole_distance: [f32; 4],
    /// 1/2 across/in the hole, +2 for each complementary partner
    pub knob_type: usize,
    pub complementary: Vec<usize>,
    pub angle: Option<f32>,
    /// Number of knobs in the cycle this knob belongs to; 2 for pairwise
    pub order: Option<usize>,
}

impl Knob {
    pub fn new(residue: usize, hole: [usize; 4], hole_distance: [f32; 4]) -> Self {
        Knob {
            residue,
            hole,
            hole_distance,
            knob_type: 0,
            complementary: Vec::new(),
            angle: None,
            order: None,
        }
    }

    pub fn sides(&self) -> [usize; 2] {
        [self.hole[1], self.hole[2]]
    }

    pub fn has_side(&self, residue: usize) -> bool {
        self.hole[1] == residue || self.hole[2] == residue
    }

    /// Sides are sequence neighbours
    pub fn has_adjacent_sides(&self) -> bool {
        self.hole[2] == self.hole[1] + 1
    }

    /// x, x+3, x+4, x+7 spacing of an a or d knob
    pub fn is_canonical_hole(&self) -> bool {
        self.has_adjacent_sides() && self.hole[1] == self.hole[0] + 3 && self.hole[3] == self.hole[2] + 3
    }

    pub fn raise_order(&mut self, order: usize) -> bool {
        match self.order {
            Some(current) if current >= order => false,
            _ => {
                self.order = Some(order);
                true
            }
        }
    }
}

/// Choose four contacts forming a hole from a contact list sorted by residue key.
/// The first combination with x, x+3, x+4, x+7 spacing wins; failing that, the
/// first one whose middle residues are adjacent. Returns positions in `keys`.
pub fn select_hole(keys: &[usize]) -> Option<[usize; 4]> {
    let n = keys.len();
    if n < 4 {
        return None;
    }
    if n == 4 {
        return Some([0, 1, 2, 3]);
    }
    let mut fallback: Option<[usize; 4]> = None;
    for a in 0..n - 3 {
        for b in a + 1..n - 2 {
            for c in b + 1..n - 1 {
                if keys[c] != keys[b] + 1 {
                    continue;
                }
                for d in c + 1..n {
                    if keys[b] == keys[a] + 3 && keys[d] == keys[c] + 3 {
                        return Some([a, b, c, d]);
                    }
                    if fallback.is_none() {
                        fallback = Some([a, b, c, d]);
                    }
                }
            }
        }
    }
    fallback
}

/// Build a knob from a residue and its first four contacts. `None` unless the
/// middle hole residues are adjacent.
pub fn classify_knob(
    structure: &HelicalStructure, residue: usize, contacts: &[Contact], insertion_cutoff: f32, verbosity: Verbosity,
) -> Option<Knob> {
    if contacts.len() < 4 {
        return None;
    }
    let hole = [contacts[0].residue, contacts[1].residue, contacts[2].residue, contacts[3].residue];
    let hole_distance = [contacts[0].distance, contacts[1].distance, contacts[2].distance, contacts[3].distance];
    let mut knob = Knob::new(residue, hole, hole_distance);
    if !knob.has_adjacent_sides() {
        return None;
    }
    knob.knob_type = 1;
    if !knob.is_canonical_hole() {
        verbosity.warn(&format!(
            "odd knob: residue {} ({}) fits a hole without x,x+3,x+4,x+7 spacing ({},{},{},{})",
            residue, structure.residues[residue].label(), hole[0], hole[1], hole[2], hole[3]
        ));
    }
    let descriptor = &structure.residues[residue].descriptor;
    let hole_descriptors: Vec<_> = hole.iter().map(|&h| &structure.residues[h].descriptor).collect();
    if mean_insertion_distance(descriptor, &hole_descriptors) < insertion_cutoff {
        knob.knob_type = 2;
    } else {
        verbosity.verbose(&format!("residue {}: knob not in hole", residue));
    }
    knob.angle = packing_angle(descriptor, hole_descriptors[1], hole_descriptors[2]);
    Some(knob)
}

impl AnalysisSession {
    /// Contacts, knobs and holes for every helix pair, then complementarity,
    /// duplicates and per-helix tallies.
    pub fn find_knobs_and_holes(&mut self) -> Result<()> {
        let n_helices = self.structure.num_helices();
        for i in 0..n_helices {
            for j in i + 1..n_helices {
                self.verbosity.debug(&format!("helices {:3},{:3}:", i, j));
                self.contacts.clear();
                let n_pairs = self.contacts.measure_helix_pair(
                    &self.structure, i, j, self.config.packing_cutoff, self.verbosity,
                );
                if n_pairs == 0 {
                    continue;
                }
                self.best_kih(&[i, j]);
                self.report_kih(&[i, j])?;
            }
        }
        self.check_complementarity()?;
        self.check_duplication()?;
        self.tally_knob_types();
        self.print_knobs_and_holes();
        if self.verbosity >= Verbosity::Verbose {
            let graph = create_helix_graph(&self.structure, &self.knobs);
            for cluster in helix_clusters(&graph) {
                self.verbosity.verbose(&format!("helices {:?} pack against each other", cluster));
            }
        }
        Ok(())
    }

    /// Move the best hole to the front of every contact list longer than 4.
    fn best_kih(&mut self, helices: &[usize]) {
        for &helix in helices {
            for r in self.structure.helices[helix].residues.clone() {
                if self.contacts.len_of(r) <= 4 {
                    continue;
                }
                self.verbosity.verbose(&format!(
                    "residue {} ({}) has > 4 contacts; looking for holes", r, self.structure.residues[r].label()
                ));
                let keys: Vec<usize> = self.contacts.of(r).iter().map(|c| c.residue).collect();
                let chosen = match select_hole(&keys) {
                    Some(chosen) => chosen,
                    None => continue,
                };
                let list = self.contacts.of_mut(r);
                let mut reordered: Vec<Contact> = chosen.iter().map(|&p| list[p]).collect();
                reordered.extend(list.iter().enumerate().filter(|(p, _)| !chosen.contains(p)).map(|(_, c)| *c));
                *list = reordered;
                if self.verbosity >= Verbosity::Verbose {
                    let hole: Vec<String> = self.contacts.of(r)[..4].iter()
                        .map(|c| self.residue_text(c.residue))
                        .collect();
                    self.verbosity.verbose(&format!("- includes hole: {}", hole.join("\t")));
                }
            }
        }
    }

    /// Promote residues with at least four contacts to knobs.
    fn report_kih(&mut self, helices: &[usize]) -> Result<()> {
        for &helix in helices {
            for r in self.structure.helices[helix].residues.clone() {
                if self.contacts.len_of(r) < 4 {
                    continue;
                }
                if self.knobs.len() == self.config.limits.knobs {
                    return Err(SocketError::CapacityExceeded { what: "knobs", limit: self.config.limits.knobs });
                }
                let knob = classify_knob(
                    &self.structure, r, self.contacts.of(r), self.config.insertion_cutoff, self.verbosity,
                );
                if let Some(knob) = knob {
                    self.verbosity.verbose(&format!(
                        "knob {} ({}, helix {}) type {} hole {:?}",
                        self.knobs.len(), self.residue_text(r), helix, knob.knob_type, knob.hole
                    ));
                    self.knobs.push(knob);
                }
            }
        }
        Ok(())
    }

    fn tally_knob_types(&mut self) {
        let mut tallies = vec![super::HelixTally::default(); self.structure.num_helices()];
        for knob in &self.knobs {
            let knob_helix = self.structure.helix_of(knob.residue);
            let hole_helix = self.structure.helix_of(knob.hole[0]);
            tallies[knob_helix].knobs += 1;
            tallies[hole_helix].holes += 1;
            for j in 0..=knob.knob_type.min(MAX_TALLIED_TYPE) {
                tallies[knob_helix].knob_types[j] += 1;
                tallies[hole_helix].hole_types[j] += 1;
            }
        }
        if self.verbosity >= Verbosity::Verbose {
            for (i, tally) in tallies.iter().enumerate() {
                for j in 0..=MAX_TALLIED_TYPE {
                    self.verbosity.verbose(&format!(
                        "helix {} has {} type {} knobs and {} type {} holes",
                        i, tally.knob_types[j], j, tally.hole_types[j], j
                    ));
                }
            }
        }
        self.tallies = tallies;
    }

    fn print_knobs_and_holes(&mut self) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        let threshold = self.config.knob_threshold;
        let mut lines = vec![String::new(), "These are the knobs and holes:".to_string(), String::new()];
        for helix in 0..self.structure.num_helices() {
            lines.push(format!("knobs in helix {}:", helix));
            for (i, knob) in self.knobs.iter().enumerate() {
                if self.structure.helix_of(knob.residue) != helix || knob.knob_type < threshold {
                    continue;
                }
                lines.push(format!(
                    "{}) {} ({}, helix {}) type {}\t(hole: {} helix {}) packing angle {:8.3}",
                    i, knob.residue, self.residue_text(knob.residue), helix, knob.knob_type,
                    self.hole_text(knob), self.structure.helix_of(knob.hole[0]),
                    knob.angle.unwrap_or(f32::NAN)
                ));
            }
        }
        for helix in 0..self.structure.num_helices() {
            lines.push(format!("holes in helix {}:", helix));
            for knob in &self.knobs {
                if self.structure.helix_of(knob.hole[0]) != helix || knob.knob_type < threshold {
                    continue;
                }
                lines.push(format!(
                    "{} (knob: {} ({}, helix {}))",
                    self.hole_text(knob), knob.residue,
                    self.structure.residues[knob.residue].label(), self.structure.helix_of(knob.residue)
                ));
            }
        }
        lines.push(String::new());
        for line in lines {
            self.say(&line);
        }
    }

    fn hole_text(&self, knob: &Knob) -> String {
        knob.hole.iter().map(|&h| format!(" {}", self.residue_text(h))).collect::<Vec<_>>().join(",")
    }
}
