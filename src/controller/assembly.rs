// File: assembly.rs
// Description: Candidate coiled coils from complementary knobs and daisy chains

use crate::controller::orientation::Orientation;
use crate::controller::AnalysisSession;
use crate::error::{Result, SocketError};

/// A group of helices held together by complementary knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct CoiledCoil {
    /// Helix indices in ascending order
    pub helices: Vec<usize>,
    /// Supporting interactions: knob pairs or daisy chains
    pub tally: usize,
    /// Maximal candidate containing every helix of this one
    pub subset: Option<usize>,
    pub orientation: Option<Orientation>,
}

impl CoiledCoil {
    pub fn new(helices: Vec<usize>, tally: usize) -> Self {
        CoiledCoil { helices, tally, subset: None, orientation: None }
    }

    pub fn len(&self) -> usize {
        self.helices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helices.is_empty()
    }

    pub fn contains(&self, helix: usize) -> bool {
        self.helices.contains(&helix)
    }

    pub fn position_of(&self, helix: usize) -> Option<usize> {
        self.helices.iter().position(|&h| h == helix)
    }

    /// A pair of helices held by a single knob pair
    pub fn is_ignored(&self) -> bool {
        self.helices.len() == 2 && self.tally < 2
    }

    pub fn is_true(&self) -> bool {
        self.subset.is_none() && !self.is_ignored()
    }

    pub fn is_subset_of(&self, other: &CoiledCoil) -> bool {
        self.helices.iter().all(|h| other.contains(*h))
    }
}

/// Mark every candidate contained in another as its subset and collapse the
/// pointers so that each one names a candidate that is not itself a subset.
/// Daisy chain owners pointing at a demoted candidate follow it.
pub fn resolve_subsets(candidates: &mut [CoiledCoil], owners: &mut [Option<usize>]) {
    let n = candidates.len();
    for i in 0..n {
        for k in 0..n {
            if k == i || candidates[k].subset == Some(i) || candidates[i].subset.is_some() {
                continue;
            }
            if !candidates[i].is_subset_of(&candidates[k]) {
                continue;
            }
            let target = candidates[k].subset.unwrap_or(k);
            if target == i {
                continue;
            }
            candidates[i].subset = Some(target);
            for candidate in candidates.iter_mut() {
                if candidate.subset == Some(i) {
                    candidate.subset = Some(target);
                }
            }
            for owner in owners.iter_mut() {
                if *owner == Some(i) {
                    *owner = Some(target);
                }
            }
        }
    }
}

impl AnalysisSession {
    /// Build the candidate list, resolve subsets and set helix orders.
    /// Returns the number of candidates.
    pub fn determine_order(&mut self) -> Result<usize> {
        let threshold = self.config.knob_threshold;
        let limit = self.config.limits.coiled_coils;
        let knob_lines: Vec<String> = self.knobs.iter().enumerate()
            .map(|(i, knob)| {
                let order = knob.order.map_or("none".to_string(), |o| o.to_string());
                format!(
                    "knob {:3} (residue {} = {}) type {} order {}",
                    i, knob.residue, self.residue_text(knob.residue), knob.knob_type, order
                )
            })
            .collect();
        self.say("");
        for line in knob_lines {
            self.say(&line);
        }

        self.candidates.clear();
        for knob in &self.knobs {
            if knob.knob_type < threshold {
                continue;
            }
            let partner = match knob.complementary.first() {
                Some(&partner) => partner,
                None => continue,
            };
            let h1 = self.structure.helix_of(knob.residue);
            let h2 = self.structure.helix_of(self.knobs[partner].residue);
            let pair = vec![h1.min(h2), h1.max(h2)];
            match self.candidates.iter_mut().find(|c| c.helices == pair) {
                Some(candidate) => candidate.tally += 1,
                None => {
                    if self.candidates.len() == limit {
                        return Err(SocketError::CapacityExceeded { what: "coiled coils", limit });
                    }
                    self.candidates.push(CoiledCoil::new(pair, 1));
                }
            }
        }
        // Each pairwise interaction was counted from both knobs
        self.candidates.iter_mut().for_each(|c| c.tally /= 2);

        for d in 0..self.daisy_chains.len() {
            let mut helices: Vec<usize> = self.daisy_chains[d].knobs.iter()
                .map(|&k| self.structure.helix_of(self.knobs[k].residue))
                .collect();
            helices.sort_unstable();
            helices.dedup();
            let owner = match self.candidates.iter().position(|c| c.helices == helices) {
                Some(k) => {
                    self.candidates[k].tally += 1;
                    k
                }
                None => {
                    if self.candidates.len() == limit {
                        return Err(SocketError::CapacityExceeded { what: "coiled coils", limit });
                    }
                    self.candidates.push(CoiledCoil::new(helices, 1));
                    self.candidates.len() - 1
                }
            };
            self.daisy_chains[d].coiled_coil = Some(owner);
        }

        let mut owners: Vec<Option<usize>> = self.daisy_chains.iter().map(|chain| chain.coiled_coil).collect();
        resolve_subsets(&mut self.candidates, &mut owners);
        for (chain, owner) in self.daisy_chains.iter_mut().zip(owners) {
            chain.coiled_coil = owner;
        }

        self.print_candidates();
        self.assign_helix_orders();
        Ok(self.candidates.len())
    }

    fn print_candidates(&mut self) {
        let mut lines = vec![String::new()];
        for (i, candidate) in self.candidates.iter().enumerate() {
            let helices: String = candidate.helices.iter().map(|h| format!("{:3}", h)).collect();
            let mut line = format!(
                "coiled coil {:2}: {:2} helices {}\tfrequency {}", i, candidate.len(), helices, candidate.tally
            );
            if candidate.is_ignored() {
                line.push_str(" IGNORING");
            }
            if let Some(subset) = candidate.subset {
                line.push_str(&format!(" (subset of coiled coil {:2})", subset));
                if candidate.len() > 2 {
                    let warning = format!(
                        "THESE HELICES HAVE BOTH {}-STRANDED AND {}-STRANDED CHARACTERISTICS - THIS MAY MAKE THE REGISTER ASSIGNMENT UNRELIABLE",
                        candidate.len(), self.candidates[subset].len()
                    );
                    line.push_str(&format!(" WARNING: {}", warning));
                    self.verbosity.warn(&format!("coiled coil {}: {}", i, warning));
                }
            }
            lines.push(line);
        }
        for line in lines {
            self.say(&line);
        }
    }

    fn assign_helix_orders(&mut self) {
        let mut lines = Vec::new();
        for h in 0..self.structure.num_helices() {
            let order = self.candidates.iter()
                .filter(|c| c.subset.is_none() && c.contains(h))
                .map(|c| c.len())
                .max()
                .unwrap_or(0);
            self.structure.helices[h].order = order;
            if order > 0 {
                lines.push(format!("helix {} is in a {}-stranded coiled coil", h, order));
            }
        }
        for (d, chain) in self.daisy_chains.iter().enumerate() {
            if let Some(cc) = chain.coiled_coil {
                lines.push(format!("daisy chain {:2} is in coiled coil {:2}", d, cc));
            }
        }
        for line in lines {
            self.say(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_coiled_coil() {
        let mut pair = CoiledCoil::new(vec![0, 1], 1);
        assert!(pair.is_ignored());
        assert!(!pair.is_true());
        pair.tally = 2;
        assert!(pair.is_true());
        let mut trimer = CoiledCoil::new(vec![0, 1, 2], 1);
        assert!(trimer.is_true());
        trimer.subset = Some(3);
        assert!(!trimer.is_true());
    }

    #[test]
    fn test_subsets_collapse() {
        let mut candidates = vec![
            CoiledCoil::new(vec![0, 1], 3),
            CoiledCoil::new(vec![0, 1, 2], 1),
            CoiledCoil::new(vec![0, 1, 2, 3], 1),
            CoiledCoil::new(vec![4, 5], 2),
        ];
        let mut owners = vec![Some(1), Some(2)];
        resolve_subsets(&mut candidates, &mut owners);
        assert_eq!(candidates[0].subset, Some(2));
        assert_eq!(candidates[1].subset, Some(2));
        assert_eq!(candidates[2].subset, None);
        assert_eq!(candidates[3].subset, None);
        assert_eq!(owners, vec![Some(2), Some(2)]);
        for c in &candidates {
            if let Some(s) = c.subset {
                assert!(candidates[s].subset.is_none());
            }
        }
    }

    #[test]
    fn test_equal_sets_do_not_loop() {
        let mut candidates = vec![CoiledCoil::new(vec![0, 1], 2), CoiledCoil::new(vec![0, 1], 1)];
        let mut owners = vec![];
        resolve_subsets(&mut candidates, &mut owners);
        assert_eq!(candidates[0].subset, Some(1));
        assert_eq!(candidates[1].subset, None);
    }
}
