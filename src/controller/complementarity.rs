// File: complementarity.rs
// Description: Pairwise and cyclic complementarity of knobs

use crate::controller::daisy::{check_daisy_chain, DaisyChain, DaisyResult, SearchDirection};
use crate::controller::knob::Knob;
use crate::controller::AnalysisSession;
use crate::error::{Result, SocketError};
use crate::structure::core::HelicalStructure;

/// Index of the first knob sitting at side `side` (1 or 2) of the hole of knob `k`
/// whose own hole has knob `k` at one of its sides.
pub fn complementary_knob(knobs: &[Knob], k: usize, side: usize) -> Option<usize> {
    let target = knobs[k].hole[side];
    let residue = knobs[k].residue;
    knobs.iter().position(|other| other.residue == target && other.has_side(residue))
}

/// Run the cycle search from knob `start` in one direction. Returns the sorted
/// cycle when the search closes on `start`.
pub fn find_daisy_chain(
    knobs: &[Knob], structure: &HelicalStructure, start: usize, max_length: usize, direction: SearchDirection,
) -> Option<DaisyChain> {
    let mut path = Vec::new();
    match check_daisy_chain(knobs, structure, start, &mut path, max_length, direction) {
        DaisyResult::Closed(_) => Some(DaisyChain::new(path)),
        _ => None,
    }
}

impl AnalysisSession {
    pub fn check_complementarity(&mut self) -> Result<()> {
        let limits = self.config.limits;
        self.daisy_chains.clear();
        for i in 0..self.knobs.len() {
            self.knobs[i].order = None;
            for side in 1..=2 {
                let comp = match complementary_knob(&self.knobs, i, side) {
                    Some(comp) => comp,
                    None => continue,
                };
                if self.knobs[i].complementary.len() >= limits.complementary_knobs {
                    let mut partners = self.knobs[i].complementary.clone();
                    partners.push(comp);
                    return Err(SocketError::TooManyComplementaryKnobs {
                        knob: i,
                        limit: limits.complementary_knobs,
                        partners,
                    });
                }
                let knob = &mut self.knobs[i];
                knob.complementary.push(comp);
                knob.knob_type += 2;
                knob.raise_order(2);
                self.verbosity.verbose(&format!("knob {} complementary with knob {}", i, comp));
            }
            for direction in [SearchDirection::FirstThenSecond, SearchDirection::SecondThenFirst] {
                if self.daisy_chains.len() == limits.daisy_chains {
                    return Err(SocketError::CapacityExceeded { what: "daisy chains", limit: limits.daisy_chains });
                }
                let chain = find_daisy_chain(&self.knobs, &self.structure, i, limits.daisy_chain_length, direction);
                if let Some(chain) = chain {
                    self.knobs[i].raise_order(chain.len());
                    if !self.daisy_chains.iter().any(|known| known.knobs == chain.knobs) {
                        self.daisy_chains.push(chain);
                    }
                }
            }
        }
        self.annotate_daisy_chains();
        Ok(())
    }

    /// Members of a cycle count as complementary to each other.
    fn annotate_daisy_chains(&mut self) {
        let storage = self.config.limits.complementary_knobs + 1;
        if !self.daisy_chains.is_empty() {
            self.say("");
        }
        let listing: Vec<String> = self.daisy_chains.iter().enumerate()
            .map(|(d, chain)| {
                let members: String = chain.knobs.iter()
                    .map(|&k| format!("{:2} (helix {:2})\t", k, self.structure.helix_of(self.knobs[k].residue)))
                    .collect();
                format!("daisy chain {:2} : knobs {}", d, members)
            })
            .collect();
        for line in listing {
            self.say(&line);
        }
        for i in 0..self.knobs.len() {
            let first = match self.daisy_chains.iter().position(|chain| chain.contains(i)) {
                Some(first) => first,
                None => continue,
            };
            let residue = self.knobs[i].residue;
            let mut line = format!("knob {:3} (residue {} = {})", i, residue, self.residue_text(residue));
            let members = self.daisy_chains[first].knobs.clone();
            let knob = &mut self.knobs[i];
            if knob.knob_type < 3 {
                knob.knob_type += 2;
            }
            for m in members.into_iter().filter(|&m| m != i) {
                if knob.complementary.len() < storage && !knob.complementary.contains(&m) {
                    knob.complementary.push(m);
                }
            }
            let mut longest = 0;
            for chain in self.daisy_chains.iter().filter(|chain| chain.contains(i)) {
                let others: String = chain.knobs.iter().filter(|&&m| m != i).map(|m| format!("{:4}", m)).collect();
                line.push_str(&format!(" forms a {}-knob cycle with knobs {}; ", chain.len(), others));
                longest = longest.max(chain.len());
            }
            self.say(&line);
            let previous = self.knobs[i].order;
            if self.knobs[i].raise_order(longest) {
                let was = previous.map_or("none".to_string(), |o| o.to_string());
                self.verbosity.verbose(&format!("order of knob {} was {}; changing to {}", i, was, longest));
            }
        }
    }
}
