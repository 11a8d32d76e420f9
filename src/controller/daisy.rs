// File: daisy.rs
// Description: Cyclic complementarity between knobs on three or more helices

use crate::controller::knob::Knob;
use crate::structure::core::HelicalStructure;

/// A closed cycle of knobs. Knob indices are kept sorted so that equal
/// cycles found from different starting knobs compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaisyChain {
    pub knobs: Vec<usize>,
    /// Candidate coiled coil the cycle was assigned to
    pub coiled_coil: Option<usize>,
}

impl DaisyChain {
    pub fn new(mut knobs: Vec<usize>) -> Self {
        knobs.sort_unstable();
        DaisyChain { knobs, coiled_coil: None }
    }

    pub fn contains(&self, knob: usize) -> bool {
        self.knobs.contains(&knob)
    }

    pub fn len(&self) -> usize {
        self.knobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knobs.is_empty()
    }
}

/// Which hole side is followed first at every step of the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    FirstThenSecond,
    SecondThenFirst,
}

impl SearchDirection {
    pub fn sides(&self) -> [usize; 2] {
        match self {
            SearchDirection::FirstThenSecond => [1, 2],
            SearchDirection::SecondThenFirst => [2, 1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaisyResult {
    /// Returned to the starting knob; carries the cycle length
    Closed(usize),
    /// Reached a knob already on the path other than the start
    PartiallyCyclic,
    Failed,
}

/// Depth-first search from `this` for a path of knobs that returns to `chain[0]`.
///
/// A step goes from knob `k` to knob `i` when `i` sits at one side of the hole of
/// `k` and the hole of `i` is on a different helix from `k`. The search stops at
/// the first knob whose hole sides contain a residue already on the path.
/// On success `chain` holds the path in visiting order; on failure it is
/// restored to its length on entry.
pub fn check_daisy_chain(
    knobs: &[Knob], structure: &HelicalStructure, this: usize, chain: &mut Vec<usize>,
    max_length: usize, direction: SearchDirection,
) -> DaisyResult {
    if chain.len() >= max_length {
        return DaisyResult::Failed;
    }
    let entry = chain.len();
    chain.push(this);
    let knob_helix = structure.helix_of(knobs[this].residue);
    for side in direction.sides() {
        let target = knobs[this].hole[side];
        for (i, next) in knobs.iter().enumerate() {
            if next.residue != target || structure.helix_of(next.hole[0]) == knob_helix {
                continue;
            }
            let seen = chain.iter().position(|&c| next.has_side(knobs[c].residue));
            match seen {
                Some(0) => {
                    chain.push(i);
                    return DaisyResult::Closed(chain.len());
                }
                Some(_) => {
                    chain.push(i);
                    return DaisyResult::PartiallyCyclic;
                }
                None => {
                    let depth = chain.len();
                    match check_daisy_chain(knobs, structure, i, chain, max_length, direction) {
                        DaisyResult::Failed => chain.truncate(depth),
                        found => return found,
                    }
                }
            }
        }
    }
    chain.truncate(entry);
    DaisyResult::Failed
}
