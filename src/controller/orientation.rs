// File: orientation.rs
// Description: Relative direction of helix pairs within coiled coils

use std::fmt;

use rustc_hash::FxHashMap;

use crate::controller::AnalysisSession;
use crate::error::{Result, SocketError};
use crate::geometry::core::helix_axis_angle;
use crate::structure::core::HelicalStructure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Parallel,
    Antiparallel,
}

impl Orientation {
    /// Axis angles below 90 degrees are parallel
    pub fn from_angle(angle: f32) -> Self {
        if angle < 90.0 {
            Orientation::Parallel
        } else {
            Orientation::Antiparallel
        }
    }

    pub fn bit(&self) -> usize {
        match self {
            Orientation::Parallel => 0,
            Orientation::Antiparallel => 1,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Orientation::Parallel => "",
            Orientation::Antiparallel => "anti",
        }
    }

    pub fn short(&self) -> char {
        match self {
            Orientation::Parallel => 'p',
            Orientation::Antiparallel => 'a',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}parallel", self.prefix())
    }
}

/// Orientation of every helix pair with a knob-into-hole contact, shared by all candidates.
#[derive(Debug, Clone, Default)]
pub struct OrientationTable {
    pairs: FxHashMap<(usize, usize), Orientation>,
    limit: usize,
}

impl OrientationTable {
    pub fn new(limit: usize) -> Self {
        OrientationTable { pairs: FxHashMap::default(), limit }
    }

    fn key(h1: usize, h2: usize) -> (usize, usize) {
        (h1.min(h2), h1.max(h2))
    }

    pub fn get(&self, h1: usize, h2: usize) -> Option<Orientation> {
        self.pairs.get(&Self::key(h1, h2)).copied()
    }

    pub fn contains(&self, h1: usize, h2: usize) -> bool {
        self.pairs.contains_key(&Self::key(h1, h2))
    }

    /// Record a newly measured pair
    pub fn insert(&mut self, h1: usize, h2: usize, orientation: Orientation) -> Result<()> {
        let key = Self::key(h1, h2);
        if !self.pairs.contains_key(&key) && self.pairs.len() == self.limit {
            return Err(SocketError::CapacityExceeded { what: "helix pairs", limit: self.limit });
        }
        self.pairs.insert(key, orientation);
        Ok(())
    }

    /// Overwrite a pair after re-evaluation
    pub fn set(&mut self, h1: usize, h2: usize, orientation: Orientation) {
        self.pairs.insert(Self::key(h1, h2), orientation);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn require(&self, h1: usize, h2: usize) -> Result<Orientation> {
        self.get(h1, h2).ok_or_else(|| {
            SocketError::Orientation(format!("orientation of helices {} and {} was never determined", h1, h2))
        })
    }

    /// Antiparallel if any measured pair among `helices` is antiparallel
    pub fn overall(&self, helices: &[usize]) -> Orientation {
        for (a, &h1) in helices.iter().enumerate() {
            for &h2 in &helices[a + 1..] {
                if self.get(h1, h2) == Some(Orientation::Antiparallel) {
                    return Orientation::Antiparallel;
                }
            }
        }
        Orientation::Parallel
    }
}

/// Angle between the N-to-C vectors of two helices, from their terminal residues
pub fn terminal_orientation(structure: &HelicalStructure, h1: usize, h2: usize) -> Result<(f32, Orientation)> {
    let ends = |h: usize| {
        let helix = &structure.helices[h];
        match (structure.terminal_residue(h, &helix.start), structure.terminal_residue(h, &helix.end)) {
            (Some(n), Some(c)) => Some((n, c)),
            _ => None,
        }
    };
    match (ends(h1), ends(h2)) {
        (Some((n1, c1)), Some((n2, c2))) => {
            let angle = helix_axis_angle(
                &structure.residues[n1].descriptor, &structure.residues[c1].descriptor,
                &structure.residues[n2].descriptor, &structure.residues[c2].descriptor,
            );
            Ok((angle, Orientation::from_angle(angle)))
        }
        _ => Err(SocketError::Orientation(format!(
            "could not find first and last residues of helices {} and {}", h1, h2
        ))),
    }
}

impl AnalysisSession {
    /// Any knob of one helix packs into a hole of the other
    pub fn helices_touch(&self, h1: usize, h2: usize) -> bool {
        self.knobs.iter().any(|knob| {
            let knob_helix = self.structure.helix_of(knob.residue);
            let hole_helix = self.structure.helix_of(knob.hole[0]);
            (knob_helix == h1 && hole_helix == h2) || (knob_helix == h2 && hole_helix == h1)
        })
    }

    /// Measure unmeasured contacting pairs of candidate `c` and set its orientation.
    pub fn orient_coiled_coil(&mut self, c: usize) -> Result<Orientation> {
        self.say(&format!("\n\ncoiled coil {:2}:", c));
        let helices = self.candidates[c].helices.clone();
        for (a, &h1) in helices.iter().enumerate() {
            for &h2 in &helices[a + 1..] {
                if self.orientations.contains(h1, h2) || !self.helices_touch(h1, h2) {
                    continue;
                }
                let (angle, orientation) = terminal_orientation(&self.structure, h1, h2)?;
                self.orientations.insert(h1, h2, orientation)?;
                self.say(&format!("\tangle between helices {:2} and {:2} is {:8.3}\t{}", h1, h2, angle, orientation));
            }
        }
        let overall = self.orientations.overall(&helices);
        self.candidates[c].orientation = Some(overall);
        self.say(&format!("this coiled coil is {}", overall));
        Ok(overall)
    }
}
