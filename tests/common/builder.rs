// File: builder.rs
// Synthetic helix and residue tables, knob sets and sessions built in code

use coildisco::cli::config::SocketConfig;
use coildisco::controller::knob::Knob;
use coildisco::controller::AnalysisSession;
use coildisco::structure::coordinate::Coordinate;
use coildisco::structure::core::{HelicalStructure, Helix, Residue, ResidueId};

/// Straight helices of `len` alanines, one per chain from 'A', 10 Å apart along x.
/// Reference atoms rise 1.5 Å per residue along z, or fall when `parallel[h]` is false.
/// Residue keys are `h * len + i`.
pub fn straight_helices(code: &str, len: usize, parallel: &[bool]) -> HelicalStructure {
    let mut residues = Vec::new();
    let mut helices = Vec::new();
    for (h, &up) in parallel.iter().enumerate() {
        let chain = b'A' + h as u8;
        for i in 0..len {
            let mut residue = Residue::new(ResidueId::new(chain, i as i32 + 1, b' '), b'A', h);
            let z = if up { 1.5 * i as f32 } else { 1.5 * (len - 1 - i) as f32 };
            residue.descriptor.reference = Coordinate::new(10.0 * h as f32, 0.0, z);
            residue.descriptor.side_chain = Some(Coordinate::new(10.0 * h as f32 + 1.0, 0.0, z));
            residue.descriptor.terminal = Coordinate::new(10.0 * h as f32 + 2.0, 0.0, z);
            residues.push(residue);
        }
        helices.push(Helix::new(residues[h * len].id, residues[h * len + len - 1].id, h * len..h * len + len));
    }
    HelicalStructure::from_tables(code, helices, residues)
}

/// A knob of the given type at `residue` with hole `hole`, 5 Å from every hole residue
pub fn knob(residue: usize, hole: [usize; 4], knob_type: usize) -> Knob {
    let mut knob = Knob::new(residue, hole, [5.0; 4]);
    knob.knob_type = knob_type;
    knob
}

/// Hole of four residues on helix `h` around residue `i`, with the partner at `side` (1 or 2)
pub fn hole_around(len: usize, h: usize, i: usize, side: usize) -> [usize; 4] {
    let base = h * len;
    if side == 1 {
        [base + i - 3, base + i, base + i + 1, base + i + 4]
    } else {
        [base + i - 4, base + i - 1, base + i, base + i + 3]
    }
}

pub fn quiet_config() -> SocketConfig {
    SocketConfig { quiet: true, ..Default::default() }
}

/// Session over `structure` with `knobs` already classified
pub fn session_with_knobs(structure: HelicalStructure, knobs: Vec<Knob>, config: SocketConfig) -> AnalysisSession {
    let mut session = AnalysisSession::new(structure, config);
    session.knobs = knobs;
    session
}

/// Knobs of a parallel dimer of two `len`-residue helices: a positions at 7 and 14
/// with the partner at side 2, d positions at 3 and 10 with the partner at side 1.
pub fn dimer_knobs(len: usize) -> Vec<Knob> {
    let mut knobs = Vec::new();
    for h in 0..2 {
        for (i, side) in [(3, 1), (7, 2), (10, 1), (14, 2)] {
            knobs.push(knob(h * len + i, hole_around(len, 1 - h, i, side), 2));
        }
    }
    knobs
}

/// Three knobs, one per helix, each packing into the next helix at side 1:
/// A:4 -> B:4 -> C:4 -> A:4
pub fn trimer_cycle_knobs(len: usize) -> Vec<Knob> {
    (0..3)
        .map(|h| knob(h * len + 4, hole_around(len, (h + 1) % 3, 4, 1), 2))
        .collect()
}

/// Residues per helix of the antiparallel dimer; a and d positions of one
/// helix face a and d positions counted from the other end of the partner
pub const ANTIPARALLEL_LENGTH: usize = 18;

/// Knobs of an antiparallel dimer built with `straight_helices(.., &[true, false])`.
/// Residue i of either helix packs against residue 17 - i of the other.
pub fn antiparallel_dimer_knobs() -> Vec<Knob> {
    let len = ANTIPARALLEL_LENGTH;
    let mut knobs = Vec::new();
    for h in 0..2 {
        // d knobs hold their partner at side 2 and a knobs at side 1
        for (i, side) in [(3, 2), (7, 1), (10, 2), (14, 1)] {
            knobs.push(knob(h * len + i, hole_around(len, 1 - h, len - 1 - i, side), 2));
        }
    }
    knobs
}
