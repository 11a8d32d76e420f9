// File: atom.rs
// Atoms attached to helical residues and the raw coordinate records they come from

use crate::structure::coordinate::Coordinate;

/// Kind of a coordinate record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Atom,
    Hetatm,
}

/// One parsed ATOM/HETATM line before it is attached to a residue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomRecord {
    pub kind: RecordKind,
    pub atom_serial: u64,
    pub atom_name: [u8; 4],
    pub alt_loc: u8,
    pub res_name: [u8; 3],
    pub chain: u8,
    pub res_serial: i32,
    pub icode: u8,
    pub coordinate: Coordinate,
}

impl AtomRecord {
    /// Only the first alternate location is kept
    pub fn is_primary_location(&self) -> bool {
        self.alt_loc == b' ' || self.alt_loc == b'A'
    }
}

/// An atom of a helical residue. `residue` indexes `HelicalStructure::residues`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub name: [u8; 4],
    pub serial: u64,
    pub coordinate: Coordinate,
    pub residue: usize,
}

const ALPHA_HYDROGENS: [[u8; 4]; 6] = [*b" HA ", *b"1HA ", *b"2HA ", *b" HA2", *b" HA3", *b"HA2 "];

impl Atom {
    pub fn new(name: [u8; 4], serial: u64, coordinate: Coordinate, residue: usize) -> Self {
        Atom { name, serial, coordinate, residue }
    }

    pub fn from_record(record: &AtomRecord, residue: usize) -> Self {
        Atom::new(record.atom_name, record.atom_serial, record.coordinate, residue)
    }

    pub fn is_hydrogen(&self) -> bool {
        is_hydrogen_name(&self.name)
    }

    pub fn is_alpha_hydrogen(&self) -> bool {
        ALPHA_HYDROGENS.contains(&self.name)
    }

    /// Main-chain atoms never enter a side-chain centroid
    pub fn is_main_chain(&self) -> bool {
        matches!(&self.name, b" N  " | b" C  " | b" O  " | b" OXT")
    }

    pub fn is_alpha_carbon(&self) -> bool {
        &self.name == b" CA "
    }

    pub fn name_str(&self) -> &str {
        std::str::from_utf8(&self.name).unwrap_or("????")
    }
}

pub fn is_hydrogen_name(name: &[u8; 4]) -> bool {
    name[1] == b'H' || name[0] == b'H'
}
