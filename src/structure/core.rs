// File: core.rs
// Helix and residue tables of one structure

use std::fmt;
use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::structure::aminoacid::AminoAcid;
use crate::structure::atom::Atom;
use crate::structure::descriptor::ResidueDescriptor;

/// Identifies a residue as written in PDB and DSSP files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueId {
    pub chain: u8,
    pub serial: i32,
    pub icode: u8,
}

impl ResidueId {
    pub fn new(chain: u8, serial: i32, icode: u8) -> Self {
        ResidueId { chain, serial, icode }
    }
    pub fn chain_char(&self) -> char {
        self.chain as char
    }
    pub fn icode_char(&self) -> char {
        self.icode as char
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icode == b' ' {
            write!(f, "{}:{}", self.serial, self.chain as char)
        } else {
            write!(f, "{}{}:{}", self.serial, self.icode as char, self.chain as char)
        }
    }
}

/// A helical residue. Residues are stored in DSSP order, so the index of a
/// residue in the table is its key and differences of keys are sequence offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub id: ResidueId,
    pub aa: AminoAcid,
    /// One-letter code as DSSP wrote it
    pub dssp_letter: u8,
    pub helix: usize,
    pub atoms: Vec<usize>,
    pub descriptor: ResidueDescriptor,
}

impl Residue {
    pub fn new(id: ResidueId, dssp_letter: u8, helix: usize) -> Self {
        Residue {
            id,
            aa: AminoAcid::from_one(dssp_letter),
            dssp_letter,
            helix,
            atoms: Vec::new(),
            descriptor: ResidueDescriptor::default(),
        }
    }

    /// "LEU  12:A" style label used in diagnostics
    pub fn label(&self) -> String {
        format!("{} {}", self.aa.three_letter(), self.id)
    }
}

/// An alpha helix: a contiguous run of residue keys within one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    pub start: ResidueId,
    pub end: ResidueId,
    pub chain: u8,
    pub residues: Range<usize>,
    /// Largest number of helices of a non-subset candidate containing this helix
    pub order: usize,
}

impl Helix {
    pub fn new(start: ResidueId, end: ResidueId, residues: Range<usize>) -> Self {
        Helix { start, end, chain: start.chain, residues, order: 0 }
    }
    pub fn len(&self) -> usize {
        self.residues.len()
    }
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
    pub fn contains(&self, residue: usize) -> bool {
        self.residues.contains(&residue)
    }
}

/// Helix table, residue table and atoms of one analysed structure.
#[derive(Debug, Clone, Default)]
pub struct HelicalStructure {
    /// Short identifier printed at the start of result lines
    pub code: String,
    pub helices: Vec<Helix>,
    pub residues: Vec<Residue>,
    pub atoms: Vec<Atom>,
    lookup: FxHashMap<ResidueId, usize>,
}

impl HelicalStructure {
    pub fn new(code: &str) -> Self {
        HelicalStructure { code: code.to_string(), ..Default::default() }
    }

    /// Build from complete tables. Residues must list helices contiguously.
    pub fn from_tables(code: &str, helices: Vec<Helix>, residues: Vec<Residue>) -> Self {
        let mut structure = HelicalStructure::new(code);
        structure.helices = helices;
        structure.residues = residues;
        structure.reindex();
        structure
    }

    pub fn reindex(&mut self) {
        self.lookup.clear();
        for (key, residue) in self.residues.iter().enumerate() {
            self.lookup.insert(residue.id, key);
        }
    }

    pub fn num_helices(&self) -> usize {
        self.helices.len()
    }
    pub fn num_residues(&self) -> usize {
        self.residues.len()
    }
    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_key(&self, id: &ResidueId) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn helix_of(&self, residue: usize) -> usize {
        self.residues[residue].helix
    }

    /// Attach an atom to the residue with key `residue`
    pub fn push_atom(&mut self, atom: Atom) {
        let index = self.atoms.len();
        let residue = atom.residue;
        self.atoms.push(atom);
        self.residues[residue].atoms.push(index);
    }

    pub fn atoms_of(&self, residue: usize) -> impl Iterator<Item = &Atom> {
        self.residues[residue].atoms.iter().map(move |&i| &self.atoms[i])
    }

    pub fn find_atom(&self, residue: usize, name: &[u8; 4]) -> Option<&Atom> {
        self.atoms_of(residue).find(|atom| &atom.name == name)
    }

    /// Key of the residue at a helix terminus, matched by number, insertion code and helix
    pub fn terminal_residue(&self, helix: usize, id: &ResidueId) -> Option<usize> {
        self.residue_key(id).filter(|&key| self.residues[key].helix == helix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::coordinate::Coordinate;

    fn toy_structure() -> HelicalStructure {
        let mut residues = Vec::new();
        for i in 0..4 {
            residues.push(Residue::new(ResidueId::new(b'A', 10 + i, b' '), b'L', 0));
        }
        for i in 0..3 {
            residues.push(Residue::new(ResidueId::new(b'B', 1 + i, b' '), b'A', 1));
        }
        let helices = vec![
            Helix::new(residues[0].id, residues[3].id, 0..4),
            Helix::new(residues[4].id, residues[6].id, 4..7),
        ];
        HelicalStructure::from_tables("toy", helices, residues)
    }

    #[test]
    fn test_lookup() {
        let structure = toy_structure();
        assert_eq!(structure.num_helices(), 2);
        assert_eq!(structure.residue_key(&ResidueId::new(b'B', 2, b' ')), Some(5));
        assert_eq!(structure.residue_key(&ResidueId::new(b'C', 2, b' ')), None);
        assert_eq!(structure.helix_of(5), 1);
        assert_eq!(structure.terminal_residue(0, &ResidueId::new(b'A', 13, b' ')), Some(3));
        assert_eq!(structure.terminal_residue(1, &ResidueId::new(b'A', 13, b' ')), None);
        assert!(structure.helices[1].contains(6));
    }

    #[test]
    fn test_push_atom() {
        let mut structure = toy_structure();
        structure.push_atom(Atom::new(*b" CA ", 1, Coordinate::new(1.0, 2.0, 3.0), 2));
        structure.push_atom(Atom::new(*b" CB ", 2, Coordinate::new(1.0, 2.0, 4.0), 2));
        assert_eq!(structure.atoms_of(2).count(), 2);
        assert_eq!(structure.find_atom(2, b" CB ").map(|a| a.serial), Some(2));
        assert!(structure.find_atom(1, b" CA ").is_none());
        assert_eq!(structure.residues[2].label(), "LEU 12:A");
    }
}
