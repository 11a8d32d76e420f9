// File: contact.rs
// Description: Side-chain contacts between residues of two helices

use crate::geometry::core::centroid_distance;
use crate::structure::core::HelicalStructure;
use crate::utils::log::Verbosity;

/// Contacts kept per residue
pub const MAX_CONTACTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub residue: usize,
    pub distance: f32,
}

/// Contact lists of every residue, indexed by residue key.
/// Lists are filled in residue key order, so each list is sorted by key.
#[derive(Debug, Clone, Default)]
pub struct ContactTable {
    lists: Vec<Vec<Contact>>,
}

impl ContactTable {
    pub fn new(num_residues: usize) -> Self {
        ContactTable { lists: vec![Vec::new(); num_residues] }
    }

    pub fn clear(&mut self) {
        self.lists.iter_mut().for_each(|list| list.clear());
    }

    pub fn of(&self, residue: usize) -> &[Contact] {
        &self.lists[residue]
    }

    pub fn of_mut(&mut self, residue: usize) -> &mut Vec<Contact> {
        &mut self.lists[residue]
    }

    pub fn len_of(&self, residue: usize) -> usize {
        self.lists[residue].len()
    }

    pub fn num_residues(&self) -> usize {
        self.lists.len()
    }

    /// Record that `other` touches `residue`. Lists longer than 4 are flagged;
    /// contacts beyond `MAX_CONTACTS` are dropped.
    pub fn add_contact(
        &mut self, structure: &HelicalStructure, residue: usize, other: usize, distance: f32, verbosity: Verbosity,
    ) {
        let count = self.lists[residue].len() + 1;
        if count > 4 {
            verbosity.info(&format!(
                "{} sidechains in contact with residue {:4} ({} helix {:3})",
                count, residue, structure.residues[residue].label(), structure.helix_of(residue)
            ));
        }
        if count > MAX_CONTACTS {
            verbosity.warn(&format!(
                "residue {} ({}) has more than {} contacts; contact with residue {} dropped",
                residue, structure.residues[residue].label(), MAX_CONTACTS, other
            ));
            return;
        }
        self.lists[residue].push(Contact { residue: other, distance });
    }

    /// Measure every residue pair of two helices and record symmetric contacts
    /// for centroid distances below `cutoff`. Returns the number of contacting pairs.
    pub fn measure_helix_pair(
        &mut self, structure: &HelicalStructure, helix1: usize, helix2: usize, cutoff: f32, verbosity: Verbosity,
    ) -> usize {
        if helix1 == helix2 {
            return 0;
        }
        verbosity.debug(&format!("contacts between helix {:3} v helix {:3}", helix1, helix2));
        let mut n_pairs = 0;
        for i in structure.helices[helix1].residues.clone() {
            for j in structure.helices[helix2].residues.clone() {
                let d = match centroid_distance(&structure.residues[i].descriptor, &structure.residues[j].descriptor) {
                    Some(d) => d,
                    None => continue,
                };
                if d < cutoff {
                    if verbosity >= Verbosity::Debug {
                        verbosity.debug(&format!(
                            "{:4} ({}, helix {:3}),{:4} ({}, helix {:3}): {:8.3}",
                            i, structure.residues[i].label(), helix1,
                            j, structure.residues[j].label(), helix2, d
                        ));
                    }
                    self.add_contact(structure, i, j, d, verbosity);
                    self.add_contact(structure, j, i, d, verbosity);
                    n_pairs += 1;
                }
            }
        }
        n_pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::coordinate::Coordinate;
    use crate::structure::core::{Helix, Residue, ResidueId};

    // Two 4-residue helices; centroids along x, the second helix offset in y
    fn two_helices(offset: f32) -> HelicalStructure {
        let mut residues = Vec::new();
        for h in 0..2 {
            for i in 0..4 {
                let mut residue = Residue::new(ResidueId::new(b'A' + h as u8, i + 1, b' '), b'L', h);
                residue.descriptor.centroid = Some(Coordinate::new(i as f32 * 10.0, h as f32 * offset, 0.0));
                residues.push(residue);
            }
        }
        let helices = vec![
            Helix::new(residues[0].id, residues[3].id, 0..4),
            Helix::new(residues[4].id, residues[7].id, 4..8),
        ];
        HelicalStructure::from_tables("test", helices, residues)
    }

    #[test]
    fn test_contact_symmetry() {
        let structure = two_helices(5.0);
        let mut table = ContactTable::new(structure.num_residues());
        let n = table.measure_helix_pair(&structure, 0, 1, 7.0, Verbosity::Quiet);
        assert_eq!(n, 4);
        for i in 0..structure.num_residues() {
            for contact in table.of(i) {
                let back = table.of(contact.residue).iter().find(|c| c.residue == i).unwrap();
                assert_eq!(back.distance, contact.distance);
                assert_ne!(structure.helix_of(i), structure.helix_of(contact.residue));
            }
        }
        assert_eq!(table.of(0), &[Contact { residue: 4, distance: 5.0 }]);
    }

    #[test]
    fn test_no_contact_without_centroid() {
        let mut structure = two_helices(5.0);
        structure.residues[0].descriptor.centroid = None;
        let mut table = ContactTable::new(structure.num_residues());
        assert_eq!(table.measure_helix_pair(&structure, 0, 1, 7.0, Verbosity::Quiet), 3);
        assert!(table.of(0).is_empty());
        assert_eq!(table.measure_helix_pair(&structure, 1, 1, 7.0, Verbosity::Quiet), 0);
    }

    #[test]
    fn test_contact_cap() {
        let structure = two_helices(5.0);
        let mut table = ContactTable::new(structure.num_residues());
        for k in 0..12 {
            table.add_contact(&structure, 0, 4, k as f32, Verbosity::Quiet);
        }
        assert_eq!(table.len_of(0), MAX_CONTACTS);
        table.clear();
        assert_eq!(table.len_of(0), 0);
    }
}
