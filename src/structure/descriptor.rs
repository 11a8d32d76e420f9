// File: descriptor.rs
// Per-residue geometric descriptors: reference atom, side-chain end, side-chain centroid, CB

use crate::error::{Result, SocketError};
use crate::structure::aminoacid::AminoAcid;
use crate::structure::coordinate::{approx_cb, Coordinate, PSEUDO_CB_OFFSET};
use crate::structure::core::HelicalStructure;
use crate::utils::log::Verbosity;

/// Points of a residue used by contact detection and knob classification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResidueDescriptor {
    /// Configured backbone reference atom (CA unless changed)
    pub reference: Coordinate,
    /// Mean of the side-chain end atoms
    pub terminal: Coordinate,
    /// Unweighted mean of side-chain atoms; `None` means the residue never forms a contact
    pub centroid: Option<Coordinate>,
    /// CB, or a virtual CB for glycine
    pub side_chain: Option<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptorOptions {
    pub reference_atom: [u8; 4],
    pub include_alpha_carbons: bool,
}

impl Default for DescriptorOptions {
    fn default() -> Self {
        DescriptorOptions { reference_atom: *b" CA ", include_alpha_carbons: false }
    }
}

/// Fill `descriptor` for every residue of the structure.
pub fn build_descriptors(
    structure: &mut HelicalStructure,
    options: &DescriptorOptions,
    verbosity: Verbosity,
) -> Result<()> {
    for key in 0..structure.num_residues() {
        let descriptor = describe_residue(structure, key, options, verbosity)?;
        structure.residues[key].descriptor = descriptor;
    }
    Ok(())
}

pub fn describe_residue(
    structure: &HelicalStructure,
    key: usize,
    options: &DescriptorOptions,
    verbosity: Verbosity,
) -> Result<ResidueDescriptor> {
    let residue = &structure.residues[key];
    let reference = match structure.find_atom(key, &options.reference_atom) {
        Some(atom) => atom.coordinate,
        None => {
            return Err(SocketError::MissingReferenceAtom {
                residue: residue.label(),
                atom: String::from_utf8_lossy(&options.reference_atom).to_string(),
            })
        }
    };

    let end_atoms: Vec<&Coordinate> = residue.aa.end_atoms().iter()
        .filter_map(|name| structure.find_atom(key, name))
        .map(|atom| &atom.coordinate)
        .collect();
    let terminal = match Coordinate::mean(end_atoms) {
        Some(terminal) => terminal,
        None => {
            // Fall back to the last atom listed for the residue
            let last = structure.atoms_of(key).last().ok_or_else(|| SocketError::MissingReferenceAtom {
                residue: residue.label(),
                atom: String::from_utf8_lossy(&options.reference_atom).to_string(),
            })?;
            verbosity.warn(&format!(
                "residue {} ({}) has no 'end' atoms; using atom {} \"{}\" as end atom",
                key, residue.label(), last.serial, last.name_str()
            ));
            last.coordinate
        }
    };

    // Glycine has no side chain, so its centre is CA itself
    let is_glycine = residue.aa == AminoAcid::G;
    let centroid = Coordinate::mean(
        structure.atoms_of(key)
            .filter(|atom| !atom.is_main_chain())
            .filter(|atom| options.include_alpha_carbons || is_glycine || !atom.is_alpha_carbon())
            .filter(|atom| options.include_alpha_carbons || !atom.is_alpha_hydrogen())
            .map(|atom| &atom.coordinate),
    );

    let side_chain = side_chain_point(structure, key);
    if verbosity >= Verbosity::Debug {
        verbosity.debug(&format!(
            "residue {} ({}) reference {:?} end {:?} centre {:?}",
            key, residue.label(), reference, terminal, centroid
        ));
    }
    Ok(ResidueDescriptor { reference, terminal, centroid, side_chain })
}

fn side_chain_point(structure: &HelicalStructure, key: usize) -> Option<Coordinate> {
    if let Some(cb) = structure.find_atom(key, b" CB ") {
        return Some(cb.coordinate);
    }
    if structure.residues[key].aa != AminoAcid::G {
        return None;
    }
    let ca = structure.find_atom(key, b" CA ")?.coordinate;
    match (structure.find_atom(key, b" N  "), structure.find_atom(key, b" C  ")) {
        (Some(n), Some(c)) => Some(approx_cb(&ca, &n.coordinate, &c.coordinate)),
        _ => Some(ca.add(&PSEUDO_CB_OFFSET)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::atom::Atom;
    use crate::structure::core::{Helix, Residue, ResidueId};

    fn single_residue(letter: u8, atoms: &[(&[u8; 4], [f32; 3])]) -> HelicalStructure {
        let residue = Residue::new(ResidueId::new(b'A', 1, b' '), letter, 0);
        let helix = Helix::new(residue.id, residue.id, 0..1);
        let mut structure = HelicalStructure::from_tables("test", vec![helix], vec![residue]);
        for (i, (name, xyz)) in atoms.iter().enumerate() {
            structure.push_atom(Atom::new(**name, i as u64 + 1, Coordinate::new(xyz[0], xyz[1], xyz[2]), 0));
        }
        structure
    }

    #[test]
    fn test_leucine_descriptor() {
        let structure = single_residue(b'L', &[
            (b" N  ", [0.0, 0.0, 0.0]),
            (b" CA ", [1.0, 0.0, 0.0]),
            (b" C  ", [2.0, 0.0, 0.0]),
            (b" O  ", [3.0, 0.0, 0.0]),
            (b" CB ", [1.0, 1.0, 0.0]),
            (b" CG ", [1.0, 2.0, 0.0]),
            (b" CD1", [0.0, 3.0, 0.0]),
            (b" CD2", [2.0, 3.0, 0.0]),
        ]);
        let d = describe_residue(&structure, 0, &DescriptorOptions::default(), Verbosity::Quiet).unwrap();
        assert_eq!(d.reference, Coordinate::new(1.0, 0.0, 0.0));
        assert_eq!(d.terminal, Coordinate::new(1.0, 3.0, 0.0));
        // CB, CG, CD1, CD2
        assert_eq!(d.centroid, Some(Coordinate::new(1.0, 2.25, 0.0)));
        assert_eq!(d.side_chain, Some(Coordinate::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_alpha_carbon_option() {
        let structure = single_residue(b'A', &[
            (b" N  ", [0.0, 0.0, 0.0]),
            (b" CA ", [1.0, 0.0, 0.0]),
            (b" CB ", [1.0, 2.0, 0.0]),
        ]);
        let options = DescriptorOptions { include_alpha_carbons: true, ..Default::default() };
        let d = describe_residue(&structure, 0, &options, Verbosity::Quiet).unwrap();
        assert_eq!(d.centroid, Some(Coordinate::new(1.0, 1.0, 0.0)));
        let d = describe_residue(&structure, 0, &DescriptorOptions::default(), Verbosity::Quiet).unwrap();
        assert_eq!(d.centroid, Some(Coordinate::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_glycine_virtual_cb() {
        let structure = single_residue(b'G', &[(b" CA ", [1.0, 0.0, 0.0])]);
        let d = describe_residue(&structure, 0, &DescriptorOptions::default(), Verbosity::Quiet).unwrap();
        // Glycine keeps CA in its centroid and uses it as its end atom
        assert_eq!(d.centroid, Some(Coordinate::new(1.0, 0.0, 0.0)));
        assert_eq!(d.terminal, Coordinate::new(1.0, 0.0, 0.0));
        let cb = d.side_chain.unwrap();
        assert!((cb.x - 2.126).abs() < 1e-5);
    }

    #[test]
    fn test_missing_reference_atom() {
        let structure = single_residue(b'A', &[(b" CB ", [1.0, 2.0, 0.0])]);
        let err = describe_residue(&structure, 0, &DescriptorOptions::default(), Verbosity::Quiet).unwrap_err();
        assert!(matches!(err, SocketError::MissingReferenceAtom { .. }));
    }

    #[test]
    fn test_backbone_only_has_no_centroid() {
        let structure = single_residue(b'A', &[
            (b" N  ", [0.0, 0.0, 0.0]),
            (b" CA ", [1.0, 0.0, 0.0]),
            (b" C  ", [2.0, 0.0, 0.0]),
        ]);
        let d = describe_residue(&structure, 0, &DescriptorOptions::default(), Verbosity::Quiet).unwrap();
        assert!(d.centroid.is_none());
        assert!(d.side_chain.is_none());
    }
}
