use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use super::parser::*;
use super::*;
use crate::error::{Result, SocketError};
use crate::structure::aminoacid::{AminoAcid, HeterogenTable};
use crate::structure::atom::{is_hydrogen_name, Atom, RecordKind};
use crate::structure::core::{HelicalStructure, ResidueId};

/// A PDB reader
#[derive(Debug)]
pub struct Reader<R: io::Read> {
    /// The underlying reader
    pub reader: R,
    pub input_type: StructureFileFormat,
}

impl<R: io::Read> Reader<R> {
    pub fn new(reader: R) -> Self {
        Reader {
            reader,
            input_type: StructureFileFormat::PDB,
        }
    }

    /// Attach the atoms of the first model to the helical residues of `structure`.
    pub fn read_atoms(self, structure: &mut HelicalStructure, options: &ReadOptions) -> Result<usize> {
        read_pdb_atoms(BufReader::new(self.reader), structure, options)
    }

    pub fn read_atoms_from_gz(self, structure: &mut HelicalStructure, options: &ReadOptions) -> Result<usize> {
        read_pdb_atoms(BufReader::new(GzDecoder::new(self.reader)), structure, options)
    }
}

impl Reader<File> {
    /// Read from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Reader::new(File::open(&path)?))
    }
}

/// Scan coordinate records until the first ENDMDL. Only atoms of residues already in
/// the helix table are kept. Returns the number of atoms attached.
pub fn read_pdb_atoms<B: BufRead>(reader: B, structure: &mut HelicalStructure, options: &ReadOptions) -> Result<usize> {
    let mut heterogens = HeterogenTable::builtin();
    let mut n_atoms = 0usize;

    // Reading each line of PDB, parse and attach to residues
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.len() < 6 || !line.is_char_boundary(6) {
            continue;
        }
        match &line[..6] {
            "MODRES" => {
                match parse_modres(&line) {
                    Ok((modified, standard)) => {
                        if !heterogens.register(modified, &standard) {
                            options.verbosity.warn(&format!(
                                "MODRES maps {} to unknown residue {}",
                                String::from_utf8_lossy(&modified), String::from_utf8_lossy(&standard)
                            ));
                        }
                    }
                    Err(e) => options.verbosity.verbose(&format!("Skipping line {}: {}", idx + 1, e)),
                }
            }
            "ENDMDL" => break,
            "ATOM  " | "HETATM" => {
                let record = match parse_line(&line) {
                    Ok(record) => record,
                    Err(e) => {
                        // Conversion error. Just skip the line.
                        options.verbosity.verbose(&format!("Skipping line {}: {}", idx + 1, e));
                        continue;
                    }
                };
                if !record.is_primary_location() {
                    continue;
                }
                let aa = match record.kind {
                    RecordKind::Hetatm => match heterogens.resolve(&record.res_name) {
                        Some(aa) => aa,
                        None => continue,
                    },
                    RecordKind::Atom => heterogens.resolve(&record.res_name).unwrap_or(AminoAcid::X),
                };
                if !options.include_all_atoms && is_hydrogen_name(&record.atom_name) {
                    continue;
                }
                let id = ResidueId::new(record.chain, record.res_serial, record.icode);
                let key = match structure.residue_key(&id) {
                    Some(key) => key,
                    None => continue,
                };
                let residue = &structure.residues[key];
                if residue.aa != AminoAcid::X && residue.aa != aa {
                    return Err(SocketError::InputMismatch(format!(
                        "DSSP has {} ({}) but PDB has {} at {}",
                        residue.aa.three_letter(), residue.dssp_letter as char,
                        String::from_utf8_lossy(&record.res_name), id
                    )));
                }
                if n_atoms == options.max_atoms {
                    return Err(SocketError::CapacityExceeded { what: "atoms", limit: options.max_atoms });
                }
                structure.push_atom(Atom::from_record(&record, key));
                n_atoms += 1;
            }
            _ => continue,
        }
    }
    options.verbosity.verbose(&format!("{} atoms read from helical residues", n_atoms));
    Ok(n_atoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::core::{Helix, Residue};
    use crate::utils::log::Verbosity;

    fn atom_line(record: &str, serial: u64, name: &str, res: &str, chain: char, resno: i32, x: f32) -> String {
        format!(
            "{:<6}{:5} {:4} {:3} {}{:4}    {:8.3}{:8.3}{:8.3}  1.00  0.00",
            record, serial, name, res, chain, resno, x, 0.0, 0.0
        )
    }

    fn two_residue_helix(letters: &[u8]) -> HelicalStructure {
        let residues: Vec<Residue> = letters.iter().enumerate()
            .map(|(i, &l)| Residue::new(ResidueId::new(b'A', i as i32 + 1, b' '), l, 0))
            .collect();
        let helix = Helix::new(residues[0].id, residues[residues.len() - 1].id, 0..residues.len());
        HelicalStructure::from_tables("test", vec![helix], residues)
    }

    fn quiet() -> ReadOptions {
        ReadOptions { verbosity: Verbosity::Quiet, ..Default::default() }
    }

    #[test]
    fn test_read_atoms() {
        let pdb = [
            atom_line("ATOM", 1, " N  ", "LEU", 'A', 1, 1.0),
            atom_line("ATOM", 2, " CA ", "LEU", 'A', 1, 2.0),
            atom_line("ATOM", 3, " H  ", "LEU", 'A', 1, 2.5),
            atom_line("ATOM", 4, " CA ", "ALA", 'A', 2, 3.0),
            atom_line("ATOM", 5, " CA ", "ALA", 'A', 9, 4.0),
            "ENDMDL".to_string(),
            atom_line("ATOM", 6, " CB ", "ALA", 'A', 2, 5.0),
        ].join("\n");
        let mut structure = two_residue_helix(b"LA");
        let n = Reader::new(pdb.as_bytes()).read_atoms(&mut structure, &quiet()).unwrap();
        // Hydrogen, non-helical residue and second model are skipped
        assert_eq!(n, 3);
        assert_eq!(structure.atoms_of(0).count(), 2);
        assert!(structure.find_atom(1, b" CB ").is_none());
    }

    #[test]
    fn test_read_all_atoms() {
        let pdb = [
            atom_line("ATOM", 1, " CA ", "LEU", 'A', 1, 2.0),
            atom_line("ATOM", 2, " H  ", "LEU", 'A', 1, 2.5),
        ].join("\n");
        let mut structure = two_residue_helix(b"LA");
        let options = ReadOptions { include_all_atoms: true, ..quiet() };
        assert_eq!(Reader::new(pdb.as_bytes()).read_atoms(&mut structure, &options).unwrap(), 2);
    }

    #[test]
    fn test_heterogens() {
        let pdb = [
            atom_line("HETATM", 1, " CA ", "MSE", 'A', 1, 2.0),
            atom_line("HETATM", 2, " CA ", "XYZ", 'A', 2, 2.0),
            "MODRES 1ABC XYZ A    2  ALA  MODIFIED ALANINE".to_string(),
            atom_line("HETATM", 3, " CB ", "XYZ", 'A', 2, 2.0),
            atom_line("HETATM", 4, " O  ", "HOH", 'A', 2, 2.0),
        ].join("\n");
        let mut structure = two_residue_helix(b"MA");
        let n = Reader::new(pdb.as_bytes()).read_atoms(&mut structure, &quiet()).unwrap();
        assert_eq!(n, 2);
        assert!(structure.find_atom(1, b" CB ").is_some());
    }

    #[test]
    fn test_residue_mismatch() {
        let pdb = atom_line("ATOM", 1, " CA ", "GLY", 'A', 1, 2.0);
        let mut structure = two_residue_helix(b"LA");
        let err = Reader::new(pdb.as_bytes()).read_atoms(&mut structure, &quiet()).unwrap_err();
        assert!(matches!(err, SocketError::InputMismatch(_)));
        // Unknown residues in DSSP are tolerated
        let mut structure = two_residue_helix(b"XA");
        assert!(Reader::new(pdb.as_bytes()).read_atoms(&mut structure, &quiet()).is_ok());
    }

    #[test]
    fn test_read_atoms_from_gz() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;
        let pdb = atom_line("ATOM", 1, " CA ", "LEU", 'A', 1, 2.0);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(pdb.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        let mut structure = two_residue_helix(b"LA");
        let n = Reader::new(compressed.as_slice()).read_atoms_from_gz(&mut structure, &quiet()).unwrap();
        assert_eq!(n, 1);
    }
}
