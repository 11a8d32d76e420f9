//! Readers for the two inputs of an analysis: DSSP assignments and PDB coordinates
pub mod dssp;
pub mod parser;
pub mod pdb;

use std::fs::File;
use std::io::{BufRead, BufReader};

use flate2::read::GzDecoder;

use crate::error::Result;
use crate::structure::core::HelicalStructure;
use crate::utils::log::Verbosity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFileFormat {
    PDB,
    DSSP,
    Unknown,
}

impl StructureFileFormat {
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        let stem = lower.strip_suffix(".gz").unwrap_or(&lower);
        if stem.ends_with(".pdb") || stem.ends_with(".ent") {
            StructureFileFormat::PDB
        } else if stem.ends_with(".dssp") {
            StructureFileFormat::DSSP
        } else {
            StructureFileFormat::Unknown
        }
    }
}

/// Options shared by the DSSP and PDB readers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadOptions {
    /// Residues added at each helix end (0..=2)
    pub extend: usize,
    /// Keep hydrogen atoms
    pub include_all_atoms: bool,
    pub max_helices: usize,
    pub max_residues: usize,
    pub max_atoms: usize,
    pub verbosity: Verbosity,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            extend: 0,
            include_all_atoms: false,
            max_helices: 1000,
            max_residues: 20000,
            max_atoms: 100000,
            verbosity: Verbosity::Normal,
        }
    }
}

/// Open a text file, decompressing it when the name ends with `.gz`
pub fn open_text(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Build the helix table from `dssp_path` and attach atoms from `pdb_path`.
pub fn load_structure(pdb_path: &str, dssp_path: &str, code: &str, options: &ReadOptions) -> Result<HelicalStructure> {
    let mut structure = dssp::read_dssp(open_text(dssp_path)?, code, options)?;
    if structure.num_residues() == 0 {
        return Ok(structure);
    }
    let reader = pdb::Reader::from_file(pdb_path)?;
    if pdb_path.ends_with(".gz") {
        reader.read_atoms_from_gz(&mut structure, options)?;
    } else {
        reader.read_atoms(&mut structure, options)?;
    }
    Ok(structure)
}
