// File: error.rs
// Error type shared by the readers, the analysis session and the CLI

use thiserror::Error;

/// Every condition that stops the analysis of a structure.
#[derive(Debug, Error)]
pub enum SocketError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed PDB, DSSP or TOML input
    #[error("parse error: {0}")]
    Parse(String),

    /// Option out of range or inconsistent
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A fixed capacity was exceeded; usually the cutoff is unreasonably large
    #[error("maximum number of {what} ({limit}) exceeded")]
    CapacityExceeded { what: &'static str, limit: usize },

    /// DSSP and PDB files disagree on a residue
    #[error("input mismatch: {0}")]
    InputMismatch(String),

    /// The configured backbone reference atom is absent from a residue
    #[error("no end atoms: residue {residue} has no reference atom \"{atom}\"")]
    MissingReferenceAtom { residue: String, atom: String },

    /// A knob gained more complementary partners than allowed
    #[error("knob {knob} has more than {limit} complementary knobs: {partners:?}")]
    TooManyComplementaryKnobs { knob: usize, limit: usize, partners: Vec<usize> },

    /// Helix termini missing, or a helix pair whose orientation was never measured
    #[error("orientation error: {0}")]
    Orientation(String),

    /// Heptad assignment reached an impossible state
    #[error("register error: {0}")]
    Register(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SocketError>;
