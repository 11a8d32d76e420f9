// File: aminoacid.rs
// Amino acid codes, side-chain end atoms and modified-residue names

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AminoAcid {
    #[default]
    X,
    A,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    K,
    L,
    M,
    N,
    P,
    Q,
    R,
    S,
    T,
    V,
    W,
    Y,
}

const STANDARD: [(AminoAcid, &[u8; 3]); 20] = [
    (AminoAcid::A, b"ALA"), (AminoAcid::C, b"CYS"), (AminoAcid::D, b"ASP"),
    (AminoAcid::E, b"GLU"), (AminoAcid::F, b"PHE"), (AminoAcid::G, b"GLY"),
    (AminoAcid::H, b"HIS"), (AminoAcid::I, b"ILE"), (AminoAcid::K, b"LYS"),
    (AminoAcid::L, b"LEU"), (AminoAcid::M, b"MET"), (AminoAcid::N, b"ASN"),
    (AminoAcid::P, b"PRO"), (AminoAcid::Q, b"GLN"), (AminoAcid::R, b"ARG"),
    (AminoAcid::S, b"SER"), (AminoAcid::T, b"THR"), (AminoAcid::V, b"VAL"),
    (AminoAcid::W, b"TRP"), (AminoAcid::Y, b"TYR"),
];

// Modified residues read from HETATM records, with the residue they stand for
const HETEROGENS: [(&[u8; 3], AminoAcid); 68] = [
    (b"ABA", AminoAcid::N), (b"AGM", AminoAcid::R), (b"AIB", AminoAcid::A),
    (b"AR2", AminoAcid::R), (b"CAS", AminoAcid::C), (b"CCS", AminoAcid::C),
    (b"CEA", AminoAcid::C), (b"CGU", AminoAcid::E), (b"CLB", AminoAcid::S),
    (b"CLD", AminoAcid::S), (b"CME", AminoAcid::C), (b"CSB", AminoAcid::C),
    (b"CSD", AminoAcid::C), (b"CSE", AminoAcid::C), (b"CSO", AminoAcid::C),
    (b"CSS", AminoAcid::C), (b"CSW", AminoAcid::C), (b"CXM", AminoAcid::M),
    (b"CYG", AminoAcid::C), (b"DAR", AminoAcid::R), (b"DGL", AminoAcid::E),
    (b"DIL", AminoAcid::I), (b"DIV", AminoAcid::V), (b"DOH", AminoAcid::D),
    (b"DPN", AminoAcid::F), (b"EHP", AminoAcid::F), (b"FGL", AminoAcid::G),
    (b"FTR", AminoAcid::W), (b"GL3", AminoAcid::G), (b"GLH", AminoAcid::E),
    (b"GLZ", AminoAcid::G), (b"HIP", AminoAcid::H), (b"HTR", AminoAcid::W),
    (b"HYP", AminoAcid::P), (b"IIL", AminoAcid::I), (b"KCX", AminoAcid::K),
    (b"LLP", AminoAcid::K), (b"M3L", AminoAcid::K), (b"MGN", AminoAcid::Q),
    (b"MHO", AminoAcid::M), (b"MHS", AminoAcid::H), (b"MIS", AminoAcid::S),
    (b"MLY", AminoAcid::K), (b"MSE", AminoAcid::M), (b"MTY", AminoAcid::Y),
    (b"NCB", AminoAcid::A), (b"NEP", AminoAcid::H), (b"NLE", AminoAcid::L),
    (b"OAS", AminoAcid::S), (b"OCS", AminoAcid::C), (b"OCY", AminoAcid::C),
    (b"PHL", AminoAcid::F), (b"PRS", AminoAcid::P), (b"SBD", AminoAcid::S),
    (b"SBL", AminoAcid::S), (b"SCH", AminoAcid::C), (b"SEB", AminoAcid::S),
    (b"SEP", AminoAcid::S), (b"SMC", AminoAcid::C), (b"SNC", AminoAcid::C),
    (b"SOC", AminoAcid::C), (b"STY", AminoAcid::Y), (b"SVA", AminoAcid::S),
    (b"TRF", AminoAcid::W), (b"TRN", AminoAcid::W), (b"TYI", AminoAcid::Y),
    (b"TYS", AminoAcid::Y), (b"YOF", AminoAcid::Y),
];

// End atoms per residue type
const END_A: [[u8; 4]; 1] = [*b" CB "];
const END_C: [[u8; 4]; 1] = [*b" SG "];
const END_D: [[u8; 4]; 2] = [*b" OD1", *b" OD2"];
const END_E: [[u8; 4]; 2] = [*b" OE1", *b" OE2"];
const END_F: [[u8; 4]; 1] = [*b" CZ "];
const END_G: [[u8; 4]; 1] = [*b" CA "];
const END_H: [[u8; 4]; 2] = [*b" CE1", *b" NE2"];
const END_I: [[u8; 4]; 1] = [*b" CD1"];
const END_K: [[u8; 4]; 1] = [*b" NZ "];
const END_L: [[u8; 4]; 2] = [*b" CD1", *b" CD2"];
const END_M: [[u8; 4]; 1] = [*b" CE "];
const END_N: [[u8; 4]; 2] = [*b" OD1", *b" ND2"];
const END_P: [[u8; 4]; 1] = [*b" CG "];
const END_Q: [[u8; 4]; 2] = [*b" OE1", *b" NE2"];
const END_R: [[u8; 4]; 2] = [*b" NH1", *b" NH2"];
const END_S: [[u8; 4]; 1] = [*b" OG "];
const END_T: [[u8; 4]; 2] = [*b" OG1", *b" CG2"];
const END_V: [[u8; 4]; 2] = [*b" CG1", *b" CG2"];
const END_W: [[u8; 4]; 1] = [*b" CH2"];
const END_Y: [[u8; 4]; 1] = [*b" OH "];

impl AminoAcid {
    pub fn from_three(name: &[u8; 3]) -> Option<AminoAcid> {
        STANDARD.iter().find(|(_, n)| *n == name).map(|(aa, _)| *aa)
    }

    /// One-letter code as written in DSSP files. Lower case marks a
    /// disulfide-bonded cysteine; anything unknown becomes X.
    pub fn from_one(letter: u8) -> AminoAcid {
        if letter.is_ascii_lowercase() {
            return AminoAcid::C;
        }
        match letter {
            b'A' => AminoAcid::A, b'C' => AminoAcid::C, b'D' => AminoAcid::D,
            b'E' => AminoAcid::E, b'F' => AminoAcid::F, b'G' => AminoAcid::G,
            b'H' => AminoAcid::H, b'I' => AminoAcid::I, b'K' => AminoAcid::K,
            b'L' => AminoAcid::L, b'M' => AminoAcid::M, b'N' => AminoAcid::N,
            b'P' => AminoAcid::P, b'Q' => AminoAcid::Q, b'R' => AminoAcid::R,
            b'S' => AminoAcid::S, b'T' => AminoAcid::T, b'V' => AminoAcid::V,
            b'W' => AminoAcid::W, b'Y' => AminoAcid::Y,
            _ => AminoAcid::X,
        }
    }

    pub fn one_letter(&self) -> char {
        match self {
            AminoAcid::X => 'X', AminoAcid::A => 'A', AminoAcid::C => 'C',
            AminoAcid::D => 'D', AminoAcid::E => 'E', AminoAcid::F => 'F',
            AminoAcid::G => 'G', AminoAcid::H => 'H', AminoAcid::I => 'I',
            AminoAcid::K => 'K', AminoAcid::L => 'L', AminoAcid::M => 'M',
            AminoAcid::N => 'N', AminoAcid::P => 'P', AminoAcid::Q => 'Q',
            AminoAcid::R => 'R', AminoAcid::S => 'S', AminoAcid::T => 'T',
            AminoAcid::V => 'V', AminoAcid::W => 'W', AminoAcid::Y => 'Y',
        }
    }

    pub fn three_letter(&self) -> &'static str {
        match STANDARD.iter().find(|(aa, _)| aa == self) {
            // Table entries are ASCII
            Some((_, name)) => std::str::from_utf8(*name).unwrap_or("UNK"),
            None => "UNK",
        }
    }

    /// Side-chain atoms whose mean position is the terminal descriptor.
    pub fn end_atoms(&self) -> &'static [[u8; 4]] {
        match self {
            AminoAcid::A => &END_A,
            AminoAcid::C => &END_C,
            AminoAcid::D => &END_D,
            AminoAcid::E => &END_E,
            AminoAcid::F => &END_F,
            AminoAcid::G => &END_G,
            AminoAcid::H => &END_H,
            AminoAcid::I => &END_I,
            AminoAcid::K => &END_K,
            AminoAcid::L => &END_L,
            AminoAcid::M => &END_M,
            AminoAcid::N => &END_N,
            AminoAcid::P => &END_P,
            AminoAcid::Q => &END_Q,
            AminoAcid::R => &END_R,
            AminoAcid::S => &END_S,
            AminoAcid::T => &END_T,
            AminoAcid::V => &END_V,
            AminoAcid::W => &END_W,
            AminoAcid::Y => &END_Y,
            AminoAcid::X => &[],
        }
    }
}

/// Residue names accepted from HETATM records. Starts with the built-in
/// modified residues and grows with the MODRES records of each file.
#[derive(Debug, Clone)]
pub struct HeterogenTable {
    map: FxHashMap<[u8; 3], AminoAcid>,
}

impl HeterogenTable {
    pub fn builtin() -> Self {
        let mut map = FxHashMap::default();
        for (name, aa) in HETEROGENS.iter() {
            map.insert(**name, *aa);
        }
        HeterogenTable { map }
    }

    /// Register a MODRES mapping. Unknown standard names are ignored.
    pub fn register(&mut self, name: [u8; 3], standard: &[u8; 3]) -> bool {
        match AminoAcid::from_three(standard) {
            Some(aa) => {
                self.map.insert(name, aa);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &[u8; 3]) -> Option<AminoAcid> {
        self.map.get(name).copied()
    }

    /// Standard names first, then modified residues.
    pub fn resolve(&self, name: &[u8; 3]) -> Option<AminoAcid> {
        AminoAcid::from_three(name).or_else(|| self.get(name))
    }
}

impl Default for HeterogenTable {
    fn default() -> Self {
        HeterogenTable::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(AminoAcid::from_three(b"LEU"), Some(AminoAcid::L));
        assert_eq!(AminoAcid::from_three(b"MSE"), None);
        assert_eq!(AminoAcid::from_one(b'L'), AminoAcid::L);
        assert_eq!(AminoAcid::from_one(b'a'), AminoAcid::C);
        assert_eq!(AminoAcid::from_one(b'B'), AminoAcid::X);
        assert_eq!(AminoAcid::W.one_letter(), 'W');
        assert_eq!(AminoAcid::Q.three_letter(), "GLN");
        assert_eq!(AminoAcid::X.three_letter(), "UNK");
    }

    #[test]
    fn test_end_atoms() {
        assert_eq!(AminoAcid::L.end_atoms(), &[*b" CD1", *b" CD2"]);
        assert_eq!(AminoAcid::G.end_atoms(), &[*b" CA "]);
        assert!(AminoAcid::X.end_atoms().is_empty());
        // Tables outlive the residue they were looked up for
        let tables: Vec<&'static [[u8; 4]]> = STANDARD.iter().map(|(aa, _)| aa.end_atoms()).collect();
        assert!(tables.iter().all(|names| (1..=2).contains(&names.len())));
        assert!(tables.iter().copied().flatten().all(|name| name[0] == b' '));
    }

    #[test]
    fn test_heterogen_table() {
        let mut table = HeterogenTable::builtin();
        assert_eq!(table.resolve(b"MSE"), Some(AminoAcid::M));
        assert_eq!(table.resolve(b"ALA"), Some(AminoAcid::A));
        assert_eq!(table.resolve(b"XYZ"), None);
        assert!(table.register(*b"XYZ", b"LYS"));
        assert_eq!(table.resolve(b"XYZ"), Some(AminoAcid::K));
        assert!(!table.register(*b"QQQ", b"ZZZ"));
    }
}
