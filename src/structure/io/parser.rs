use crate::structure::atom::{AtomRecord, RecordKind};
use crate::structure::coordinate::Coordinate;

/// Parse a fixed-column ATOM or HETATM line. Occupancy and B-factor are not needed,
/// so any line reaching the end of the z coordinate is accepted.
pub fn parse_line(line: &str) -> Result<AtomRecord, &'static str> {
    // Check line length is enough to index z
    match line.len() {
        54..=120 => {}
        _ => return Err("Line length is not between 54 and 120 characters"),
    }
    if !line.as_bytes()[..54].is_ascii() {
        return Err("Line is not ASCII");
    }
    let kind = match &line[..6] {
        "ATOM  " => RecordKind::Atom,
        "HETATM" => RecordKind::Hetatm,
        _ => return Err("Not a coordinate record"),
    };
    // Parse line
    let x = line[30..38].trim().parse::<f32>();
    let y = line[38..46].trim().parse::<f32>();
    let z = line[46..54].trim().parse::<f32>();
    let atom_name = parse_atom(&line[12..16]);
    let atom_serial = line[6..11].trim().parse::<u64>();
    let res_name = parse_residue(&line[17..20]);
    let res_serial = line[22..26].trim().parse::<i32>();
    let bytes = line.as_bytes();
    let alt_loc = bytes[16];
    let chain = bytes[21];
    let icode = bytes[26];

    // Check if all the parsing was successful
    match (x, y, z, atom_name, atom_serial, res_name, res_serial) {
        (
            Ok(x),
            Ok(y),
            Ok(z),
            Ok(atom_name),
            Ok(atom_serial),
            Ok(res_name),
            Ok(res_serial),
        ) => Ok(AtomRecord {
            kind,
            atom_serial,
            atom_name,
            alt_loc,
            res_name,
            chain,
            res_serial,
            icode,
            coordinate: Coordinate::new(x, y, z),
        }),
        _ => Err("Error parsing line"),
    }
}

/// Parse a MODRES line into (modified residue name, standard residue name)
pub fn parse_modres(line: &str) -> Result<([u8; 3], [u8; 3]), &'static str> {
    if line.len() < 27 || !line.as_bytes()[..27].is_ascii() {
        return Err("MODRES line is too short");
    }
    let modified = parse_residue(&line[12..15])?;
    let standard = parse_residue(&line[24..27])?;
    Ok((modified, standard))
}

pub fn parse_atom(name: &str) -> Result<[u8; 4], &'static str> {
    let bytes = name.as_bytes();
    // Check atom name is 4 ASCII characters
    match bytes.len() {
        4 => Ok([bytes[0], bytes[1], bytes[2], bytes[3]]),
        _ => Err("Atom name is not 4 characters long"),
    }
}

pub fn parse_residue(name: &str) -> Result<[u8; 3], &'static str> {
    let bytes = name.as_bytes();
    // Check residue name is 3 ASCII characters
    match bytes.len() {
        3 => Ok([bytes[0], bytes[1], bytes[2]]),
        _ => Err("Residue name is not 3 characters long"),
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    #[test]
    fn test_parse_atom() {
        let atom_name = "CA  ";
        let atom_name_bytes = parse_atom(atom_name).unwrap();
        assert_eq!(atom_name_bytes, [67, 65, 32, 32]);
    }
    #[test]
    fn test_parse_atom_fail() {
        assert!(parse_atom("CA").is_err());
        assert!(parse_atom("CA   ").is_err());
    }

    #[test]
    fn test_parse_residue() {
        let res_name_bytes = parse_residue("ALA");
        assert_eq!(res_name_bytes.unwrap(), [65, 76, 65]);
        assert!(parse_residue("ALAN").is_err());
        assert!(parse_residue("AL").is_err());
    }

    #[test]
    fn test_parse_line_success() {
        let line = "ATOM      1  N   ALA A 340      -2.311   2.993 -33.448  1.00  6.00           N  ";
        let atom = parse_line(line).unwrap();
        assert_eq!(atom.kind, RecordKind::Atom);
        assert_eq!(atom.atom_name, [32, 78, 32, 32]); // N
        assert_eq!(atom.res_name, [65, 76, 65]); // ALA
        assert_eq!(atom.chain, b'A');
        assert_eq!(atom.atom_serial, 1);
        assert_eq!(atom.res_serial, 340);
        assert_eq!(atom.icode, b' ');
        assert_eq!(atom.alt_loc, b' ');
        assert_eq!(atom.coordinate, Coordinate::new(-2.311, 2.993, -33.448));
    }

    #[test]
    fn test_parse_line_icode_altloc() {
        let line = "HETATM 1021 SE  BMSE B  52A     11.000  -4.500   7.250  0.50 20.00          SE  ";
        let atom = parse_line(line).unwrap();
        assert_eq!(atom.kind, RecordKind::Hetatm);
        assert_eq!(&atom.atom_name, b"SE  ");
        assert_eq!(atom.alt_loc, b'B');
        assert!(!atom.is_primary_location());
        assert_eq!(&atom.res_name, b"MSE");
        assert_eq!(atom.res_serial, 52);
        assert_eq!(atom.icode, b'A');
    }

    #[test]
    fn test_parse_line_short_record() {
        // Coordinates only, no occupancy or B-factor
        let line = "ATOM      2  CA  LEU A   7      10.000  10.000  10.000";
        assert!(parse_line(line).is_ok());
        let line = "ATOM      1  N   ALA A   1      10.000  10.000  10.0";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn test_parse_line_float() {
        let line = "ATOM      1  N   ALA A   1      1A.000  10.000  10.000  1.00  0.00           N  ";
        assert!(parse_line(line).is_err());
        let line = "ATOM      1  N   ALA A   1      10.000  1A.000  10.000  1.00  0.00           N  ";
        assert!(parse_line(line).is_err());
        let line = "ATOM      1  N   ALA A   1      10.000  10.000  1A.000  1.00  0.00           N  ";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn test_parse_line_fail_serial() {
        let line = "ATOM      1  N   ALA A 3A0      -2.311   2.993 -33.448  1.00  6.00           N  ";
        assert!(parse_line(line).is_err());
        let line = "ATOM      K  N   ALA A   1      10.000  10.000  10.000  1.00  0.00           N  ";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn test_parse_modres() {
        let line = "MODRES 1ABC MSE A   52  MET  SELENOMETHIONINE";
        assert_eq!(parse_modres(line).unwrap(), (*b"MSE", *b"MET"));
        assert!(parse_modres("MODRES 1ABC").is_err());
    }
}
