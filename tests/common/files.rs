// File: files.rs
// PDB, DSSP and list files written to a temporary directory

use std::path::PathBuf;

/// Residues per helix of the ideal dimer
pub const DIMER_LENGTH: usize = 21;

pub fn temp_path(name: &str) -> String {
    let dir: PathBuf = std::env::temp_dir().join("coildisco_tests");
    std::fs::create_dir_all(&dir).expect("Unable to create test directory");
    dir.join(name).to_str().expect("Unable to convert path to string").to_string()
}

pub fn write_temp(name: &str, text: &str) -> String {
    let path = temp_path(name);
    std::fs::write(&path, text).expect("Unable to write test file");
    path
}

pub fn atom_line(serial: usize, name: &str, res_name: &str, chain: char, res_serial: usize, xyz: [f32; 3]) -> String {
    format!(
        "ATOM  {:5} {:4} {:3} {}{:4}    {:8.3}{:8.3}{:8.3}  1.00  0.00           {}",
        serial, name, res_name, chain, res_serial, xyz[0], xyz[1], xyz[2], &name.trim()[..1]
    )
}

pub fn dssp_line(num: usize, serial: usize, chain: char, aa: char, ss: char) -> String {
    format!("{:5}{:5} {} {}  {}", num, serial, chain, aa, ss)
}

/// DSSP text for chains of alanines; one string of secondary-structure letters per chain
pub fn dssp_text(chains: &[&str]) -> String {
    let mut text = String::from("==== Secondary Structure Definition by the program DSSP ====\n");
    text.push_str("  #  RESIDUE AA STRUCTURE BP1 BP2  ACC     N-H-->O    O-->H-N    N-H-->O    O-->H-N\n");
    let mut num = 1;
    for (c, ss) in chains.iter().enumerate() {
        if c > 0 {
            text.push_str(&format!("{:5}        !\n", num));
            num += 1;
        }
        let chain = (b'A' + c as u8) as char;
        for (i, letter) in ss.chars().enumerate() {
            text.push_str(&dssp_line(num, i + 1, chain, 'A', letter));
            text.push('\n');
            num += 1;
        }
    }
    text
}

/// Two straight helices of alanines with 3.5 residues per turn, related by a
/// two-fold axis parallel to z. Side chains of a and d positions point at the
/// other helix, so at a separation of 9 Å every a and d residue is a knob.
pub fn ideal_dimer_pdb(separation: f32) -> String {
    let mut text = String::from("HEADER    SYNTHETIC COILED COIL\n");
    let mut serial = 1;
    for h in 0..2 {
        let chain = (b'A' + h as u8) as char;
        let centre = separation * h as f32;
        for i in 0..DIMER_LENGTH {
            let theta = (25.7 + i as f32 * 360.0 / 3.5 + 180.0 * h as f32).to_radians();
            let z = 1.5 * i as f32;
            let at = |radius: f32, dtheta: f32, dz: f32| {
                [centre + radius * (theta + dtheta).cos(), radius * (theta + dtheta).sin(), z + dz]
            };
            let atoms = [
                (" N  ", at(1.9, -0.4, -0.6)),
                (" CA ", at(2.3, 0.0, 0.0)),
                (" C  ", at(1.9, 0.4, 0.6)),
                (" CB ", at(3.3, 0.0, 0.5)),
            ];
            for (name, xyz) in atoms {
                text.push_str(&atom_line(serial, name, "ALA", chain, i + 1, xyz));
                text.push('\n');
                serial += 1;
            }
        }
        text.push_str("TER\n");
    }
    text.push_str("END\n");
    text
}

/// Write the ideal dimer and its DSSP file; returns (pdb, dssp) paths
pub fn write_ideal_dimer(code: &str, separation: f32) -> (String, String) {
    let helix = "H".repeat(DIMER_LENGTH);
    let pdb = write_temp(&format!("{}.pdb", code), &ideal_dimer_pdb(separation));
    let dssp = write_temp(&format!("{}.dssp", code), &dssp_text(&[&helix, &helix]));
    (pdb, dssp)
}
