// File: rasmol.rs
// Description: RasMol script highlighting helices, knobs, holes and heptad positions

use std::fmt::Write as _;

use crate::controller::register::HEPTAD;
use crate::controller::AnalysisSession;
use crate::error::Result;

/// Residues per `define` line
pub const RASMOL_WRAP: usize = 8;
pub const RASMOL_COLOURS: [&str; 8] = ["red", "green", "blue", "magenta", "cyan", "yellow", "orange", "white"];

const SIDECHAIN: &str = " and (sidechain,*.ca)";

/// Define set `name` from residue selectors. Longer lists are split into
/// parts named by `part`, followed by their union.
fn define_set(out: &mut String, name: &str, items: &[String], part: impl Fn(usize) -> String) {
    if items.is_empty() {
        let _ = writeln!(out, "define {} none", name);
        return;
    }
    if items.len() <= RASMOL_WRAP {
        let _ = writeln!(out, "define {} ({}){}", name, items.join(","), SIDECHAIN);
        return;
    }
    let parts: Vec<String> = items.chunks(RASMOL_WRAP).enumerate()
        .map(|(i, chunk)| {
            let part_name = format!("{}{}", name, part(i));
            let _ = writeln!(out, "define {} ({}){}", part_name, chunk.join(","), SIDECHAIN);
            part_name
        })
        .collect();
    let _ = writeln!(out, "define {} ({})", name, parts.join(","));
}

fn letter_part(i: usize) -> String {
    char::from_u32('a' as u32 + i as u32).map_or_else(|| format!("_{}", i), |c| c.to_string())
}

impl AnalysisSession {
    fn selector(&self, residue: usize) -> String {
        let id = self.structure.residues[residue].id;
        format!("{}:{}", id.serial, id.chain_char())
    }

    pub fn rasmol_script(&self) -> String {
        let threshold = self.config.knob_threshold;
        let mut out = String::new();
        let _ = writeln!(out, "# RasMol script, created by coildisco {}", env!("CARGO_PKG_VERSION"));
        let _ = writeln!(out, "echo\necho RasMol script, created by coildisco {}", env!("CARGO_PKG_VERSION"));
        out.push_str("echo\nselect\nwireframe off\nspacefill off\nribbon off\ndots off\nbackbone off\nstrands off\n");

        let helices = &self.structure.helices;
        for (i, helix) in helices.iter().enumerate() {
            let _ = writeln!(
                out,
                "define helix{i} {s}-{e}:{c}\ndefine h{i} {s}-{e}:{c}",
                i = i, s = helix.start.serial, e = helix.end.serial, c = helix.chain as char
            );
        }

        let mut with_knobs = Vec::new();
        for h in 0..helices.len() {
            let knobs: Vec<String> = self.knobs.iter()
                .filter(|k| k.knob_type >= threshold && self.structure.helix_of(k.residue) == h)
                .map(|k| self.selector(k.residue))
                .collect();
            if !knobs.is_empty() {
                define_set(&mut out, &format!("knobs{}", h), &knobs, letter_part);
                with_knobs.push(format!("knobs{}", h));
            }
        }
        for h in 0..helices.len() {
            let holes: Vec<String> = self.knobs.iter()
                .filter(|k| k.knob_type >= threshold && self.structure.helix_of(k.hole[0]) == h)
                .flat_map(|k| k.hole.iter().map(|&r| self.selector(r)))
                .collect();
            if !holes.is_empty() {
                define_set(&mut out, &format!("holes{}", h), &holes, letter_part);
            }
        }

        if !helices.is_empty() {
            let names: Vec<String> = (0..helices.len()).map(|i| format!("helix{}", i)).collect();
            let _ = writeln!(out, "restrict {}\nstrands 1\ncolour chain", names.join(","));
        }
        out.push_str("echo\necho *** HELICES ***\necho\n");
        for (i, helix) in helices.iter().enumerate() {
            let colour = RASMOL_COLOURS[i % RASMOL_COLOURS.len()];
            let _ = writeln!(
                out,
                "select helix{i}\ncolour {col}\necho helix{i} ({s}-{e}:{c}) is {col}",
                i = i, col = colour, s = helix.start.serial, e = helix.end.serial, c = helix.chain as char
            );
        }
        if !with_knobs.is_empty() {
            let _ = writeln!(out, "select {}\nwireframe 100", with_knobs.join(","));
        }

        out.push_str("echo\necho *** COILED COILS ***\necho\n");
        for block in &self.register_blocks {
            let c = block.coiled_coil;
            let numeral = block.roman();
            let ranges: Vec<String> = block.helices.iter()
                .filter_map(|h| h.span.map(|(b, e)| {
                    let chain = self.structure.helices[h.helix].chain as char;
                    format!("{}-{}:{}", self.structure.residues[b].id.serial, self.structure.residues[e].id.serial, chain)
                }))
                .collect();
            let _ = writeln!(out, "define coiled_coil{} {}", c, ranges.join(","));
            if let Some(register) = self.registers.get(&c) {
                for heptad in HEPTAD {
                    let l = heptad.letter();
                    let residues: Vec<String> = register.iter().enumerate()
                        .filter(|(_, x)| **x == Some(heptad))
                        .map(|(r, _)| self.selector(r))
                        .collect();
                    define_set(&mut out, &format!("register_{}{}", c, l), &residues, |i| format!("_{}", i));
                    let _ = writeln!(
                        out,
                        "define register_{n}{l} register_{c}{l}\ndefine reg_{n}{l} register_{c}{l}",
                        n = numeral, l = l, c = c
                    );
                }
            }
            let members: Vec<String> = block.helices.iter().map(|h| h.helix.to_string()).collect();
            let _ = writeln!(
                out,
                "define coiled_coil_{n} coiled_coil{c}\ndefine cc_{n} coiled_coil{c}\necho cc_{n} consists of helices {m}",
                n = numeral, c = c, m = members.join(",")
            );
        }
        if !self.register_blocks.is_empty() {
            for heptad in HEPTAD {
                let l = heptad.letter();
                let union: Vec<String> = self.register_blocks.iter().map(|b| format!("reg_{}{}", b.roman(), l)).collect();
                let _ = writeln!(out, "define register_{l} {u}\ndefine reg_{l} register_{l}", l = l, u = union.join(", "));
            }
            let all: Vec<String> = self.register_blocks.iter().map(|b| format!("coiled_coil{}", b.coiled_coil)).collect();
            let _ = writeln!(out, "define coiled_coils {}", all.join(","));
            out.push_str("\nselect not coiled_coils\nstrands 1\nselect coiled_coils\nribbon 300\n");
        }
        out
    }

    pub fn write_rasmol_script(&self, path: &str) -> Result<()> {
        std::fs::write(path, self.rasmol_script())?;
        Ok(())
    }
}
