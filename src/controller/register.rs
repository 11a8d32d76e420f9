// File: register.rs
// Description:
//    Heptad register assignment for the true coiled coils of a session.
//    Knobs are assigned a/d (core) or e/g (flank) from the side of the hole
//    holding their partner and the orientation of the two helices. Residues
//    between knobs are then filled by counting along the heptad.

use std::fmt;

use crate::controller::orientation::Orientation;
use crate::controller::AnalysisSession;
use crate::error::{Result, SocketError};
use crate::utils::log::Verbosity;

/// Position within a heptad repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Heptad {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

pub const HEPTAD: [Heptad; 7] = [Heptad::A, Heptad::B, Heptad::C, Heptad::D, Heptad::E, Heptad::F, Heptad::G];

/// Register of a knob whose partner sits at side `side ^ orientation` of its hole
pub const CORE: [Heptad; 2] = [Heptad::D, Heptad::A];
pub const FLANK: [Heptad; 2] = [Heptad::G, Heptad::E];

impl Heptad {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn letter(&self) -> char {
        (b'a' + self.index() as u8) as char
    }

    pub fn from_char(c: char) -> Option<Heptad> {
        let c = c.to_ascii_lowercase();
        if ('a'..='g').contains(&c) {
            Some(HEPTAD[(c as u8 - b'a') as usize])
        } else {
            None
        }
    }

    /// Step `offset` positions along the repeat, wrapping g to a
    pub fn relative(&self, offset: isize) -> Heptad {
        HEPTAD[(self.index() as isize + offset).rem_euclid(7) as usize]
    }

    /// `other` immediately follows this position without wrapping
    pub fn is_followed_by(&self, other: Heptad) -> bool {
        other.index() == self.index() + 1
    }
}

impl fmt::Display for Heptad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Lower-case roman numeral
pub fn roman(mut n: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "m"), (900, "cm"), (500, "d"), (400, "cd"), (100, "c"), (90, "xc"),
        (50, "l"), (40, "xl"), (10, "x"), (9, "ix"), (5, "v"), (4, "iv"), (1, "i"),
    ];
    let mut numeral = String::new();
    for (value, symbol) in TABLE {
        while n >= value {
            numeral.push_str(symbol);
            n -= value;
        }
    }
    numeral
}

/// Label of the helix at `position` in an `n`-stranded coiled coil: X,Y for
/// dimers, letters counting back from Z otherwise.
pub fn helix_label(n: usize, position: usize) -> char {
    let base = if n <= 2 { 'X' as u32 } else { ('Z' as u32 + 1).saturating_sub(n as u32) };
    char::from_u32(base + position as u32).filter(|c| c.is_ascii_uppercase()).unwrap_or('?')
}

/// Heptad run lengths and the number of runs, after the first, that follow
/// a run of length other than 7.
pub fn tad_signature(register: &[Option<Heptad>]) -> (Vec<usize>, usize) {
    let mut tads: Vec<usize> = Vec::new();
    let mut interrupts = 0;
    let mut previous: Option<Heptad> = None;
    for current in register.iter().copied() {
        if let Some(letter) = current {
            let continues = matches!(previous, Some(p) if p.is_followed_by(letter));
            if !continues {
                if tads.len() > 1 && tads[tads.len() - 1] != 7 {
                    interrupts += 1;
                }
                tads.push(0);
            }
            if let Some(last) = tads.last_mut() {
                *last += 1;
            }
        }
        previous = current;
    }
    (tads, interrupts)
}

/// Extent of one helix of a coiled coil. Knob fields hold knob indices,
/// hole fields residue keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelixSpan {
    pub knob_begin: Option<usize>,
    pub knob_end: Option<usize>,
    pub hole_begin: Option<usize>,
    pub hole_end: Option<usize>,
}

/// Most N- and C-terminal knobs of the current helix packing into one other
/// helix, with the partner knob that placed them.
#[derive(Debug, Clone, Copy, Default)]
struct PairTracker {
    begin: Option<(usize, usize)>,
    end: Option<(usize, usize)>,
}

/// Register strings of one helix within a coiled coil
#[derive(Debug, Clone, PartialEq)]
pub struct HelixRegister {
    pub helix: usize,
    pub label: char,
    /// First and last residue keys of the packing region
    pub span: Option<(usize, usize)>,
    pub sequence: String,
    pub register: String,
    pub partner: String,
    pub knob_type: String,
    pub tads: Vec<usize>,
    pub interrupts: usize,
    pub region_length: usize,
}

/// Register assignment of one true coiled coil
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterBlock {
    pub coiled_coil: usize,
    /// Position among true coiled coils, from 1
    pub numeral: usize,
    pub orientation: Orientation,
    pub helices: Vec<HelixRegister>,
    pub max_length: usize,
    pub mean_length: f32,
}

impl RegisterBlock {
    pub fn roman(&self) -> String {
        roman(self.numeral)
    }

    pub fn interrupts(&self) -> usize {
        self.helices.iter().map(|h| h.interrupts).sum()
    }
}

/// Working state while assigning one coiled coil
struct Assignment {
    coiled_coil: usize,
    helices: Vec<usize>,
    registers: Vec<Option<Heptad>>,
    spans: Vec<HelixSpan>,
    trackers: Vec<PairTracker>,
}

impl AnalysisSession {
    /// Assign registers to every true coiled coil. Returns how many there are.
    pub fn find_register(&mut self) -> Result<usize> {
        let mut true_ccs = 0;
        let mut total_interrupts = 0;
        let mut longest = 0;
        for c in 0..self.candidates.len() {
            if !self.candidates[c].is_true() {
                continue;
            }
            let mut orientation = self.orient_coiled_coil(c)?;
            let helices = self.candidates[c].helices.clone();
            let mut work = Assignment {
                coiled_coil: c,
                helices: helices.clone(),
                registers: vec![None; self.structure.num_residues()],
                spans: vec![HelixSpan::default(); helices.len()],
                trackers: Vec::new(),
            };
            let mut reoriented = 0;
            for pos in 0..helices.len() {
                work.trackers = vec![PairTracker::default(); helices.len()];
                for r in self.structure.helices[helices[pos]].residues.clone() {
                    for k in 0..self.knobs.len() {
                        if self.knobs[k].residue == r && self.knobs[k].knob_type > 2 {
                            self.assign_knob(&mut work, pos, k)?;
                        }
                    }
                }
                reoriented += self.reevaluate_orientation(&work, pos);
            }
            if reoriented > 0 {
                self.verbosity.warn(&format!(
                    "!!!!!! {} helix pairs in coiled coils have had their orientation reassigned", reoriented
                ));
                orientation = self.orientations.overall(&helices);
                self.candidates[c].orientation = Some(orientation);
                self.say(&format!("coiled coil {} now assigned as {}", c, orientation));
            }
            true_ccs += 1;
            let block = self.write_register_block(&mut work, true_ccs, orientation)?;
            total_interrupts += block.interrupts();
            for helix in &block.helices {
                if helix.interrupts > 0 && helix.region_length > longest {
                    longest = helix.region_length;
                }
            }
            self.registers.insert(c, work.registers);
            self.register_blocks.push(block);
        }
        if total_interrupts > 0 {
            self.result_lines.push(format!(
                "{} c {:5.2} e {} REPEATS: {:2} NON-CANONICAL TAD-INTERRUPTS (LONGEST MOTIF {:3} RESIDUES)",
                self.structure.code, self.config.packing_cutoff, self.config.extend, total_interrupts, longest
            ));
        }
        Ok(true_ccs)
    }

    fn assign_knob(&self, work: &mut Assignment, pos: usize, k: usize) -> Result<()> {
        let c = work.coiled_coil;
        let hole_helix = self.structure.helix_of(self.knobs[k].hole[0]);
        let pos2 = match work.helices.iter().position(|&h| h == hole_helix) {
            Some(pos2) => pos2,
            None => {
                self.verbosity.verbose(&format!(
                    "knob {} fits into a hole in a helix ({}) which is not part of this coiled coil", k, hole_helix
                ));
                return Ok(());
            }
        };
        self.extend_knob_span(work, pos, k);
        let knob = self.knobs[k].clone();
        let knob_helix = self.structure.helix_of(knob.residue);

        if work.helices.len() == 2 {
            let other = work.helices[1 - pos];
            for &p in &knob.complementary {
                if self.structure.helix_of(self.knobs[p].residue) != other {
                    continue;
                }
                let mut side = None;
                for j in 1..=2 {
                    if knob.hole[j] != self.knobs[p].residue {
                        continue;
                    }
                    self.track_pair(work, pos2, k, p);
                    self.extend_hole_span(work, k)?;
                    let orientation = self.orientations.require(knob_helix, self.structure.helix_of(knob.hole[j]))?;
                    side = Some(j - 1);
                    self.set_register(work, k, CORE[(j - 1) ^ orientation.bit()], p, orientation);
                }
                if side.is_none() {
                    return Err(SocketError::Register(format!(
                        "could not find a complementary knob (knob {}) to knob {}", p, k
                    )));
                }
            }
            return Ok(());
        }

        let mut daisy = None;
        if knob.order.map_or(false, |o| o > 2) {
            for d in 0..self.daisy_chains.len() {
                let chain = &self.daisy_chains[d];
                if chain.coiled_coil != Some(c) || !chain.contains(k) {
                    continue;
                }
                let members = chain.knobs.clone();
                let mut side = None;
                for j in 1..=2 {
                    let partner = members.iter().copied().find(|&m| self.knobs[m].residue == knob.hole[j]);
                    if let Some(m) = partner {
                        self.track_pair(work, pos2, k, m);
                        self.extend_hole_span(work, k)?;
                        let orientation = self.orientations.require(knob_helix, self.structure.helix_of(knob.hole[j]))?;
                        side = Some(j - 1);
                        self.set_register(work, k, CORE[(j - 1) ^ orientation.bit()], m, orientation);
                    }
                }
                if side.is_none() {
                    return Err(SocketError::Register(format!(
                        "could not find a complementary knob to knob {} in daisy chain {}", k, d
                    )));
                }
                daisy = Some(d);
            }
            if daisy.is_none() {
                self.verbosity.verbose(&format!(
                    "knob {} does not belong to any daisy chains of coiled coil {}", k, c
                ));
            }
        }

        if daisy.is_none() || knob.order == Some(2) {
            let mut side = None;
            for (l, &comp) in knob.complementary.iter().enumerate() {
                for d in 0..self.daisy_chains.len() {
                    let chain = &self.daisy_chains[d];
                    if chain.coiled_coil != Some(c) || !chain.contains(comp) {
                        continue;
                    }
                    daisy = Some(d);
                    for j in 1..=2 {
                        if knob.hole[j] != self.knobs[comp].residue {
                            continue;
                        }
                        self.track_pair(work, pos2, k, comp);
                        self.extend_hole_span(work, k)?;
                        let orientation = self.orientations.require(knob_helix, self.structure.helix_of(knob.hole[j]))?;
                        side = Some(j - 1);
                        self.set_register(work, k, FLANK[(j - 1) ^ orientation.bit()], comp, orientation);
                    }
                    if side.is_none() && l + 1 == knob.complementary.len() {
                        return Err(SocketError::Register(format!(
                            "could not find a complementary knob (knob {}) to knob {}", comp, k
                        )));
                    }
                }
                if daisy.is_none() {
                    // Pairwise contact inside a larger assembly: extent only, no register
                    self.verbosity.verbose(&format!(
                        "complementary knob {} of knob {} is not in any daisy chains in this coiled coil", comp, k
                    ));
                    for &i in &knob.complementary {
                        for j in 1..=2 {
                            if knob.hole[j] == self.knobs[i].residue {
                                self.track_pair(work, pos2, k, i);
                                self.extend_hole_span(work, k)?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn set_register(&self, work: &mut Assignment, k: usize, heptad: Heptad, partner: usize, orientation: Orientation) {
        let r = self.knobs[k].residue;
        match work.registers[r] {
            Some(existing) if existing != heptad => {
                self.verbosity.warn(&format!(
                    "coiled coil {}: residue {} ({}) is already {}; knob {} with partner {} suggests {}",
                    work.coiled_coil, r, self.residue_text(r), existing, k, partner, heptad
                ));
            }
            Some(_) => {}
            None => {
                work.registers[r] = Some(heptad);
                self.verbosity.verbose(&format!(
                    "coiled coil {:2}; residue {:4} is knob {:3}; complementary knob {}; helix orientation = {} => register = {}",
                    work.coiled_coil, r, k, partner, orientation, heptad
                ));
            }
        }
    }

    fn extend_knob_span(&self, work: &mut Assignment, pos: usize, k: usize) {
        let r = self.knobs[k].residue;
        let span = &mut work.spans[pos];
        if span.knob_begin.map_or(true, |b| r < self.knobs[b].residue) {
            span.knob_begin = Some(k);
        }
        if span.knob_end.map_or(true, |e| r > self.knobs[e].residue) {
            span.knob_end = Some(k);
        }
    }

    /// Widen the hole extent of the helix holding the hole of knob `k`
    fn extend_hole_span(&self, work: &mut Assignment, k: usize) -> Result<()> {
        let hole = self.knobs[k].hole;
        let hole_helix = self.structure.helix_of(hole[0]);
        let pos = work.helices.iter().position(|&h| h == hole_helix).ok_or_else(|| {
            SocketError::Register(format!(
                "hole of knob {} is on helix {}, outside coiled coil {}", k, hole_helix, work.coiled_coil
            ))
        })?;
        let (first, last) = hole.iter().fold((usize::MAX, 0), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        let span = &mut work.spans[pos];
        span.hole_begin = Some(span.hole_begin.map_or(first, |b| b.min(first)));
        span.hole_end = Some(span.hole_end.map_or(last, |e| e.max(last)));
        Ok(())
    }

    fn track_pair(&self, work: &mut Assignment, pos2: usize, k: usize, partner: usize) {
        let r = self.knobs[k].residue;
        let tracker = &mut work.trackers[pos2];
        if tracker.begin.map_or(true, |(b, _)| r < self.knobs[b].residue) {
            tracker.begin = Some((k, partner));
        }
        if tracker.end.map_or(true, |(e, _)| r > self.knobs[e].residue) {
            tracker.end = Some((k, partner));
        }
    }

    /// Compare the measured orientation of helix `pos` against every other helix
    /// with the order of partner knobs along the other helix. Returns the number
    /// of pairs whose orientation was reset.
    fn reevaluate_orientation(&mut self, work: &Assignment, pos: usize) -> usize {
        let mut reset = 0;
        let h1 = work.helices[pos];
        for (pos2, tracker) in work.trackers.iter().enumerate() {
            if pos2 == pos {
                continue;
            }
            let ((begin, begin_partner), (end, end_partner)) = match (tracker.begin, tracker.end) {
                (Some(begin), Some(end)) => (begin, end),
                _ => continue,
            };
            let h2 = work.helices[pos2];
            let detail = format!(
                "secondary evaluation of orientation of helix #{} ({}) v helix #{} ({}): first knob {} pairs with knob {} (residue {} = {}); last knob {} pairs with knob {} (residue {} = {})",
                pos, h1, pos2, h2,
                begin, begin_partner, self.knobs[begin_partner].residue, self.residue_text(self.knobs[begin_partner].residue),
                end, end_partner, self.knobs[end_partner].residue, self.residue_text(self.knobs[end_partner].residue),
            );
            self.verbosity.verbose(&detail);
            if self.knobs[begin].residue == self.knobs[end].residue {
                self.verbosity.verbose("the two are the same; orientation cannot be reevaluated");
                continue;
            }
            let secondary = if self.knobs[begin_partner].residue < self.knobs[end_partner].residue {
                Orientation::Parallel
            } else {
                Orientation::Antiparallel
            };
            match self.orientations.get(h1, h2) {
                Some(primary) if primary == secondary => {
                    self.verbosity.verbose(&format!("result {}, agrees with primary evaluation", secondary));
                }
                _ => {
                    reset += 1;
                    if self.verbosity < Verbosity::Verbose {
                        self.verbosity.warn(&detail);
                    }
                    self.verbosity.warn(&format!(
                        "!!!!!! result {}, disagrees with primary evaluation!!!!!! - resetting orientation to {}",
                        secondary, secondary
                    ));
                    self.orientations.set(h1, h2, secondary);
                }
            }
        }
        reset
    }

    /// Close the spans, fill the gaps between knobs and build the report strings
    fn write_register_block(
        &mut self, work: &mut Assignment, numeral: usize, orientation: Orientation,
    ) -> Result<RegisterBlock> {
        let c = work.coiled_coil;
        let n = work.helices.len();
        let mut spans: Vec<Option<(usize, usize)>> = Vec::with_capacity(n);
        for span in &work.spans {
            let knob_begin = span.knob_begin.map(|k| self.knobs[k].residue);
            let knob_end = span.knob_end.map(|k| self.knobs[k].residue);
            let begin = match (span.hole_begin, knob_begin) {
                (Some(h), Some(k)) => Some(h.min(k)),
                (h, k) => h.or(k),
            };
            let end = match (span.hole_end, knob_end) {
                (Some(h), Some(k)) => Some(h.max(k)),
                (h, k) => h.or(k),
            };
            spans.push(begin.zip(end));
        }
        let lengths: Vec<usize> = spans.iter().map(|s| s.map_or(0, |(b, e)| (e + 1).saturating_sub(b))).collect();
        let max_length = lengths.iter().copied().max().unwrap_or(0);
        let mean_length = lengths.iter().sum::<usize>() as f32 / n.max(1) as f32;

        self.say(&format!(
            "\n\n{}{:5.1} {} coiled coil ({}) {} ({} {}-stranded, length max {} mean {:5.2}):",
            self.structure.code, self.config.packing_cutoff, self.config.extend, roman(numeral), c,
            orientation, n, max_length, mean_length
        ));

        let mut helix_registers = Vec::with_capacity(n);
        for pos in 0..n {
            let h = work.helices[pos];
            let helix = self.structure.helices[h].clone();
            let label = helix_label(n, pos);
            self.say(&format!(
                "\n\nassigning heptad to helix {} ({}) {}-{}:{}",
                h, label, helix.start.serial, helix.end.serial, helix.chain as char
            ));
            if let Some((begin, end)) = spans[pos] {
                self.say(&format!(
                    "extent of coiled coil packing: {}-{}:{}",
                    self.short_id(begin), self.short_id(end), helix.chain as char
                ));
                self.fill_register(work, helix.residues.clone(), begin, end)?;
            }

            let mut sequence = String::new();
            let mut register = String::new();
            let mut partner = String::new();
            let mut knob_type = String::new();
            for r in helix.residues.clone() {
                sequence.push(self.structure.residues[r].aa.one_letter());
                register.push(work.registers[r].map_or(' ', |x| x.letter()));
                let mut highest = 0;
                let mut in_coil: Option<(usize, char)> = None;
                for knob in self.knobs.iter().filter(|knob| knob.residue == r) {
                    highest = highest.max(knob.knob_type);
                    let hole_helix = self.structure.helix_of(knob.hole[0]);
                    if let Some(p) = work.helices.iter().position(|&x| x == hole_helix) {
                        if knob.knob_type > in_coil.map_or(0, |(t, _)| t) {
                            in_coil = Some((knob.knob_type, helix_label(n, p)));
                        }
                    }
                }
                match (highest, in_coil) {
                    (0, _) => {
                        partner.push('-');
                        knob_type.push('-');
                    }
                    (_, Some((t, letter))) => {
                        partner.push(letter);
                        knob_type.push_str(&t.to_string());
                    }
                    (t, None) => {
                        partner.push('!');
                        knob_type.push_str(&t.to_string());
                    }
                }
            }
            let (tads, interrupts) = tad_signature(&work.registers[helix.residues.clone()]);
            let region_length: usize = tads.iter().sum();
            for (name, value) in [("sequence", &sequence), ("register", &register), ("partner ", &partner), ("knobtype", &knob_type)] {
                self.say(&format!("{} {}", name, value));
            }
            let signature: Vec<String> = tads.iter().map(|t| t.to_string()).collect();
            self.say(&format!(
                "repeats  {:2} non-canonical interrupts in {:3} residues: {}",
                interrupts, region_length, signature.join(",")
            ));
            helix_registers.push(HelixRegister {
                helix: h,
                label,
                span: spans[pos],
                sequence,
                register,
                partner,
                knob_type,
                tads,
                interrupts,
                region_length,
            });
        }
        Ok(RegisterBlock {
            coiled_coil: c,
            numeral,
            orientation,
            helices: helix_registers,
            max_length,
            mean_length,
        })
    }

    /// Assign every unassigned residue in `begin..=end` by counting from the
    /// nearest assigned residue.
    fn fill_register(
        &self, work: &mut Assignment, residues: std::ops::Range<usize>, begin: usize, end: usize,
    ) -> Result<()> {
        let mut previous: Option<Heptad> = None;
        for r in residues.clone() {
            let current = work.registers[r];
            if r >= begin && r <= end && current.is_none() {
                let filled = if let Some(prev) = previous {
                    prev.relative(1)
                } else if r > residues.start && work.registers[r - 1].is_some() {
                    work.registers[r - 1].map_or(Heptad::A, |x| x.relative(1))
                } else {
                    let next = (r + 1..residues.end).find_map(|i| work.registers[i].map(|x| (i, x)));
                    match next {
                        Some((i, x)) => x.relative(r as isize - i as isize),
                        None => {
                            return Err(SocketError::Register(format!(
                                "couldn't find first assigned knob after residue {} in coiled coil {}",
                                r, work.coiled_coil
                            )))
                        }
                    }
                };
                work.registers[r] = Some(filled);
            }
            previous = current;
        }
        Ok(())
    }

    /// Residue number with insertion code when present
    fn short_id(&self, residue: usize) -> String {
        let id = self.structure.residues[residue].id;
        if id.icode == b' ' {
            format!("{:3}", id.serial)
        } else {
            format!("{:3}'{}'", id.serial, id.icode_char())
        }
    }
}
