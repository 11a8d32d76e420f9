// File: dssp.rs
// Reads DSSP secondary-structure assignments and builds the helix and residue tables

use std::io::BufRead;

use crate::error::{Result, SocketError};
use crate::structure::core::{HelicalStructure, Helix, Residue, ResidueId};
use crate::structure::io::ReadOptions;

const DATA_HEADER: &str = "  #  R";

/// One residue line of a DSSP file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsspRecord {
    pub id: ResidueId,
    pub aa: u8,
    pub ss: u8,
}

impl DsspRecord {
    pub fn is_helical(&self) -> bool {
        self.ss == b'H'
    }
}

/// Parse a residue line. Chain breaks give `Ok(None)`.
pub fn parse_dssp_line(line: &str) -> std::result::Result<Option<DsspRecord>, &'static str> {
    let bytes = line.as_bytes();
    if bytes.get(13) == Some(&b'!') || bytes.get(14) == Some(&b'*') {
        return Ok(None);
    }
    if bytes.len() < 17 || !bytes[..17].is_ascii() {
        return Err("DSSP residue line is shorter than 17 characters");
    }
    let serial = line[5..10].trim().parse::<i32>().map_err(|_| "Error parsing residue number")?;
    Ok(Some(DsspRecord {
        id: ResidueId::new(bytes[11], serial, bytes[10]),
        aa: bytes[13],
        ss: bytes[16],
    }))
}

/// Read every residue record after the `  #  RESIDUE` header line.
pub fn read_dssp_records<R: BufRead>(reader: R, options: &ReadOptions) -> Result<Vec<DsspRecord>> {
    let mut records: Vec<DsspRecord> = Vec::new();
    let mut in_data = false;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if !in_data {
            if line.starts_with(DATA_HEADER) {
                options.verbosity.verbose("Found beginning of residue data");
                in_data = true;
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let record = match parse_dssp_line(&line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => return Err(SocketError::Parse(format!("DSSP line {}: {}", idx + 1, e))),
        };
        if let Some(last) = records.last() {
            if last.id.chain == record.id.chain
                && (record.id.serial < last.id.serial
                    || (record.id.serial == last.id.serial && record.id.icode < last.id.icode))
            {
                options.verbosity.warn(&format!(
                    "NON-INCREMENTAL SEQUENCE: {}:{}, iCode='{}' PRECEDES {}:{}, iCode='{}'",
                    last.id.serial, last.id.chain_char(), last.id.icode_char(),
                    record.id.serial, record.id.chain_char(), record.id.icode_char()
                ));
            }
        }
        records.push(record);
    }
    if !in_data {
        return Err(SocketError::Parse("no residue data found in DSSP file".to_string()));
    }
    Ok(records)
}

/// Maximal runs of helical records within one chain, as inclusive record ranges.
pub fn helical_runs(records: &[DsspRecord]) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for (i, record) in records.iter().enumerate() {
        match current {
            Some((start, end)) if record.is_helical() && records[end].id.chain == record.id.chain => {
                current = Some((start, i));
            }
            _ => {
                if let Some(run) = current.take() {
                    runs.push(run);
                }
                if record.is_helical() {
                    current = Some((i, i));
                }
            }
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }
    runs
}

/// Extend each run by up to `extend` records at both ends without leaving its chain,
/// then join runs of the same chain that touch or overlap.
pub fn extend_runs(
    records: &[DsspRecord],
    runs: &[(usize, usize)],
    extend: usize,
    options: &ReadOptions,
) -> Vec<(usize, usize)> {
    let mut extended: Vec<(usize, usize)> = runs.iter()
        .map(|&(mut start, mut end)| {
            for _ in 0..extend {
                if start > 0 && records[start - 1].id.chain == records[start].id.chain {
                    start -= 1;
                }
            }
            for _ in 0..extend {
                if end + 1 < records.len() && records[end + 1].id.chain == records[end].id.chain {
                    end += 1;
                }
            }
            (start, end)
        })
        .collect();

    let mut merged = 0usize;
    let mut h = 0usize;
    while h + 1 < extended.len() {
        let (start, end) = extended[h];
        let (next_start, next_end) = extended[h + 1];
        if records[end].id.chain == records[next_start].id.chain
            && (next_start as isize) - (end as isize) < 2
        {
            options.verbosity.info(&format!(
                "joining helices {} ({}{}-{}{}:{}) and {} ({}{}-{}{}:{})",
                h,
                records[start].id.serial, records[start].id.icode_char(),
                records[end].id.serial, records[end].id.icode_char(),
                records[start].id.chain_char(),
                h + 1,
                records[next_start].id.serial, records[next_start].id.icode_char(),
                records[next_end].id.serial, records[next_end].id.icode_char(),
                records[next_start].id.chain_char(),
            ));
            extended[h].1 = next_end.max(end);
            extended.remove(h + 1);
            merged += 1;
        } else {
            h += 1;
        }
    }
    if merged > 0 {
        options.verbosity.info(&format!("{} helix pairs joined; {} helices remain", merged, extended.len()));
    }
    extended
}

/// Build the helix and residue tables from DSSP records.
pub fn build_helix_table(code: &str, records: &[DsspRecord], options: &ReadOptions) -> Result<HelicalStructure> {
    let mut runs = helical_runs(records);
    if options.extend > 0 {
        runs = extend_runs(records, &runs, options.extend, options);
    }
    if runs.len() > options.max_helices {
        return Err(SocketError::CapacityExceeded { what: "helices", limit: options.max_helices });
    }
    let mut helices: Vec<Helix> = Vec::with_capacity(runs.len());
    let mut residues: Vec<Residue> = Vec::new();
    for (h, &(start, end)) in runs.iter().enumerate() {
        let first = residues.len();
        for record in &records[start..=end] {
            if residues.len() == options.max_residues {
                return Err(SocketError::CapacityExceeded { what: "alpha-helix residues", limit: options.max_residues });
            }
            residues.push(Residue::new(record.id, record.aa, h));
        }
        helices.push(Helix::new(records[start].id, records[end].id, first..residues.len()));
    }
    options.verbosity.info(&format!("There are {} alpha-helical residues in this structure", residues.len()));
    if options.verbosity >= crate::utils::log::Verbosity::Verbose {
        for (i, helix) in helices.iter().enumerate() {
            options.verbosity.verbose(&format!(
                "helix {:3}) {:4} {} - {:4} {}\t{}",
                i, helix.start.serial, helix.start.icode_char(),
                helix.end.serial, helix.end.icode_char(), helix.chain as char
            ));
        }
    }
    Ok(HelicalStructure::from_tables(code, helices, residues))
}

/// Read a DSSP stream into a helical structure with no atoms yet.
pub fn read_dssp<R: BufRead>(reader: R, code: &str, options: &ReadOptions) -> Result<HelicalStructure> {
    let records = read_dssp_records(reader, options)?;
    build_helix_table(code, &records, options)
}
