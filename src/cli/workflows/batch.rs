// File: batch.rs
// Description:
//    Analyse a list of structures. Every structure is an independent unit of
//    work, so the list is spread over a rayon pool; reports are collected and
//    printed in input order once all structures are done.

use rayon::prelude::*;

use crate::cli::workflows::run::{analyse_structure, StructureRun};
use crate::cli::*;
use crate::prelude::*;

pub const HELP_BATCH: &str = "\
USAGE: coildisco batch -l <TSV> [OPTIONS]
Options:
    -l, --list <TSV>                One <PDB>\\t<DSSP> pair per line; '#' starts a comment
    -j, --threads <THREADS>         Number of threads to use (default 1)
    -c, --cutoff <ANGSTROM>         Packing cutoff for side-chain centroids (default 7.0)
    -e, --extend <N>                Extend every helix by N residues at each end, 0..=2 (default 0)
    -k, --knob-threshold <TYPE>     Lowest knob type reported, 0..=4 (default 3)
    -t, --ref-atom <ATOM>           Reference atom for packing angles (default CA)
    -a, --all-atoms                 Keep hydrogen atoms
    -i, --include-ca                Keep alpha hydrogens in side-chain centroids
    --config <TOML>                 Read options from a configuration file; flags override it
    -q, --quiet                     Print only the result lines
    -v, --verbose                   Print every stage
    --debug                         Print per-step traces
    -h, --help                      Print this help menu
";

/// Report of one batch entry, ready to print
struct BatchEntry {
    pdb_path: String,
    summary: String,
    result_lines: Vec<String>,
    error: Option<SocketError>,
}

impl From<(String, Result<StructureRun>)> for BatchEntry {
    fn from((pdb_path, run): (String, Result<StructureRun>)) -> Self {
        match run {
            Ok(StructureRun { session, outcome }) => BatchEntry {
                pdb_path,
                summary: session.summary,
                result_lines: session.result_lines,
                error: outcome.err(),
            },
            Err(error) => BatchEntry { pdb_path, summary: String::new(), result_lines: Vec::new(), error: Some(error) },
        }
    }
}

/// Returns the number of structures whose analysis failed
pub fn run_batch(env: AppArgs) -> Result<usize> {
    match env {
        AppArgs::Batch { list_path, threads, overrides, help } => {
            if help {
                eprintln!("{}", HELP_BATCH);
                return Ok(0);
            }
            let list_path = match list_path {
                Some(path) => path,
                None => {
                    eprintln!("{}", HELP_BATCH);
                    return Err(SocketError::Config("a list of structures is required".to_string()));
                }
            };
            let config = overrides.resolve()?;
            let verbosity = config.verbosity();
            if verbosity > Verbosity::Quiet {
                print_logo();
            }
            let pairs = load_pair_list(&list_path)?;
            verbosity.info(&format!("{} structures in {}, using {} threads", pairs.len(), list_path, threads));

            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads.max(1))
                .build()
                .map_err(|e| SocketError::Config(format!("cannot start thread pool: {}", e)))?;
            let entries: Vec<BatchEntry> = measure_time!(pool.install(|| {
                pairs.par_iter()
                    .map(|(pdb, dssp)| BatchEntry::from((pdb.clone(), analyse_structure(pdb, dssp, &config))))
                    .collect()
            }), verbosity >= Verbosity::Verbose);

            let mut failed = 0;
            for entry in entries {
                print!("{}", entry.summary);
                for line in &entry.result_lines {
                    println!("{}", line);
                }
                if let Some(error) = entry.error {
                    print_log_msg(FAIL, &format!("{}: {}", entry.pdb_path, error));
                    failed += 1;
                }
            }
            if verbosity > Verbosity::Quiet {
                print_log_msg(DONE, &format!("{} structures analysed, {} failed", pairs.len(), failed));
            }
            Ok(failed)
        }
        _ => {
            eprintln!("{}", HELP_BATCH);
            Ok(0)
        }
    }
}
