// File: main.rs
// Description: Entry point of the coildisco binary

use coildisco::cli::workflows::batch::run_batch;
use coildisco::cli::workflows::config::write_or_print_config;
use coildisco::cli::workflows::run::run_socket;
use coildisco::cli::{AppArgs, ConfigOverrides};
use coildisco::prelude::*;

const HELP: &str = "\
USAGE: coildisco run -f <PDB> -s <DSSP> [OPTIONS]
       coildisco batch -l <TSV> [OPTIONS]
       coildisco config (-w | -p) <TOML>

Detects knobs-into-holes packing and coiled coils in protein structures.

SUBCOMMANDS:
  run       Analyse one structure
  batch     Analyse every structure in a list, in parallel
  config    Write the default configuration or check one
OPTIONS:
  -h, --help       Print this help menu
  -V, --version    Print the version
";

fn parse_overrides(args: &mut pico_args::Arguments) -> std::result::Result<ConfigOverrides, pico_args::Error> {
    Ok(ConfigOverrides {
        config_path: args.opt_value_from_str("--config")?,
        cutoff: args.opt_value_from_str(["-c", "--cutoff"])?,
        extend: args.opt_value_from_str(["-e", "--extend"])?,
        knob_threshold: args.opt_value_from_str(["-k", "--knob-threshold"])?,
        reference_atom: args.opt_value_from_str(["-t", "--ref-atom"])?,
        all_atoms: args.contains(["-a", "--all-atoms"]),
        include_ca: args.contains(["-i", "--include-ca"]),
        quiet: args.contains(["-q", "--quiet"]),
        verbose: args.contains(["-v", "--verbose"]),
        debug: args.contains("--debug"),
    })
}

fn parse_arg() -> std::result::Result<AppArgs, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let parsed = match args.subcommand()?.as_deref() {
        Some("run") => AppArgs::Run {
            pdb_path: args.opt_value_from_str(["-f", "--pdb"])?,
            dssp_path: args.opt_value_from_str(["-s", "--dssp"])?,
            long_output: args.opt_value_from_str(["-o", "--long-output"])?,
            rasmol: args.opt_value_from_str(["-r", "--rasmol"])?,
            help: args.contains(["-h", "--help"]),
            overrides: parse_overrides(&mut args)?,
        },
        Some("batch") => AppArgs::Batch {
            list_path: args.opt_value_from_str(["-l", "--list"])?,
            threads: args.opt_value_from_str(["-j", "--threads"])?.unwrap_or(1),
            help: args.contains(["-h", "--help"]),
            overrides: parse_overrides(&mut args)?,
        },
        Some("config") => AppArgs::Config {
            write_path: args.opt_value_from_str(["-w", "--write"])?,
            print_path: args.opt_value_from_str(["-p", "--print"])?,
            help: args.contains(["-h", "--help"]),
        },
        Some(other) => {
            return Err(pico_args::Error::ArgumentParsingFailed { cause: format!("unknown subcommand '{}'", other) })
        }
        None => AppArgs::Global {
            help: args.contains(["-h", "--help"]),
            version: args.contains(["-V", "--version"]),
        },
    };
    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments {:?}", remaining),
        });
    }
    Ok(parsed)
}

fn main() {
    let parsed_args = parse_arg().unwrap_or_else(|e| {
        print_log_msg(FAIL, &format!("{}", e));
        eprintln!("{}", HELP);
        std::process::exit(1);
    });
    let status = match parsed_args {
        AppArgs::Global { help, version } => {
            if version {
                println!("coildisco {}", env!("CARGO_PKG_VERSION"));
            } else {
                coildisco::cli::print_logo();
                eprintln!("{}", HELP);
                if !help {
                    print_log_msg(WARN, "no subcommand given");
                }
            }
            Ok(0)
        }
        args @ AppArgs::Run { .. } => run_socket(args).map(|_| 0),
        args @ AppArgs::Batch { .. } => run_batch(args),
        args @ AppArgs::Config { .. } => write_or_print_config(args).map(|_| 0),
    };
    match status {
        Ok(0) => {}
        Ok(failed) => {
            print_log_msg(FAIL, &format!("{} structures failed", failed));
            std::process::exit(1);
        }
        Err(e) => {
            print_log_msg(FAIL, &e.to_string());
            std::process::exit(1);
        }
    }
}
