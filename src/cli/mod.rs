//! Command line interface for coildisco

// File: mod.rs
// Arguments of CLI app are defined here

pub mod config;
pub mod workflows;

use crate::cli::config::{read_socket_config_from_file, SocketConfig};
use crate::error::Result;

/// Analysis options that can be given on the command line. Values given
/// here override the ones read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub config_path: Option<String>,
    pub cutoff: Option<f32>,
    pub extend: Option<usize>,
    pub knob_threshold: Option<usize>,
    pub reference_atom: Option<String>,
    pub all_atoms: bool,
    pub include_ca: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub debug: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut SocketConfig) {
        if let Some(cutoff) = self.cutoff {
            config.packing_cutoff = cutoff;
        }
        if let Some(extend) = self.extend {
            config.extend = extend;
        }
        if let Some(threshold) = self.knob_threshold {
            config.knob_threshold = threshold;
        }
        if let Some(atom) = &self.reference_atom {
            config.reference_atom = atom.clone();
        }
        config.include_all_atoms |= self.all_atoms;
        config.include_alpha_carbons |= self.include_ca;
        config.quiet |= self.quiet;
        config.verbose |= self.verbose;
        config.debug |= self.debug;
    }

    /// Defaults, then the configuration file, then the flags; validated
    pub fn resolve(&self) -> Result<SocketConfig> {
        let mut config = match &self.config_path {
            Some(path) => read_socket_config_from_file(path)?,
            None => SocketConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

pub enum AppArgs {
    Global {
        help: bool,
        version: bool,
    },
    Run {
        pdb_path: Option<String>,
        dssp_path: Option<String>,
        long_output: Option<String>,
        rasmol: Option<String>,
        overrides: ConfigOverrides,
        help: bool,
    },
    Batch {
        list_path: Option<String>,
        threads: usize,
        overrides: ConfigOverrides,
        help: bool,
    },
    Config {
        write_path: Option<String>,
        print_path: Option<String>,
        help: bool,
    },
}

pub fn print_logo() {
    let logo = [
        "",
        "\x1b[91m░█▀▀░█▀█░▀█▀░█░░░\x1b[93m█▀▄░▀█▀░█▀▀░█▀▀░█▀█\x1b[0m",
        "\x1b[91m░█░░░█░█░░█░░█░░░\x1b[93m█░█░░█░░▀▀█░█░░░█░█\x1b[0m",
        "\x1b[91m░▀▀▀░▀▀▀░▀▀▀░▀▀▀░\x1b[93m▀▀░░▀▀▀░▀▀▀░▀▀▀░▀▀▀\x1b[0m",
        "",
    ];

    for line in &logo {
        eprintln!("{}", line);
    }
}
