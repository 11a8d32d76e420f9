// File: config.rs
// Description: Write the default configuration or check an existing one

use crate::cli::config::{read_socket_config_from_file, write_socket_config_to_file, SocketConfig};
use crate::cli::*;
use crate::prelude::*;

pub const HELP_CONFIG: &str = "\
USAGE: coildisco config -w <TOML>
       coildisco config -p <TOML>
Options:
    -w, --write <TOML>    Write the default configuration to a file
    -p, --print <TOML>    Validate a configuration file and print it
    -h, --help            Print this help menu
";

pub fn write_or_print_config(env: AppArgs) -> Result<()> {
    match env {
        AppArgs::Config { write_path, print_path, help } => {
            if help || (write_path.is_none() && print_path.is_none()) {
                eprintln!("{}", HELP_CONFIG);
                return Ok(());
            }
            if let Some(path) = write_path {
                write_socket_config_to_file(&path, &SocketConfig::default())?;
                print_log_msg(DONE, &format!("default configuration written to {}", path));
            }
            if let Some(path) = print_path {
                let config = read_socket_config_from_file(&path)?;
                config.validate()?;
                let text = toml::to_string(&config.to_toml()).map_err(|e| SocketError::Parse(e.to_string()))?;
                print!("{}", text);
            }
            Ok(())
        }
        _ => {
            eprintln!("{}", HELP_CONFIG);
            Ok(())
        }
    }
}
