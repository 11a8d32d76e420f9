// File: log.rs
// Colored prefixes for diagnostics written to stderr

pub const INFO: &str = "\x1b[1;32m[INFO]\x1b[0m";
pub const FAIL: &str = "\x1b[1;31m[FAIL]\x1b[0m";
pub const WARN: &str = "\x1b[1;33m[WARN]\x1b[0m";
pub const DONE: &str = "\x1b[1;34m[DONE]\x1b[0m";

pub fn log_msg(prefix: &str, msg: &str) -> String { format!("{} {}", prefix, msg) }
pub fn print_log_msg(prefix: &str, msg: &str) { eprintln!("{}", log_msg(prefix, msg)); }

/// How chatty the analysis is on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool, debug: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
    pub fn info(&self, msg: &str) {
        if *self >= Verbosity::Normal { print_log_msg(INFO, msg); }
    }
    pub fn verbose(&self, msg: &str) {
        if *self >= Verbosity::Verbose { print_log_msg(INFO, msg); }
    }
    pub fn debug(&self, msg: &str) {
        if *self >= Verbosity::Debug { print_log_msg(INFO, msg); }
    }
    // Warnings are printed regardless of verbosity
    pub fn warn(&self, msg: &str) { print_log_msg(WARN, msg); }
}

#[cfg(test)]
mod tests {
    use super::*;
    // Test log with colored prefix
    #[test]
    fn test_colored_log() {
        let msg = "Hello, world!";
        let info = log_msg(INFO, msg);
        let fail = log_msg(FAIL, msg);
        let warn = log_msg(WARN, msg);
        let done = log_msg(DONE, msg);

        assert_eq!(info, "\x1b[1;32m[INFO]\x1b[0m Hello, world!");
        assert_eq!(fail, "\x1b[1;31m[FAIL]\x1b[0m Hello, world!");
        assert_eq!(warn, "\x1b[1;33m[WARN]\x1b[0m Hello, world!");
        assert_eq!(done, "\x1b[1;34m[DONE]\x1b[0m Hello, world!");
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false, true), Verbosity::Debug);
        assert!(Verbosity::Debug > Verbosity::Verbose);
    }
}
