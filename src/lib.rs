//! # About project
//!
//! coildisco finds knobs-into-holes side-chain packing between alpha helices
//! and reports the coiled coils it forms: stoichiometry, orientation and
//! heptad register of every helix.

pub mod cli;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod structure;
pub mod utils;

pub mod prelude {
    pub use crate::cli::config::SocketConfig;
    pub use crate::controller::AnalysisSession;
    pub use crate::error::{Result, SocketError};
    pub use crate::measure_time;
    pub use crate::structure::io::load_structure;
    pub use crate::utils::loader::{get_code, load_pair_list};
    pub use crate::utils::log::{log_msg, print_log_msg, Verbosity, DONE, FAIL, INFO, WARN};
}
