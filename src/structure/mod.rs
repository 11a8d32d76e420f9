pub mod aminoacid;
pub mod atom;
pub mod coordinate;
pub mod core;
pub mod descriptor;
pub mod io;
