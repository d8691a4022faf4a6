//! Schema module - Configuration, chromosome, and report types for the search.

mod chromosome;
mod config;
mod report;

pub use chromosome::*;
pub use config::*;
pub use report::*;
