//! Compute module - Board evolution and genetic search.

mod board;

pub mod evolution;

pub use board::*;
