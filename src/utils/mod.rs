//! Utility modules

pub mod fuzzy;

pub use fuzzy::{find_matches, similarity, FuzzyMatch};
