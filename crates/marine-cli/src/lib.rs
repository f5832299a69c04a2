//! CLI library components for the marine economy explorer.

pub mod analysis;
pub mod logging;
