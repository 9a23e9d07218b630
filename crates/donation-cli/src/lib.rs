//! Library components of the donation enrichment CLI.

pub mod logging;
pub mod pipeline;
pub mod types;
