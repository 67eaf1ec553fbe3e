pub mod common;
pub mod config;
pub mod sites;
pub mod stats;
pub mod timer;
