//! Command implementations for carportctl

pub mod models;
pub mod profile;
pub mod replay;
