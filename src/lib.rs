//! Clio - offline-first natural language to shell command resolver

pub mod catalog;
pub mod core;
pub mod intent;
pub mod modules;
pub mod providers;
