// piiscan/src/commands/mod.rs
//! Command runners for the piiscan CLI.

pub mod scan;
