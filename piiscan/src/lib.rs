// piiscan/src/lib.rs
//! # piiscan CLI Application
//!
//! This crate provides the terminal interface for the piiscan risk engine.
//! All detection, classification, and scoring logic lives in
//! `piiscan-core`; this crate only parses arguments, wires up the
//! pipeline, and renders the resulting report.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
