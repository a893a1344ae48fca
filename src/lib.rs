// src/lib.rs
pub mod analysis;
pub mod ast;
pub mod cache;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod graph;
pub mod lang;
pub mod logging;
pub mod manifest;
pub mod reporting;
pub mod types;
