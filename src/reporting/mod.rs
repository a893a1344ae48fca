// src/reporting/mod.rs
//! Report assembly: JSON views, the architecture prompt, console output.

pub mod console;
pub mod prompt;
mod shared;
pub mod views;
pub mod writer;

pub use self::console::print_report;
pub use self::prompt::architecture_prompt;
pub use self::views::{combined, integration_view, structure_view};
pub use self::writer::{write_json, write_summary};
