use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ScanConfig;

#[derive(Parser)]
#[command(
    name = "springscope",
    version,
    about = "Architecture metadata and code smell scanner for Spring-style Java projects"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a project and write reports
    Scan(ScanArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// code_analysis.json, data_analysis.json and combined_analysis.json
    #[default]
    Json,
    /// Architecture overview on stdout
    Prompt,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Root directory of the Java project
    pub project_dir: PathBuf,
    /// Config file (default: <PROJECT_DIR>/springscope.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directory for JSON reports (default: <PROJECT_DIR>)
    #[arg(long, short, value_name = "DIR")]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Debug logging and per-class smell listing
    #[arg(long, short)]
    pub verbose: bool,
    #[arg(long)]
    pub complexity_threshold: Option<usize>,
    #[arg(long)]
    pub method_length_threshold: Option<usize>,
    #[arg(long)]
    pub class_size_threshold: Option<usize>,
    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl ScanArgs {
    /// Applies command-line overrides on top of file configuration.
    pub fn apply_overrides(&self, config: &mut ScanConfig) {
        if let Some(v) = self.complexity_threshold {
            config.complexity_threshold = v;
        }
        if let Some(v) = self.method_length_threshold {
            config.method_length_threshold = v;
        }
        if let Some(v) = self.class_size_threshold {
            config.class_size_threshold = v;
        }
        if let Some(v) = self.batch_size {
            config.batch_size = v;
        }
    }
}
