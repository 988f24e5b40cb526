//! Command-line arguments.

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    /// Human-readable output for local development.
    Pretty,
    /// Line-delimited JSON for log aggregation.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "scarlet", version, about = "Course catalog search and room availability API")]
pub struct Args {
    /// Log output format.
    #[arg(long, value_enum, default_value = "pretty")]
    pub tracing: TracingFormat,
}
