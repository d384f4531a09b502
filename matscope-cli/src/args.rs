//! CLI argument parsing

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "matscope")]
#[command(author, version, about = "Material usage reports for architecture studios")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON dataset to report on (defaults to the demo studio)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate PDF and/or Excel reports
    Generate {
        #[command(flatten)]
        filters: FilterArgs,

        /// Report kind (internal, client)
        #[arg(long)]
        kind: Option<String>,

        /// Output format (pdf, excel); can be repeated
        #[arg(long, action = ArgAction::Append)]
        format: Vec<String>,

        /// Directory the reports are written to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the report document as JSON
    Preview {
        #[command(flatten)]
        filters: FilterArgs,

        /// Report kind (internal, client)
        #[arg(long)]
        kind: Option<String>,

        /// Write the JSON to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Ask the assistant about projects, materials or manufacturers
    Ask {
        /// The question, e.g. "what materials were used in Mountain Lodge"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

/// Filter selection flags shared by report commands
#[derive(Debug, Default, ClapArgs)]
pub struct FilterArgs {
    /// Include only this project (can be repeated)
    #[arg(long, action = ArgAction::Append)]
    pub project: Vec<String>,

    /// Include only this client's projects (can be repeated)
    #[arg(long, action = ArgAction::Append)]
    pub client: Vec<String>,

    /// Include only this material type (can be repeated)
    #[arg(long = "material-type", action = ArgAction::Append)]
    pub material_type: Vec<String>,

    /// Include only this manufacturer (can be repeated)
    #[arg(long, action = ArgAction::Append)]
    pub manufacturer: Vec<String>,

    /// Earliest project start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest project start date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}
