use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::context::PreviewLocation;

/// archselect - interactive selection menus for installer scripts
#[derive(Parser, Debug)]
#[command(name = "archselect")]
#[command(about = "Pick one or many options from a terminal menu and print the result as JSON")]
#[command(version)]
pub struct Cli {
    /// Write logs to this file instead of the default location.
    ///
    /// The terminal belongs to the menu while it is shown, so logs never go
    /// to stdout or stderr. RUST_LOG controls the level.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose from a list of plain options
    Select {
        /// Options to offer
        #[arg(required = true)]
        options: Vec<String>,

        /// Allow choosing several options
        #[arg(short, long)]
        multi: bool,

        /// Refuse to return without a selection
        #[arg(long)]
        mandatory: bool,

        /// Option offered first and returned when skipping
        #[arg(short, long)]
        default: Option<String>,

        /// Keep the options in the given order
        #[arg(long)]
        no_sort: bool,

        /// Previously selected option (repeatable)
        #[arg(short, long)]
        preset: Vec<String>,

        /// Menu title
        #[arg(short, long)]
        title: Option<String>,

        /// Menu configuration file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Choose rows of a table built from a JSON array of objects
    Table {
        /// JSON file holding the records
        #[arg(long)]
        data: PathBuf,

        /// Columns to show, in order (default: all)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Allow choosing several rows
        #[arg(short, long)]
        multi: bool,

        /// Index of a previously selected record (repeatable)
        #[arg(long)]
        preset_index: Vec<usize>,

        /// Extra option shown below the table (repeatable)
        #[arg(long)]
        custom: Vec<String>,

        /// Show the focused record in a preview pane (right or bottom)
        #[arg(long)]
        preview: Option<PreviewLocation>,

        /// Menu configuration file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a menu configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
