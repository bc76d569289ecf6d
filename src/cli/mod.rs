// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the toponym command-line interface.
//!
//! Three subcommands: `search` for a one-shot query (optionally replayed
//! keystroke by keystroke through the dispatcher), `interactive` for a
//! line-driven session, and `datasets` to see what is loaded.

pub mod display;
pub mod interactive;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use toponym::{ConfigError, SearchRequest};

#[derive(Parser)]
#[command(
    name = "toponym",
    about = "Incremental, typo-tolerant place-name search",
    version
)]
pub struct Cli {
    /// Settings file (JSON). Defaults are used when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory that dataset paths are resolved against
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Distance engine backend: sequential or parallel
    #[arg(long, global = true)]
    pub engine: Option<String>,

    /// Enable only these datasets (repeatable). Overrides the settings file.
    #[arg(long = "dataset", global = true)]
    pub datasets: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that searches.
#[derive(Args, Clone, Debug)]
pub struct QueryOptions {
    /// Match type: contains, prefix or suffix
    #[arg(short = 't', long = "type", default_value = "contains")]
    pub search_type: String,

    /// Sort key: name, length, department or distance
    #[arg(short, long, default_value = "name")]
    pub sort: String,

    /// Sort in descending order
    #[arg(long)]
    pub descending: bool,

    /// Add typo-tolerant suggestions to the exact matches
    #[arg(short, long)]
    pub correction: bool,

    /// Rows per page (minimum 5). Defaults to the settings file.
    #[arg(long)]
    pub per_page: Option<usize>,
}

impl QueryOptions {
    /// Build the request, rejecting unknown types and sort keys.
    pub fn request(&self, query: &str) -> Result<SearchRequest, ConfigError> {
        SearchRequest::parse(
            query,
            &self.search_type,
            &self.sort,
            !self.descending,
            self.correction,
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search once and print a page of results
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        options: QueryOptions,

        /// Page to print (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print the page as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Feed the query one character at a time, as typing would
        #[arg(long)]
        incremental: bool,
    },

    /// Read queries and `:commands` from stdin
    Interactive {
        #[command(flatten)]
        options: QueryOptions,
    },

    /// List configured datasets
    Datasets,
}
