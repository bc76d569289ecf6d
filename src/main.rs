// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, BufRead};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use toponym::{
    load_catalog, wait_for, Catalog, DispatchEvent, GenerationId, QueryDispatcher, ResultRecord,
    ResultView, SearchRequest, Searcher, Settings,
};

mod cli;
use cli::display;
use cli::interactive::{parse_line, Command};
use cli::{Cli, Commands, QueryOptions};

/// How long the CLI waits for a generation to settle.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(120);

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    let catalog = load_datasets(&cli, &settings)?;

    match cli.command {
        Commands::Search {
            query,
            options,
            page,
            json,
            incremental,
        } => run_search(&settings, catalog, &query, &options, page, json, incremental),
        Commands::Interactive { options } => run_interactive(&settings, catalog, &options),
        Commands::Datasets => {
            display::datasets(&catalog.status());
            Ok(())
        }
    }
}

/// Log to stderr, filtered by `TOPONYM_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TOPONYM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(engine) = &cli.engine {
        settings.engine.backend = engine.parse()?;
    }
    tracing::debug!(?settings, "settings resolved");
    Ok(settings)
}

fn load_datasets(cli: &Cli, settings: &Settings) -> Result<Catalog> {
    #[cfg(feature = "parallel")]
    let spinner = {
        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_style(indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        spinner.set_message(format!("loading {} datasets...", settings.datasets.len()));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    };

    let loaded = load_catalog(&settings.datasets, &cli.data_dir);

    #[cfg(feature = "parallel")]
    spinner.finish_and_clear();

    let mut catalog = loaded.with_context(|| {
        format!("failed to load datasets from {}", cli.data_dir.display())
    })?;
    if !cli.datasets.is_empty() {
        catalog.enable_only(cli.datasets.as_slice())?;
    }
    Ok(catalog)
}

fn start_session(
    settings: &Settings,
    catalog: Catalog,
    options: &QueryOptions,
) -> Result<(QueryDispatcher, Receiver<DispatchEvent>)> {
    let searcher = Searcher::from_config(&settings.engine)?;
    let page_size = options.per_page.unwrap_or(settings.engine.results_per_page);
    Ok(QueryDispatcher::new(searcher, catalog, page_size)?)
}

/// Block until `generation` commits. Failures and timeouts are errors.
fn settle(events: &Receiver<DispatchEvent>, generation: GenerationId) -> Result<()> {
    match wait_for(events, generation, SETTLE_TIMEOUT) {
        Some(DispatchEvent::Committed { total, .. }) => {
            tracing::debug!(%generation, total, "settled");
            Ok(())
        }
        Some(DispatchEvent::Failed { error, .. }) => {
            Err(anyhow::Error::new(error).context(format!("search {} failed", generation)))
        }
        Some(DispatchEvent::Superseded { .. }) => bail!("search {} was superseded", generation),
        None => bail!("search {} did not finish within {:?}", generation, SETTLE_TIMEOUT),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct JsonPage<'a> {
    generation: u64,
    query: &'a str,
    total: usize,
    page: usize,
    pages: usize,
    per_page: usize,
    hints: String,
    results: &'a [ResultRecord],
}

impl<'a> JsonPage<'a> {
    fn new(view: &'a ResultView) -> Self {
        let pagination = view.pagination();
        Self {
            generation: view.generation().get(),
            query: &view.request().query,
            total: view.total(),
            page: pagination.page() + 1,
            pages: pagination.total_pages(view.total()),
            per_page: pagination.page_size(),
            hints: view.hints().iter().collect(),
            results: view.page_rows(),
        }
    }
}

fn run_search(
    settings: &Settings,
    catalog: Catalog,
    query: &str,
    options: &QueryOptions,
    page: usize,
    json: bool,
    incremental: bool,
) -> Result<()> {
    let request = options.request(query)?;
    let (mut dispatcher, events) = start_session(settings, catalog, options)?;

    let mut generation = GenerationId::default();
    if incremental {
        let mut typed = String::new();
        for c in request.query.chars() {
            typed.push(c);
            generation = dispatcher.submit(SearchRequest {
                query: typed.clone(),
                ..request.clone()
            });
        }
    }
    if generation == GenerationId::default() {
        generation = dispatcher.submit(request);
    }

    settle(&events, generation)?;

    for _ in 1..page {
        if !dispatcher.next_page() {
            break;
        }
    }

    let view = dispatcher.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&JsonPage::new(&view))?);
    } else {
        display::results(&view);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INTERACTIVE
// ═══════════════════════════════════════════════════════════════════════════

fn run_interactive(settings: &Settings, catalog: Catalog, options: &QueryOptions) -> Result<()> {
    let request = options.request("")?;
    let (mut dispatcher, events) = start_session(settings, catalog, options)?;

    display::banner(dispatcher.corpus().len());
    let generation = dispatcher.submit(request);
    settle(&events, generation)?;
    display::results(&dispatcher.view());
    display::prompt();

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                display::warning(&e.to_string());
                display::prompt();
                continue;
            }
        };

        let generation = match command {
            Command::Quit => break,
            Command::Query(query) => dispatcher.set_query(&query),
            Command::Next => {
                dispatcher.next_page();
                None
            }
            Command::Prev => {
                dispatcher.prev_page();
                None
            }
            Command::More => {
                dispatcher.grow_page();
                None
            }
            Command::Less => {
                dispatcher.shrink_page();
                None
            }
            Command::Sort(key) => Some(dispatcher.set_sort_key(key)),
            Command::Reverse => Some(dispatcher.toggle_sort_direction()),
            Command::Type(search_type) => Some(dispatcher.set_search_type(search_type)),
            Command::Correction(enabled) => Some(dispatcher.set_correction(enabled)),
            Command::Enable(name) => toggle_dataset(&mut dispatcher, &name, true),
            Command::Disable(name) => toggle_dataset(&mut dispatcher, &name, false),
            Command::Datasets => {
                display::datasets(&dispatcher.catalog().status());
                display::prompt();
                continue;
            }
            Command::Help => {
                display::help();
                display::prompt();
                continue;
            }
        };

        if let Some(generation) = generation {
            if let Err(e) = settle(&events, generation) {
                display::failure(&format!("{:#}", e));
                display::prompt();
                continue;
            }
        }
        display::results(&dispatcher.view());
        display::prompt();
    }

    Ok(())
}

/// Unknown dataset names are reported and leave the session unchanged.
fn toggle_dataset(
    dispatcher: &mut QueryDispatcher,
    name: &str,
    enabled: bool,
) -> Option<GenerationId> {
    match dispatcher.set_dataset_enabled(name, enabled) {
        Ok(generation) => Some(generation),
        Err(e) => {
            display::warning(&e.to_string());
            None
        }
    }
}
