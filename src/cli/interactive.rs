// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line commands for the interactive session.
//!
//! A plain line is the new query. A line starting with `:` is a command:
//!
//! | Command              | Effect                              |
//! |----------------------|-------------------------------------|
//! | `:next` / `:prev`    | Page navigation                     |
//! | `:more` / `:less`    | Page size ±5 (minimum 5)            |
//! | `:sort KEY`          | name, length, department, distance  |
//! | `:reverse`           | Toggle sort direction               |
//! | `:type TYPE`         | contains, prefix, suffix            |
//! | `:correction on/off` | Typo-tolerant suggestions           |
//! | `:enable NAME`       | Enable a dataset                    |
//! | `:disable NAME`      | Disable a dataset                   |
//! | `:datasets`          | List datasets                       |
//! | `:help`              | This table                          |
//! | `:quit`              | Leave                               |

use anyhow::{bail, Result};

use toponym::{SearchType, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Next,
    Prev,
    More,
    Less,
    Sort(SortKey),
    Reverse,
    Type(SearchType),
    Correction(bool),
    Enable(String),
    Disable(String),
    Datasets,
    Help,
    Quit,
}

/// Parse one input line.
pub fn parse_line(line: &str) -> Result<Command> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Query(line.to_string()));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    let command = match (name.to_lowercase().as_str(), argument) {
        ("next" | "n", "") => Command::Next,
        ("prev" | "p", "") => Command::Prev,
        ("more" | "+", "") => Command::More,
        ("less" | "-", "") => Command::Less,
        ("reverse" | "r", "") => Command::Reverse,
        ("datasets", "") => Command::Datasets,
        ("help" | "h" | "?", "") => Command::Help,
        ("quit" | "q" | "exit", "") => Command::Quit,
        ("sort", key) if !key.is_empty() => Command::Sort(key.parse()?),
        ("type", search_type) if !search_type.is_empty() => Command::Type(search_type.parse()?),
        ("correction", "on" | "yes" | "true") => Command::Correction(true),
        ("correction", "off" | "no" | "false") => Command::Correction(false),
        ("enable", dataset) if !dataset.is_empty() => Command::Enable(dataset.to_string()),
        ("disable", dataset) if !dataset.is_empty() => Command::Disable(dataset.to_string()),
        _ => bail!("unknown command '{}' (try :help)", line),
    };
    Ok(command)
}
