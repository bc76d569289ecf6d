// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the toponym CLI.
//!
//! Result pages, dataset listings and the interactive banner. OneDark for dark
//! terminals, One Light for light ones. The detection tries `TOPONYM_THEME`
//! first, then `COLORFGBG` (set by some terminals), then macOS system
//! appearance, then defaults to dark.
//!
//! Respects `NO_COLOR` and falls back to plain text when stdout is not a TTY,
//! so piping a page into another tool gives clean columns.
//!
//! # Theme detection order
//!
//! 1. `TOPONYM_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use std::sync::OnceLock;

use toponym::{DatasetStatus, ResultRecord, ResultView};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Cached theme detection result
static THEME: OnceLock<Theme> = OnceLock::new();

/// Detect terminal theme from environment
fn detect_theme() -> Theme {
    // 1. Explicit override via TOPONYM_THEME
    if let Ok(theme) = std::env::var("TOPONYM_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // 2. COLORFGBG (format: "fg;bg" where bg > 6 typically means light)
    // Set by some terminals like xterm, rxvt
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                // Colors 0-6 are typically dark, 7+ are light
                // 15 = white, 0 = black
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    // 3. macOS: Check system appearance
    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            // "Dark" means dark mode; absence or error means light mode
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    // 4. Default to dark (most developer terminals)
    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════
//
// OneDark: https://github.com/joshdick/onedark.vim
// One Light: https://github.com/sonph/onehalf

/// True color escape sequence helper
fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

/// OneDark palette
mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);     // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);   // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);  // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);     // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);     // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);      // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

/// One Light palette
mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);       // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);     // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);    // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);     // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);      // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);    // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

// ═══════════════════════════════════════════════════════════════════════════
// THEME-AWARE COLOR ACCESSORS
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    // Respect NO_COLOR standard
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Border color and reset, or nothing when colors are off.
fn border(color_fn: fn() -> String) -> (String, &'static str) {
    if use_colors() {
        (color_fn(), RESET)
    } else {
        (String::new(), "")
    }
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let (border, reset) = border(GRAY);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset,
        content,
        " ".repeat(pad),
        border,
        reset
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let (border, reset) = border(GRAY);
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset,
        label_part,
        border,
        "─".repeat(remaining),
        reset
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let (border, reset) = border(GRAY);
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), reset);
}

/// Print double-line header: ╔══════════════════╗
pub fn double_header() {
    let (border, reset) = border(BLUE);
    println!("{}╔{}╗{}", border, "═".repeat(BOX_WIDTH), reset);
}

/// Print double-line footer: ╚══════════════════╝
pub fn double_footer() {
    let (border, reset) = border(BLUE);
    println!("{}╚{}╝{}", border, "═".repeat(BOX_WIDTH), reset);
}

/// Print centered title with bold
pub fn title(text: &str) {
    let (border, reset) = border(BLUE);
    let colored = themed(BRIGHT_CYAN, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    println!(
        "{}║{}{}{}{}{}║{}",
        border,
        reset,
        " ".repeat(left_pad),
        colored,
        " ".repeat(right_pad),
        border,
        reset
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Right-pad a styled string to a fixed visible width, cutting it if longer
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible > width {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Color-coded edit distance (green=exact, yellow=close, gray=far)
pub fn distance_value(distance: Option<usize>) -> String {
    let text = match distance {
        Some(d) => format!("{:>4}", d),
        None => "   -".to_string(),
    };
    match distance {
        Some(0) => themed(BRIGHT_GREEN, &[BOLD], &text),
        Some(1..=2) => themed(GREEN, &[], &text),
        Some(3..=5) => themed(YELLOW, &[], &text),
        _ => themed(GRAY, &[], &text),
    }
}

/// Enabled/disabled badge for dataset listings
pub fn enabled_badge(enabled: bool) -> String {
    if enabled {
        themed(GREEN, &[BOLD], "[on] ")
    } else {
        themed(GRAY, &[], "[off]")
    }
}

/// Next-letter hints, uppercased like keyboard keys
pub fn hint_letters(hints: &[char]) -> String {
    hints
        .iter()
        .map(|c| c.to_uppercase().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Page x/y  Results: n`, with `Page 0/0` for an empty list
pub fn page_label(view: &ResultView) -> String {
    let total = view.total();
    let pages = view.pagination().total_pages(total);
    let page = if pages == 0 {
        0
    } else {
        view.pagination().page() + 1
    };
    format!("Page {}/{}  Results: {}", page, pages, total)
}

// ═══════════════════════════════════════════════════════════════════════════
// SCREENS
// ═══════════════════════════════════════════════════════════════════════════

const NAME_WIDTH: usize = 38;
const COUNTRY_WIDTH: usize = 14;
const DEPARTMENT_WIDTH: usize = 8;

fn result_line(position: usize, result: &ResultRecord) -> String {
    format!(
        " {} {} {} {} {}",
        themed(GRAY, &[], &pad_left(&position.to_string(), 5)),
        pad_right(&result.standard_name, NAME_WIDTH),
        pad_right(&result.country, COUNTRY_WIDTH),
        themed(CYAN, &[], &pad_right(&result.department_code, DEPARTMENT_WIDTH)),
        distance_value(result.distance),
    )
}

/// Print the committed page: rows, page line, hints.
pub fn results(view: &ResultView) {
    let request = view.request();
    let direction = if request.sort_ascending { "asc" } else { "desc" };
    section_top(&format!(
        "\"{}\"  {} · sort {} {} · correction {}",
        request.query,
        request.search_type,
        request.sort_key,
        direction,
        if request.correction_enabled { "on" } else { "off" },
    ));

    row(&themed(
        GRAY,
        &[DIM],
        &format!(
            " {} {} {} {} {}",
            pad_left("#", 5),
            pad_right("NAME", NAME_WIDTH),
            pad_right("COUNTRY", COUNTRY_WIDTH),
            pad_right("DEP", DEPARTMENT_WIDTH),
            pad_left("DIST", 4),
        ),
    ));

    let first = view.pagination().range(view.total()).start;
    for (offset, result) in view.page_rows().iter().enumerate() {
        row(&result_line(first + offset + 1, result));
    }
    if view.total() == 0 {
        row(&themed(GRAY, &[], " no results"));
    }

    row("");
    row(&format!(" {}", themed(BLUE, &[BOLD], &page_label(view))));
    if !view.hints().is_empty() {
        row(&format!(
            " Next: {}",
            themed(BRIGHT_CYAN, &[BOLD], &hint_letters(view.hints()))
        ));
    }
    section_bot();
}

/// Print dataset names, sizes and enable flags.
pub fn datasets(statuses: &[DatasetStatus]) {
    section_top("DATASETS");
    for status in statuses {
        row(&format!(
            " {} {} {} records",
            enabled_badge(status.enabled),
            pad_right(&status.name, 24),
            pad_left(&status.records.to_string(), 8),
        ));
    }
    if statuses.is_empty() {
        row(&themed(GRAY, &[], " none configured"));
    }
    section_bot();
}

/// Interactive session banner.
pub fn banner(records: usize) {
    double_header();
    title(&format!("toponym · {} places", records));
    double_footer();
    help();
}

/// Interactive command reference.
pub fn help() {
    println!(
        "{}",
        themed(
            GRAY,
            &[],
            "Type a query, or :next :prev :more :less :sort KEY :reverse :type TYPE\n\
             :correction on|off :enable NAME :disable NAME :datasets :help :quit",
        )
    );
}

/// Prompt for the next line (no newline).
pub fn prompt() {
    use std::io::Write;
    print!("{} ", themed(CYAN, &[BOLD], "›"));
    let _ = std::io::stdout().flush();
}

/// One-line warning on stderr.
pub fn warning(message: &str) {
    eprint_colored(YELLOW, &format!("warning: {}", message));
}

/// One-line error on stderr.
pub fn failure(message: &str) {
    eprint_colored(RED, &format!("error: {}", message));
}

fn eprint_colored(color_fn: fn() -> String, text: &str) {
    if use_colors() && atty::is(atty::Stream::Stderr) {
        eprintln!("{}{}{}", color_fn(), text, RESET);
    } else {
        eprintln!("{}", text);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
