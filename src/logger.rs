//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only appears with `--verbose`
//! - `success` / `failure` for the final one-line build summary
//!
//! # Example
//!
//! ```ignore
//! log!("extract"; "{} categories", registry.len());
//! debug!("extract"; "skipping `{}`: no matching heading", href);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
///
/// Goes through `if_supports_color` so `--color` overrides and non-TTY
/// output are honored.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "build" => Style::new().bright_blue().bold(),
        "assets" | "sitemap" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        "warning" => Style::new().bright_magenta().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    paint(&prefix, Stream::Stdout, style)
}

/// Render `text` with `style` when `stream` supports color.
fn paint(text: &str, stream: Stream, style: Style) -> String {
    text.if_supports_color(stream, |t| t.style(style)).to_string()
}

/// Final success line (✓ prefix, green).
pub fn success(message: &str) {
    let mark = paint("✓", Stream::Stdout, Style::new().green());
    let mut stdout = stdout().lock();
    writeln!(stdout, "{mark} {message}").ok();
    stdout.flush().ok();
}

/// Final failure block (✗ prefix, red) with the full error chain.
///
/// Written to stderr so a failed run never interleaves with page output.
pub fn failure(summary: &str, causes: &[String]) {
    let mark = paint("✗", Stream::Stderr, Style::new().red());
    let caused_by = paint("caused by:", Stream::Stderr, Style::new().dimmed());
    let mut stderr = stderr().lock();
    writeln!(stderr, "{mark} {summary}").ok();
    for cause in causes {
        writeln!(stderr, "  {caused_by} {cause}").ok();
    }
    stderr.flush().ok();
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(1, "category")` -> `"1 category"`
/// - `plural_count(5, "link")` -> `"5 links"`
pub fn plural_count(count: usize, noun: &str) -> String {
    match (count, noun.strip_suffix('y')) {
        (1, _) => format!("1 {noun}"),
        (_, Some(stem)) => format!("{count} {stem}ies"),
        _ => format!("{count} {noun}s"),
    }
}

// ============================================================================
// Tests
// ============================================================================
