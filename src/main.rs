//! awesome-site - builds a multi-page static site from a curated Markdown
//! link list: an index page, one page per category and a sitemap.

#![allow(dead_code)]

mod cli;
mod compiler;
mod config;
mod core;
mod embed;
mod generator;
mod logger;
mod page;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, build::BuildSummary, build::build_site};
use config::SiteConfig;
use logger::plural_count;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match run(&cli) {
        Ok((config, summary)) => {
            logger::success(&format!(
                "generated {} with {} in {}",
                plural_count(summary.categories, "category"),
                plural_count(summary.links, "link"),
                config.root_relative(config.output_dir()).display()
            ));
            ExitCode::SUCCESS
        }
        Err(err) => {
            let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
            logger::failure(&err.to_string(), &causes);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(SiteConfig, BuildSummary)> {
    let config = SiteConfig::load(cli)?;
    let summary = build_site(&config)?;
    Ok((config, summary))
}
