//! CLI for imgdl.

mod commands;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use imgdl_core::config;
use std::path::PathBuf;

use commands::run_fetch;

/// Download every image of a post from a supported site.
#[derive(Debug, Parser)]
#[command(name = "imgdl")]
#[command(
    about = "imgdl: download full-resolution images from Naver, SBS, Weverse and Berriz posts",
    long_about = None
)]
pub struct Cli {
    /// Post URL. Prompted for on stdin when omitted.
    pub url: Option<String>,

    /// Base output directory; images go to DIR/<post id>/.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Never render pages in a browser; use a plain GET for every site.
    #[arg(long)]
    pub static_only: bool,
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let url = match cli.url {
        Some(url) => url,
        None => prompt::read_url()?,
    };
    let base_dir = match cli.dir.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("current directory")?,
    };

    run_fetch(&cfg, &url, &base_dir, !cli.static_only)
}

#[cfg(test)]
mod tests;
