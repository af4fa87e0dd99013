//! Versite - a static site generator for side-by-side code comparison pages.

mod build;
mod cli;
mod config;
mod content;
mod logger;
mod template;
mod versus;

use anyhow::{Context, Result};
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let site_dir = cli.site_dir()?;

    let config_path = site_dir.join(&cli.config);
    let config = SiteConfig::from_path(&config_path)
        .with_context(|| format!("loading config `{}`", config_path.display()))?;

    build_site(&config, site_dir, &cli.output_dir(site_dir))
}
