//! Command-line interface definitions.
//!
//! Defines all CLI arguments using clap.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Versite static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Site source directory
    pub site: Option<PathBuf>,

    /// Output directory (default: `<site>/../build/site`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name
    #[arg(short = 'C', long, default_value = "config.toml")]
    pub config: PathBuf,
}

impl Cli {
    /// The site directory; required for every invocation.
    pub fn site_dir(&self) -> Result<&Path> {
        match self.site.as_deref() {
            Some(site) => Ok(site),
            None => bail!("must specify a site directory"),
        }
    }

    /// Build output root, next to the site directory unless overridden.
    pub fn output_dir(&self, site_dir: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| site_dir.join("..").join("build").join("site"))
    }
}
