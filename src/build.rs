//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── TemplateStore::load() ──► includes + layouts, read-only
//!     │
//!     ├── render_versus_pages()
//!     │       │
//!     │       └── per group: discover versus.toml ──► assemble ──►
//!     │           render versus_file with `versus_content` overlaid
//!     │
//!     └── render_plain_pages() ──► parse front-matter ──► render ──► write
//! ```
//!
//! Rendering is single-threaded and synchronous: every render runs to
//! completion before the next begins, sharing one [`RenderCache`] whose
//! transient entries are cleared per render. Any failure aborts the whole
//! build; a page is fully materialized in memory before its output file is
//! created, so a failed build leaves no partial page behind.

use crate::{
    config::SiteConfig,
    content::PageDocument,
    log,
    template::{RenderCache, TemplateStore, VariableMap, render_page},
    versus::{self, SPEC_FILE_NAME, VersusSpec},
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Subdirectory of the output root receiving comparison pages.
const VERSUS_OUT_DIR: &str = "versus";

/// Build the entire site: all versus pages, then all plain pages.
pub fn build_site(config: &SiteConfig, site_dir: &Path, output_dir: &Path) -> Result<()> {
    let store = TemplateStore::load(site_dir)?;
    let mut cache = RenderCache::new();

    render_versus_pages(config, site_dir, output_dir, &store, &mut cache)?;
    render_plain_pages(config, site_dir, output_dir, &store, &mut cache)?;

    log!("build"; "done");
    Ok(())
}

/// Render one output page per discovered comparison descriptor.
///
/// Groups run in configured order, each group's descriptors in sorted
/// discovery order. Every descriptor renders the site's single versus
/// content file with the assembled fragment overlaid as `versus_content`.
fn render_versus_pages(
    config: &SiteConfig,
    site_dir: &Path,
    output_dir: &Path,
    store: &TemplateStore,
    cache: &mut RenderCache,
) -> Result<()> {
    for group in &config.versus {
        log!("versus"; "generating {} comparisons", group.name);
        let group_dir = site_dir
            .join("..")
            .join(&config.versus_folder)
            .join(&group.folder);

        for spec_path in discover_specs(&group_dir)? {
            let spec = VersusSpec::from_path(&spec_path)?;
            log!("versus"; "adding {}", spec.versus.name);

            let base_dir = spec_path
                .parent()
                .context("versus descriptor has no parent directory")?;
            let fragment = versus::assemble(&spec, base_dir, store)
                .with_context(|| format!("assembling `{}`", spec_path.display()))?;

            let mut overlay = VariableMap::new();
            overlay.insert("versus_content".to_owned(), fragment);

            let document = PageDocument::from_path(&site_dir.join(&config.versus_file))?;
            let html = render_page(&document, store, cache, &config.variables, &overlay)
                .with_context(|| format!("rendering versus page `{}`", spec.filename))?;

            write_page(&output_dir.join(VERSUS_OUT_DIR).join(&spec.filename), &html)?;
        }
    }
    Ok(())
}

/// Render every entry of `config.files` as a plain page.
fn render_plain_pages(
    config: &SiteConfig,
    site_dir: &Path,
    output_dir: &Path,
    store: &TemplateStore,
    cache: &mut RenderCache,
) -> Result<()> {
    let empty_overlay = VariableMap::new();
    for file in &config.files {
        log!("render"; "{}", file.display());

        let document = PageDocument::from_path(&site_dir.join(file))?;
        let html = render_page(&document, store, cache, &config.variables, &empty_overlay)
            .with_context(|| format!("rendering `{}`", file.display()))?;

        write_page(&output_dir.join(normalize_suffix(file)), &html)?;
    }
    Ok(())
}

/// Collect every `versus.toml` under `dir`, sorted for determinism.
fn discover_specs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut specs = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("reading versus group `{}`", dir.display()))?;
        if entry.file_type().is_file() && entry.file_name() == SPEC_FILE_NAME {
            specs.push(entry.into_path());
        }
    }
    Ok(specs)
}

/// Create the parent directory and write the fully rendered page.
fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory `{}`", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("writing `{}`", path.display()))
}

/// `.tpl.html` sources emit plain `.html` files.
fn normalize_suffix(file: &Path) -> PathBuf {
    PathBuf::from(file.to_string_lossy().replace(".tpl.html", ".html"))
}
