//! The template composition engine.
//!
//! This module is the core of the generator:
//!
//! - **store**: layout and include indexes, loaded once at startup
//! - **engine**: compiled templates and variable bindings
//! - **cache**: render-scoped transient compiled templates
//! - **render**: the two-pass expansion pipeline
//!
//! # Render flow
//!
//! ```text
//! TemplateStore::load() ──► render_page()
//!        │                      │
//!        ▼                      ▼
//!  includes + layouts    structural_expand ──► dynamic_reexpand
//!                        (Composed slot)       (Reexpand slot)
//! ```

pub mod cache;
pub mod engine;
pub mod error;
pub mod render;
pub mod store;

pub use cache::RenderCache;
pub use engine::{Bindings, Template, VariableMap};
pub use error::TemplateError;
pub use render::render_page;
pub use store::TemplateStore;
