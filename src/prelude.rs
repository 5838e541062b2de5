//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from
//! the kusari crate. Import this module to get access to the core
//! functionality without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use kusari::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog_json = std::fs::read_to_string("path/to/catalog.json")?;
//! let catalog = TemplateCatalog::from_json(&catalog_json)?;
//!
//! let mut session = EditSession::new(MemoryStore::default());
//! let template = catalog.by_name("Fetch")?.clone();
//! session.apply(ChainEdit::Insert { template, at: None })?;
//! session.settle();
//!
//! let payload = flatten(&session.chain())?;
//! println!("{}", serde_json::to_string_pretty(&payload)?);
//! # Ok(())
//! # }
//! ```

// Chain model and consistency pass
pub use crate::chain::{
    Chain, ChainDraft, DanglingReference, Node, NodeId, ParamKind, normalize,
};

// Parameter values and back-reference tokens
pub use crate::reference::{
    LiteralValue, ParamValue, parse_reference, render_reference, rewrite_references,
};

// Name allocation
pub use crate::naming::{generate_unique_name, name_root};

// Catalog and templates
pub use crate::catalog::{CatalogEntry, IntoTemplates, NodeTemplate, TemplateCatalog};

// Edit session and store
pub use crate::session::{
    ChainEdit, ChainStore, EditSession, MemoryStore, ScriptOp, SessionState, parse_script,
};

// Submission boundary
pub use crate::submit::{SubmitNode, chain_order, flatten};

// Error types
pub use crate::error::{CatalogError, DraftError, EditError, ScriptError, SubmitError};

// Hashed collections used throughout the crate API
pub use ahash::{AHashMap, AHashSet};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
