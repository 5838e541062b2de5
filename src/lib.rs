//! # Kusari - Chain Consistency Engine for Workflow Editors
//!
//! **Kusari** keeps a linear workflow pipeline consistent while it is being
//! edited. A pipeline is an ordered chain of named nodes; a node's
//! parameters may carry a back-reference token naming the node immediately
//! before it plus a path into its output. Under arbitrary insert, remove,
//! move, and rename sequences, Kusari maintains three invariants: every
//! node name is unique, every node's cached predecessor matches chain
//! order, and every embedded back-reference points at the current
//! predecessor with its output path preserved byte-for-byte.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic: it consumes a canonical set of node
//! templates and applies structural edits through a two-phase protocol.
//! The primary workflow is:
//!
//! 1.  **Load a Catalog**: Parse the template catalog JSON with
//!     `TemplateCatalog::from_json`, or implement the `IntoTemplates` trait
//!     to convert your own catalog format.
//! 2.  **Open a Session**: Create an `EditSession` over a `ChainStore`
//!     (the in-memory `MemoryStore`, or your own store wrapping whatever
//!     state mechanism owns the chain).
//! 3.  **Edit**: Apply `ChainEdit`s. Each edit commits immediately and
//!     leaves a consistency pass pending; run `settle()` on the next turn
//!     of your event loop (or use `apply_and_settle` when no deferral is
//!     needed).
//! 4.  **Submit**: Flatten the settled chain with `submit::flatten` into
//!     the 1-based-position payload consumed by the execution backend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kusari::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let catalog = TemplateCatalog::from_json(
//!         r#"[
//!             {
//!                 "id": "t1",
//!                 "name": "Fetch",
//!                 "type": "httpRequest",
//!                 "inputSchema": { "properties": { "url": { "type": "string" } } }
//!             },
//!             {
//!                 "id": "t2",
//!                 "name": "Store",
//!                 "type": "database",
//!                 "inputSchema": { "properties": { "rows": { "type": "array" } } }
//!             }
//!         ]"#,
//!     )?;
//!
//!     let mut session = EditSession::new(MemoryStore::default());
//!
//!     // Insert "Fetch", then "Store". The store node's collection-shaped
//!     // "rows" parameter is seeded with a reference to its predecessor.
//!     let fetch = catalog.by_name("Fetch")?.clone();
//!     let store = catalog.by_name("Store")?.clone();
//!     session.apply_and_settle(ChainEdit::Insert { template: fetch, at: None })?;
//!     session.apply_and_settle(ChainEdit::Insert { template: store, at: None })?;
//!
//!     let chain = session.chain();
//!     assert_eq!(chain.nodes[1].previous_node, "Fetch");
//!
//!     // Hand the chain off for execution.
//!     let payload = flatten(&chain)?;
//!     println!("{}", serde_json::to_string_pretty(&payload)?);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod chain;
pub mod error;
pub mod naming;
pub mod prelude;
pub mod reference;
pub mod session;
pub mod submit;

#[cfg(feature = "python-bindings")]
mod python;
