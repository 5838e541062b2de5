//! The two-phase edit protocol.
//!
//! Every user edit is applied and committed immediately; the consistency
//! pass that restores linkage, references, and canonical numbering runs as
//! a deferred task against whatever the store holds when it fires. Running
//! the pass inline against a pre-commit view would silently discard the
//! edit, so the split is a correctness requirement, not an optimization.
//!
//! The deferral mechanism is left to the embedding event loop: the session
//! records that a settle is owed ([`SessionState::PendingSettle`]) and the
//! driver calls [`EditSession::settle`] on its next turn. Edits arriving
//! before the settle fires fold into the same pending task; the pass is
//! idempotent and always safe to run on the latest committed chain.

use crate::catalog::NodeTemplate;
use crate::chain::{Chain, NodeId, normalize};
use crate::error::EditError;

mod script;
mod store;

pub use script::{ScriptOp, parse_script};
pub use store::{ChainStore, MemoryStore};

/// One structural edit, as issued by the editor surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainEdit {
    Insert {
        template: NodeTemplate,
        at: Option<usize>,
    },
    Remove {
        index: usize,
    },
    Move {
        from: usize,
        to: usize,
    },
    Rename {
        index: usize,
        name: String,
    },
}

/// Whether a consistency pass is currently owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PendingSettle,
}

/// A single-editor session over an externally-owned chain store.
pub struct EditSession<S: ChainStore> {
    store: S,
    state: SessionState,
    #[cfg(feature = "debug-tools")]
    settle_count: usize,
}

impl<S: ChainStore> EditSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::Idle,
            #[cfg(feature = "debug-tools")]
            settle_count: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Reads the latest committed chain.
    pub fn chain(&self) -> Chain {
        self.store.read()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies one structural edit against the latest committed chain and
    /// commits the result, leaving a settle pending.
    ///
    /// On an edit error nothing is committed and no settle is scheduled
    /// beyond one already owed. Returns the new node's id for inserts.
    pub fn apply(&mut self, edit: ChainEdit) -> Result<Option<NodeId>, EditError> {
        let mut chain = self.store.read();
        let inserted = match edit {
            ChainEdit::Insert { template, at } => Some(chain.insert(&template, at)?),
            ChainEdit::Remove { index } => {
                chain.remove(index)?;
                None
            }
            ChainEdit::Move { from, to } => {
                chain.move_node(from, to)?;
                None
            }
            ChainEdit::Rename { index, name } => {
                chain.rename(index, &name)?;
                None
            }
        };
        self.store.commit(chain);
        self.state = SessionState::PendingSettle;
        Ok(inserted)
    }

    /// Runs the deferred consistency pass: reads the latest committed
    /// chain, normalizes it, commits the result. A no-op when no settle is
    /// owed.
    pub fn settle(&mut self) {
        if self.state == SessionState::Idle {
            return;
        }
        let mut chain = self.store.read();
        normalize(&mut chain);
        self.store.commit(chain);
        self.state = SessionState::Idle;

        #[cfg(feature = "debug-tools")]
        self.write_settle_snapshot();
    }

    /// Applies an edit and settles immediately. Convenience for drivers
    /// without their own deferral mechanism (scripts, tests, CLI replay).
    pub fn apply_and_settle(&mut self, edit: ChainEdit) -> Result<Option<NodeId>, EditError> {
        let inserted = self.apply(edit)?;
        self.settle();
        Ok(inserted)
    }

    #[cfg(feature = "debug-tools")]
    fn write_settle_snapshot(&mut self) {
        self.settle_count += 1;
        let path = format!("tmp/settle_{:04}.txt", self.settle_count);
        if let Some(parent) = std::path::Path::new(&path).parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, self.store.read().to_string());
    }
}
