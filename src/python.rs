use crate::catalog::TemplateCatalog;
use crate::session::{ChainEdit, EditSession, MemoryStore, SessionState};
use crate::submit;
use pyo3::prelude::*;

/// A chain editor session for linear workflow pipelines.
///
/// This class owns an in-memory chain and applies structural edits to it,
/// settling the chain (name numbering, predecessor linkage, back-reference
/// rewriting) after every edit.
#[pyclass(name = "Kusari")]
struct KusariPy {
    catalog: TemplateCatalog,
    session: EditSession<MemoryStore>,
}

#[pymethods]
impl KusariPy {
    /// Creates an editor session over an empty chain.
    ///
    /// Args:
    ///     catalog_json (str): A string containing the JSON array of node
    ///         templates (id, name, type, inputSchema, outputSchema).
    ///
    /// Returns:
    ///     Kusari: An initialized editor session.
    ///
    /// Raises:
    ///     ValueError: If the catalog JSON is malformed.
    #[new]
    fn new(catalog_json: &str) -> PyResult<Self> {
        let catalog = TemplateCatalog::from_json(catalog_json)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
        Ok(KusariPy {
            catalog,
            session: EditSession::new(MemoryStore::default()),
        })
    }

    /// Inserts a node built from the named template and settles the chain.
    ///
    /// Args:
    ///     template (str): The user-facing name of a catalog template.
    ///     at (int | None): Insertion index; appends when omitted.
    ///
    /// Returns:
    ///     int: The stable id assigned to the new node.
    ///
    /// Raises:
    ///     ValueError: If the template is unknown or the index is out of
    ///         range.
    #[pyo3(signature = (template, at=None))]
    fn insert(&mut self, template: &str, at: Option<usize>) -> PyResult<u64> {
        let template = self
            .catalog
            .by_name(template)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?
            .clone();
        let inserted = self
            .session
            .apply_and_settle(ChainEdit::Insert { template, at })
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
        Ok(inserted.unwrap_or_default())
    }

    /// Removes the node at `index` and settles the chain.
    fn remove(&mut self, index: usize) -> PyResult<()> {
        self.session
            .apply_and_settle(ChainEdit::Remove { index })
            .map(|_| ())
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
    }

    /// Moves the node at `from_index` to `to_index` and settles the chain.
    fn move_node(&mut self, from_index: usize, to_index: usize) -> PyResult<()> {
        self.session
            .apply_and_settle(ChainEdit::Move {
                from: from_index,
                to: to_index,
            })
            .map(|_| ())
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
    }

    /// Renames the node at `index`, silently resolving name collisions,
    /// and settles the chain.
    fn rename(&mut self, index: usize, name: &str) -> PyResult<()> {
        self.session
            .apply_and_settle(ChainEdit::Rename {
                index,
                name: name.to_string(),
            })
            .map(|_| ())
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
    }

    /// Runs a consistency pass if one is owed. Safe to call at any time.
    fn settle(&mut self) {
        self.session.settle();
    }

    /// Whether a consistency pass is currently owed.
    fn pending(&self) -> bool {
        self.session.state() == SessionState::PendingSettle
    }

    /// Returns the current node names in chain order.
    fn names(&self) -> Vec<String> {
        self.session
            .chain()
            .nodes
            .iter()
            .map(|n| n.name.clone())
            .collect()
    }

    /// Returns a human-readable rendering of the chain.
    fn show(&self) -> String {
        self.session.chain().to_string()
    }

    /// Flattens the chain into its submission payload.
    ///
    /// Returns:
    ///     str: The submission payload as a JSON string.
    ///
    /// Raises:
    ///     RuntimeError: If a node has an empty name, or the payload cannot
    ///         be serialized.
    fn submit(&self) -> PyResult<String> {
        let payload = submit::flatten(&self.session.chain())
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))?;
        serde_json::to_string(&payload)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
    }
}

/// Python bindings for the Kusari chain editor core.
///
/// This module exposes the edit session to Python, allowing workflow chains
/// to be built, reordered, and flattened for submission from Python code.
#[pymodule]
fn kusari(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<KusariPy>()?;
    Ok(())
}
