use crate::catalog::TemplateCatalog;
use crate::error::ScriptError;
use serde::{Deserialize, Serialize};

use super::ChainEdit;

/// One edit operation in the JSON ops-script wire format.
///
/// Scripts carry template names rather than template bodies; they are
/// resolved against a catalog before being applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ScriptOp {
    Insert {
        template: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
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

impl ScriptOp {
    /// Resolves the op into an applicable edit, looking templates up in
    /// `catalog`.
    pub fn resolve(&self, catalog: &TemplateCatalog) -> Result<ChainEdit, ScriptError> {
        Ok(match self {
            ScriptOp::Insert { template, at } => ChainEdit::Insert {
                template: catalog
                    .by_name(template)
                    .map_err(|_| ScriptError::TemplateNotFound {
                        name: template.clone(),
                    })?
                    .clone(),
                at: *at,
            },
            ScriptOp::Remove { index } => ChainEdit::Remove { index: *index },
            ScriptOp::Move { from, to } => ChainEdit::Move {
                from: *from,
                to: *to,
            },
            ScriptOp::Rename { index, name } => ChainEdit::Rename {
                index: *index,
                name: name.clone(),
            },
        })
    }
}

/// Parses an ops script from its JSON wire form: a top-level array of ops.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptOp>, ScriptError> {
    serde_json::from_str(raw).map_err(|e| ScriptError::JsonParseError(e.to_string()))
}
