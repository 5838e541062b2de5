use thiserror::Error;

/// Errors that can occur while loading or querying a template catalog.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Failed to parse catalog JSON: {0}")]
    JsonParseError(String),

    #[error("Template '{name}' was requested, but the catalog does not contain it")]
    TemplateNotFound { name: String },
}

/// Errors that can occur when applying a structural edit to a chain.
///
/// Every edit either succeeds or leaves the chain untouched; these errors
/// only report indices that do not address a node in the current chain.
#[derive(Error, Debug, Clone)]
pub enum EditError {
    #[error("Node index {index} is out of range for a chain of {len} nodes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot move a node from index {from} to {to} in a chain of {len} nodes")]
    InvalidMove { from: usize, to: usize, len: usize },
}

/// Errors that can occur while loading or resolving an edit script.
#[derive(Error, Debug, Clone)]
pub enum ScriptError {
    #[error("Failed to parse ops script JSON: {0}")]
    JsonParseError(String),

    #[error("Ops script references template '{name}', which the catalog does not contain")]
    TemplateNotFound { name: String },
}

/// Errors reported when flattening a chain for submission.
#[derive(Error, Debug, Clone)]
pub enum SubmitError {
    #[error("Node at position {position} has an empty name")]
    EmptyName { position: usize },
}

/// Errors that can occur while saving or loading a chain draft.
#[derive(Error, Debug, Clone)]
pub enum DraftError {
    #[error("Draft IO failed: {0}")]
    Io(String),

    #[error("Draft serialization failed: {0}")]
    Encode(String),

    #[error("Draft deserialization failed: {0}")]
    Decode(String),
}
