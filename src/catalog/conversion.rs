use crate::error::CatalogError;

use super::template::NodeTemplate;

/// A trait for custom catalog formats that can be converted into canonical
/// node templates.
///
/// This is the extension point for making the editor format-agnostic: by
/// implementing it on your own catalog structs you provide a translation
/// layer from whatever your template service serves.
///
/// # Example
///
/// ```rust,no_run
/// use kusari::catalog::{IntoTemplates, NodeTemplate, TemplateCatalog};
/// use kusari::error::CatalogError;
/// use ahash::AHashMap;
///
/// struct MyStep { title: String, operation: String }
/// struct MyCatalog { steps: Vec<MyStep> }
///
/// impl IntoTemplates for MyCatalog {
///     fn into_templates(self) -> Result<Vec<NodeTemplate>, CatalogError> {
///         Ok(self
///             .steps
///             .into_iter()
///             .map(|step| NodeTemplate {
///                 name: step.title,
///                 node_type: step.operation,
///                 defaults: AHashMap::new(),
///                 schema: AHashMap::new(),
///             })
///             .collect())
///     }
/// }
///
/// # fn run(catalog: MyCatalog) -> Result<(), CatalogError> {
/// let catalog = TemplateCatalog::from_templates(catalog.into_templates()?);
/// # Ok(())
/// # }
/// ```
pub trait IntoTemplates {
    /// Consumes the object and converts it into canonical node templates.
    fn into_templates(self) -> Result<Vec<NodeTemplate>, CatalogError>;
}
