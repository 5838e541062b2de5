use crate::chain::ParamKind;
use crate::error::CatalogError;
use crate::reference::ParamValue;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::types::CatalogEntry;

/// The canonical template consumed when inserting a node.
///
/// Converted once from the raw catalog shape: defaults become parameter
/// values, declared types become [`ParamKind`]s. A template without a
/// usable input schema simply yields empty defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub name: String,
    pub node_type: String,
    pub defaults: AHashMap<String, ParamValue>,
    pub schema: AHashMap<String, ParamKind>,
}

impl NodeTemplate {
    /// Builds a canonical template from a raw catalog entry.
    pub fn from_entry(entry: CatalogEntry) -> Self {
        let mut defaults = AHashMap::new();
        let mut schema = AHashMap::new();

        if let Some(input) = entry.input_schema {
            for (key, property) in input.properties {
                let kind = property
                    .declared_type
                    .as_deref()
                    .map(ParamKind::from_declared)
                    .unwrap_or(ParamKind::Other);
                schema.insert(key.clone(), kind);
                if let Some(default) = property.default {
                    defaults.insert(key, ParamValue::from_json(default));
                }
            }
        }

        Self {
            name: entry.name,
            node_type: entry.node_type,
            defaults,
            schema,
        }
    }
}

/// The set of templates available to the editor, keyed by template id.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: AHashMap<String, NodeTemplate>,
    id_by_name: AHashMap<String, String>,
}

impl TemplateCatalog {
    /// Parses a catalog from its JSON wire form: a top-level array of
    /// template entries.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(raw).map_err(|e| CatalogError::JsonParseError(e.to_string()))?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            let id = entry.id.clone();
            let template = NodeTemplate::from_entry(entry);
            catalog.id_by_name.insert(template.name.clone(), id.clone());
            catalog.templates.insert(id, template);
        }
        catalog
    }

    pub fn from_templates(templates: Vec<NodeTemplate>) -> Self {
        let mut catalog = Self::default();
        for (index, template) in templates.into_iter().enumerate() {
            let id = index.to_string();
            catalog.id_by_name.insert(template.name.clone(), id.clone());
            catalog.templates.insert(id, template);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&NodeTemplate> {
        self.templates.get(id)
    }

    /// Looks a template up by its user-facing name.
    pub fn by_name(&self, name: &str) -> Result<&NodeTemplate, CatalogError> {
        self.id_by_name
            .get(name)
            .and_then(|id| self.templates.get(id))
            .ok_or_else(|| CatalogError::TemplateNotFound {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterates the user-facing template names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.id_by_name.keys().map(String::as_str)
    }
}
