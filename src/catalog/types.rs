use ahash::AHashMap;
use serde::Deserialize;

/// One template entry as served by the catalog service.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, alias = "inputSchema")]
    pub input_schema: Option<CatalogInputSchema>,
    #[serde(default, alias = "outputSchema")]
    pub output_schema: Option<serde_json::Value>,
    #[serde(default)]
    pub parameters: Option<CatalogServiceCall>,
}

/// Declared input shape of a template.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogInputSchema {
    #[serde(default)]
    pub properties: AHashMap<String, CatalogProperty>,
}

/// One declared input parameter.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogProperty {
    #[serde(default, rename = "type")]
    pub declared_type: Option<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

/// The backend call a template maps to. Carried through for the execution
/// engine; the editor core never interprets it.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogServiceCall {
    pub service: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}
