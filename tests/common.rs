//! Common test utilities for building catalogs and edit sessions.
use kusari::prelude::*;

/// A small catalog in the template service wire format.
///
/// "Transform" and "Store" declare an `array` input, so inserting them
/// after another node seeds a back-reference to the predecessor.
#[allow(dead_code)]
pub const CATALOG_JSON: &str = r#"[
    {
        "id": "tpl-fetch",
        "name": "Fetch",
        "description": "Pull records from an HTTP endpoint",
        "type": "httpRequest",
        "inputSchema": { "properties": {
            "url": { "type": "string", "default": "https://example.com/data" },
            "limit": { "type": "number", "default": 100 }
        } },
        "outputSchema": { "type": "array" },
        "parameters": { "service": "http", "method": "get" }
    },
    {
        "id": "tpl-transform",
        "name": "Transform",
        "type": "dataMapper",
        "inputSchema": { "properties": {
            "rows": { "type": "array" },
            "expression": { "type": "string", "default": "identity" }
        } },
        "outputSchema": { "type": "array" },
        "parameters": { "service": "mapper", "method": "apply" }
    },
    {
        "id": "tpl-store",
        "name": "Store",
        "type": "database",
        "inputSchema": { "properties": {
            "rows": { "type": "array" },
            "table": { "type": "string", "default": "events" }
        } },
        "outputSchema": { "type": "object" },
        "parameters": { "service": "db", "method": "insert" }
    }
]"#;

#[allow(dead_code)]
pub fn test_catalog() -> TemplateCatalog {
    TemplateCatalog::from_json(CATALOG_JSON).expect("test catalog should parse")
}

#[allow(dead_code)]
pub fn template(catalog: &TemplateCatalog, name: &str) -> NodeTemplate {
    catalog
        .by_name(name)
        .expect("template should exist")
        .clone()
}

/// Builds a settled session containing the named templates in order.
#[allow(dead_code)]
pub fn session_with(templates: &[&str]) -> EditSession<MemoryStore> {
    let catalog = test_catalog();
    let mut session = EditSession::new(MemoryStore::default());
    for name in templates {
        session
            .apply_and_settle(ChainEdit::Insert {
                template: template(&catalog, name),
                at: None,
            })
            .expect("insert should apply");
    }
    session
}

/// Builds a settled chain directly, without a session.
#[allow(dead_code)]
pub fn chain_with(templates: &[&str]) -> Chain {
    let catalog = test_catalog();
    let mut chain = Chain::new();
    for name in templates {
        chain
            .insert(&template(&catalog, name), None)
            .expect("insert should apply");
    }
    normalize(&mut chain);
    chain
}

/// Chain node names in order, for compact assertions.
#[allow(dead_code)]
pub fn names_of(chain: &Chain) -> Vec<String> {
    chain.nodes.iter().map(|n| n.name.clone()).collect()
}
