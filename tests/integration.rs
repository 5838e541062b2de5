//! Integration tests for Kusari
//!
//! End-to-end tests that drive the editor the way the binaries do: catalog
//! JSON in, ops script replayed, submission payload out.
//!
mod common;
use common::*;
use kusari::prelude::*;

const OPS_JSON: &str = r#"[
    { "op": "insert", "template": "Fetch" },
    { "op": "insert", "template": "Store" },
    { "op": "insert", "template": "Transform", "at": 1 },
    { "op": "rename", "index": 0, "name": "Ingest" },
    { "op": "move", "from": 2, "to": 1 }
]"#;

fn replay(catalog: &TemplateCatalog, script: &[ScriptOp]) -> EditSession<MemoryStore> {
    let mut session = EditSession::new(MemoryStore::default());
    for op in script {
        let edit = op.resolve(catalog).expect("op should resolve");
        session.apply_and_settle(edit).expect("edit should apply");
    }
    session
}

#[test]
fn test_script_replay_settles_into_consistent_chain() {
    let catalog = test_catalog();
    let script = parse_script(OPS_JSON).expect("script should parse");
    let session = replay(&catalog, &script);

    let chain = session.chain();
    assert_eq!(names_of(&chain), vec!["Ingest", "Store", "Transform"]);
    assert_eq!(chain.nodes[1].previous_node, "Ingest");
    assert_eq!(chain.nodes[2].previous_node, "Store");
    assert_eq!(
        chain.nodes[1].parameters["rows"],
        ParamValue::reference("Ingest", ".output")
    );
    assert_eq!(
        chain.nodes[2].parameters["rows"],
        ParamValue::reference("Store", ".output")
    );
}

#[test]
fn test_script_op_wire_format_round_trips() {
    let script = parse_script(OPS_JSON).expect("script should parse");
    assert_eq!(script.len(), 5);
    assert_eq!(
        script[0],
        ScriptOp::Insert {
            template: "Fetch".to_string(),
            at: None
        }
    );

    let rendered = serde_json::to_string(&script).expect("script should serialize");
    let reparsed = parse_script(&rendered).expect("rendered script should parse");
    assert_eq!(reparsed, script);
}

#[test]
fn test_script_with_unknown_template_is_rejected() {
    let catalog = test_catalog();
    let script = parse_script(r#"[ { "op": "insert", "template": "Mystery" } ]"#)
        .expect("script should parse");
    let result = script[0].resolve(&catalog);
    assert!(matches!(
        result,
        Err(ScriptError::TemplateNotFound { .. })
    ));
}

#[test]
fn test_submission_flattens_and_round_trips() {
    let catalog = test_catalog();
    let script = parse_script(OPS_JSON).expect("script should parse");
    let session = replay(&catalog, &script);
    let chain = session.chain();

    let payload = flatten(&chain).expect("chain should flatten");
    assert_eq!(payload.len(), 3);
    for (index, node) in payload.iter().enumerate() {
        assert_eq!(node.position, index + 1);
    }
    assert_eq!(payload[0].node_type, "httpRequest");
    // Reference tokens are carried verbatim in their wire form.
    assert_eq!(
        payload[1].parameters["rows"],
        serde_json::json!("{{$node('Ingest').output}}")
    );

    // The wire shape strips editor-only fields and renames `node_type`.
    let rendered = serde_json::to_string(&payload).expect("payload should serialize");
    assert!(rendered.contains("\"type\":\"httpRequest\""));
    assert!(!rendered.contains("minimized"));
    assert!(!rendered.contains("previous_node"));

    // Shuffled payloads sort back into chain order by position.
    let mut shuffled: Vec<SubmitNode> =
        serde_json::from_str(&rendered).expect("payload should deserialize");
    shuffled.reverse();
    let restored = chain_order(shuffled);
    let restored_names: Vec<&str> = restored.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(restored_names, vec!["Ingest", "Store", "Transform"]);
}

#[test]
fn test_submission_rejects_empty_name() {
    let mut chain = chain_with(&["Fetch", "Store"]);
    chain.rename(1, "").expect("rename should apply");
    normalize(&mut chain);

    let result = flatten(&chain);
    assert!(matches!(result, Err(SubmitError::EmptyName { position: 2 })));
}

#[test]
fn test_template_without_input_schema_inserts_empty_parameters() {
    let catalog = TemplateCatalog::from_json(
        r#"[ { "id": "bare", "name": "Bare", "type": "noop" } ]"#,
    )
    .expect("catalog should parse");

    let mut chain = Chain::new();
    chain
        .insert(&template(&catalog, "Bare"), None)
        .expect("insert should apply");
    normalize(&mut chain);

    assert!(chain.nodes[0].parameters.is_empty());
    assert!(chain.nodes[0].schema.is_empty());
}

#[test]
fn test_malformed_catalog_json_is_reported() {
    let result = TemplateCatalog::from_json("{ not json");
    assert!(matches!(result, Err(CatalogError::JsonParseError(_))));
}

#[test]
fn test_draft_save_and_load_round_trip() {
    let catalog = test_catalog();
    let script = parse_script(OPS_JSON).expect("script should parse");
    let session = replay(&catalog, &script);
    let chain = session.chain();

    let path = std::env::temp_dir().join("kusari_draft_roundtrip.bin");
    let path = path.to_str().expect("temp path should be utf-8");

    ChainDraft::new(chain.clone())
        .save(path)
        .expect("draft should save");
    let loaded = ChainDraft::from_file(path).expect("draft should load");
    std::fs::remove_file(path).ok();

    assert_eq!(loaded.chain, chain);

    // Identity allocation resumes where the draft left off.
    let mut resumed = loaded.chain;
    let id = resumed
        .insert(&template(&catalog, "Fetch"), None)
        .expect("insert should apply");
    assert!(resumed.nodes.iter().filter(|n| n.id == id).count() == 1);
    assert!(chain.nodes.iter().all(|n| n.id != id));
}

#[test]
fn test_draft_from_bytes_rejects_garbage() {
    let result = ChainDraft::from_bytes(&[0xff, 0x00, 0x13, 0x37]);
    assert!(matches!(result, Err(DraftError::Decode(_))));
}
