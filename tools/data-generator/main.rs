use clap::Parser;
use kusari::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::fs;

/// A CLI tool to generate catalog and ops-script files for the Kusari editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated catalog JSON file to
    #[arg(long, default_value = "generated_catalog.json")]
    catalog_output: String,

    /// The path to write the generated ops script JSON file to
    #[arg(long, default_value = "generated_ops.json")]
    ops_output: String,

    /// The number of edit operations to generate
    #[arg(short, long, default_value_t = 50)]
    ops: usize,

    /// Seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Template names the generated scripts draw from. Several share a root on
/// purpose, so the numbering pass gets exercised.
const TEMPLATE_NAMES: [&str; 5] = ["Fetch", "Transform", "Filter", "Store", "Notify"];

/// Names used by generated rename ops, including collision-prone ones.
const RENAME_POOL: [&str; 6] = ["Fetch", "Ingest", "Load", "Load2", "Stage", "Fetch1"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("Generating catalog and {} edit op(s)...", cli.ops);

    let catalog_json = generate_catalog();
    let ops = generate_ops(&mut rng, cli.ops);
    let ops_json = serde_json::to_string_pretty(&ops)?;

    // Replay the script before writing it out, so every generated file is
    // known to settle cleanly with the invariants intact.
    verify_script(&catalog_json, &ops)?;

    fs::write(&cli.catalog_output, &catalog_json)?;
    fs::write(&cli.ops_output, &ops_json)?;

    println!(
        "Successfully generated and saved '{}' and '{}'",
        cli.catalog_output, cli.ops_output
    );

    Ok(())
}

/// Renders the fixed template catalog the generated scripts refer to.
fn generate_catalog() -> String {
    let entries = json!([
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
            "id": "tpl-filter",
            "name": "Filter",
            "type": "rowFilter",
            "inputSchema": { "properties": {
                "rows": { "type": "array" },
                "predicate": { "type": "string", "default": "true" }
            } },
            "outputSchema": { "type": "array" },
            "parameters": { "service": "mapper", "method": "filter" }
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
        },
        {
            "id": "tpl-notify",
            "name": "Notify",
            "type": "webhook",
            "inputSchema": { "properties": {
                "payload": { "type": "array" },
                "channel": { "type": "string", "default": "#ops" }
            } },
            "outputSchema": { "type": "object" },
            "parameters": { "service": "hooks", "method": "post" }
        }
    ]);
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Generates a random-but-valid edit script: indices are always in range
/// for the chain length the preceding ops produce.
fn generate_ops(rng: &mut StdRng, count: usize) -> Vec<ScriptOp> {
    let mut ops = Vec::with_capacity(count);
    let mut len: usize = 0;

    for _ in 0..count {
        let roll = if len == 0 { 0 } else { rng.random_range(0..100) };
        let op = match roll {
            0..50 => {
                let template = TEMPLATE_NAMES[rng.random_range(0..TEMPLATE_NAMES.len())];
                let at = if len > 0 && rng.random_range(0..4) == 0 {
                    Some(rng.random_range(0..=len))
                } else {
                    None
                };
                len += 1;
                ScriptOp::Insert {
                    template: template.to_string(),
                    at,
                }
            }
            50..70 => ScriptOp::Move {
                from: rng.random_range(0..len),
                to: rng.random_range(0..len),
            },
            70..85 => {
                let index = rng.random_range(0..len);
                len -= 1;
                ScriptOp::Remove { index }
            }
            _ => ScriptOp::Rename {
                index: rng.random_range(0..len),
                name: RENAME_POOL[rng.random_range(0..RENAME_POOL.len())].to_string(),
            },
        };
        ops.push(op);
    }
    ops
}

/// Replays the ops and asserts the chain invariants after every settle.
fn verify_script(catalog_json: &str, ops: &[ScriptOp]) -> Result<()> {
    let catalog = TemplateCatalog::from_json(catalog_json)?;
    let mut session = EditSession::new(MemoryStore::default());

    for (step, op) in ops.iter().enumerate() {
        let edit = op.resolve(&catalog)?;
        session.apply_and_settle(edit)?;
        check_invariants(&session.chain(), step);
    }

    println!("-> Verified invariants across {} settle(s).", ops.len());
    Ok(())
}

fn check_invariants(chain: &Chain, step: usize) {
    let names: AHashSet<&str> = chain.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names.len(),
        chain.len(),
        "step {}: duplicate names in {:?}",
        step,
        chain.names()
    );

    for (index, node) in chain.nodes.iter().enumerate() {
        let expected = if index == 0 {
            ""
        } else {
            chain.nodes[index - 1].name.as_str()
        };
        assert_eq!(
            node.previous_node, expected,
            "step {}: stale linkage at index {}",
            step, index
        );

        if index > 0 {
            for (key, value) in &node.parameters {
                if let Some(target) = value.referenced_node() {
                    assert_eq!(
                        target, expected,
                        "step {}: parameter '{}' at index {} references '{}'",
                        step, key, index, target
                    );
                }
            }
        }
    }
}
