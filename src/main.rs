use kusari::prelude::*;
use std::env;
use std::fs;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: cargo run -- <path/to/catalog.json> <path/to/ops.json>");
        std::process::exit(1);
    }

    let catalog_path = &args[1];
    let ops_path = &args[2];

    println!("Loading catalog from: {}", catalog_path);
    println!("Loading ops script from: {}", ops_path);

    // Load input files
    let catalog_json = match fs::read_to_string(catalog_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read catalog file '{}': {}", catalog_path, e);
            std::process::exit(1);
        }
    };

    let ops_json = match fs::read_to_string(ops_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read ops file '{}': {}", ops_path, e);
            std::process::exit(1);
        }
    };

    let catalog = match TemplateCatalog::from_json(&catalog_json) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Failed to load catalog: {}", e);
            std::process::exit(1);
        }
    };
    println!("Catalog loaded with {} templates.", catalog.len());

    let script = match parse_script(&ops_json) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Failed to parse ops script: {}", e);
            std::process::exit(1);
        }
    };

    // Replay phase
    println!("\nReplaying {} edits...", script.len());

    let mut session = EditSession::new(MemoryStore::default());
    for (step, op) in script.iter().enumerate() {
        let edit = match op.resolve(&catalog) {
            Ok(edit) => edit,
            Err(e) => {
                eprintln!("Step {} failed to resolve: {}", step + 1, e);
                std::process::exit(1);
            }
        };
        if let Err(e) = session.apply_and_settle(edit) {
            eprintln!("Step {} failed to apply: {}", step + 1, e);
            std::process::exit(1);
        }
    }

    let chain = session.chain();
    println!("Replay finished with {} nodes.\n", chain.len());
    print!("{}", chain);

    for dangling in chain.dangling_references() {
        println!(
            "Warning: node {} parameter '{}' references '{}', which no longer exists",
            dangling.position, dangling.parameter, dangling.target
        );
    }

    // Submission phase
    let payload = match flatten(&chain) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Submission validation failed: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&payload) {
        Ok(rendered) => {
            println!("\nSubmission payload:");
            println!("{}", rendered);
        }
        Err(e) => {
            eprintln!("Failed to render submission payload: {}", e);
            std::process::exit(1);
        }
    }
}
