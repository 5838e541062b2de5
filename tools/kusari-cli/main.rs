use clap::Parser;
use kusari::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

/// A chain-consistency engine CLI for linear workflow pipelines
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the template catalog JSON file
    catalog_path: Option<String>,
    /// Path to the ops script JSON file to replay
    ops_path: Option<String>,

    /// Write the settled chain as a draft snapshot to this path
    #[arg(short, long)]
    draft: Option<String>,

    /// Resume from a draft snapshot instead of an empty chain
    #[arg(short, long)]
    resume: Option<String>,

    /// Run in interactive mode to edit the chain by hand
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.human {
        run_interactive(cli);
    } else {
        run_replay(cli);
    }
}

/// Loads the catalog and the starting chain described by the CLI arguments.
fn load_session(cli: &Cli) -> (TemplateCatalog, EditSession<MemoryStore>) {
    let catalog_path = cli
        .catalog_path
        .clone()
        .unwrap_or_else(|| exit_with_error("Catalog path is required."));

    let catalog_json = fs::read_to_string(&catalog_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read catalog file '{}': {}",
            &catalog_path, e
        ))
    });
    let catalog = TemplateCatalog::from_json(&catalog_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load catalog: {}", e)));

    let store = match &cli.resume {
        Some(path) => {
            let draft = ChainDraft::from_file(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to load draft '{}': {}", path, e))
            });
            println!("Resumed draft with {} node(s) from '{}'.", draft.chain.len(), path);
            MemoryStore::new(draft.chain)
        }
        None => MemoryStore::default(),
    };

    (catalog, EditSession::new(store))
}

/// Runs the CLI in non-interactive mode, replaying an ops script.
fn run_replay(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let ops_path = cli
        .ops_path
        .clone()
        .unwrap_or_else(|| exit_with_error("Ops path is required in non-interactive mode."));
    let (catalog, mut session) = load_session(&cli);

    let ops_json = fs::read_to_string(&ops_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read ops file '{}': {}", &ops_path, e))
    });
    let script = parse_script(&ops_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse ops script: {}", e)));

    // --- 2. Replay ---
    println!("\nReplaying {} edit(s)...", script.len());
    let replay_start = Instant::now();
    for (step, op) in script.iter().enumerate() {
        let edit = op
            .resolve(&catalog)
            .unwrap_or_else(|e| exit_with_error(&format!("Step {}: {}", step + 1, e)));
        session
            .apply_and_settle(edit)
            .unwrap_or_else(|e| exit_with_error(&format!("Step {}: {}", step + 1, e)));
    }
    let replay_duration = replay_start.elapsed();

    // --- 3. Results ---
    let chain = session.chain();
    println!("\nSettled chain ({} node(s)):", chain.len());
    print!("{}", chain);
    report_dangling(&chain);

    let payload = flatten(&chain)
        .unwrap_or_else(|e| exit_with_error(&format!("Submission validation failed: {}", e)));
    let rendered = serde_json::to_string_pretty(&payload)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to render payload: {}", e)));
    println!("\nSubmission payload:\n{}", rendered);

    if let Some(path) = &cli.draft {
        save_draft(&chain, path);
    }

    println!("\n--- Performance Summary ---");
    println!("Replay + settles:     {:?}", replay_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
    println!();
}

/// Runs the CLI in an interactive, human-friendly editing loop.
fn run_interactive(cli: Cli) {
    println!("--- Kusari Interactive Mode ---");
    let (catalog, mut session) = load_session(&cli);

    let mut names: Vec<&str> = catalog.names().collect();
    names.sort_unstable();
    println!("Templates: {}", names.join(", "));
    println!(
        "Commands: add <template> [at] | rm <index> | mv <from> <to> | \
         rename <index> <name> | show | refs | submit | save <path> | quit"
    );
    println!("Indices are 1-based, as displayed by 'show'.");

    loop {
        let line = prompt_for_input("kusari", None);
        let parts: Vec<&str> = line.split_whitespace().collect();
        let outcome = match parts.as_slice() {
            [] => continue,
            ["quit"] | ["q"] | ["exit"] => break,
            ["show"] => {
                print!("{}", session.chain());
                continue;
            }
            ["refs"] => {
                report_dangling(&session.chain());
                continue;
            }
            ["submit"] => {
                match flatten(&session.chain()) {
                    Ok(payload) => match serde_json::to_string_pretty(&payload) {
                        Ok(rendered) => println!("{}", rendered),
                        Err(e) => println!("Failed to render payload: {}", e),
                    },
                    Err(e) => println!("Validation failed: {}", e),
                }
                continue;
            }
            ["save", path] => {
                save_draft(&session.chain(), path);
                continue;
            }
            ["add", template] => add_node(&catalog, &mut session, template, None),
            ["add", template, at] => match parse_position(at) {
                Some(at) => add_node(&catalog, &mut session, template, Some(at)),
                None => {
                    println!("Invalid index '{}'.", at);
                    continue;
                }
            },
            ["rm", index] => match parse_position(index) {
                Some(index) => session
                    .apply_and_settle(ChainEdit::Remove { index })
                    .map(|_| ()),
                None => {
                    println!("Invalid index '{}'.", index);
                    continue;
                }
            },
            ["mv", from, to] => match (parse_position(from), parse_position(to)) {
                (Some(from), Some(to)) => session
                    .apply_and_settle(ChainEdit::Move { from, to })
                    .map(|_| ()),
                _ => {
                    println!("Invalid move indices.");
                    continue;
                }
            },
            ["rename", index, name] => match parse_position(index) {
                Some(index) => session
                    .apply_and_settle(ChainEdit::Rename {
                        index,
                        name: (*name).to_string(),
                    })
                    .map(|_| ()),
                None => {
                    println!("Invalid index '{}'.", index);
                    continue;
                }
            },
            _ => {
                println!("Unrecognized command '{}'.", line);
                continue;
            }
        };

        match outcome {
            Ok(()) => print!("{}", session.chain()),
            Err(e) => println!("Edit rejected: {}", e),
        }
    }
}

fn add_node(
    catalog: &TemplateCatalog,
    session: &mut EditSession<MemoryStore>,
    template: &str,
    at: Option<usize>,
) -> std::result::Result<(), EditError> {
    let template = match catalog.by_name(template) {
        Ok(template) => template.clone(),
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };
    session
        .apply_and_settle(ChainEdit::Insert { template, at })
        .map(|_| ())
}

/// Converts a displayed 1-based position into a model index.
fn parse_position(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|p| *p > 0).map(|p| p - 1)
}

fn report_dangling(chain: &Chain) {
    for dangling in chain.dangling_references() {
        println!(
            "Warning: node {} parameter '{}' references '{}', which no longer exists",
            dangling.position, dangling.parameter, dangling.target
        );
    }
}

fn save_draft(chain: &Chain, path: &str) {
    match ChainDraft::new(chain.clone()).save(path) {
        Ok(()) => println!("Saved draft to '{}'.", path),
        Err(e) => println!("Failed to save draft: {}", e),
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
