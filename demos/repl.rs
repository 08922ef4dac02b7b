use autosuggest::{Engine, EngineConfig, normalize_line};
use std::{
    env,
    io::{self, Write},
    path::Path,
};

const MAX_SUGGESTIONS: usize = 5;
const SNAPSHOT_FILE: &str = "engine_snapshot.json";

fn main() -> io::Result<()> {
    let corpus_dir = env::args().nth(1).unwrap_or_else(|| "corpus".into());

    if !Path::new(&corpus_dir).exists() && !Path::new(SNAPSHOT_FILE).exists() {
        eprintln!("Corpus directory not found: {}", corpus_dir);
        std::process::exit(1);
    }

    let engine = match Engine::load_or_build(
        Path::new(SNAPSHOT_FILE),
        Path::new(&corpus_dir),
        EngineConfig::default(),
    ) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to initialize engine: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Autocomplete REPL - {} sentences indexed\ntype text, :r to reset the prefix, :q to quit",
        engine.store().len()
    );
    let mut prefix = String::new();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let line = input.trim();
        if line == ":q" {
            break;
        }
        if line == ":r" {
            prefix.clear();
            continue;
        }

        let normalized = normalize_line(line);
        if normalized.is_empty() {
            continue;
        }
        if !prefix.is_empty() {
            prefix.push(' ');
        }
        prefix.push_str(&normalized);

        match engine.suggest(&prefix, MAX_SUGGESTIONS) {
            Ok(suggestions) if suggestions.is_empty() => {
                println!("  no suggestions for '{}'", prefix)
            }
            Ok(suggestions) => {
                for suggestion in &suggestions {
                    println!("  {}", suggestion);
                }
            }
            Err(e) => eprintln!("  error: {}", e),
        }
    }
    Ok(())
}
