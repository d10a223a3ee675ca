//! Analysis CLI
//!
//! Play engine matches, annotate recorded games and count perft nodes.

use analysis::{annotate_game, load_records, render_annotations, save_records, summarize, MatchConfig, MatchRunner};
use anyhow::{bail, Context, Result};
use checkers_core::{perft, Board, Color, Engine, VariantConfig, VariantRegistry};
use classical_engine::{ClassicalEngine, Difficulty};
use random_engine::RandomEngine;
use std::env;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("ML-checkers analysis");
    println!();
    println!("Usage:");
    println!("  checkers-analysis play <engine1> <engine2> [--variant V] [--rules FILE] [--games N]");
    println!("                         [--depth D] [--time MS] [--max-moves N] [--out FILE]");
    println!("  checkers-analysis annotate <FILE> [--depth D]");
    println!("  checkers-analysis perft <variant> <depth> [--rules FILE]");
    println!();
    println!("Engines:");
    println!("  random[:seed]        - Uniformly random legal moves");
    println!("  classical[:tier]     - Alpha-beta search (easy, medium, hard, expert)");
    println!("  easy|medium|hard|expert");
    println!();
    println!("Examples:");
    println!("  checkers-analysis play hard random --games 20 --out games.json");
    println!("  checkers-analysis annotate games.json --depth 6");
    println!("  checkers-analysis perft international 5");
}

fn create_engine(spec: &str) -> Result<Box<dyn Engine>> {
    let (kind, arg) = match spec.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (spec, None),
    };
    match kind.to_lowercase().as_str() {
        "random" => {
            let engine = match arg {
                Some(seed) => {
                    let seed: u64 = seed.parse().with_context(|| format!("bad seed in `{spec}`"))?;
                    RandomEngine::seeded(seed)
                }
                None => RandomEngine::new(),
            };
            Ok(Box::new(engine))
        }
        "classical" | "classic" => {
            let difficulty = match arg {
                Some(tier) => tier.parse::<Difficulty>()?,
                None => Difficulty::default(),
            };
            Ok(Box::new(ClassicalEngine::new(difficulty)))
        }
        tier => Ok(Box::new(ClassicalEngine::new(tier.parse::<Difficulty>()?))),
    }
}

/// Value following the flag at `i`.
fn flag_value<'a>(args: &'a [String], i: usize) -> Result<&'a str> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => bail!("{} needs a value", args[i]),
    }
}

fn resolve_variant(name: &str, rules: Option<&str>) -> Result<VariantConfig> {
    let registry = match rules {
        Some(path) => VariantRegistry::load(path)?,
        None => VariantRegistry::new(),
    };
    Ok(registry.get(name)?)
}

fn run_play(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        print_usage();
        bail!("play requires two engine specifications");
    }

    let engine1_spec = &args[0];
    let engine2_spec = &args[1];

    let mut variant = "american".to_string();
    let mut rules: Option<String> = None;
    let mut out: Option<String> = None;
    let mut config = MatchConfig {
        depth: 8,
        ..Default::default()
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--variant" | "-v" => variant = flag_value(args, i)?.to_string(),
            "--rules" => rules = Some(flag_value(args, i)?.to_string()),
            "--games" | "-g" => config.num_games = flag_value(args, i)?.parse().context("--games")?,
            "--depth" | "-d" => config.depth = flag_value(args, i)?.parse().context("--depth")?,
            "--time" | "-t" => {
                let ms: u64 = flag_value(args, i)?.parse().context("--time")?;
                config.time_per_move = Some(Duration::from_millis(ms));
            }
            "--max-moves" => config.max_moves = flag_value(args, i)?.parse().context("--max-moves")?,
            "--out" | "-o" => out = Some(flag_value(args, i)?.to_string()),
            other => bail!("unknown option `{other}`"),
        }
        i += 2;
    }
    config.variant = resolve_variant(&variant, rules.as_deref())?;

    let mut engine1 = create_engine(engine1_spec)?;
    let mut engine2 = create_engine(engine2_spec)?;

    println!("=== Match: {} vs {} ({}) ===", engine1_spec, engine2_spec, config.variant.name);
    println!("Games: {}, Depth: {}", config.num_games, config.depth);
    println!();

    let runner = MatchRunner::new(config);
    let outcome = runner.run_match(engine1.as_mut(), engine2.as_mut())?;
    let result = &outcome.result;

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        engine1_spec, result.wins, result.losses, result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    if let Some(path) = out {
        save_records(Path::new(&path), &outcome.games)?;
        println!("Saved {} games to {}", outcome.games.len(), path);
    }
    Ok(())
}

fn run_annotate(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        print_usage();
        bail!("annotate requires a record file");
    };

    let mut depth: u8 = 6;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--depth" | "-d" => depth = flag_value(args, i)?.parse().context("--depth")?,
            other => bail!("unknown option `{other}`"),
        }
        i += 2;
    }

    let records = load_records(Path::new(path))?;
    for (n, record) in records.iter().enumerate() {
        let annotations =
            annotate_game(record, depth).with_context(|| format!("annotating game {}", n + 1))?;
        println!("=== Game {} ===", n + 1);
        print!("{}", render_annotations(record, &annotations));

        let summary = summarize(&annotations);
        for color in Color::ALL {
            let side = summary.side(color);
            tracing::debug!(
                game = n + 1,
                %color,
                moves = side.moves,
                accuracy = side.accuracy(),
                "annotation summary"
            );
        }
        println!();
    }
    Ok(())
}

fn run_perft(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        print_usage();
        bail!("perft requires a variant and a depth");
    }
    let depth: u8 = args[1].parse().context("depth")?;
    let rules = match args.get(2).map(String::as_str) {
        Some("--rules") => Some(flag_value(args, 2)?),
        Some(other) => bail!("unknown option `{other}`"),
        None => None,
    };
    let config = resolve_variant(&args[0], rules)?;
    let board = Board::initial(&config);

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&board, config.first_to_move, d, &config);
        let elapsed = start.elapsed();
        println!("perft({d}) = {nodes:>12}  ({:.3}s)", elapsed.as_secs_f64());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "play" => run_play(&args[2..]),
        "annotate" => run_annotate(&args[2..]),
        "perft" => run_perft(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command `{other}`")
        }
    }
}
