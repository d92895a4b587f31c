//! Shotgun CLI: generate, inspect and solve genome-assembly puzzles
//!
//! Commands:
//!   shotgun levels     list the built-in levels
//!   shotgun generate   print a puzzle as the player would see it
//!   shotgun json       print a puzzle as JSON
//!   shotgun solve      assemble in reference order and report
//!   shotgun assemble   assemble a given order of read ids
//!   shotgun custom     generate from a JSON level file
//!   shotgun demo       walk through a session

use shotgun_core::puzzle::{Fingerprint, LevelConfig, Puzzle, Session};
use shotgun_core::random::fresh_seed;
use shotgun_core::{AssemblyReport, ShotgunError};
use std::env;

fn print_usage() {
    println!(
        r#"
Shotgun: genome assembly puzzle engine

Usage: shotgun <command> [options]

Commands:
  levels                                List built-in levels
  generate  <level> [seed]              Show reads in presentation order
  json      <level> [seed]              Dump the puzzle as JSON
  solve     <level> <seed>              Assemble in reference order
  assemble  <level> <seed> <id...>      Assemble read ids in the given order
  custom    <config.json> [seed]        Generate from a custom level file
  demo                                  Play through a level-2 session

Seeds are decimal or 0x-prefixed hex. Omit the seed for a fresh one.

Examples:
  shotgun generate 2 0xC0FFEE
  shotgun assemble 1 42 0 3 1 2
  RUST_LOG=debug shotgun solve 3 7
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "levels" => cmd_levels(),
        "generate" => cmd_generate(&args[2..]),
        "json" => cmd_json(&args[2..]),
        "solve" => cmd_solve(&args[2..]),
        "assemble" => cmd_assemble(&args[2..]),
        "custom" => cmd_custom(&args[2..]),
        "demo" => cmd_demo(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_seed(arg: Option<&String>) -> Result<u32, ShotgunError> {
    let Some(raw) = arg else {
        return Ok(fresh_seed());
    };
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|_| ShotgunError::InvalidConfig(format!("bad seed '{}'", raw)))
}

fn parse_level(arg: Option<&String>) -> Result<LevelConfig, ShotgunError> {
    let raw = arg.ok_or_else(|| ShotgunError::InvalidConfig("missing level".into()))?;
    let level: u8 = raw
        .parse()
        .map_err(|_| ShotgunError::InvalidConfig(format!("bad level '{}'", raw)))?;
    LevelConfig::preset(level)
}

fn print_report(report: &AssemblyReport, puzzle: &Puzzle) {
    println!("  Assembled : {}", report.assembled);
    println!("  Reference : {}", puzzle.reference);
    println!(
        "  Similarity: {:.1}% ({})",
        report.similarity * 100.0,
        if report.success { "SUCCESS" } else { "not yet" }
    );
}

fn print_reads(session: &Session) {
    println!("  {}", "-".repeat(72));
    for (pos, view) in session.ordered_views().iter().enumerate() {
        let mut marks = String::new();
        if pos == 0 {
            marks.push_str(" [anchor]");
        }
        if view.is_reverse {
            marks.push_str(" [3'->5']");
        }
        if view.has_error {
            marks.push_str(" [error]");
        }
        println!(
            "  {:>2}. #{:<2} {:<40} {:>3}bp{}",
            pos, view.id, view.display_sequence, view.length, marks
        );
    }
    println!("  {}", "-".repeat(72));
}

fn cmd_levels() -> Result<(), ShotgunError> {
    println!("\n  Levels:");
    for config in LevelConfig::presets() {
        println!("  {}", config.summary());
        println!("      {}", config.description);
    }
    Ok(())
}

fn cmd_generate(args: &[String]) -> Result<(), ShotgunError> {
    let config = parse_level(args.first())?;
    let seed = parse_seed(args.get(1))?;
    let session = Session::with_config(config, seed)?;
    println!("\n  {}", session.puzzle().summary());
    print_reads(&session);
    print_report(session.report(), session.puzzle());
    println!("  Fingerprint: {}", session.fingerprint().short());
    Ok(())
}

fn cmd_json(args: &[String]) -> Result<(), ShotgunError> {
    let config = parse_level(args.first())?;
    let seed = parse_seed(args.get(1))?;
    let puzzle = Puzzle::generate(seed, &config)?;
    println!("{}", serde_json::to_string_pretty(&puzzle)?);
    Ok(())
}

fn cmd_solve(args: &[String]) -> Result<(), ShotgunError> {
    if args.len() < 2 {
        eprintln!("Usage: shotgun solve <level> <seed>");
        return Ok(());
    }
    let config = parse_level(args.first())?;
    let seed = parse_seed(args.get(1))?;
    let puzzle = Puzzle::generate(seed, &config)?;
    let order = puzzle.solution_order();
    println!("\n  {}", puzzle.summary());
    println!("  Solution order: {:?}", order);
    let report = puzzle.recompute(&order)?;
    print_report(&report, &puzzle);
    Ok(())
}

fn cmd_assemble(args: &[String]) -> Result<(), ShotgunError> {
    if args.len() < 3 {
        eprintln!("Usage: shotgun assemble <level> <seed> <id...>");
        return Ok(());
    }
    let config = parse_level(args.first())?;
    let seed = parse_seed(args.get(1))?;
    let ids = args[2..]
        .iter()
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| ShotgunError::InvalidOrdering(format!("bad read id '{}'", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = Session::with_config(config, seed)?;
    let report = session.reorder(&ids)?.clone();
    print_reads(&session);
    print_report(&report, session.puzzle());
    Ok(())
}

fn cmd_custom(args: &[String]) -> Result<(), ShotgunError> {
    let Some(path) = args.first() else {
        eprintln!("Usage: shotgun custom <config.json> [seed]");
        return Ok(());
    };
    let config = LevelConfig::from_json_file(path)?;
    let seed = parse_seed(args.get(1))?;
    println!("\n  {}", config.summary());
    let session = Session::with_config(config, seed)?;
    println!("  {}", session.puzzle().summary());
    print_reads(&session);
    print_report(session.report(), session.puzzle());
    Ok(())
}

fn cmd_demo() -> Result<(), ShotgunError> {
    println!("\nStep 1: Generating a level-2 puzzle...");
    println!("{}", "-".repeat(60));
    let mut session = Session::new(2, 0x5EED)?;
    println!("  {}", session.config().summary());
    println!("  {}", session.puzzle().summary());
    print_reads(&session);
    print_report(session.report(), session.puzzle());

    println!("\nStep 2: Dragging reads around...");
    println!("{}", "-".repeat(60));
    let last = session.order().len() - 1;
    let report = session.move_read(last, 1)?.clone();
    print_reads(&session);
    print_report(&report, session.puzzle());

    println!("\nStep 3: Placing every read where it belongs...");
    println!("{}", "-".repeat(60));
    let solution = session.puzzle().solution_order();
    let report = session.reorder(&solution)?.clone();
    print_reads(&session);
    print_report(&report, session.puzzle());
    println!("  Score: {}", session.score());

    println!("\nStep 4: Verifying determinism...");
    println!("{}", "-".repeat(60));
    let replay = Puzzle::generate(session.seed(), session.config())?;
    let fp = session.fingerprint();
    println!("  Fingerprint {} reproduces: {}", fp.short(), Fingerprint::of(&replay) == fp);

    println!("\nStep 5: Next level...");
    println!("{}", "-".repeat(60));
    session.next_level(0x5EED + 1)?;
    println!("  {}", session.config().summary());
    println!("  Score carried over: {}", session.score());
    Ok(())
}
