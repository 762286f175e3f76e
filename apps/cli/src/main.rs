// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PipeNet CLI - plumbing network analysis from the command line.
//!
//! Usage:
//!   pipenet analyze <request.json> [--config <sizing.json>] [--json]
//!   pipenet size <fixture=qty>... [--json]
//!
//! Analysis settings come from `PIPENET_*` environment variables, logging
//! from `RUST_LOG`. Logs go to stderr so `--json` output stays clean.

use anyhow::{bail, Context, Result};
use pipenet_processing::{AnalysisConfig, AnalysisOutcome, AnalysisRequest, Analyzer};
use pipenet_sizing::{FixtureKind, SizingEngine, SizingResult};
use std::env;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    init_tracing();

    match args[1].as_str() {
        "analyze" => analyze(&args[2..]),
        "size" => size(&args[2..]),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "warn,pipenet_processing=info".into());
    let json = env::var("PIPENET_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .pretty()
            .init();
    }
}

fn analyze(args: &[String]) -> Result<()> {
    let mut request_path: Option<&str> = None;
    let mut config_path: Option<&str> = None;
    let mut as_json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    bail!("--config needs a path");
                };
                config_path = Some(path.as_str());
            }
            "--json" => as_json = true,
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
            path => request_path = Some(path),
        }
        i += 1;
    }

    let Some(request_path) = request_path else {
        bail!("analyze needs a request file");
    };

    let mut config = AnalysisConfig::from_env();
    if let Some(path) = config_path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read sizing config '{}'", path))?;
        config = config
            .with_sizing_json(&json)
            .with_context(|| format!("Invalid sizing config '{}'", path))?;
    }

    let text = fs::read_to_string(request_path)
        .with_context(|| format!("Cannot read request '{}'", request_path))?;
    let request = AnalysisRequest::from_json(&text)
        .with_context(|| format!("Invalid request '{}'", request_path))?;

    tracing::info!(
        request = %request_path,
        segments = request.segments.len(),
        strategy = ?config.strategy,
        "Analyzing"
    );

    let outcome = Analyzer::new(config)
        .analyze(&request)
        .context("Analysis failed")?;

    if as_json {
        println!("{}", outcome.to_json()?);
        return Ok(());
    }

    match outcome {
        AnalysisOutcome::Completed(report) => {
            print!("{}", report.rendered);
            println!();
            println!("{}", report.summary());
            if !report.major_junctions.is_empty() {
                println!();
                println!("Major junctions:");
                for junction in &report.major_junctions {
                    println!(
                        "  {} (degree {}): {:.2}",
                        junction.handle.as_deref().unwrap_or("-"),
                        junction.degree,
                        junction.load
                    );
                }
            }
        }
        AnalysisOutcome::NoOp { reason } => println!("Nothing to analyze: {}", reason),
    }
    Ok(())
}

fn size(args: &[String]) -> Result<()> {
    let mut counts: Vec<(FixtureKind, u32)> = Vec::new();
    let mut as_json = false;

    for arg in args {
        if arg == "--json" {
            as_json = true;
            continue;
        }
        let Some((name, qty)) = arg.split_once('=') else {
            bail!("Expected <fixture>=<quantity>, got '{}'", arg);
        };
        let kind: FixtureKind = name.parse()?;
        let qty: u32 = qty
            .parse()
            .with_context(|| format!("Invalid quantity for {}: '{}'", kind, qty))?;
        counts.push((kind, qty));
    }

    if counts.is_empty() {
        bail!("size needs at least one <fixture>=<quantity>");
    }

    let engine = SizingEngine::new(AnalysisConfig::from_env().sizing);
    let result = engine.size_for_counts(&counts)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_sizing(&result);
    }
    Ok(())
}

fn print_sizing(r: &SizingResult) {
    println!(
        "Flush valve: {} fixtures, load {:.2} × {:.3} = {:.4}",
        r.fv_qty_sum, r.fv_load_sum, r.fv_rate, r.fv_effective
    );
    println!(
        "General:     load {:.2} × {:.3} = {:.4}",
        r.gen_load_sum, r.gen_rate, r.gen_effective
    );
    println!("Effective load: {:.4}", r.total_effective);
    if let Some(min) = r.min_connection {
        println!("Largest connection: {} mm", min);
    }
    match r.main_size {
        Some(d) => println!("Main diameter: {} mm", d),
        None => println!("No load, main not sized"),
    }
}

fn print_usage() {
    println!("PipeNet - plumbing network analysis");
    println!();
    println!("Usage:");
    println!("  pipenet analyze <request.json> [--config <sizing.json>] [--json]");
    println!("  pipenet size <fixture=qty>... [--json]");
    println!();
    println!("Fixtures:");
    for kind in FixtureKind::ALL {
        println!(
            "  {:<14} {:.1} load, {} mm connection",
            kind.name(),
            kind.unit_load(),
            kind.connection_size()
        );
    }
    println!();
    println!("Environment:");
    println!("  PIPENET_TOLERANCE      endpoint tolerance (default 1e-6)");
    println!("  PIPENET_STRATEGY       line-as-node | explicit-node");
    println!("  PIPENET_INTERSECTIONS  none | bounded | extended");
    println!("  PIPENET_TRAVERSAL      depth-first | breadth-first");
    println!("  PIPENET_MAX_DEPTH      traversal depth guard");
    println!("  PIPENET_INTERPOLATION  true | false");
    println!("  PIPENET_LOG_FORMAT     json for structured logs");
    println!("  RUST_LOG               log filter (default warn,pipenet_processing=info)");
}
