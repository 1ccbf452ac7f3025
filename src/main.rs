//! bench-compare CLI
//!
//! Entry point for the `bench-compare` command-line tool.

use bench_compare::config::{BuiltinDefaults, CompareConfig, EffectiveConfig};
use bench_compare::logging::init_tracing;
use bench_compare::scorer::score_breakdown;
use bench_compare::summary::{ExitCode, InputDigest, RunSummary};
use bench_compare::{classify, compare_file, Comparison, PipelineError};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "bench-compare")]
#[command(about = "Join repeated benchmark timings across systems", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the joined dataset as JSON
    Join {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Write labeled per-system plot points as JSON
    Points {
        #[command(flatten)]
        run: RunArgs,

        /// Only emit points of this group (e.g. "Full reachability")
        #[arg(long)]
        group: Option<String>,
    },

    /// Show the identity and complexity score of one benchmark path
    Explain {
        /// Benchmark path, as it appears in the input
        path: String,

        /// Directory the benchmark path is relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// System label to classify under
        #[arg(long, default_value = "unknown")]
        system: String,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Measurements file (system,path,time per line)
    #[arg(long, short = 'i', default_value = "results/comparison.csv")]
    input: PathBuf,

    /// Directory benchmark paths in the input are relative to
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Path to config file (TOML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Compared systems in column order; overrides the config
    #[arg(long = "system", short = 's', value_delimiter = ',')]
    systems: Vec<String>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Write run_summary.json here; effective_config.json is written beside it
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Join { run } => {
            let code = run_compare(&run, |comparison, _| to_json(comparison.rows()));
            process::exit(code.as_i32());
        }
        Commands::Points { run, group } => {
            let code = run_compare(&run, |comparison, config| {
                let policy = config.label_policy(comparison.timeout_seconds());
                let points: Vec<_> = comparison
                    .plot_points(&policy)
                    .into_iter()
                    .filter(|p| group.as_deref().map_or(true, |g| p.group.as_str() == g))
                    .collect();
                to_json(&points)
            });
            process::exit(code.as_i32());
        }
        Commands::Explain {
            path,
            root,
            system,
            human,
        } => {
            init_tracing(&BuiltinDefaults::default().log_filter);
            run_explain(&root, &path, &system, human);
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PipelineError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Load config, run the pipeline and write the rendered output.
fn run_compare<F>(args: &RunArgs, render: F) -> ExitCode
where
    F: Fn(&Comparison, &CompareConfig) -> Result<String, PipelineError>,
{
    let (effective, config) = match load_config(args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return e.exit_code();
        }
    };
    init_tracing(&config.log_filter);
    config.log_warnings();

    match execute(args, &effective, &config, render) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            tracing::error!(kind = e.failure_kind().description(), "{}", e);
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn load_config(args: &RunArgs) -> Result<(EffectiveConfig, CompareConfig), PipelineError> {
    let overrides = if args.systems.is_empty() {
        None
    } else {
        Some(serde_json::json!({ "systems": args.systems }))
    };
    let effective = EffectiveConfig::build(args.config.as_deref(), overrides)?;
    let config = effective.compare_config()?;
    Ok((effective, config))
}

fn execute<F>(
    args: &RunArgs,
    effective: &EffectiveConfig,
    config: &CompareConfig,
    render: F,
) -> Result<(), PipelineError>
where
    F: Fn(&Comparison, &CompareConfig) -> Result<String, PipelineError>,
{
    let (comparison, bytes) = compare_file(&args.input, &config.systems, &args.root)?;
    if let Some(timeout) = comparison.timeout_seconds() {
        tracing::info!(timeout_seconds = timeout, "timeout");
    }

    let rendered = render(&comparison, config)?;
    write_output(args.output.as_deref(), &rendered)?;

    if let Some(path) = &args.summary {
        let digest = InputDigest::of_bytes(&args.input, &bytes);
        RunSummary::from_comparison(&comparison, &config.systems, Some(digest)).write_to_file(path)?;
        eprintln!("Wrote: {}", path.display());

        let config_path = path.with_file_name("effective_config.json");
        effective.write_to_file(&config_path)?;
        eprintln!("Wrote: {}", config_path.display());
    }

    Ok(())
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<(), PipelineError> {
    match path {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Wrote: {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

#[derive(Serialize)]
struct Explanation {
    #[serde(flatten)]
    identity: bench_compare::Identity,
    size: u64,
    score: bench_compare::scorer::ScoreBreakdown,
}

fn run_explain(root: &Path, path: &str, system: &str, human: bool) {
    let identity = match classify(path, system) {
        Ok(identity) => identity,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(ExitCode::InvariantViolation.as_i32());
        }
    };
    let score = score_breakdown(root, path);

    if human {
        println!("Path:     {}", path);
        println!("Group:    {}", identity.group);
        println!("Name:     {}", identity.name);
        println!("Type:     {}", identity.bench_type);
        println!("Variant:  {}", identity.algorithm_variant);
        if identity.canonical_path != path {
            println!("Compared: {}", identity.canonical_path);
        }
        println!("Size:     {} (base {})", score.total(), score.base);
        for import in &score.imports {
            let note = if import.readable { "" } else { " (unreadable)" };
            println!("  import {}: {}{}", import.path.display(), import.markers, note);
        }
        return;
    }

    let explanation = Explanation {
        size: score.total(),
        identity,
        score,
    };
    match serde_json::to_string_pretty(&explanation) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(ExitCode::Io.as_i32());
        }
    }
}
