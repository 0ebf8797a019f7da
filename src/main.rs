//! revbrief — code review context generator.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use revbrief::config;
use revbrief::env;
use revbrief::generator;
use revbrief::providers;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Command, ConfigArgs, GenerateArgs};
use config::Config;
use env::Env;
use generator::GenerateOptions;
use providers::CompletionProvider;
use providers::rig::RigProvider;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(*args).await,
        Command::Config(args) => run_config(args),
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    // Scope parameters are checked before any filesystem access.
    let scope = args.validate().map_err(|e| anyhow::anyhow!("{e}"))?;

    let project_path = std::fs::canonicalize(&args.path)
        .with_context(|| format!("--path directory not found: {}", args.path.display()))?;

    let env = Env::real();
    let config = Config::load(Some(&project_path), &env).context("failed to load configuration")?;

    // Config supplies defaults where the CLI didn't override.
    let review = (args.review || config.review.enabled) && !args.no_review;

    // No resolvable API key just means the summary fallback and review
    // step are unavailable; generation itself works offline.
    let provider = RigProvider::new(config.provider.clone()).ok();

    let mut options = GenerateOptions::new(project_path, scope);
    options.compare_branch = args.compare_branch;
    options.target_branch = args.target_branch;
    options.github_pr = args.github_pr;
    options.output = args.output;
    options.output_dir = config.output.dir.as_ref().map(|dir| {
        if dir.is_absolute() {
            dir.clone()
        } else {
            options.project_path.join(dir)
        }
    });
    options.raw = args.raw;
    options.review = review;
    options.quiet = args.quiet;

    let provider_ref = provider
        .as_ref()
        .map(|p| p as &dyn CompletionProvider);
    let outcome = generator::generate(&options, provider_ref, &env).await?;

    if options.raw {
        print!("{}", outcome.document);
    }
    if !options.quiet {
        cli::print_summary(
            outcome.context_path.as_deref(),
            options.review,
            outcome.review_path.as_deref(),
        );
    }

    Ok(())
}

/// Print the resolved configuration (API key redacted).
fn run_config(args: ConfigArgs) -> Result<()> {
    let project_path = std::fs::canonicalize(&args.path)
        .with_context(|| format!("--path directory not found: {}", args.path.display()))?;
    let config = Config::load(Some(&project_path), &Env::real())
        .context("failed to load configuration")?;
    println!("{config:#?}");
    Ok(())
}
