use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use rankviz_core::config::{Config, CONFIG_FILE};
use rankviz_core::error::ReportError;
use rankviz_core::locator;
use rankviz_core::parser::RankingParser;
use rankviz_core::types::{ClassifierResult, RendererKind};

use rankviz_report::json;
use rankviz_report::{RenderOutput, Renderer};

#[derive(Parser)]
#[command(name = "rankviz")]
#[command(about = "Chart classifier accuracy rankings from experiment reports")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Used when no subcommand is given
    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the latest report in the results directory (the default)
    Render(RenderArgs),
    /// Create a default .rankviz.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Default)]
struct RenderArgs {
    /// Directory holding experiment_results_*.txt reports
    #[arg(long)]
    results_dir: Option<PathBuf>,
    /// Render this report instead of the latest one
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Rendering strategy: auto, chart, or text
    #[arg(long)]
    renderer: Option<String>,
    /// Config file path (defaults to .rankviz.toml in the working directory or an ancestor)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the parsed rankings as JSON instead of rendering them
    #[arg(long)]
    json: bool,
    /// Single-line JSON output
    #[arg(long, requires = "json")]
    compact: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render(args)) => cmd_render(&args),
        Some(Commands::Init { force }) => cmd_init(force),
        None => cmd_render(&cli.render),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}

fn cmd_render(args: &RenderArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let kind = match args.renderer.as_deref() {
        Some(s) => s.parse()?,
        None => config.render.renderer,
    };
    let results_dir = args
        .results_dir
        .clone()
        .unwrap_or_else(|| config.input.results_dir.clone());
    let parser = RankingParser::new(&config.input)?;

    // Pipeline failures are reported and end the run normally.
    let Some((report_path, results)) = load_rankings(args, &results_dir, &config, &parser) else {
        return Ok(());
    };

    if args.json {
        println!("{}", json::format_report(&report_path, &results, args.compact));
        return Ok(());
    }

    // Charts go next to the report they were drawn from.
    let output_dir = report_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or(results_dir);
    render(kind, &output_dir, &config, &results);
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let target = PathBuf::from(CONFIG_FILE);
    if target.exists() && !force {
        anyhow::bail!("{CONFIG_FILE} already exists. Use --force to overwrite.");
    }
    std::fs::write(&target, Config::default_toml())
        .with_context(|| format!("failed to write {CONFIG_FILE}"))?;
    println!("Created {CONFIG_FILE} with default configuration.");
    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => Ok(Config::load_or_default(Path::new("."))),
    }
}

/// Locate and parse the report. Prints a diagnostic and returns `None` when
/// there is nothing to render.
fn load_rankings(
    args: &RenderArgs,
    results_dir: &Path,
    config: &Config,
    parser: &RankingParser,
) -> Option<(PathBuf, Vec<ClassifierResult>)> {
    let report_path = match &args.file {
        Some(file) => file.clone(),
        None => match locator::find_latest(results_dir, &config.input) {
            Ok(path) => path,
            Err(e) => {
                report_error(&e, args.json);
                return None;
            }
        },
    };

    status(
        args.json,
        format_args!("Using results file: {}", report_path.display()),
    );

    let results = match parser.parse_file(&report_path) {
        Ok(results) => results,
        Err(e) => {
            report_error(&e, args.json);
            Vec::new()
        }
    };

    if results.is_empty() {
        status(args.json, "No classifier data found in results file.");
        return None;
    }
    Some((report_path, results))
}

fn render(kind: RendererKind, output_dir: &Path, config: &Config, results: &[ClassifierResult]) {
    let selection = Renderer::select(kind, output_dir, config);
    if let Some(reason) = &selection.fallback {
        println!(
            "{}",
            format!("{reason}. Falling back to text visualization.").yellow()
        );
    }

    match selection.renderer.render(results) {
        Ok(RenderOutput::Text(text)) => print!("{text}"),
        Ok(RenderOutput::Charts(charts)) => {
            println!("Visualization saved to: {}", charts.comparison.display());
            println!("Trend visualization saved to: {}", charts.trends.display());
        }
        Err(e) => eprintln!("Error: {e}"),
    }
}

/// Progress line on stdout, moved to stderr when stdout carries JSON.
fn status(json: bool, message: impl Display) {
    if json {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
}

fn report_error(e: &ReportError, json: bool) {
    match e {
        ReportError::SectionNotFound => status(json, e),
        _ => eprintln!("Error: {e}"),
    }
    if let Some(hint) = e.hint() {
        eprintln!("{hint}");
    }
}
