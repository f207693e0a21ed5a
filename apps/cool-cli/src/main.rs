use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use cool_app::{AppResult, CaseOutcome, OutputFormat, SYSTEMS, inspect_system, run_case, write_outcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cool-cli")]
#[command(about = "coolflow CLI - CPU cooling network design and simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML, or JSON by extension)
        case_path: PathBuf,
    },
    /// Show components, wiring, evaluation order and paths of a system
    Inspect {
        #[arg(long, default_value = "cpu_system")]
        system: String,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the study of a case file
    Run {
        case_path: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr so stdout carries only results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Inspect { system, json } => cmd_inspect(&system, json),
        Commands::Run {
            case_path,
            output,
            format,
        } => cmd_run(&case_path, output.as_deref(), format.into()),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    let case = cool_project::load_case(case_path)?;
    if !SYSTEMS.contains(&case.system.as_str()) {
        return Err(cool_app::AppError::SystemNotFound(case.system));
    }
    println!(
        "✓ {} is valid ({} study on {})",
        case_path.display(),
        case.study.kind(),
        case.system
    );
    Ok(())
}

fn cmd_inspect(system: &str, json: bool) -> AppResult<()> {
    let summary = inspect_system(system)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("System: {}", summary.name);
    println!("Components:");
    for c in &summary.components {
        println!("  {} ({})", c.name, c.kind);
    }
    println!("Connections:");
    for (from, to) in &summary.connections {
        println!("  {from} -> {to}");
    }
    println!("Aliases: {}", summary.aliases.join(", "));
    println!("States: {}", summary.states.join(", "));
    println!("Evaluation order: {}", summary.evaluation_order.join(" -> "));
    println!("Design methods: {}", summary.design_methods.join(", "));
    println!("Paths:");
    for p in &summary.paths {
        println!("  {p}");
    }
    Ok(())
}

fn cmd_run(case_path: &Path, output: Option<&Path>, format: OutputFormat) -> AppResult<()> {
    let case = cool_project::load_case(case_path)?;
    let outcome = run_case(&case)?;

    if let CaseOutcome::Design(d) = &outcome {
        info!(
            unknown = %d.solution.unknown,
            value = d.solution.value,
            residual = d.solution.residual,
            iterations = d.solution.iterations,
            "design point"
        );
    }

    match output {
        Some(path) => {
            let mut w = BufWriter::new(File::create(path)?);
            write_outcome(&outcome, format, &mut w)?;
            w.flush()?;
            info!(path = %path.display(), "results written");
        }
        None => {
            let stdout = io::stdout();
            write_outcome(&outcome, format, stdout.lock())?;
        }
    }
    Ok(())
}
