use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use fb_prepare::{
    classify_statement, Parameter, ScannedStatement, StatementKind, StatementScanner,
    VariableCatalog,
};

#[derive(Parser)]
#[command(name = "fb_prepare")]
#[command(
    author,
    version,
    about = "Prepare a Firebird statement: extract parameters, rewrite placeholders, detect EXECUTE BLOCK"
)]
struct Args {
    /// SQL file to prepare ('-' or absent reads stdin)
    file: Option<PathBuf>,

    /// JSON catalog of pre-bound variable names ({"variables": [...]})
    #[arg(short = 'b', long = "variables", value_name = "FILE")]
    variables: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "human", value_enum)]
    format: OutputFormat,

    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Human,
    /// Machine-readable JSON
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(&args).into()),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn log_level(args: &Args) -> tracing::Level {
    if args.quiet {
        return tracing::Level::ERROR;
    }
    match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn run(args: Args) -> Result<()> {
    let sql = read_input(args.file.as_deref())?;

    let blob = match &args.variables {
        Some(path) => VariableCatalog::load_from(path)
            .into_diagnostic()?
            .catalog_string(),
        None => String::new(),
    };

    let scanned = StatementScanner::new().with_variables(&blob).scan(&sql);
    let kind = classify_statement(&sql);

    match args.format {
        OutputFormat::Human => print_human(&scanned, kind),
        OutputFormat::Json => print_json(&scanned, kind)?,
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path).into_diagnostic(),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .into_diagnostic()?;
            Ok(buffer)
        }
    }
}

fn print_human(scanned: &ScannedStatement, kind: StatementKind) {
    println!("{}", scanned.processed_sql());
    println!();
    println!("kind:          {kind}");
    println!("execute block: {}", scanned.is_execute_block());
    println!(
        "parameters:    {} occurrence(s), {} distinct",
        scanned.parameter_count(),
        scanned.display_parameters().len()
    );
    for (position, param) in scanned.parameters().enumerate() {
        println!("  {}. {}", position + 1, param.name());
    }
}

#[derive(Serialize)]
struct Report<'a> {
    kind: StatementKind,
    execute_block: bool,
    processed_sql: &'a str,
    /// Occurrence names in binding order.
    parameters: Vec<&'a str>,
    display_parameters: &'a [Parameter],
}

fn print_json(scanned: &ScannedStatement, kind: StatementKind) -> Result<()> {
    let report = Report {
        kind,
        execute_block: scanned.is_execute_block(),
        processed_sql: scanned.processed_sql(),
        parameters: scanned.parameters().map(|p| p.name()).collect(),
        display_parameters: scanned.display_parameters(),
    };
    let rendered = serde_json::to_string_pretty(&report).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}
