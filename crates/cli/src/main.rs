//! clientgen - plan client method parameter transformations
//!
//! Reads a code model, works out the client method signatures and the
//! parameter transformations behind them, and prints the plan.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clientgen_codemodel::CodeModel;
use clientgen_core::{ClientMapper, Emit, GeneratorOptions, build_operation_methods};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "clientgen",
    version,
    about = "Plan client method signatures and parameter transformations for a code model"
)]
struct Args {
    /// Code model JSON file
    model: PathBuf,

    /// Generator options (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Only plan this operation (repeatable, overrides the config allow-list)
    #[arg(long = "operation", value_name = "NAME")]
    operations: Vec<String>,

    /// Also plan protocol methods
    #[arg(long)]
    protocol_methods: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Pretty-printed JSON
    Json,
    /// Human-readable signatures and mappings
    Text,
}

fn main() {
    // Logs go to stderr so stdout stays a clean plan.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "clientgen=info,clientgen_core=info,clientgen_codemodel=info".into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String, String> {
    let mut options = match &args.config {
        Some(path) => GeneratorOptions::from_path(path).map_err(|e| e.to_string())?,
        None => GeneratorOptions::default(),
    };
    if args.protocol_methods {
        options.protocol_methods = true;
    }
    if !args.operations.is_empty() {
        options.operations = Some(args.operations.clone());
    }
    debug!(?options, "Resolved generator options.");

    let model = CodeModel::from_path(&args.model).map_err(|e| e.to_string())?;
    let mapper = ClientMapper::new(&model);
    let methods = build_operation_methods(&model, &mapper, &options)
        .map_err(|e| format!("Failed to plan client methods: {e}"))?;
    info!(
        model = %args.model.display(),
        methods = methods.len(),
        "Planned client methods."
    );

    match args.format {
        Format::Json => serde_json::to_string_pretty(&methods)
            .map_err(|e| format!("Failed to serialize plan: {e}")),
        Format::Text => Ok(methods
            .iter()
            .map(|m| m.emit())
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}
