use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use jsonschema_serializer_core::{Fragment, lint_schema};
use jsonschema_serializer_model::{AdapterConfig, ModelDefinition, SchemaAdapter};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "schema-gen")]
#[command(about = "Generate JSON Schema documents from model definitions")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a schema from a YAML or JSON model definition.
    Generate(GenerateArgs),
    /// Report structural problems in one or more schema JSON files.
    Lint(LintArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Model definition file (`.json`, otherwise YAML).
    #[arg(long)]
    model: PathBuf,
    /// Adapter configuration YAML.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated columns to keep (e.g. name,price).
    #[arg(long)]
    only: Option<String>,
    /// Comma-separated columns to drop.
    #[arg(long)]
    except: Option<String>,
    /// Render without whitespace.
    #[arg(long)]
    compact: bool,
    /// Write the schema here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct LintArgs {
    /// Schema JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Lint(args) => run_lint(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let model = ModelDefinition::load(&args.model)
        .map_err(|err| format!("Failed to load model '{}': {err}", args.model.display()))?;
    debug!(columns = model.columns.len(), path = %args.model.display(), "loaded model");

    let mut config = match &args.config {
        Some(path) => AdapterConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AdapterConfig::default(),
    };
    if args.only.is_some() || args.except.is_some() {
        // command-line lists replace the config's whole column selection
        config.only = args.only.as_deref().map(parse_csv_list);
        config.except = args.except.as_deref().map(parse_csv_list);
        config.allowed_attributes.clear();
    }
    if args.compact {
        config.pretty = false;
    }

    let filter = config.filter().map_err(|err| err.to_string())?;
    let builder = config
        .adapter()
        .from_model(&model, &filter)
        .map_err(|err| err.to_string())?;
    let rendered = builder
        .render(config.pretty)
        .map_err(|err| format!("Failed to render schema: {err}"))?;

    match args.output {
        Some(path) => {
            write_output(&path, &rendered)?;
            info!(path = %path.display(), "wrote schema");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_lint(args: LintArgs) -> Result<(), String> {
    let mut problems = 0usize;

    for path in &args.inputs {
        let schema = match load_schema(path) {
            Ok(schema) => schema,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                problems += 1;
                continue;
            }
        };
        for warning in lint_schema(&schema) {
            println!("{}: {warning}", path.display());
            problems += 1;
        }
    }

    if problems > 0 {
        return Err(format!(
            "{problems} problem(s) found in {} file(s)",
            args.inputs.len()
        ));
    }
    println!("Linted {} schema file(s), no problems found.", args.inputs.len());
    Ok(())
}

fn load_schema(path: &Path) -> Result<Fragment, String> {
    let raw = fs::read_to_string(path).map_err(|err| format!("Failed to read: {err}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|err| format!("Invalid JSON: {err}"))?;
    Fragment::from_value(value).map_err(|err| err.to_string())
}

fn write_output(path: &Path, rendered: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }
    fs::write(path, format!("{rendered}\n"))
        .map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}

fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::{Cli, parse_csv_list};

    #[test]
    fn test_parse_csv_list_trims_and_drops_empty() {
        let parsed = parse_csv_list(" name, price, ,sku ");
        assert_eq!(parsed, vec!["name", "price", "sku"]);
    }

    #[test]
    fn test_parse_csv_list_blank_is_empty() {
        assert!(parse_csv_list("").is_empty());
        assert!(parse_csv_list(" , ").is_empty());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
