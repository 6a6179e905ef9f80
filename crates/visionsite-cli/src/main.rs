use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use visionsite_core::{export_builtin, ConfigManager, Resolver, RouteKind, Settings, SiteCatalog};
use visionsite_jsonld::{FaqValidator, ReviewValidator};
use visionsite_pages::{PageRenderer, SiteBuilder};

#[derive(Parser)]
#[command(name = "visionsite")]
#[command(about = "VisionSite - route resolution and structured data for an eye-care practice site", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty, table)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Directory holding default.toml / {env}.toml / local.toml
    #[arg(long, global = true, env = "VISIONSITE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Configuration environment (development, production, ...)
    #[arg(long, global = true)]
    env: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// List every static path the site publishes
    Routes {
        /// Only routes of this kind (e.g. condition-in-city)
        #[arg(short, long)]
        kind: Option<RouteKind>,
    },

    /// Resolve one path and print its page document
    Resolve {
        /// URL path, e.g. /conditions/keratoconus/irvine
        path: String,
    },

    /// Render every route to the output directory
    Build {
        /// Output directory (overrides site.output_dir)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Render on one thread
        #[arg(long)]
        sequential: bool,
    },

    /// Run the FAQ and review content checks
    Lint,

    /// Print the effective configuration
    Config,

    /// Write the embedded catalogs as TOML files for editing
    ExportCatalog {
        /// Destination directory
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::new(cli.config_dir.clone(), cli.env.clone())
        .context("Failed to load configuration")?;
    init_tracing(&config.settings().logging.level, cli.verbose);

    match execute_command(&cli, &config) {
        Ok(output) => {
            print_output(&cli.output, &output)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn execute_command(cli: &Cli, config: &ConfigManager) -> Result<Value> {
    let settings = config.settings();
    match &cli.command {
        Commands::Routes { kind } => execute_routes(settings, *kind),
        Commands::Resolve { path } => execute_resolve(settings, path),
        Commands::Build { out, sequential } => execute_build(settings, out.clone(), *sequential),
        Commands::Lint => execute_lint(settings),
        Commands::Config => Ok(json!({
            "env": config.env(),
            "config_dir": config.config_dir(),
            "settings": settings,
        })),
        Commands::ExportCatalog { dir } => {
            let files = export_builtin(dir)
                .with_context(|| format!("Failed to export catalogs to {}", dir.display()))?;
            Ok(json!({ "exported": files }))
        }
    }
}

fn load_catalog(settings: &Settings) -> Result<SiteCatalog> {
    SiteCatalog::load(&settings.catalog).context("Failed to load catalogs")
}

fn execute_routes(settings: &Settings, kind: Option<RouteKind>) -> Result<Value> {
    let catalog = load_catalog(settings)?;
    let resolver = Resolver::new(&catalog, settings.site.related_limit);

    let routes: Vec<Value> = resolver
        .enumerate()
        .into_iter()
        .filter(|r| kind.map_or(true, |k| r.kind() == k))
        .map(|r| json!({ "path": r.path(), "kind": r.kind().to_string() }))
        .collect();
    Ok(Value::Array(routes))
}

fn execute_resolve(settings: &Settings, path: &str) -> Result<Value> {
    let catalog = load_catalog(settings)?;
    let resolver = Resolver::new(&catalog, settings.site.related_limit);
    let renderer = PageRenderer::new(&catalog, settings.site.base_url.clone());

    let route = visionsite_core::Route::parse(path)?;
    let page = resolver.resolve(&route)?;
    let doc = renderer.render(&route, page)?;
    Ok(serde_json::to_value(doc)?)
}

fn execute_build(settings: &Settings, out: Option<PathBuf>, sequential: bool) -> Result<Value> {
    let catalog = load_catalog(settings)?;
    let mut builder = SiteBuilder::new(&catalog, &settings.site);
    if let Some(out) = out {
        builder = builder.with_output_dir(out);
    }
    if sequential {
        builder = builder.with_parallel(false);
    }

    let pb = ProgressBar::new(builder.routes().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")?
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    pb.set_message("rendering pages");

    let report = builder.build_with_progress(|_| pb.inc(1));
    pb.finish_and_clear();
    let report = report.with_context(|| {
        format!("Build into {} failed", builder.output_dir().display())
    })?;

    info!("site build finished: {} pages", report.total);
    Ok(json!({
        "output_dir": report.output_dir,
        "total": report.total,
        "indexable": report.indexable,
        "synthesized": report.synthesized.len(),
        "by_kind": report.by_kind,
        "elapsed_ms": report.elapsed_ms as u64,
    }))
}

fn execute_lint(settings: &Settings) -> Result<Value> {
    let catalog = load_catalog(settings)?;
    let mut findings = Vec::new();

    let mut record = |source: String, warnings: Vec<String>| {
        findings.extend(
            warnings
                .into_iter()
                .map(|w| json!({ "source": source, "warning": w })),
        );
    };

    for condition in &catalog.conditions {
        record(
            format!("condition:{}", condition.slug),
            FaqValidator::validate(&condition.faqs),
        );
    }
    for service in &catalog.services {
        record(
            format!("service:{}", service.slug),
            FaqValidator::validate(&service.faqs),
        );
    }
    record("reviews".to_string(), ReviewValidator::validate(&catalog.reviews));

    info!("lint produced {} warnings", findings.len());
    Ok(Value::Array(findings))
}

fn print_output(format: &OutputFormat, value: &Value) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Pretty => {
            print_pretty(value)?;
        }
        OutputFormat::Table => {
            print_table(value)?;
        }
    }
    Ok(())
}

fn print_pretty(value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let key_colored = key.cyan().bold();
                match val {
                    Value::String(s) => {
                        println!("{}: {}", key_colored, s.green());
                    }
                    Value::Number(n) => {
                        println!("{}: {}", key_colored, n.to_string().yellow());
                    }
                    Value::Bool(b) => {
                        let val_colored = if *b { "true".green() } else { "false".red() };
                        println!("{}: {}", key_colored, val_colored);
                    }
                    Value::Null => {
                        println!("{}: {}", key_colored, "-".dimmed());
                    }
                    _ => {
                        println!("{}: {}", key_colored, serde_json::to_string_pretty(val)?);
                    }
                }
            }
        }
        Value::Array(arr) if arr.is_empty() => {
            println!("{}", "No results".dimmed());
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                println!("\n{}{}:", "Item ".cyan(), (i + 1).to_string().yellow());
                print_pretty(item)?;
            }
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}

/// Arrays of flat objects become one row per element; anything else falls
/// back to the pretty printer.
fn print_table(value: &Value) -> Result<()> {
    let rows = match value.as_array() {
        Some(rows) if !rows.is_empty() && rows.iter().all(Value::is_object) => rows,
        _ => return print_pretty(value),
    };

    let headers: Vec<String> = rows[0]
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        builder.push_record(headers.iter().map(|h| cell(&row[h.as_str()])));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
