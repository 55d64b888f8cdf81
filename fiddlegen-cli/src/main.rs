//! fiddlegen CLI: generate indicator bindings from a catalog dump.
//!
//! Commands:
//! - `generate`: walk the catalog and write the five artifacts
//! - `list`: show how every catalog function is classified
//! - `stats`: print the bounds the statistics artifact would contain

mod logging;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fiddlegen_core::{CatalogDump, ClassifiedFunction, GeneratorConfig, Plan};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "fiddlegen",
    version,
    about = "Generate technical-analysis wrappers with fiddle-value normalization"
)]
struct Cli {
    /// Emit logs as JSON.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the catalog and write all generated artifacts.
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory. Overrides `output.dir` from the config file.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Additional function to skip (repeatable).
        #[arg(long = "ban", value_name = "NAME")]
        ban: Vec<String>,

        /// Restrict generation to these functions (repeatable).
        #[arg(long = "only", value_name = "NAME")]
        only: Vec<String>,

        /// Path the generated code imports the runtime crate under.
        #[arg(long)]
        runtime_crate: Option<String>,
    },
    /// Show the classification of every eligible catalog function.
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print catalog statistics.
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Catalog dump (TOML).
    #[arg(long)]
    catalog: PathBuf,

    /// Generator config (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn load(&self) -> Result<(CatalogDump, GeneratorConfig)> {
        let catalog = CatalogDump::from_file(&self.catalog)
            .with_context(|| format!("loading catalog {}", self.catalog.display()))?;
        let config = load_config(self.config.as_deref())?;
        Ok((catalog, config))
    }
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json);

    match cli.command {
        Commands::Generate {
            source,
            out_dir,
            ban,
            only,
            runtime_crate,
        } => run_generate(&source, out_dir, ban, only, runtime_crate),
        Commands::List { source, json } => run_list(&source, json),
        Commands::Stats { source } => run_stats(&source),
    }
}

fn run_generate(
    source: &SourceArgs,
    out_dir: Option<PathBuf>,
    ban: Vec<String>,
    only: Vec<String>,
    runtime_crate: Option<String>,
) -> Result<()> {
    let (catalog, mut config) = source.load()?;
    if let Some(dir) = out_dir {
        config.output.dir = dir;
    }
    if let Some(path) = runtime_crate {
        config.output.runtime_crate = path;
    }
    config.catalog.banned_functions.extend(ban);
    if !only.is_empty() {
        config.catalog.only = only;
    }

    tracing::debug!(
        out_dir = %config.output.dir.display(),
        runtime_crate = %config.output.runtime_crate,
        banned = ?config.catalog.banned_functions,
        only = ?config.catalog.only,
        "effective configuration"
    );

    let report = fiddlegen_core::generate(&catalog, &config).context("generation failed")?;

    println!("Generated {} wrappers into {}", report.wrappers, report.out_dir.display());
    println!("  direct functions:      {}", report.stats.num_functions);
    println!("  time-period functions: {}", report.stats.num_time_period_functions);
    println!("  max fiddle values:     {}", report.stats.max_fiddle_values);
    println!("  max output values:     {}", report.stats.max_output_values);
    if !report.banned.is_empty() {
        println!("  banned:                {}", report.banned.join(", "));
    }
    if !report.ineligible.is_empty() {
        println!("  ineligible:            {}", report.ineligible.join(", "));
    }
    println!("  fingerprint:           {}", report.fingerprint);
    for file in &report.files {
        println!("  wrote {}", file.display());
    }
    Ok(())
}

/// One row of `list` output.
#[derive(Serialize)]
struct ListRow<'a> {
    group: &'a str,
    name: &'a str,
    wrapper: &'a str,
    factory: &'a str,
    direct: bool,
    time_period: bool,
    period_indexes: &'a [usize],
    in_function_array: bool,
    in_time_period_array: bool,
}

impl<'a> From<&'a ClassifiedFunction> for ListRow<'a> {
    fn from(f: &'a ClassifiedFunction) -> Self {
        Self {
            group: &f.descriptor.group,
            name: f.name(),
            wrapper: &f.wrapper_type,
            factory: &f.factory,
            direct: f.direct,
            time_period: f.time_period,
            period_indexes: &f.period_indexes,
            in_function_array: f.in_function_array(),
            in_time_period_array: f.in_time_period_array(),
        }
    }
}

fn run_list(source: &SourceArgs, json: bool) -> Result<()> {
    let (catalog, config) = source.load()?;
    let plan = Plan::build(&catalog, &config).context("classifying catalog")?;
    let rows: Vec<ListRow<'_>> = plan.walk.functions.iter().map(ListRow::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<24} {:<16} {:<8} {:<12} {:<10} registry",
        "group", "name", "direct", "time-period", "periods"
    );
    for row in &rows {
        let registry = match (row.in_function_array, row.in_time_period_array) {
            (true, _) => "FUNCTION_ARRAY",
            (false, true) => "TIME_PERIOD_FUNCTION_ARRAY",
            (false, false) => "-",
        };
        let periods = format!("{:?}", row.period_indexes);
        println!(
            "{:<24} {:<16} {:<8} {:<12} {:<10} {registry}",
            row.group, row.name, row.direct, row.time_period, periods
        );
    }
    for name in &plan.walk.banned {
        println!("{:<24} {name:<16} (banned)", "");
    }
    for name in &plan.walk.ineligible {
        println!("{:<24} {name:<16} (ineligible)", "");
    }
    Ok(())
}

fn run_stats(source: &SourceArgs) -> Result<()> {
    let (catalog, config) = source.load()?;
    let plan = Plan::build(&catalog, &config).context("classifying catalog")?;
    println!("MAX_FIDDLE_VALUES         = {}", plan.stats.max_fiddle_values);
    println!("MAX_OUTPUT_VALUES         = {}", plan.stats.max_output_values);
    println!("NUM_FUNCTIONS             = {}", plan.stats.num_functions);
    println!("NUM_TIME_PERIOD_FUNCTIONS = {}", plan.stats.num_time_period_functions);
    println!("fingerprint               = {}", plan.fingerprint);
    Ok(())
}
