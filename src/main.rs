use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};
use tonnage_lookup::{
    export, load, normalize_table, LayoutConfig, RecordSet, Selection,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
    Parquet,
}

/// Flatten side-by-side region/tonnage blocks into (registration, region, tonnage) rows.
#[derive(Debug, Parser)]
#[command(name = "tonnage-lookup", version)]
struct Args {
    /// Spreadsheet to read (.xlsx, .xls, .ods, .csv), or a glob pattern
    input: String,

    /// YAML file with `measurement_marker` / `ignored_columns`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the measurement marker
    #[arg(long)]
    marker: Option<String>,

    /// Only records for this region
    #[arg(long)]
    region: Option<String>,

    /// Only records for this registration number, in every region
    #[arg(long)]
    registration: Option<String>,

    #[arg(long, value_enum, default_value = "csv")]
    format: Format,

    /// Output file; stdout when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print the distinct regions and exit
    #[arg(long)]
    list_regions: bool,
}

fn main() -> Result<()> {
    // logs go to stderr so exported data can be piped from stdout
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LayoutConfig::from_yaml_file(path)?,
        None => LayoutConfig::default(),
    };
    if let Some(marker) = &args.marker {
        config = config.with_marker(marker.clone());
        config.validate()?;
    }

    let inputs = load::resolve_inputs(&args.input)?;
    info!(files = inputs.len(), marker = config.measurement_marker(), "startup");

    let start = Instant::now();
    let per_file: Vec<Result<RecordSet>> = inputs
        .par_iter()
        .map(|path| {
            let table = load::load_table(path)?;
            let records = normalize_table(&table, &config);
            if records.is_empty() {
                warn!(path = %path.display(), "no records found");
            }
            Ok(records)
        })
        .collect();

    let mut records = RecordSet::default();
    for result in per_file {
        records.extend(result?);
    }
    info!(records = records.len(), elapsed = ?start.elapsed(), "normalized");

    if args.list_regions {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for region in records.regions() {
            writeln!(out, "{}", region)?;
        }
        return Ok(());
    }

    let selection = Selection {
        region: args.region.clone(),
        identifier: args.registration.clone(),
    };
    let selected = records.select(&selection);
    info!(selected = selected.len(), "selection applied");

    match (args.format, &args.output) {
        (Format::Parquet, Some(path)) => export::write_parquet(&selected, path)?,
        (Format::Parquet, None) => bail!("--format parquet needs --output <path>"),
        (format, Some(path)) => {
            let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
            write_text(format, &selected, BufWriter::new(file))?;
        }
        (format, None) => write_text(format, &selected, io::stdout().lock())?,
    }

    Ok(())
}

fn write_text<W: Write>(format: Format, records: &RecordSet, out: W) -> Result<()> {
    match format {
        Format::Csv => export::write_csv(records, out),
        Format::Json => export::write_json(records, out),
        Format::Parquet => bail!("parquet is not a text format"),
    }
}
