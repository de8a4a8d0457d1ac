//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_company_id, DEFAULT_CUTOFF_YEAR};
use crate::error::Result;
use crate::harvester::HistoryBuilder;
use crate::input::{load_postings, postings_path, read_company_ids};
use crate::output::{render_records, save_records, OutputFormat};
use crate::types::CapitalChangeRecord;

/// CVR Harvester - Extract capital changes from Danish company registration postings.
#[derive(Parser)]
#[command(name = "cvr-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract capital changes from one company's postings file.
    Extract {
        /// JSON file with the company's postings
        postings: PathBuf,

        /// CVR number of the company (e.g., 12345678)
        #[arg(short, long)]
        company: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Ignore postings dated in or before this year
        #[arg(long, default_value_t = DEFAULT_CUTOFF_YEAR)]
        after_year: i32,
    },

    /// Extract capital changes for every company in a list.
    Batch {
        /// File with one CVR number per line
        companies: PathBuf,

        /// Directory holding one `<cvr>.json` postings file per company
        #[arg(short, long)]
        postings_dir: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Ignore postings dated in or before this year
        #[arg(long, default_value_t = DEFAULT_CUTOFF_YEAR)]
        after_year: i32,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            postings,
            company,
            output,
            format,
            after_year,
        } => extract_command(&postings, &company, output.as_deref(), format, after_year),
        Commands::Batch {
            companies,
            postings_dir,
            output,
            format,
            after_year,
        } => batch_command(
            &companies,
            &postings_dir,
            output.as_deref(),
            format,
            after_year,
        ),
    }
}

/// Execute the extract command.
fn extract_command(
    postings_file: &Path,
    company_id: &str,
    output: Option<&Path>,
    format: OutputFormat,
    after_year: i32,
) -> Result<()> {
    validate_company_id(company_id)?;

    eprintln!(
        "{} {} from {}",
        style("Extracting").bold(),
        style(company_id).cyan(),
        style(postings_file.display()).green()
    );

    let postings = load_postings(postings_file)?;
    let history = HistoryBuilder::new(company_id)
        .with_cutoff_year(after_year)
        .build(&postings);

    eprintln!("  Postings: {}", postings.len());
    eprintln!("  Records: {}", history.records.len());
    if !history.failures.is_empty() {
        eprintln!(
            "  Skipped: {}",
            style(history.failures.len()).yellow().bold()
        );
    }

    write_records(&history.records, output, format)
}

/// Execute the batch command.
fn batch_command(
    companies_file: &Path,
    postings_dir: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    after_year: i32,
) -> Result<()> {
    let company_ids = read_company_ids(companies_file)?;

    eprintln!(
        "{} {} companies from {}",
        style("Processing").bold(),
        style(company_ids.len()).cyan(),
        style(postings_dir.display()).green()
    );

    let pb = ProgressBar::new(company_ids.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut records = Vec::new();
    let mut skipped_postings = 0;
    let mut missing_companies = 0;

    for company_id in &company_ids {
        pb.set_message(company_id.clone());

        let path = postings_path(postings_dir, company_id);
        match load_postings(&path) {
            Ok(postings) => {
                let history = HistoryBuilder::new(company_id.as_str())
                    .with_cutoff_year(after_year)
                    .build(&postings);
                skipped_postings += history.failures.len();
                records.extend(history.records);
            }
            Err(e) => {
                tracing::warn!(company_id = %company_id, error = %e, "Skipping company");
                missing_companies += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    eprintln!("  Records: {}", records.len());
    if skipped_postings > 0 {
        eprintln!(
            "  Skipped postings: {}",
            style(skipped_postings).yellow().bold()
        );
    }
    if missing_companies > 0 {
        eprintln!(
            "  Companies without postings: {}",
            style(missing_companies).yellow().bold()
        );
    }

    write_records(&records, output, format)
}

/// Save records to a file, or print them to stdout.
fn write_records(
    records: &[CapitalChangeRecord],
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    match output {
        Some(path) => {
            save_records(records, path, format)?;
            eprintln!();
            eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{}", render_records(records, format)?),
    }
    Ok(())
}
