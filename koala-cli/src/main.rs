use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use koala_core::{Expense, ExpenseType};
use koala_ingest::{Bank, Extraction, PageSource, PdfDocument, TextPages, extract};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use output::{Format, Row};

#[derive(Parser, Debug)]
#[command(name = "koala", version, about = "Import expenses from bank statement PDFs")]
struct Cli {
    /// Config file (default: ~/.koala/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log extraction progress (overrides log.level, not RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract expenses from a statement PDF (or a form-feed separated .txt dump)
    Import {
        /// Statement layout: c6 | nubank
        #[arg(long)]
        bank: Bank,

        /// Statement file
        file: PathBuf,

        /// Zero-based first page with transactions (default: per bank, from config)
        #[arg(long)]
        start_page: Option<usize>,

        /// Year to attach to `DD MON` rows (default: current year)
        #[arg(long)]
        year: Option<i32>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit expenses, expanding installments into one row per remaining month
        #[arg(long)]
        expenses: bool,

        /// Type given to expenses without an installment marker
        #[arg(long, value_enum, default_value_t = KindArg::Variable)]
        kind: KindArg,
    },

    /// List supported statement layouts
    Banks,

    /// Manage ~/.koala/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Fixed,
    Variable,
}

impl From<KindArg> for ExpenseType {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Fixed => ExpenseType::Fixed,
            KindArg::Variable => ExpenseType::Variable,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => config::config_path()?,
    };
    let cfg = config::load_config_from(&config_path)?;
    init_logging(cli.verbose, &cfg.log.level);

    match cli.command {
        Command::Import {
            bank,
            file,
            start_page,
            year,
            format,
            output,
            expenses,
            kind,
        } => {
            let mut registry = cfg.registry();
            if start_page.is_some() || year.is_some() {
                registry.replace(cfg.extractor_for(bank, start_page, year));
            }
            let extractor = registry.get(bank)?;

            let source = open_statement(&file)?;
            let extraction = extract(extractor, &*source)
                .with_context(|| format!("extracting {} statement {}", bank, file.display()))?;

            report(&extraction, &file);

            let rows = if expenses {
                expense_rows(&extraction, kind.into())
            } else {
                extraction.records.iter().map(Row::from).collect()
            };

            match output {
                Some(p) => {
                    let f = File::create(&p).with_context(|| format!("create {}", p.display()))?;
                    output::render(&rows, format, io::BufWriter::new(f))?;
                    eprintln!("Wrote {} rows to {}", rows.len(), p.display());
                }
                None => output::render(&rows, format, io::stdout().lock())?,
            }
        }

        Command::Banks => {
            let registry = cfg.registry();
            for (bank, extractor) in registry.iter() {
                println!(
                    "{:<8} start page {}",
                    bank.to_string().to_lowercase(),
                    extractor.start_page()
                );
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&config_path)?,
            ConfigCommand::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: bool, level: &str) {
    let fallback = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// `.txt` files are pre-extracted text with form feeds between pages; anything else is a PDF.
fn open_statement(path: &Path) -> Result<Box<dyn PageSource>> {
    if !path.exists() {
        bail!("statement not found: {}", path.display());
    }
    if path.is_dir() {
        bail!("{} is a directory", path.display());
    }

    let is_text = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if is_text {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        return Ok(Box::new(TextPages::from_form_feed(&text)));
    }

    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let doc = PdfDocument::load(BufReader::new(f))
        .with_context(|| format!("load pdf {}", path.display()))?;
    info!(pages = doc.page_count(), "loaded {}", path.display());
    Ok(Box::new(doc))
}

fn report(extraction: &Extraction, file: &Path) {
    eprintln!(
        "Parsed {} records from {} ({} skipped)",
        extraction.records.len(),
        file.display(),
        extraction.skipped.len()
    );
    for skipped in &extraction.skipped {
        eprintln!("  skipped {:?}: {}", skipped.raw.trim(), skipped.error);
    }
}

fn expense_rows(extraction: &Extraction, fallback: ExpenseType) -> Vec<Row> {
    let mut rows = Vec::new();
    for value in &extraction.records {
        match Expense::from_monetary_value(value, fallback) {
            Ok(expense) => rows.extend(expense.installment_schedule().iter().map(Row::from)),
            Err(e) => warn!(name = %value.name, error = %e, "record rejected as expense"),
        }
    }
    rows
}
