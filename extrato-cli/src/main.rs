use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use extrato_core::auth::StaticTokenVerifier;
use extrato_core::types::{Context, Direction};
use extrato_ingest::error::{ExtractError, ExtractResult};
use extrato_ingest::extract::{StandardExtractor, TesseractRecognizer, TextRecognizer};
use extrato_pipeline::resolver::CategoryDiagnosis;
use extrato_pipeline::{IngestionRequest, IngestionService};

mod config;
mod store;

use config::Config;
use store::JsonStore;

#[derive(Parser, Debug)]
#[command(name = "extrato", version, about = "Bank statement ingestion and categorization")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, categorize, and optionally save transactions from a document
    Ingest {
        /// Path to a pdf/png/jpg/jpeg/csv/xlsx/xls file
        file: PathBuf,

        /// "personal" or "business" (default from config)
        #[arg(long)]
        context: Option<String>,

        /// Persist resolved transactions immediately
        #[arg(long)]
        auto_save: bool,

        /// User the transactions belong to
        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Show the suggested category for each description, without writing
    Preview {
        descriptions: Vec<String>,
    },

    /// Diagnose whether a description maps to an existing category
    Suggest {
        description: String,

        #[arg(long)]
        context: Option<String>,

        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Create the starter business categories for a user
    Seed {
        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Write a default config.toml under ~/.extrato
    InitConfig,
}

/// Stand-in recognizer when no tesseract binary is on PATH; image uploads
/// fail with a clear message, everything else still works.
struct MissingOcr(String);

#[async_trait]
impl TextRecognizer for MissingOcr {
    async fn recognize(&self, _image: &[u8], _language: &str) -> ExtractResult<String> {
        Err(ExtractError::OcrUnavailable(self.0.clone()))
    }
}

fn build_service(cfg: &Config) -> Result<IngestionService> {
    let recognizer: Arc<dyn TextRecognizer> = match TesseractRecognizer::discover() {
        Ok(recognizer) => Arc::new(recognizer),
        Err(err) => Arc::new(MissingOcr(err.to_string())),
    };
    let extractor =
        StandardExtractor::new(recognizer).with_ocr_language(cfg.ingest.ocr_language.clone());

    let store = Arc::new(JsonStore::open(cfg.data_dir()?).context("open data dir")?);
    Ok(IngestionService::new(
        Arc::new(extractor),
        store.clone(),
        store,
        Arc::new(StaticTokenVerifier::new()),
    ))
}

fn parse_context(cfg: &Config, flag: Option<String>) -> Result<Context> {
    let value = flag.unwrap_or_else(|| cfg.ingest.default_context.clone());
    match value.as_str() {
        "personal" => Ok(Context::Personal),
        "business" => Ok(Context::Business),
        other => bail!("unknown context '{other}' (expected personal or business)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Command::Ingest { file, context, auto_save, user } => {
            let context = parse_context(&cfg, context)?;
            let bytes = std::fs::read(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            let service = build_service(&cfg)?;
            let outcome = service
                .ingest(IngestionRequest {
                    file_bytes: bytes,
                    filename,
                    context,
                    user_id: user,
                    auto_save: auto_save || cfg.ingest.auto_save,
                })
                .await?;

            let summary = &outcome.summary;
            println!(
                "Extracted {} transactions from {} ({} new categories)",
                summary.total_transactions, outcome.filename, outcome.categories_created
            );
            for t in &outcome.transactions {
                println!(
                    "{} | {:>10.2} | {:7} | {:?} | {} [{}]",
                    t.date,
                    t.amount,
                    t.direction.as_str(),
                    t.status,
                    t.description,
                    t.category_name,
                );
            }
            println!(
                "\nIncome: {:.2} ({})  Expenses: {:.2} ({})  Net: {:.2}",
                summary.total_income,
                summary.income_count,
                summary.total_expenses,
                summary.expense_count,
                summary.net_amount
            );
            if let Some(report) = &outcome.auto_save {
                println!("Auto-saved {} transactions", report.saved_count);
                for err in &report.errors {
                    println!("  record {}: {}", err.index, err.error);
                }
            }
        }

        Command::Preview { descriptions } => {
            if descriptions.is_empty() {
                bail!("pass at least one description");
            }
            let service = build_service(&cfg)?;
            for preview in service.preview_categories(&descriptions) {
                println!("{} -> {}", preview.description, preview.suggested_category);
            }
        }

        Command::Suggest { description, context, user } => {
            let context = parse_context(&cfg, context)?;
            let service = build_service(&cfg)?;
            let diagnosis = service
                .diagnose_category(&user, context, &description, Direction::Expense)
                .await?;
            match diagnosis {
                CategoryDiagnosis::Existing(category) => {
                    println!("Existing category: {} (id {})", category.name, category.id);
                }
                CategoryDiagnosis::New(recipe) => {
                    println!(
                        "New category suggestion: {} {} (color {})",
                        recipe.emoji, recipe.name, recipe.color
                    );
                }
            }
        }

        Command::Seed { user } => {
            let service = build_service(&cfg)?;
            let created = service.seed_defaults(&user).await?;
            println!("Created {created} starter categories");
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}
