//! Analu BOM Calculator
//!
//! Command-line front end for the furniture bill-of-materials calculator.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use analu_bom::calculator;
use analu_bom::catalog::CatalogStore;
use analu_bom::import;
use analu_bom::seed;
use analu_bom::validation;

#[derive(Parser)]
#[command(name = "analu-bom")]
#[command(about = "Bill-of-materials calculator for furniture production")]
struct Cli {
    /// Directory of .bom recipe files (defaults to the built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the materials needed to produce a model
    Calc {
        /// Model ID (see list-models)
        model: String,

        /// Number of units to produce
        quantity: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all product models
    ListModels,

    /// Show the recipe of a specific model
    Model {
        /// Model ID
        id: String,
    },

    /// Import a directory of recipe files and report what was found
    Import {
        /// Directory containing .bom files
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { model, quantity, json } => {
            let store = load_catalog(cli.catalog.as_deref())?;

            let request = match validation::validate_production_request(Some(&model), &quantity) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("{}", e);
                    return Ok(());
                }
            };

            let Some(result) = calculator::resolve_and_calculate(&store.snapshot(), &request) else {
                eprintln!("No model with ID '{}'. Run 'list-models' to see the catalog.", request.model_id);
                return Ok(());
            };

            if json {
                let text = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
                println!("{}", text);
            } else {
                println!("{}", result);
            }
        }

        Commands::ListModels => {
            let store = load_catalog(cli.catalog.as_deref())?;
            if store.list_models().is_empty() {
                println!("No models in catalog.");
            } else {
                println!("{:<10} {:<30} {:<24} {:>9}", "ID", "Model", "Dimensions", "Materials");
                println!("{}", "-".repeat(76));
                for m in store.list_models() {
                    println!(
                        "{:<10} {:<30} {:<24} {:>9}",
                        m.id,
                        m.name,
                        m.dimensions,
                        m.materials.len()
                    );
                }
            }
        }

        Commands::Model { id } => {
            let store = load_catalog(cli.catalog.as_deref())?;
            if let Some(m) = store.get_model_by_id(&id) {
                println!("Model: {}", m.name);
                println!("  ID: {}", m.id);
                println!("  Dimensions: {}", m.dimensions);
                if !m.materials.is_empty() {
                    println!("  Materials (per unit):");
                    for mat in &m.materials {
                        let dims = mat.dimensions.as_deref().map(|d| format!(" [{}]", d)).unwrap_or_default();
                        println!(
                            "    {} {} {}{}",
                            calculator::format_quantity(mat.consumption_per_unit),
                            mat.unit,
                            mat.name,
                            dims
                        );
                    }
                }
            } else {
                println!("Model '{}' not found", id);
            }
        }

        Commands::Import { dir } => {
            let (_, stats) = import::import_catalog_dir(&dir)
                .with_context(|| format!("Failed to import {}", dir.display()))?;
            println!("{}", stats);
        }
    }

    Ok(())
}

fn load_catalog(dir: Option<&Path>) -> Result<CatalogStore> {
    match dir {
        Some(dir) => {
            let (store, stats) = import::import_catalog_dir(dir)
                .with_context(|| format!("Failed to load catalog from {}", dir.display()))?;
            tracing::info!("{}", stats);
            Ok(store)
        }
        None => seed::seed_catalog().context("Failed to build the built-in catalog"),
    }
}
