use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_sim_core::catalog::ProductCatalog;
use loan_sim_core::types::ProductTerms;

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::input;

/// Arguments for product catalog management
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// List every product in the catalog
    List,
    /// Show one product
    Show {
        /// Product id
        id: u32,
    },
    /// Add a product to the catalog
    Create(ProductBody),
    /// Replace an existing product
    Update {
        /// Product id
        id: u32,
        #[command(flatten)]
        body: ProductBody,
    },
    /// Remove a product from the catalog
    Delete {
        /// Product id
        id: u32,
    },
}

/// Product definition, from a JSON file or flags
#[derive(Args)]
pub struct ProductBody {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Product name (5 to 50 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// Annual nominal rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Maximum term in months
    #[arg(long)]
    pub max_term: Option<u32>,
}

impl ProductBody {
    fn into_terms(self) -> Result<ProductTerms> {
        if let Some(product) = input::read_payload::<ProductTerms>(self.input.as_deref())? {
            return Ok(product);
        }
        self.terms_from_flags()
    }

    fn terms_from_flags(self) -> Result<ProductTerms> {
        let name = self
            .name
            .ok_or_else(|| CliError::usage("--name is required (or provide --input)"))?;
        let rate = self
            .rate
            .ok_or_else(|| CliError::usage("--rate is required (or provide --input)"))?;
        let max_term = self
            .max_term
            .ok_or_else(|| CliError::usage("--max-term is required (or provide --input)"))?;
        Ok(ProductTerms::new(&name, rate, max_term))
    }
}

pub fn run_product(args: ProductArgs, config: &CliConfig) -> Result<Value> {
    let path = &config.catalog_path;
    let mut catalog = ProductCatalog::load(path)?;

    match args.command {
        ProductCommand::List => Ok(serde_json::to_value(catalog.list())?),
        ProductCommand::Show { id } => Ok(serde_json::to_value(catalog.get(id)?)?),
        ProductCommand::Create(body) => {
            let terms = body.into_terms()?;
            let value = serde_json::to_value(catalog.create(terms)?)?;
            catalog.save(path)?;
            Ok(value)
        }
        ProductCommand::Update { id, body } => {
            let terms = body.into_terms()?;
            let value = serde_json::to_value(catalog.update(id, terms)?)?;
            catalog.save(path)?;
            Ok(value)
        }
        ProductCommand::Delete { id } => {
            let removed = catalog.remove(id)?;
            catalog.save(path)?;
            Ok(json!({ "deleted": removed }))
        }
    }
}
