use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use loan_sim_core::catalog::ProductCatalog;
use loan_sim_core::simulation::{run_simulation, simulate_with_metadata};
use loan_sim_core::types::{ProductTerms, SimulationInput, SimulationRequest};

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::input;

/// Arguments for a loan simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Catalog id of the product to simulate against
    #[arg(long, conflicts_with_all = ["name", "rate", "max_term"])]
    pub product_id: Option<u32>,

    /// Product name, for an ad-hoc product
    #[arg(long)]
    pub name: Option<String>,

    /// Annual nominal rate in percent (18 = 18% a year)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Product maximum term in months
    #[arg(long)]
    pub max_term: Option<u32>,

    /// Requested loan amount
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<Decimal>,

    /// Requested term in months
    #[arg(long)]
    pub term: Option<u32>,
}

/// A simulation payload either embeds its product or points at the catalog.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SimulatePayload {
    Embedded(SimulationInput),
    ById(SimulationRequest),
}

pub fn run_simulate(args: SimulateArgs, config: &CliConfig) -> Result<Value> {
    let payload = match input::read_payload::<SimulatePayload>(args.input.as_deref())? {
        Some(payload) => payload,
        None => payload_from_flags(args)?,
    };
    execute(payload, config)
}

fn execute(payload: SimulatePayload, config: &CliConfig) -> Result<Value> {
    let output = match payload {
        SimulatePayload::Embedded(input) => run_simulation(&input)?,
        SimulatePayload::ById(request) => {
            let catalog = ProductCatalog::load(&config.catalog_path)?;
            let (product, loan) = catalog.resolve(&request)?;
            debug!(product_id = request.product_id, "product resolved from catalog");
            simulate_with_metadata(&product, &loan)?
        }
    };

    Ok(serde_json::to_value(output)?)
}

fn payload_from_flags(args: SimulateArgs) -> Result<SimulatePayload> {
    let requested_amount = args
        .amount
        .ok_or_else(|| CliError::usage("--amount is required (or provide --input)"))?;
    let term_months = args
        .term
        .ok_or_else(|| CliError::usage("--term is required (or provide --input)"))?;

    if let Some(product_id) = args.product_id {
        return Ok(SimulatePayload::ById(SimulationRequest {
            product_id,
            requested_amount,
            term_months,
        }));
    }

    let name = args
        .name
        .ok_or_else(|| CliError::usage("--product-id or --name/--rate/--max-term is required"))?;
    let rate = args
        .rate
        .ok_or_else(|| CliError::usage("--rate is required with --name"))?;
    let max_term = args
        .max_term
        .ok_or_else(|| CliError::usage("--max-term is required with --name"))?;

    Ok(SimulatePayload::Embedded(SimulationInput {
        product: ProductTerms::new(&name, rate, max_term),
        requested_amount,
        term_months,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flags() -> SimulateArgs {
        SimulateArgs {
            input: None,
            product_id: None,
            name: Some("Emprestimo Camarada".into()),
            rate: Some(dec!(18)),
            max_term: Some(36),
            amount: Some(dec!(10000)),
            term: Some(12),
        }
    }

    #[test]
    fn test_payload_untagged_dispatch() {
        let by_id: SimulatePayload = serde_json::from_str(
            r#"{"product_id": 3, "requested_amount": "500", "term_months": 6}"#,
        )
        .unwrap();
        assert!(matches!(by_id, SimulatePayload::ById(ref r) if r.product_id == 3));

        let embedded: SimulatePayload = serde_json::from_str(
            r#"{"product": {"name": "Credito pessoal", "annual_nominal_rate_percent": 12, "max_term_months": 24},
                "requested_amount": 500, "term_months": 6}"#,
        )
        .unwrap();
        assert!(matches!(embedded, SimulatePayload::Embedded(_)));
    }

    #[test]
    fn test_flags_build_embedded_product() {
        match payload_from_flags(flags()).unwrap() {
            SimulatePayload::Embedded(input) => {
                assert_eq!(input.product.name, "Emprestimo Camarada");
                assert_eq!(input.term_months, 12);
            }
            other => panic!("expected embedded payload, got {other:?}"),
        }
    }

    #[derive(clap::Parser)]
    struct SimulateCmd {
        #[command(flatten)]
        args: SimulateArgs,
    }

    #[test]
    fn test_negative_rate_reaches_validator() {
        use clap::Parser;
        use loan_sim_core::{LoanSimError, ValidationError};

        let cmd = SimulateCmd::try_parse_from([
            "simulate",
            "--name",
            "Emprestimo Camarada",
            "--rate",
            "-1",
            "--max-term",
            "36",
            "--amount",
            "1000",
            "--term",
            "12",
        ])
        .unwrap();
        assert_eq!(cmd.args.rate, Some(dec!(-1)));

        let config = CliConfig::default();
        assert!(matches!(
            execute(payload_from_flags(cmd.args).unwrap(), &config),
            Err(CliError::Core(LoanSimError::Validation(ValidationError::InvalidRate)))
        ));
    }

    #[test]
    fn test_missing_amount_is_usage_error() {
        let mut args = flags();
        args.amount = None;
        assert!(matches!(payload_from_flags(args), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_simulate_by_id_against_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        let mut catalog = ProductCatalog::new();
        catalog
            .create(ProductTerms::new("Emprestimo Camarada", dec!(18), 36))
            .unwrap();
        catalog.save(&catalog_path).unwrap();

        let config = CliConfig {
            catalog_path,
            ..CliConfig::default()
        };
        let mut args = flags();
        args.name = None;
        args.rate = None;
        args.max_term = None;
        args.product_id = Some(1);

        let value = execute(payload_from_flags(args).unwrap(), &config).unwrap();
        assert_eq!(value["result"]["monthly_installment"], "910.46");
        assert_eq!(value["result"]["schedule"].as_array().unwrap().len(), 12);

        let mut missing = flags();
        missing.name = None;
        missing.product_id = Some(2);
        assert!(matches!(
            execute(payload_from_flags(missing).unwrap(), &config),
            Err(CliError::Core(loan_sim_core::LoanSimError::ProductNotFound { id: 2 }))
        ));
    }
}
