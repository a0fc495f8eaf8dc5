//! CollabSplit terminal front-end.

mod args;
mod config;

use anyhow::Context;
use clap::Parser;
use collabsplit_app::{parse_split_record, SplitController};
use collabsplit_builder::SplitForm;
use collabsplit_gateway::{HttpLedgerClient, LedgerClient, LedgerGateway};
use collabsplit_types::BASIS_POINTS_TOTAL;
use collabsplit_utils::LogFormat;
use serde_json::{json, Value};

use crate::args::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::resolve(&cli)?;

    let format: LogFormat = config.log_format.parse()?;
    collabsplit_utils::init_logging(format, &config.log_level)
        .context("failed to initialise logging")?;

    let deployment = config.deployment()?;
    tracing::info!(
        rpc_url = %config.rpc_url,
        package = deployment.package_id(),
        "using split contract"
    );

    let client = HttpLedgerClient::from_config(&config)?;
    let gateway = LedgerGateway::new(client, deployment).with_gas_budget(config.gas_budget);
    let controller = SplitController::new(gateway);

    let work = run(&controller, cli.command);
    tokio::pin!(work);
    let output = tokio::select! {
        output = &mut work => output?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, cancelling in-flight requests");
            controller.tracker().cancel_all();
            work.await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run<C: LedgerClient>(
    controller: &SplitController<C>,
    command: Command,
) -> anyhow::Result<Value> {
    let output = match command {
        Command::Create { signer, members } => {
            let mut form = SplitForm::from_members(members);
            controller.submit_form(&mut form, &signer).await?.into_inner()
        }
        Command::Deposit {
            signer,
            split,
            amount,
        } => {
            tracing::info!(split = %split, %amount, "depositing");
            controller.deposit(&split, amount, &signer).await?.into_inner()
        }
        Command::Distribute { signer, split } => {
            tracing::info!(split = %split, "distributing");
            controller.distribute(&split, &signer).await?.into_inner()
        }
        Command::Show { split } => {
            let object = controller.fetch_split_data(&split).await?;
            let record = match parse_split_record(&split, &object) {
                Ok(record) => {
                    if record.total_basis_points() != Some(BASIS_POINTS_TOTAL) {
                        tracing::warn!(split = %split, "recorded shares do not sum to 100%");
                    }
                    serde_json::to_value(record)?
                }
                Err(err) => {
                    tracing::warn!(error = %err, "split object could not be parsed");
                    Value::Null
                }
            };
            json!({ "object": object.into_inner(), "record": record })
        }
    };
    Ok(output)
}
