//! Handle `slc affect classify`.

use serde::Serialize;
use solace_affect::remote::FunctionOverride;
use solace_affect::{AffectReading, Trend, classify, remote, trend};

use crate::cli::GlobalFlags;
use crate::cli::commands::{AffectClassifyArgs, AffectCommands};
use crate::output;

#[derive(Serialize)]
struct AffectResponse {
    reading: AffectReading,
    trend: Option<Trend>,
    remote_attempted: bool,
}

pub async fn handle(
    command: &AffectCommands,
    config: &solace_config::SolaceConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let AffectCommands::Classify(args) = command;

    let (reading, remote_attempted) = classify_message(args, config).await?;

    let trend = args
        .history
        .as_deref()
        .map(parse_history)
        .transpose()?
        .map(|mut history| {
            history.push(reading.intensity);
            trend(&history)
        });

    output::output(
        &AffectResponse {
            reading,
            trend,
            remote_attempted,
        },
        flags.format,
    )
}

async fn classify_message(
    args: &AffectClassifyArgs,
    config: &solace_config::SolaceConfig,
) -> anyhow::Result<(AffectReading, bool)> {
    if !args.remote {
        return Ok((classify(&args.text), false));
    }
    anyhow::ensure!(
        config.functions.is_configured(),
        "--remote requires functions.base_url and functions.service_key to be configured"
    );

    let client = FunctionOverride::new(
        config.functions.endpoint("affect-classify"),
        config.functions.service_key.clone(),
        std::time::Duration::from_secs(config.functions.timeout_secs),
    )?;
    Ok((remote::classify_with_override(&args.text, &client).await, true))
}

/// Parse `4,5,7` into intensity history.
fn parse_history(raw: &str) -> anyhow::Result<Vec<u8>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .map_err(|_| anyhow::anyhow!("invalid history value '{part}' (expected 1-10)"))
        })
        .collect()
}
