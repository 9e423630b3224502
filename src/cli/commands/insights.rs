use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::config::{initialize_app_state, AppConfig, ProviderArgs};
use crate::helpers::demand::{build_demand_response, normalize_destination};

/// Runs the market-demand pipeline once and prints the response JSON to stdout.
pub async fn print_insights(providers: &ProviderArgs, destination: &str) -> Result<()> {
    let Some(destination) = normalize_destination(Some(destination)) else {
        bail!("Destination city code is required.");
    };

    let config = AppConfig::try_from(providers)?;
    let state = initialize_app_state(&config)?;
    debug!("Computing insights for {}", destination);

    let response = build_demand_response(&state, &destination).await?;
    info!(
        "Found {} popular routes for {}",
        response.insights.popular_routes.len(),
        destination
    );

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
