//! Health and ping commands.

use anyhow::{Context, Result};
use harbor_client::api::SystemApi;
use harbor_client::HarborClient;
use tracing::warn;

use super::print_json;

/// Prints the health of the instance; fails if any component is unhealthy.
pub async fn health(client: &HarborClient) -> Result<()> {
    let health = client
        .get_health()
        .await
        .context("Failed to get health")?;
    print_json(&health)?;

    for component in health.unhealthy_components() {
        warn!(component = %component.name, error = ?component.error, "Unhealthy component");
    }
    if !health.is_healthy() {
        anyhow::bail!("Harbor reports status {}", health.status);
    }
    Ok(())
}

/// Pings the instance.
pub async fn ping(client: &HarborClient) -> Result<()> {
    let pong = client.ping().await.context("Failed to ping")?;
    println!("{pong}");
    Ok(())
}
