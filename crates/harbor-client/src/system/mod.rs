//! System information, configuration, statistics and health.

mod errors;

use harbor_core::{
    Configurations, ConfigurationsResponse, GeneralInfo, OidcPing, OverallHealthStatus, Statistic,
};
use reqwest::Method;

pub use errors::{handle_system_errors, SystemError};

use crate::context::ClientContext;
use crate::transport::Operation;

const GET_SYSTEM_INFO: Operation = Operation::new("getSystemInfo", &[200], &[500]);
const GET_CONFIGURATIONS: Operation =
    Operation::new("getConfigurations", &[200], &[401, 403, 500]);
const UPDATE_CONFIGURATIONS: Operation =
    Operation::new("updateConfigurations", &[200], &[401, 403, 500]);
const GET_STATISTIC: Operation = Operation::new("getStatistic", &[200], &[401, 500]);
const GET_HEALTH: Operation = Operation::new("getHealth", &[200], &[]);
const GET_PING: Operation = Operation::new("getPing", &[200], &[]);
const PING_OIDC: Operation = Operation::new("pingOIDC", &[200], &[400, 401, 403]);

/// Client for the system endpoints.
#[derive(Debug, Clone)]
pub struct SystemClient {
    ctx: ClientContext,
}

impl SystemClient {
    /// Creates a system client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Fetches general information about the instance.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::InternalErrors`] if Harbor fails to answer.
    pub async fn get_system_info(&self) -> Result<GeneralInfo, SystemError> {
        let request = self.ctx.request(GET_SYSTEM_INFO, Method::GET, "/systeminfo");
        self.ctx.fetch(request, handle_system_errors).await
    }

    /// Fetches the system configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Forbidden`] unless the caller is an admin.
    pub async fn get_configurations(&self) -> Result<ConfigurationsResponse, SystemError> {
        let request = self
            .ctx
            .request(GET_CONFIGURATIONS, Method::GET, "/configurations");
        self.ctx.fetch(request, handle_system_errors).await
    }

    /// Updates the given configuration keys; other keys are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::NotProvided`] for an empty update.
    pub async fn update_configurations(&self, config: &Configurations) -> Result<(), SystemError> {
        if config.is_empty() {
            return Err(SystemError::NotProvided);
        }
        let request = self
            .ctx
            .request(UPDATE_CONFIGURATIONS, Method::PUT, "/configurations")
            .json(config)?;
        self.ctx.send(request, handle_system_errors).await?;
        tracing::debug!(keys = config.len(), "Updated configurations");
        Ok(())
    }

    /// Fetches project and repository counters.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Unauthorized`] without valid credentials.
    pub async fn get_statistic(&self) -> Result<Statistic, SystemError> {
        let request = self.ctx.request(GET_STATISTIC, Method::GET, "/statistics");
        self.ctx.fetch(request, handle_system_errors).await
    }

    /// Fetches the health of the instance and its components.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Transport`] if the instance cannot be reached.
    pub async fn get_health(&self) -> Result<OverallHealthStatus, SystemError> {
        let request = self.ctx.request(GET_HEALTH, Method::GET, "/health");
        self.ctx.fetch(request, handle_system_errors).await
    }

    /// Pings the instance and returns its plain-text answer.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Transport`] if the instance cannot be reached.
    pub async fn ping(&self) -> Result<String, SystemError> {
        let request = self.ctx.request(GET_PING, Method::GET, "/ping");
        let response = self.ctx.send(request, handle_system_errors).await?;
        Ok(String::from_utf8_lossy(&response.body).trim().to_string())
    }

    /// Tests whether an OIDC provider is reachable from Harbor.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::IllegalFormat`] if the endpoint is rejected.
    pub async fn ping_oidc(&self, endpoint: &OidcPing) -> Result<(), SystemError> {
        if endpoint.url.is_empty() {
            return Err(SystemError::NotProvided);
        }
        let request = self
            .ctx
            .request(PING_OIDC, Method::POST, "/system/oidc/ping")
            .json(endpoint)?;
        self.ctx.send(request, handle_system_errors).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::mock_context;
    use crate::transport::ApiResponse;

    #[tokio::test]
    async fn test_ping_returns_text() {
        let (transport, ctx) = mock_context();
        let mut pong = ApiResponse::new(200);
        pong.body = b"Pong\n".to_vec();
        transport.respond("getPing", pong);

        assert_eq!(SystemClient::new(ctx).ping().await.unwrap(), "Pong");
    }

    #[tokio::test]
    async fn test_get_health() {
        let (transport, ctx) = mock_context();
        transport.respond_json(
            "getHealth",
            200,
            json!({
                "status": "unhealthy",
                "components": [{ "name": "redis", "status": "unhealthy" }]
            }),
        );

        let health = SystemClient::new(ctx).get_health().await.unwrap();

        assert!(!health.is_healthy());
        assert_eq!(transport.calls()[0].path, "/health");
    }

    #[tokio::test]
    async fn test_get_configurations() {
        let (transport, ctx) = mock_context();
        transport.respond_json(
            "getConfigurations",
            200,
            json!({ "auth_mode": { "value": "db_auth", "editable": true } }),
        );

        let config = SystemClient::new(ctx).get_configurations().await.unwrap();

        assert_eq!(config["auth_mode"].value, "db_auth");
        assert!(config["auth_mode"].editable);
    }

    #[tokio::test]
    async fn test_update_configurations() {
        let (transport, ctx) = mock_context();
        transport.respond("updateConfigurations", ApiResponse::new(200));
        let client = SystemClient::new(ctx);

        assert!(matches!(
            client.update_configurations(&Configurations::new()).await,
            Err(SystemError::NotProvided)
        ));
        assert_eq!(transport.call_count(), 0);

        let mut config = Configurations::new();
        config.insert("read_only".to_string(), json!(true));
        client.update_configurations(&config).await.unwrap();

        assert_eq!(transport.calls()[0].body, Some(json!({ "read_only": true })));
    }

    #[tokio::test]
    async fn test_undeclared_forbidden_is_normalized() {
        let (transport, ctx) = mock_context();
        transport.respond("getStatistic", ApiResponse::new(403));

        let err = SystemClient::new(ctx).get_statistic().await.unwrap_err();
        assert!(matches!(err, SystemError::Forbidden));
    }
}
