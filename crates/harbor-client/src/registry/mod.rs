//! External registries.

mod errors;

use harbor_core::{Registry, RegistryPing};
use reqwest::Method;

pub use errors::{handle_registry_errors, RegistryError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const CREATE_REGISTRY: Operation =
    Operation::new("createRegistry", &[201], &[400, 401, 403, 409, 500]);
const GET_REGISTRY: Operation = Operation::new("getRegistry", &[200], &[401, 403, 404, 500]);
const LIST_REGISTRIES: Operation = Operation::new("listRegistries", &[200], &[401, 403, 500]);
const UPDATE_REGISTRY: Operation =
    Operation::new("updateRegistry", &[200], &[400, 401, 403, 404, 409, 500]);
const DELETE_REGISTRY: Operation =
    Operation::new("deleteRegistry", &[200], &[401, 403, 404, 412, 500]);
const PING_REGISTRY: Operation =
    Operation::new("pingRegistry", &[200], &[400, 401, 403, 404, 500]);

/// Client for the registry endpoints.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    ctx: ClientContext,
}

impl RegistryClient {
    /// Creates a registry client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Creates a registry and returns it as stored by Harbor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NameAlreadyExists`] if the name is taken.
    pub async fn new_registry(&self, registry: &Registry) -> Result<Registry, RegistryError> {
        if registry.name.is_empty() {
            return Err(RegistryError::NotProvided);
        }

        let request = self
            .ctx
            .request(CREATE_REGISTRY, Method::POST, "/registries")
            .json(registry)?;
        self.ctx.send(request, handle_registry_errors).await?;

        self.get_registry_by_name(&registry.name).await
    }

    /// Fetches a registry by ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if it does not exist.
    pub async fn get_registry_by_id(&self, id: i64) -> Result<Registry, RegistryError> {
        if id <= 0 {
            return Err(RegistryError::NotProvided);
        }

        let request = self
            .ctx
            .request(GET_REGISTRY, Method::GET, format!("/registries/{id}"));
        self.ctx.fetch(request, handle_registry_errors).await
    }

    /// Fetches the single registry with this name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if none matches and
    /// [`RegistryError::MultipleResults`] if several do.
    pub async fn get_registry_by_name(&self, name: &str) -> Result<Registry, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::NotProvided);
        }

        let mut found = self.list(Some(&format!("name={name}"))).await?;
        match found.len() {
            0 => Err(RegistryError::NotFound),
            1 => Ok(found.remove(0)),
            count => Err(RegistryError::MultipleResults {
                name: name.to_string(),
                count,
            }),
        }
    }

    /// Lists all registries.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_registries(&self) -> Result<Vec<Registry>, RegistryError> {
        self.list(None).await
    }

    /// Updates a registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Mismatch`] if `registry` does not match the
    /// registry stored under its name.
    pub async fn update_registry(&self, registry: &Registry) -> Result<(), RegistryError> {
        let id = self.guard(registry).await?;

        let request = self
            .ctx
            .request(UPDATE_REGISTRY, Method::PUT, format!("/registries/{id}"))
            .json(registry)?;
        self.ctx.send(request, handle_registry_errors).await?;
        Ok(())
    }

    /// Deletes a registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Mismatch`] if `registry` does not match the
    /// stored registry, or [`RegistryError::InUse`] if policies use it.
    pub async fn delete_registry(&self, registry: &Registry) -> Result<(), RegistryError> {
        let id = self.guard(registry).await?;

        let request = self
            .ctx
            .request(DELETE_REGISTRY, Method::DELETE, format!("/registries/{id}"));
        self.ctx.send(request, handle_registry_errors).await?;
        tracing::debug!(registry = %registry.name, id, "Deleted registry");
        Ok(())
    }

    /// Checks that Harbor can reach a registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::IllegalIdFormat`] if Harbor cannot reach it
    /// with the given settings.
    pub async fn ping_registry(&self, ping: &RegistryPing) -> Result<(), RegistryError> {
        let request = self
            .ctx
            .request(PING_REGISTRY, Method::POST, "/registries/ping")
            .json(ping)?;
        self.ctx.send(request, handle_registry_errors).await?;
        Ok(())
    }

    /// Resolves the stored ID of a caller-supplied registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Mismatch`] if the name resolves to nothing
    /// or to a registry with a different ID.
    pub async fn guard(&self, registry: &Registry) -> Result<i64, RegistryError> {
        if registry.name.is_empty() {
            return Err(RegistryError::NotProvided);
        }

        let mismatch = || RegistryError::Mismatch {
            name: registry.name.clone(),
            id: registry.id,
        };
        let stored = match self.get_registry_by_name(&registry.name).await {
            Ok(stored) => stored,
            Err(RegistryError::NotFound) => return Err(mismatch()),
            Err(err) => return Err(err),
        };

        tracing::debug!(registry = %registry.name, stored = stored.id, "Resolved registry");
        if stored.id == registry.id {
            Ok(stored.id)
        } else {
            Err(mismatch())
        }
    }

    async fn list(&self, query: Option<&str>) -> Result<Vec<Registry>, RegistryError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.request(LIST_REGISTRIES, Method::GET, "/registries"),
                page,
                query,
            );
            ctx.fetch_page(request, handle_registry_errors)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::mock_context;
    use crate::transport::ApiResponse;

    fn listed(entries: serde_json::Value) -> ApiResponse {
        let total = entries.as_array().map_or(0, Vec::len);
        ApiResponse::json_body(200, &entries).with_total_count(i64::try_from(total).unwrap())
    }

    fn registry(name: &str, id: i64) -> Registry {
        Registry {
            id,
            name: name.to_string(),
            ..Registry::default()
        }
    }

    #[tokio::test]
    async fn test_get_registry_by_name() {
        let (transport, ctx) = mock_context();
        transport.respond("listRegistries", listed(json!([{ "id": 2, "name": "hub" }])));

        let found = RegistryClient::new(ctx).get_registry_by_name("hub").await.unwrap();

        assert_eq!(found.id, 2);
        assert_eq!(transport.calls()[0].query_value("q"), Some("name=hub"));
    }

    #[tokio::test]
    async fn test_get_registry_by_name_ambiguous() {
        let (transport, ctx) = mock_context();
        transport.respond(
            "listRegistries",
            listed(json!([{ "id": 2, "name": "hub" }, { "id": 3, "name": "hub" }])),
        );

        let err = RegistryClient::new(ctx)
            .get_registry_by_name("hub")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::MultipleResults { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_delete_registry_mismatch() {
        let (transport, ctx) = mock_context();
        transport.respond("listRegistries", listed(json!([{ "id": 2, "name": "hub" }])));

        let err = RegistryClient::new(ctx)
            .delete_registry(&registry("hub", 100))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::Mismatch { id: 100, .. }));
        assert_eq!(transport.operations(), vec!["listRegistries"]);
    }

    #[tokio::test]
    async fn test_update_unknown_registry_is_mismatch() {
        let (transport, ctx) = mock_context();
        transport.respond("listRegistries", listed(json!([])));

        let err = RegistryClient::new(ctx)
            .update_registry(&registry("gone", 4))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Mismatch { .. }));
    }

    #[tokio::test]
    async fn test_delete_registry_in_use() {
        let (transport, ctx) = mock_context();
        transport
            .respond("listRegistries", listed(json!([{ "id": 2, "name": "hub" }])))
            .respond("deleteRegistry", ApiResponse::new(412));

        let err = RegistryClient::new(ctx)
            .delete_registry(&registry("hub", 2))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::InUse));
        assert_eq!(transport.calls()[1].path, "/registries/2");
    }

    #[tokio::test]
    async fn test_ping_stored_registry() {
        let (transport, ctx) = mock_context();
        transport.respond("pingRegistry", ApiResponse::new(200));

        RegistryClient::new(ctx)
            .ping_registry(&RegistryPing::stored(2))
            .await
            .unwrap();
        assert_eq!(transport.calls()[0].body, Some(json!({ "id": 2 })));
    }
}
