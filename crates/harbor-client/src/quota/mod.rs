//! Storage quotas.

mod errors;

use harbor_core::{Quota, QuotaUpdateReq};
use reqwest::Method;
use serde_json::Value;

pub use errors::{handle_quota_errors, QuotaError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const LIST_QUOTAS: Operation = Operation::new("listQuotas", &[200], &[401, 403, 500]);
const GET_QUOTA: Operation = Operation::new("getQuota", &[200], &[401, 403, 404, 500]);
const UPDATE_QUOTA: Operation = Operation::new("updateQuota", &[200], &[400, 401, 403, 404, 500]);

/// Client for the quota endpoints.
#[derive(Debug, Clone)]
pub struct QuotaClient {
    ctx: ClientContext,
}

impl QuotaClient {
    /// Creates a quota client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Lists all quotas, optionally filtered by reference kind and ID.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_quotas(
        &self,
        reference: Option<&str>,
        reference_id: Option<&str>,
    ) -> Result<Vec<Quota>, QuotaError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx
                .paged(ctx.request(LIST_QUOTAS, Method::GET, "/quotas"), page, None)
                .query_opt("reference", reference)
                .query_opt("reference_id", reference_id);
            ctx.fetch_page(request, handle_quota_errors)
        })
        .await
    }

    /// Fetches a quota by ID.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::NotFound`] if it does not exist.
    pub async fn get_quota_by_id(&self, id: i64) -> Result<Quota, QuotaError> {
        let request = self.ctx.request(GET_QUOTA, Method::GET, quota_path(id)?);
        self.ctx.fetch(request, handle_quota_errors).await
    }

    /// Finds the quota whose reference is the given project.
    ///
    /// The listing is filtered by reference ID, but only a quota whose
    /// `ref.id` equals the project ID is returned.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::RefNotFound`] if no listed quota references the
    /// project, even when the listing itself was not empty.
    pub async fn get_quota_by_project_id(&self, project_id: i64) -> Result<Quota, QuotaError> {
        if project_id <= 0 {
            return Err(QuotaError::NotProvided);
        }

        let quotas = self
            .list_quotas(Some("project"), Some(&project_id.to_string()))
            .await?;
        tracing::debug!(project_id, candidates = quotas.len(), "Matching quota references");

        quotas
            .into_iter()
            .find(|quota| references(&quota.reference, project_id))
            .ok_or(QuotaError::RefNotFound { project_id })
    }

    /// Replaces the hard limits of a quota.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::IllegalFormat`] if the limits are rejected.
    pub async fn update_quota(&self, id: i64, req: &QuotaUpdateReq) -> Result<(), QuotaError> {
        let request = self
            .ctx
            .request(UPDATE_QUOTA, Method::PUT, quota_path(id)?)
            .json(req)?;
        self.ctx.send(request, handle_quota_errors).await?;
        Ok(())
    }
}

fn quota_path(id: i64) -> Result<String, QuotaError> {
    if id <= 0 {
        return Err(QuotaError::NotProvided);
    }
    Ok(format!("/quotas/{id}"))
}

/// Returns true if a quota reference is an object whose `id` is the number
/// `project_id`. Integral floats such as `2.0` match; strings never do.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn references(reference: &Value, project_id: i64) -> bool {
    let Some(id) = reference.get("id") else {
        return false;
    };
    if let Some(id) = id.as_i64() {
        return id == project_id;
    }
    // Beyond 2^53 a float no longer identifies one integer.
    id.as_f64().is_some_and(|id| {
        id.fract() == 0.0 && id.abs() < 9_007_199_254_740_992.0 && id as i64 == project_id
    })
}
