//! Repositories inside a project.
//!
//! Harbor addresses a repository by its name relative to the project, and
//! requires a `/` inside that name to be encoded twice (`%252F`).

mod errors;

use harbor_core::Repository;
use reqwest::Method;

pub use errors::{handle_repository_errors, RepositoryError};

use crate::context::{encode_segment, ClientContext};
use crate::pagination::collect_pages;
use crate::transport::Operation;

const LIST_REPOSITORIES: Operation =
    Operation::new("listRepositories", &[200], &[400, 401, 403, 404, 500]);
const GET_REPOSITORY: Operation =
    Operation::new("getRepository", &[200], &[400, 401, 403, 404, 500]);
const UPDATE_REPOSITORY: Operation =
    Operation::new("updateRepository", &[200], &[400, 401, 403, 404, 500]);
const DELETE_REPOSITORY: Operation =
    Operation::new("deleteRepository", &[200], &[400, 401, 403, 404, 500]);

/// Client for the repository endpoints.
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    ctx: ClientContext,
}

impl RepositoryClient {
    /// Creates a repository client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Lists every repository of a project.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_repositories(
        &self,
        project: &str,
    ) -> Result<Vec<Repository>, RepositoryError> {
        let path = repositories_path(project)?;

        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.request(LIST_REPOSITORIES, Method::GET, path.clone()),
                page,
                None,
            );
            ctx.fetch_page(request, handle_repository_errors)
        })
        .await
    }

    /// Fetches a repository.
    ///
    /// `name` may carry the project prefix as returned in
    /// [`Repository::name`].
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if it does not exist.
    pub async fn get_repository(
        &self,
        project: &str,
        name: &str,
    ) -> Result<Repository, RepositoryError> {
        let request = self
            .ctx
            .request(GET_REPOSITORY, Method::GET, repository_path(project, name)?);
        self.ctx.fetch(request, handle_repository_errors).await
    }

    /// Updates a repository; Harbor only honours the description.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if it does not exist.
    pub async fn update_repository(
        &self,
        project: &str,
        repository: &Repository,
    ) -> Result<(), RepositoryError> {
        let request = self
            .ctx
            .request(
                UPDATE_REPOSITORY,
                Method::PUT,
                repository_path(project, &repository.name)?,
            )
            .json(repository)?;
        self.ctx.send(request, handle_repository_errors).await?;
        Ok(())
    }

    /// Deletes a repository with all its artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if it does not exist.
    pub async fn delete_repository(
        &self,
        project: &str,
        name: &str,
    ) -> Result<(), RepositoryError> {
        let request = self.ctx.request(
            DELETE_REPOSITORY,
            Method::DELETE,
            repository_path(project, name)?,
        );
        self.ctx.send(request, handle_repository_errors).await?;
        tracing::debug!(project, repository = name, "Deleted repository");
        Ok(())
    }
}

fn repositories_path(project: &str) -> Result<String, RepositoryError> {
    if project.is_empty() {
        return Err(RepositoryError::ProjectNotProvided);
    }
    Ok(format!("/projects/{}/repositories", encode_segment(project)))
}

fn repository_path(project: &str, name: &str) -> Result<String, RepositoryError> {
    let base = repositories_path(project)?;
    let name = name
        .strip_prefix(project)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name);
    if name.is_empty() {
        return Err(RepositoryError::NotProvided);
    }
    Ok(format!("{base}/{}", encode_segment(&encode_segment(name))))
}
