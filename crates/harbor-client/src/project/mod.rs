//! Projects.
//!
//! Updates and deletes are guarded: the supplied [`Project`] is re-fetched
//! by name and must carry the ID stored on the server, otherwise the call
//! fails with [`ProjectError::Mismatch`] before anything is changed.

mod errors;

use harbor_core::{Project, ProjectReq, ProjectSummary};
use reqwest::Method;

pub use errors::{handle_project_errors, ProjectError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const CREATE_PROJECT: Operation = Operation::new("createProject", &[201], &[400, 401, 409, 500]);
const HEAD_PROJECT: Operation = Operation::new("headProject", &[200], &[404, 500]);
const GET_PROJECT: Operation = Operation::new("getProject", &[200], &[401, 403, 404, 500]);
const LIST_PROJECTS: Operation = Operation::new("listProjects", &[200], &[401, 500]);
const UPDATE_PROJECT: Operation =
    Operation::new("updateProject", &[200], &[400, 401, 403, 404, 500]);
const DELETE_PROJECT: Operation =
    Operation::new("deleteProject", &[200], &[400, 403, 404, 412, 500]);
const GET_PROJECT_SUMMARY: Operation =
    Operation::new("getProjectSummary", &[200], &[400, 401, 403, 404, 500]);

/// Client for the project endpoints.
#[derive(Debug, Clone)]
pub struct ProjectClient {
    ctx: ClientContext,
}

impl ProjectClient {
    /// Creates a project client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Creates a project and returns it as stored by Harbor.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotProvided`] for an empty name, or the
    /// error of the create or the follow-up fetch.
    pub async fn new_project(&self, req: &ProjectReq) -> Result<Project, ProjectError> {
        if req.project_name.is_empty() {
            return Err(ProjectError::NotProvided);
        }

        let request = self
            .ctx
            .request(CREATE_PROJECT, Method::POST, "/projects")
            .json(req)?;
        self.ctx.send(request, handle_project_errors).await?;
        tracing::debug!(project = %req.project_name, "Created project");

        self.get_project(&req.project_name).await
    }

    /// Fetches a project by name or by numeric ID.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownResource`] if it does not exist.
    pub async fn get_project(&self, name_or_id: &str) -> Result<Project, ProjectError> {
        if name_or_id.is_empty() {
            return Err(ProjectError::NotProvided);
        }

        let request = self
            .ctx
            .project_request(GET_PROJECT, Method::GET, name_or_id, "");
        self.ctx.fetch(request, handle_project_errors).await
    }

    /// Lists all projects, optionally filtered by a name fragment.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_projects(&self, name: Option<&str>) -> Result<Vec<Project>, ProjectError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx
                .paged(ctx.request(LIST_PROJECTS, Method::GET, "/projects"), page, None)
                .query_opt("name", name);
            ctx.fetch_page(request, handle_project_errors)
        })
        .await
    }

    /// Returns true if a project with this name exists.
    ///
    /// # Errors
    ///
    /// Returns any failure other than "not found".
    pub async fn project_exists(&self, name: &str) -> Result<bool, ProjectError> {
        if name.is_empty() {
            return Err(ProjectError::NotProvided);
        }

        let request = self
            .ctx
            .request(HEAD_PROJECT, Method::HEAD, "/projects")
            .query("project_name", name);
        match self.ctx.send(request, handle_project_errors).await {
            Ok(_) => Ok(true),
            Err(ProjectError::UnknownResource) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Updates a project's settings and, if given, its storage limit.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Mismatch`] if `project` does not match the
    /// project stored under its name.
    pub async fn update_project(
        &self,
        project: &Project,
        storage_limit: Option<i64>,
    ) -> Result<(), ProjectError> {
        let id = self.guard(project).await?;

        let req = ProjectReq {
            project_name: project.name.clone(),
            public: None,
            metadata: project.metadata.clone(),
            storage_limit,
            registry_id: project.registry_id,
        };
        let request = self
            .ctx
            .project_request(UPDATE_PROJECT, Method::PUT, &id.to_string(), "")
            .json(&req)?;
        self.ctx.send(request, handle_project_errors).await?;
        Ok(())
    }

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Mismatch`] if `project` does not match the
    /// stored project, or [`ProjectError::HasDependents`] if it still holds
    /// repositories.
    pub async fn delete_project(&self, project: &Project) -> Result<(), ProjectError> {
        let id = self.guard(project).await?;

        let request = self
            .ctx
            .project_request(DELETE_PROJECT, Method::DELETE, &id.to_string(), "");
        self.ctx.send(request, handle_project_errors).await?;
        tracing::debug!(project = %project.name, id, "Deleted project");
        Ok(())
    }

    /// Fetches the summary of a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownResource`] if it does not exist.
    pub async fn get_project_summary(
        &self,
        name_or_id: &str,
    ) -> Result<ProjectSummary, ProjectError> {
        if name_or_id.is_empty() {
            return Err(ProjectError::NotProvided);
        }

        let request =
            self.ctx
                .project_request(GET_PROJECT_SUMMARY, Method::GET, name_or_id, "/summary");
        self.ctx.fetch(request, handle_project_errors).await
    }

    /// Resolves the stored ID of a caller-supplied project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Mismatch`] if no project has this name or the
    /// stored project has a different ID.
    pub async fn guard(&self, project: &Project) -> Result<i64, ProjectError> {
        if project.name.is_empty() {
            return Err(ProjectError::NotProvided);
        }

        let mismatch = || ProjectError::Mismatch {
            name: project.name.clone(),
            id: project.project_id,
        };

        let request =
            self.ctx
                .project_request_by_name(GET_PROJECT, Method::GET, &project.name, "");
        let stored: Project = match self.ctx.fetch(request, handle_project_errors).await {
            Ok(stored) => stored,
            Err(ProjectError::UnknownResource | ProjectError::IdNotExists) => {
                return Err(mismatch())
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(
            project = %project.name,
            supplied = project.project_id,
            stored = stored.project_id,
            "Resolved project"
        );

        if stored.project_id == project.project_id {
            Ok(stored.project_id)
        } else {
            Err(mismatch())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::mock_context;
    use crate::transport::{ApiResponse, RESOURCE_NAME_HEADER};

    fn project(name: &str, id: i64) -> Project {
        Project {
            project_id: id,
            name: name.to_string(),
            ..Project::default()
        }
    }

    #[tokio::test]
    async fn test_new_project_creates_then_fetches() {
        let (transport, ctx) = mock_context();
        transport
            .respond(
                "createProject",
                ApiResponse::new(201).with_header("Location", "/api/v2.0/projects/5"),
            )
            .respond_json(
                "getProject",
                200,
                json!({ "project_id": 5, "name": "example-project" }),
            );

        let created = ProjectClient::new(ctx)
            .new_project(&ProjectReq::new("example-project"))
            .await
            .unwrap();

        assert_eq!(created.project_id, 5);
        assert_eq!(transport.operations(), vec!["createProject", "getProject"]);
        let calls = transport.calls();
        assert_eq!(calls[0].body.as_ref().unwrap()["project_name"], "example-project");
        assert_eq!(calls[1].path, "/projects/example-project");
    }

    #[tokio::test]
    async fn test_new_project_name_conflict() {
        let (transport, ctx) = mock_context();
        transport.respond("createProject", ApiResponse::new(409));

        let err = ProjectClient::new(ctx)
            .new_project(&ProjectReq::new("example-project"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::NameAlreadyExists));
    }

    #[tokio::test]
    async fn test_project_exists() {
        let (transport, ctx) = mock_context();
        transport
            .respond("headProject", ApiResponse::new(200))
            .respond("headProject", ApiResponse::new(404));
        let client = ProjectClient::new(ctx);

        assert!(client.project_exists("library").await.unwrap());
        assert!(!client.project_exists("missing").await.unwrap());
        assert_eq!(transport.calls()[1].query_value("project_name"), Some("missing"));
    }

    #[tokio::test]
    async fn test_delete_project_uses_stored_id() {
        let (transport, ctx) = mock_context();
        transport
            .respond_json("getProject", 200, json!({ "project_id": 5, "name": "example-project" }))
            .respond("deleteProject", ApiResponse::new(200));

        ProjectClient::new(ctx)
            .delete_project(&project("example-project", 5))
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(transport.operations(), vec!["getProject", "deleteProject"]);
        assert_eq!(calls[1].path, "/projects/5");
    }

    #[tokio::test]
    async fn test_delete_project_with_repositories() {
        let (transport, ctx) = mock_context();
        transport
            .respond_json("getProject", 200, json!({ "project_id": 5, "name": "example-project" }))
            .respond("deleteProject", ApiResponse::new(412));

        let err = ProjectClient::new(ctx)
            .delete_project(&project("example-project", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::HasDependents));
    }

    #[tokio::test]
    async fn test_guard_missing_project_is_mismatch() {
        let (transport, ctx) = mock_context();
        transport.respond("getProject", ApiResponse::new(404));

        let err = ProjectClient::new(ctx)
            .update_project(&project("ghost", 3), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::Mismatch { id: 3, .. }));
        assert_eq!(transport.operations(), vec!["getProject"]);
    }

    #[tokio::test]
    async fn test_guard_looks_up_digit_names_by_name() {
        let (transport, ctx) = mock_context();
        transport
            .respond_json("getProject", 200, json!({ "project_id": 5, "name": "2024" }))
            .respond("deleteProject", ApiResponse::new(200));

        ProjectClient::new(ctx)
            .delete_project(&project("2024", 5))
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].path, "/projects/2024");
        assert_eq!(calls[0].header(RESOURCE_NAME_HEADER), Some("true"));
        assert_eq!(calls[1].path, "/projects/5");
        assert_eq!(calls[1].header(RESOURCE_NAME_HEADER), Some("false"));
    }

    #[tokio::test]
    async fn test_update_project_sends_storage_limit() {
        let (transport, ctx) = mock_context();
        transport
            .respond_json("getProject", 200, json!({ "project_id": 5, "name": "example-project" }))
            .respond("updateProject", ApiResponse::new(201));

        ProjectClient::new(ctx)
            .update_project(&project("example-project", 5), Some(1024))
            .await
            .unwrap();

        let body = transport.calls()[1].body.clone().unwrap();
        assert_eq!(body["storage_limit"], 1024);
    }

    #[tokio::test]
    async fn test_empty_name_never_reaches_transport() {
        let (transport, ctx) = mock_context();
        let client = ProjectClient::new(ctx);

        assert!(matches!(
            client.delete_project(&Project::default()).await,
            Err(ProjectError::NotProvided)
        ));
        assert!(matches!(
            client.new_project(&ProjectReq::default()).await,
            Err(ProjectError::NotProvided)
        ));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_projects_filters_by_name() {
        let (transport, ctx) = mock_context();
        transport.respond(
            "listProjects",
            ApiResponse::json_body(200, &json!([{ "project_id": 1, "name": "library" }]))
                .with_total_count(1),
        );

        let projects = ProjectClient::new(ctx).list_projects(Some("lib")).await.unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(transport.calls()[0].query_value("name"), Some("lib"));
    }

    #[tokio::test]
    async fn test_get_project_summary() {
        let (transport, ctx) = mock_context();
        transport.respond_json("getProjectSummary", 200, json!({ "repo_count": 4 }));

        let summary = ProjectClient::new(ctx)
            .get_project_summary("library")
            .await
            .unwrap();
        assert_eq!(summary.repo_count, 4);
        assert_eq!(transport.calls()[0].path, "/projects/library/summary");
    }
}
