//! Project members.
//!
//! Harbor identifies a membership only by its member ID, which it never
//! hands out by name. Every operation on a specific member therefore lists
//! the project's members first and picks the one matching the
//! [`MemberRef`].

mod errors;

use harbor_core::{EntityType, MemberRef, Project, ProjectMemberEntity, RoleRequest};
use reqwest::Method;

pub use errors::{handle_member_errors, MemberError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::project::{ProjectClient, ProjectError};
use crate::transport::Operation;

const LIST_PROJECT_MEMBERS: Operation =
    Operation::new("listProjectMembers", &[200], &[400, 401, 403, 404, 500]);
const CREATE_PROJECT_MEMBER: Operation =
    Operation::new("createProjectMember", &[201], &[400, 401, 403, 409, 500]);
const UPDATE_PROJECT_MEMBER: Operation =
    Operation::new("updateProjectMember", &[200], &[400, 401, 403, 404, 500]);
const DELETE_PROJECT_MEMBER: Operation =
    Operation::new("deleteProjectMember", &[200], &[400, 401, 403, 404, 500]);

/// Client for the project member endpoints.
#[derive(Debug, Clone)]
pub struct MemberClient {
    ctx: ClientContext,
    projects: ProjectClient,
}

impl MemberClient {
    /// Creates a member client.
    #[must_use]
    pub fn new(ctx: ClientContext) -> Self {
        Self {
            projects: ProjectClient::new(ctx.clone()),
            ctx,
        }
    }

    /// Lists the members of a project, optionally filtered by entity name.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_project_members(
        &self,
        project: &str,
        entity_name: Option<&str>,
    ) -> Result<Vec<ProjectMemberEntity>, MemberError> {
        if project.is_empty() {
            return Err(ProjectError::NotProvided.into());
        }

        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx
                .paged(
                    ctx.project_request(LIST_PROJECT_MEMBERS, Method::GET, project, "/members"),
                    page,
                    None,
                )
                .query_opt("entityname", entity_name);
            ctx.fetch_page(request, handle_member_errors)
        })
        .await
    }

    /// Resolves the member ID of a user or group in a project.
    ///
    /// The first listed membership with matching type and name wins.
    ///
    /// # Errors
    ///
    /// Returns [`MemberError::UserIsNoMember`] or
    /// [`MemberError::NoMemberFound`] if nothing matches.
    pub async fn resolve_member_id(
        &self,
        project: &str,
        member: &MemberRef,
    ) -> Result<i64, MemberError> {
        if member.name.is_empty() {
            return Err(MemberError::NotProvided);
        }

        let members = self
            .list_project_members(project, Some(&member.name))
            .await?;
        let id = members
            .iter()
            .find(|entity| member.matches(entity))
            .map(|entity| entity.id)
            .ok_or_else(|| not_a_member(member))?;

        tracing::debug!(project, member = %member.name, id, "Resolved member");
        Ok(id)
    }

    /// Grants a user or group a role in a project.
    ///
    /// # Errors
    ///
    /// Returns [`MemberError::AlreadyExists`] if the entity already is a
    /// member, or a [`ProjectError::Mismatch`] if `project` does not match
    /// the stored project.
    pub async fn add_project_member(
        &self,
        project: &Project,
        member: &MemberRef,
        role_id: i64,
    ) -> Result<(), MemberError> {
        if member.name.is_empty() {
            return Err(MemberError::NotProvided);
        }
        let project_id = self.projects.guard(project).await?.to_string();

        match self.resolve_member_id(&project_id, member).await {
            Ok(_) => return Err(MemberError::AlreadyExists),
            Err(MemberError::UserIsNoMember { .. } | MemberError::NoMemberFound { .. }) => {}
            Err(err) => return Err(err),
        }

        let request = self
            .ctx
            .project_request(CREATE_PROJECT_MEMBER, Method::POST, &project_id, "/members")
            .json(&member.to_request(role_id))?;
        self.ctx.send(request, handle_member_errors).await?;
        tracing::debug!(project = %project.name, member = %member.name, role_id, "Added member");
        Ok(())
    }

    /// Changes the role of a member.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not match or the entity is not
    /// a member.
    pub async fn update_project_member_role(
        &self,
        project: &Project,
        member: &MemberRef,
        role_id: i64,
    ) -> Result<(), MemberError> {
        let (project_id, member_id) = self.locate(project, member).await?;

        let request = self
            .ctx
            .project_request(
                UPDATE_PROJECT_MEMBER,
                Method::PUT,
                &project_id,
                &format!("/members/{member_id}"),
            )
            .json(&RoleRequest { role_id })?;
        self.ctx.send(request, handle_member_errors).await?;
        Ok(())
    }

    /// Removes a member from a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not match or the entity is not
    /// a member.
    pub async fn delete_project_member(
        &self,
        project: &Project,
        member: &MemberRef,
    ) -> Result<(), MemberError> {
        let (project_id, member_id) = self.locate(project, member).await?;

        let request = self.ctx.project_request(
            DELETE_PROJECT_MEMBER,
            Method::DELETE,
            &project_id,
            &format!("/members/{member_id}"),
        );
        self.ctx.send(request, handle_member_errors).await?;
        tracing::debug!(project = %project.name, member = %member.name, "Removed member");
        Ok(())
    }

    /// Guards the project and resolves the member, returning both IDs.
    async fn locate(
        &self,
        project: &Project,
        member: &MemberRef,
    ) -> Result<(String, i64), MemberError> {
        if member.name.is_empty() {
            return Err(MemberError::NotProvided);
        }
        let project_id = self.projects.guard(project).await?.to_string();
        let member_id = self.resolve_member_id(&project_id, member).await?;
        Ok((project_id, member_id))
    }
}

fn not_a_member(member: &MemberRef) -> MemberError {
    match member.entity_type {
        EntityType::User => MemberError::UserIsNoMember {
            name: member.name.clone(),
        },
        EntityType::Group => MemberError::NoMemberFound {
            name: member.name.clone(),
        },
    }
}
