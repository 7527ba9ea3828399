//! Project-level (v1) robot accounts.

mod errors;

use harbor_core::{Robot, RobotCreateV1, RobotCreated};
use reqwest::Method;

pub use errors::{handle_robot_errors, RobotError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::{ApiRequest, Operation};

const LIST_ROBOTS: Operation = Operation::new("listRobotV1", &[200], &[400, 404, 500]);
const CREATE_ROBOT: Operation =
    Operation::new("createRobotV1", &[201], &[400, 401, 403, 404, 500]);
const GET_ROBOT: Operation = Operation::new("getRobotByIDV1", &[200], &[401, 403, 404, 500]);
const UPDATE_ROBOT: Operation =
    Operation::new("updateRobotV1", &[200], &[400, 401, 403, 404, 409, 500]);
const DELETE_ROBOT: Operation =
    Operation::new("deleteRobotV1", &[200], &[400, 401, 403, 404, 500]);

/// Client for the project robot account endpoints.
#[derive(Debug, Clone)]
pub struct RobotClient {
    ctx: ClientContext,
}

impl RobotClient {
    /// Creates a robot account client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Lists every robot account of a project.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_project_robots(&self, project: &str) -> Result<Vec<Robot>, RobotError> {
        self.robots_request(LIST_ROBOTS, Method::GET, project, None)?;

        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.project_request(LIST_ROBOTS, Method::GET, project, "/robots"),
                page,
                None,
            );
            ctx.fetch_page(request, handle_robot_errors)
        })
        .await
    }

    /// Creates a robot account and returns it with its one-time secret.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::NotProvided`] if the robot has no name.
    pub async fn add_project_robot(
        &self,
        project: &str,
        robot: &RobotCreateV1,
    ) -> Result<RobotCreated, RobotError> {
        if robot.name.is_empty() {
            return Err(RobotError::NotProvided);
        }
        let request = self
            .robots_request(CREATE_ROBOT, Method::POST, project, None)?
            .json(robot)?;
        let created: RobotCreated = self.ctx.fetch(request, handle_robot_errors).await?;
        tracing::debug!(project, robot = %created.name, "Created robot account");
        Ok(created)
    }

    /// Fetches a robot account by ID.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::NotFound`] if it does not exist.
    pub async fn get_project_robot(&self, project: &str, id: i64) -> Result<Robot, RobotError> {
        let request = self.robots_request(GET_ROBOT, Method::GET, project, Some(id))?;
        self.ctx.fetch(request, handle_robot_errors).await
    }

    /// Replaces a robot account, identified by its ID.
    ///
    /// Only the description and the disabled flag are honoured by Harbor.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::IdNotExists`] if the robot does not exist.
    pub async fn update_project_robot(
        &self,
        project: &str,
        robot: &Robot,
    ) -> Result<(), RobotError> {
        let request = self
            .robots_request(UPDATE_ROBOT, Method::PUT, project, Some(robot.id))?
            .json(robot)?;
        self.ctx.send(request, handle_robot_errors).await?;
        Ok(())
    }

    /// Deletes a robot account.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::IdNotExists`] if the robot does not exist.
    pub async fn delete_project_robot(&self, project: &str, id: i64) -> Result<(), RobotError> {
        let request = self.robots_request(DELETE_ROBOT, Method::DELETE, project, Some(id))?;
        self.ctx.send(request, handle_robot_errors).await?;
        Ok(())
    }

    fn robots_request(
        &self,
        operation: Operation,
        method: Method,
        project: &str,
        id: Option<i64>,
    ) -> Result<ApiRequest, RobotError> {
        if project.is_empty() {
            return Err(RobotError::ProjectNotProvided);
        }
        let suffix = match id {
            Some(id) if id <= 0 => return Err(RobotError::NotProvided),
            Some(id) => format!("/robots/{id}"),
            None => "/robots".to_string(),
        };
        Ok(self.ctx.project_request(operation, method, project, &suffix))
    }
}

#[cfg(test)]
mod tests {
    use harbor_core::RobotAccess;
    use serde_json::json;

    use super::*;
    use crate::testing::mock_context;
    use crate::transport::{ApiResponse, RESOURCE_NAME_HEADER};

    #[tokio::test]
    async fn test_add_project_robot_returns_secret() {
        let (transport, ctx) = mock_context();
        transport.respond_json(
            "createRobotV1",
            201,
            json!({ "id": 4, "name": "robot$example-project+ci", "secret": "s3cr3t" }),
        );

        let robot = RobotCreateV1 {
            name: "ci".to_string(),
            access: vec![RobotAccess::repository(5, "push")],
            ..RobotCreateV1::default()
        };
        let created = RobotClient::new(ctx)
            .add_project_robot("example-project", &robot)
            .await
            .unwrap();

        assert_eq!(created.id, 4);
        assert_eq!(created.secret, "s3cr3t");
        let call = &transport.calls()[0];
        assert_eq!(call.path, "/projects/example-project/robots");
        assert_eq!(call.body.as_ref().unwrap()["access"][0]["action"], "push");
    }

    #[tokio::test]
    async fn test_robots_by_project_id_are_not_names() {
        let (transport, ctx) = mock_context();
        transport.respond_json("getRobotByIDV1", 200, json!({ "id": 4, "project_id": 5 }));

        let robot = RobotClient::new(ctx).get_project_robot("5", 4).await.unwrap();

        assert_eq!(robot.project_id, 5);
        let calls = transport.calls();
        assert_eq!(calls[0].path, "/projects/5/robots/4");
        assert_eq!(calls[0].header(RESOURCE_NAME_HEADER), Some("false"));
    }

    #[tokio::test]
    async fn test_update_unknown_robot() {
        let (transport, ctx) = mock_context();
        transport.respond("updateRobotV1", ApiResponse::new(404));

        let robot = Robot {
            id: 4,
            disable: true,
            ..Robot::default()
        };
        let err = RobotClient::new(ctx)
            .update_project_robot("example-project", &robot)
            .await
            .unwrap_err();
        assert!(matches!(err, RobotError::IdNotExists));
    }

    #[tokio::test]
    async fn test_preconditions() {
        let (transport, ctx) = mock_context();
        let client = RobotClient::new(ctx);

        assert!(matches!(
            client.add_project_robot("example-project", &RobotCreateV1::default()).await,
            Err(RobotError::NotProvided)
        ));
        assert!(matches!(
            client.delete_project_robot("", 4).await,
            Err(RobotError::ProjectNotProvided)
        ));
        assert!(matches!(
            client.delete_project_robot("example-project", 0).await,
            Err(RobotError::NotProvided)
        ));
        assert_eq!(transport.call_count(), 0);
    }
}
