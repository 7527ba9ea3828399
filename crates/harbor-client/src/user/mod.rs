//! Users.

mod errors;

use harbor_core::{
    PasswordReq, User, UserCreationReq, UserProfile, UserSearchResult, UserSysAdminFlag,
};
use reqwest::Method;

pub use errors::{handle_user_errors, UserError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const CREATE_USER: Operation =
    Operation::new("createUser", &[201], &[400, 401, 403, 409, 415, 500]);
const GET_USER: Operation = Operation::new("getUser", &[200], &[401, 403, 404, 500]);
const SEARCH_USERS: Operation = Operation::new("searchUsers", &[200], &[401, 500]);
const LIST_USERS: Operation = Operation::new("listUsers", &[200], &[401, 403, 500]);
const UPDATE_USER_PROFILE: Operation =
    Operation::new("updateUserProfile", &[200], &[400, 401, 403, 404, 500]);
const UPDATE_USER_PASSWORD: Operation =
    Operation::new("updateUserPassword", &[200], &[400, 401, 403, 404, 500]);
const SET_USER_SYS_ADMIN: Operation =
    Operation::new("setUserSysAdmin", &[200], &[401, 403, 404, 500]);
const DELETE_USER: Operation = Operation::new("deleteUser", &[200], &[401, 403, 404, 500]);

/// Client for the user endpoints.
#[derive(Debug, Clone)]
pub struct UserClient {
    ctx: ClientContext,
}

impl UserClient {
    /// Creates a user client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Creates a user and returns it as stored by Harbor.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::AlreadyExists`] if the name or email is taken.
    pub async fn new_user(&self, req: &UserCreationReq) -> Result<User, UserError> {
        if req.username.is_empty() {
            return Err(UserError::NotProvided);
        }

        let request = self
            .ctx
            .request(CREATE_USER, Method::POST, "/users")
            .json(req)?;
        self.ctx.send(request, handle_user_errors).await?;

        self.get_user_by_name(&req.username).await
    }

    /// Fetches a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if it does not exist.
    pub async fn get_user_by_id(&self, id: i64) -> Result<User, UserError> {
        let path = user_path(id, "")?;
        let request = self.ctx.request(GET_USER, Method::GET, path);
        self.ctx.fetch(request, handle_user_errors).await
    }

    /// Fetches the user with exactly this name.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::UserNotFound`] if the search yields no exact
    /// match.
    pub async fn get_user_by_name(&self, username: &str) -> Result<User, UserError> {
        if username.is_empty() {
            return Err(UserError::NotProvided);
        }

        let request = self
            .ctx
            .request(SEARCH_USERS, Method::GET, "/users/search")
            .query("username", username)
            .query("page_size", self.ctx.options().page_size);
        let hits: Vec<UserSearchResult> = self.ctx.fetch(request, handle_user_errors).await?;

        let hit = hits
            .into_iter()
            .find(|hit| hit.username == username)
            .ok_or_else(|| UserError::UserNotFound {
                name: username.to_string(),
            })?;
        self.get_user_by_id(hit.user_id).await
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(ctx.request(LIST_USERS, Method::GET, "/users"), page, None);
            ctx.fetch_page(request, handle_user_errors)
        })
        .await
    }

    /// Returns true if a user with exactly this name exists.
    ///
    /// # Errors
    ///
    /// Returns any failure other than "not found".
    pub async fn user_exists(&self, username: &str) -> Result<bool, UserError> {
        match self.get_user_by_name(username).await {
            Ok(_) => Ok(true),
            Err(UserError::UserNotFound { .. } | UserError::NotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Updates email, real name and comment of a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::IdNotExists`] if the user does not exist.
    pub async fn update_user_profile(
        &self,
        id: i64,
        profile: &UserProfile,
    ) -> Result<(), UserError> {
        let request = self
            .ctx
            .request(UPDATE_USER_PROFILE, Method::PUT, user_path(id, "")?)
            .json(profile)?;
        self.ctx.send(request, handle_user_errors).await?;
        Ok(())
    }

    /// Changes a user's password.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::IllegalFormat`] if the old password is wrong or
    /// the new one is too weak.
    pub async fn update_user_password(&self, id: i64, req: &PasswordReq) -> Result<(), UserError> {
        let request = self
            .ctx
            .request(UPDATE_USER_PASSWORD, Method::PUT, user_path(id, "/password")?)
            .json(req)?;
        self.ctx.send(request, handle_user_errors).await?;
        Ok(())
    }

    /// Grants or revokes system admin rights.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::IdNotExists`] if the user does not exist.
    pub async fn set_user_sysadmin(&self, id: i64, sysadmin: bool) -> Result<(), UserError> {
        let request = self
            .ctx
            .request(SET_USER_SYS_ADMIN, Method::PUT, user_path(id, "/sysadmin")?)
            .json(&UserSysAdminFlag {
                sysadmin_flag: sysadmin,
            })?;
        self.ctx.send(request, handle_user_errors).await?;
        Ok(())
    }

    /// Deletes a user after checking it matches the user stored under its
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Mismatch`] if no user has this name or the
    /// stored user has a different ID.
    pub async fn delete_user(&self, user: &User) -> Result<(), UserError> {
        if user.username.is_empty() {
            return Err(UserError::NotProvided);
        }

        let mismatch = || UserError::Mismatch {
            username: user.username.clone(),
            id: user.user_id,
        };
        let stored = match self.get_user_by_name(&user.username).await {
            Ok(stored) => stored,
            Err(UserError::UserNotFound { .. } | UserError::NotFound) => return Err(mismatch()),
            Err(err) => return Err(err),
        };
        if stored.user_id != user.user_id {
            return Err(mismatch());
        }

        let request = self
            .ctx
            .request(DELETE_USER, Method::DELETE, user_path(stored.user_id, "")?);
        self.ctx.send(request, handle_user_errors).await?;
        tracing::debug!(user = %user.username, id = stored.user_id, "Deleted user");
        Ok(())
    }
}

fn user_path(id: i64, suffix: &str) -> Result<String, UserError> {
    if id <= 0 {
        return Err(UserError::NotProvided);
    }
    Ok(format!("/users/{id}{suffix}"))
}
