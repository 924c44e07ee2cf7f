//! Users API handlers.
//!
//! ```text
//! POST   /users {"username":"alice","email":"a@x.com"}
//! GET    /users
//! GET    /users/{id}
//! GET    /users/email/{email}
//! PUT    /users/{id} {"username":"alice","email":"a@x.com"}
//! DELETE /users/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_user_validation_error, parse_user_id};

/// Confirmation message returned by `DELETE /users/{id}`.
pub const DELETED_MESSAGE: &str = "deleted successfully";

/// Request body for creating or overwriting a user.
///
/// Example JSON:
/// `{"username":"alice","email":"a@x.com"}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = UserValidationError;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::try_from_strings(value.username, value.email)
    }
}

/// Body returned by `DELETE /users/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "deleted successfully")]
    pub message: String,
}

#[derive(Deserialize)]
struct UserPath {
    id: String,
}

#[derive(Deserialize)]
struct EmailPath {
    email: String,
}

/// List every stored user ordered by identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Create a user and return it with its assigned identifier.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "Path of the created user"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{}", user.id())))
        .json(user))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner().id)?;
    let user = state.users.find_user(id).await?;
    Ok(web::Json(user))
}

/// Fetch one user by email address.
#[utoipa::path(
    get,
    path = "/users/email/{email}",
    params(("email" = String, Path, description = "Registered email address")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users/email/{email}")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    path: web::Path<EmailPath>,
) -> ApiResult<web::Json<User>> {
    let EmailPath { email } = path.into_inner();
    let user = state.users.find_user_by_email(&email).await?;
    Ok(web::Json(user))
}

/// Overwrite a user and echo the accepted body.
///
/// An identifier with no stored user is not an error: nothing is written and
/// the body is still echoed.
#[utoipa::path(
    put,
    path = "/users/{id}",
    request_body = UserRequest,
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Accepted body", body = UserRequest),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserRequest>> {
    let id = parse_user_id(&path.into_inner().id)?;
    let request = payload.into_inner();
    let draft = UserDraft::try_from(request.clone()).map_err(map_user_validation_error)?;
    // A missing row is not an error; the service logs the no-op.
    state.users_command.update_user(id, draft).await?;
    Ok(web::Json(request))
}

/// Remove a user.
///
/// Deleting an identifier with no stored user also answers 200.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User removed", body = DeleteResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = parse_user_id(&path.into_inner().id)?;
    state.users_command.delete_user(id).await?;
    Ok(web::Json(DeleteResponse {
        message: DELETED_MESSAGE.to_owned(),
    }))
}

#[cfg(test)]
mod tests;
