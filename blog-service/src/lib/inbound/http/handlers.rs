use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Local;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleCommand;
use crate::domain::article::models::Content;
use crate::domain::article::models::Title;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod articles;
pub mod users;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Render a timestamp in server local time.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// JSON body extractor whose rejections use the response envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, message, data)))
    }

    /// 200 with the generic "success" message.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, "success", data)
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Carries the internal cause; only logged, never sent to the client.
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(ApiResponseBody::new(status, &message, ()))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::EmptyPassword
            | UserError::UsernameAlreadyExists(_)
            | UserError::EmailAlreadyExists(_)
            | UserError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::Password(_) | UserError::Token(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::InvalidArticleId(_)
            | ArticleError::InvalidTitle(_)
            | ArticleError::InvalidContent(_) => ApiError::BadRequest(err.to_string()),
            ArticleError::NotFound(_) | ArticleError::AuthorNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ArticleError::Forbidden { .. } => {
                ApiError::Forbidden("You can only modify your own articles".to_string())
            }
            ArticleError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Uniform `{code, message, data}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    code: u16,
    message: String,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, message: &str, data: T) -> Self {
        Self {
            code: status_code.as_u16(),
            message: message.to_string(),
            data,
        }
    }
}

/// HTTP request body shared by article create and update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleRequest {
    title: String,
    content: String,
}

impl ArticleRequest {
    pub fn try_into_command(self) -> Result<ArticleCommand, ArticleError> {
        let title = Title::new(self.title)?;
        let content = Content::new(self.content)?;
        Ok(ArticleCommand::new(title, content))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: format_timestamp(&user.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorData {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleData {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub author: AuthorData,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Article> for ArticleData {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.value(),
            title: article.title.as_str().to_string(),
            content: article.content.as_str().to_string(),
            user_id: article.owner_id.value(),
            author: AuthorData {
                id: article.author.id.value(),
                username: article.author.username.as_str().to_string(),
                email: article.author.email.as_str().to_string(),
            },
            created_at: format_timestamp(&article.created_at),
            updated_at: format_timestamp(&article.updated_at),
        }
    }
}
