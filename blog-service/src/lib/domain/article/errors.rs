use thiserror::Error;

use crate::domain::article::models::ArticleId;
use crate::domain::user::models::UserId;

/// Error type for ArticleId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleIdError {
    #[error("Invalid article ID: {0}")]
    InvalidFormat(String),
}

/// Error type for Title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for Content validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content is empty")]
    Empty,
}

/// Top-level error type for all article-related operations
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("{0}")]
    InvalidArticleId(#[from] ArticleIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] ContentError),

    #[error("Article not found: {0}")]
    NotFound(ArticleId),

    #[error("User {user_id} does not own article {article_id}")]
    Forbidden {
        user_id: UserId,
        article_id: ArticleId,
    },

    #[error("Author not found: {0}")]
    AuthorNotFound(UserId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
