use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleCommand;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::NewArticle;
use crate::domain::user::models::UserId;

/// Port for article domain service operations.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// Create an article owned by `owner_id`.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Owner does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_article(
        &self,
        command: ArticleCommand,
        owner_id: UserId,
    ) -> Result<Article, ArticleError>;

    /// Every article, newest first.
    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError>;

    /// Articles owned by one user, newest first.
    async fn list_user_articles(&self, owner_id: UserId) -> Result<Vec<Article>, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn get_article(&self, id: ArticleId) -> Result<Article, ArticleError>;

    /// Overwrite title and content of an article the caller owns.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `Forbidden` - Caller is not the owner
    /// * `DatabaseError` - Database operation failed
    async fn update_article(
        &self,
        id: ArticleId,
        caller_id: UserId,
        command: ArticleCommand,
    ) -> Result<Article, ArticleError>;

    /// Remove an article the caller owns.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `Forbidden` - Caller is not the owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_article(&self, id: ArticleId, caller_id: UserId) -> Result<(), ArticleError>;
}

/// Persistence operations for article aggregate.
///
/// Every returned article carries its author.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// # Errors
    /// * `AuthorNotFound` - Owner id references no user
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleError>;

    /// Ordered by creation time, newest first.
    async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;

    /// Ordered by creation time, newest first.
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Article>, ArticleError>;

    /// Persist title, content and updated_at of an existing article.
    ///
    /// # Errors
    /// * `NotFound` - Article no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, article: Article) -> Result<Article, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: ArticleId) -> Result<(), ArticleError>;
}
