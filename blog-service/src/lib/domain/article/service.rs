use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleCommand;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::NewArticle;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for article operations.
pub struct ArticleService<AR>
where
    AR: ArticleRepository,
{
    repository: Arc<AR>,
}

impl<AR> ArticleService<AR>
where
    AR: ArticleRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }

    async fn load_owned(&self, id: ArticleId, caller_id: UserId) -> Result<Article, ArticleError> {
        let article = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id))?;

        if let Err(e) = article.ensure_owned_by(caller_id) {
            tracing::warn!(article_id = %id, user_id = %caller_id, owner_id = %article.owner_id, "ownership check failed");
            return Err(e);
        }

        Ok(article)
    }
}

#[async_trait]
impl<AR> ArticleServicePort for ArticleService<AR>
where
    AR: ArticleRepository,
{
    async fn create_article(
        &self,
        command: ArticleCommand,
        owner_id: UserId,
    ) -> Result<Article, ArticleError> {
        let article = NewArticle {
            title: command.title,
            content: command.content,
            owner_id,
            created_at: Utc::now(),
        };

        let created = self.repository.create(article).await?;
        tracing::info!(article_id = %created.id, user_id = %owner_id, "article created");

        Ok(created)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError> {
        self.repository.list_all().await
    }

    async fn list_user_articles(&self, owner_id: UserId) -> Result<Vec<Article>, ArticleError> {
        self.repository.list_by_owner(owner_id).await
    }

    async fn get_article(&self, id: ArticleId) -> Result<Article, ArticleError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id))
    }

    async fn update_article(
        &self,
        id: ArticleId,
        caller_id: UserId,
        command: ArticleCommand,
    ) -> Result<Article, ArticleError> {
        let mut article = self.load_owned(id, caller_id).await?;

        article.title = command.title;
        article.content = command.content;
        article.updated_at = Utc::now();

        let updated = self.repository.update(article).await?;
        tracing::info!(article_id = %id, user_id = %caller_id, "article updated");

        Ok(updated)
    }

    async fn delete_article(&self, id: ArticleId, caller_id: UserId) -> Result<(), ArticleError> {
        self.load_owned(id, caller_id).await?;

        self.repository.delete(id).await?;
        tracing::info!(article_id = %id, user_id = %caller_id, "article deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::article::models::Author;
    use crate::domain::article::models::Content;
    use crate::domain::article::models::Title;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    mock! {
        pub TestArticleRepository {}

        #[async_trait]
        impl ArticleRepository for TestArticleRepository {
            async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;
            async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleError>;
            async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;
            async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Article>, ArticleError>;
            async fn update(&self, article: Article) -> Result<Article, ArticleError>;
            async fn delete(&self, id: ArticleId) -> Result<(), ArticleError>;
        }
    }

    fn author(id: i64) -> Author {
        Author {
            id: UserId(id),
            username: Username::new(format!("user{}", id)).unwrap(),
            email: EmailAddress::new(format!("user{}@example.com", id)).unwrap(),
        }
    }

    fn article(id: i64, owner: i64) -> Article {
        let created_at = Utc::now() - Duration::hours(1);
        Article {
            id: ArticleId(id),
            title: Title::new("Original".to_string()).unwrap(),
            content: Content::new("Original body".to_string()).unwrap(),
            owner_id: UserId(owner),
            author: author(owner),
            created_at,
            updated_at: created_at,
        }
    }

    fn command(title: &str, content: &str) -> ArticleCommand {
        ArticleCommand::new(
            Title::new(title.to_string()).unwrap(),
            Content::new(content.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_article_uses_caller_as_owner() {
        let mut repository = MockTestArticleRepository::new();

        repository
            .expect_create()
            .withf(|a| a.owner_id == UserId(4) && a.title.as_str() == "T" && a.content.as_str() == "C")
            .times(1)
            .returning(|a| {
                Ok(Article {
                    id: ArticleId(1),
                    title: a.title,
                    content: a.content,
                    owner_id: a.owner_id,
                    author: author(a.owner_id.value()),
                    created_at: a.created_at,
                    updated_at: a.created_at,
                })
            });

        let service = ArticleService::new(Arc::new(repository));

        let created = service
            .create_article(command("T", "C"), UserId(4))
            .await
            .unwrap();

        assert_eq!(created.id, ArticleId(1));
        assert_eq!(created.owner_id, UserId(4));
        assert_eq!(created.author.username.as_str(), "user4");
    }

    #[tokio::test]
    async fn test_create_article_unknown_owner() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|a| Err(ArticleError::AuthorNotFound(a.owner_id)));

        let service = ArticleService::new(Arc::new(repository));

        let result = service.create_article(command("T", "C"), UserId(77)).await;
        assert!(matches!(result, Err(ArticleError::AuthorNotFound(UserId(77)))));
    }

    #[tokio::test]
    async fn test_list_articles_keeps_repository_order() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![article(3, 2), article(2, 1), article(1, 2)]));

        let service = ArticleService::new(Arc::new(repository));

        let ids: Vec<i64> = service
            .list_articles()
            .await
            .unwrap()
            .iter()
            .map(|a| a.id.value())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_list_user_articles() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_list_by_owner()
            .with(eq(UserId(2)))
            .times(1)
            .returning(|_| Ok(vec![article(3, 2), article(1, 2)]));

        let service = ArticleService::new(Arc::new(repository));

        let articles = service.list_user_articles(UserId(2)).await.unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| a.owner_id == UserId(2)));
    }

    #[tokio::test]
    async fn test_get_article_not_found() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ArticleService::new(Arc::new(repository));

        let result = service.get_article(ArticleId(5)).await;
        assert!(matches!(result, Err(ArticleError::NotFound(ArticleId(5)))));
    }

    #[tokio::test]
    async fn test_update_article_by_owner() {
        let mut repository = MockTestArticleRepository::new();
        let existing = article(8, 1);
        let original_updated_at = existing.updated_at;

        repository
            .expect_find_by_id()
            .with(eq(ArticleId(8)))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(move |a| {
                a.title.as_str() == "New title"
                    && a.content.as_str() == "New body"
                    && a.updated_at > original_updated_at
            })
            .times(1)
            .returning(|a| Ok(a));

        let service = ArticleService::new(Arc::new(repository));

        let updated = service
            .update_article(ArticleId(8), UserId(1), command("New title", "New body"))
            .await
            .unwrap();

        assert_eq!(updated.title.as_str(), "New title");
        assert_eq!(updated.author.id, UserId(1));
    }

    #[tokio::test]
    async fn test_update_article_by_other_user_is_forbidden() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article(8, 1))));
        repository.expect_update().times(0);

        let service = ArticleService::new(Arc::new(repository));

        let result = service
            .update_article(ArticleId(8), UserId(2), command("Hijack", "Hijack"))
            .await;
        assert!(matches!(result, Err(ArticleError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_article() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = ArticleService::new(Arc::new(repository));

        let result = service
            .update_article(ArticleId(8), UserId(1), command("T", "C"))
            .await;
        assert!(matches!(result, Err(ArticleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_article_by_owner() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article(8, 1))));
        repository
            .expect_delete()
            .with(eq(ArticleId(8)))
            .times(1)
            .returning(|_| Ok(()));

        let service = ArticleService::new(Arc::new(repository));

        assert!(service.delete_article(ArticleId(8), UserId(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_article_by_other_user_is_forbidden() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article(8, 1))));
        repository.expect_delete().times(0);

        let service = ArticleService::new(Arc::new(repository));

        let result = service.delete_article(ArticleId(8), UserId(2)).await;
        assert!(matches!(result, Err(ArticleError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_article() {
        let mut repository = MockTestArticleRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = ArticleService::new(Arc::new(repository));

        let result = service.delete_article(ArticleId(8), UserId(1)).await;
        assert!(matches!(result, Err(ArticleError::NotFound(_))));
    }
}
