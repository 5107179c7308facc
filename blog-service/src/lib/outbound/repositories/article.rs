use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::Author;
use crate::domain::article::models::Content;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::Title;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Articles joined with the public columns of their owner.
const SELECT_ARTICLE: &str = r#"
    SELECT a.id, a.title, a.content, a.user_id, a.created_at, a.updated_at,
           u.username AS author_username, u.email AS author_email
    FROM articles a
    INNER JOIN users u ON u.id = a.user_id
"#;

const NEWEST_FIRST: &str = "ORDER BY a.created_at DESC, a.id DESC";

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_username: String,
    author_email: String,
}

impl TryFrom<ArticleRow> for Article {
    type Error = ArticleError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.author_username)
            .map_err(|e| ArticleError::DatabaseError(format!("stored author: {}", e)))?;
        let email = EmailAddress::new(row.author_email)
            .map_err(|e| ArticleError::DatabaseError(format!("stored author: {}", e)))?;

        Ok(Article {
            id: ArticleId(row.id),
            title: Title::new(row.title)?,
            content: Content::new(row.content)?,
            owner_id: UserId(row.user_id),
            author: Author {
                id: UserId(row.user_id),
                username,
                email,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_articles(rows: Vec<ArticleRow>) -> Result<Vec<Article>, ArticleError> {
    rows.into_iter().map(Article::try_from).collect()
}

pub struct SqliteArticleRepository {
    pool: SqlitePool,
}

impl SqliteArticleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let result = sqlx::query(
            r#"
            INSERT INTO articles (title, content, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.title.as_str())
        .bind(article.content.as_str())
        .bind(article.owner_id.value())
        .bind(article.created_at)
        .bind(article.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ArticleError::AuthorNotFound(article.owner_id);
                }
            }
            ArticleError::DatabaseError(e.to_string())
        })?;

        let id = ArticleId(result.last_insert_rowid());
        self.find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id))
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleError> {
        let query = format!("{} WHERE a.id = ?", SELECT_ARTICLE);

        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
            .map(Article::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        let query = format!("{} {}", SELECT_ARTICLE, NEWEST_FIRST);

        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        into_articles(rows)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Article>, ArticleError> {
        let query = format!("{} WHERE a.user_id = ? {}", SELECT_ARTICLE, NEWEST_FIRST);

        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(owner_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        into_articles(rows)
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = ?, content = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(article.title.as_str())
        .bind(article.content.as_str())
        .bind(article.updated_at)
        .bind(article.id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ArticleError::NotFound(article.id));
        }

        Ok(article)
    }

    async fn delete(&self, id: ArticleId) -> Result<(), ArticleError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ArticleError::NotFound(id));
        }

        Ok(())
    }
}
