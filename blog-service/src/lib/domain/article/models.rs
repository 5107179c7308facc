use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::errors::ArticleIdError;
use crate::domain::article::errors::ContentError;
use crate::domain::article::errors::TitleError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Article unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(pub i64);

impl ArticleId {
    /// Parse an article ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a non-negative integer
    pub fn from_string(s: &str) -> Result<Self, ArticleIdError> {
        match s.parse::<i64>() {
            Ok(id) if id >= 0 => Ok(ArticleId(id)),
            Ok(id) => Err(ArticleIdError::InvalidFormat(format!(
                "{} is a negative id",
                id
            ))),
            Err(e) => Err(ArticleIdError::InvalidFormat(format!("{}: {}", s, e))),
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public fields of the owning user, attached to every article read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
}

/// Article aggregate.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: Title,
    pub content: Content,
    pub owner_id: UserId,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Assert that `caller` owns this article.
    ///
    /// Every mutation path goes through this check; the caller id must come
    /// from a verified token, never from request input.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not the stored owner
    pub fn ensure_owned_by(&self, caller: UserId) -> Result<(), ArticleError> {
        if self.owner_id == caller {
            Ok(())
        } else {
            Err(ArticleError::Forbidden {
                user_id: caller,
                article_id: self.id,
            })
        }
    }
}

/// Article data before the store has assigned an identifier.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: Title,
    pub content: Content,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Article title value object.
///
/// Non-blank and at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - Title exceeds 255 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(TitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Article body, free text that must not be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(String);

impl Content {
    pub fn new(content: String) -> Result<Self, ContentError> {
        if content.trim().is_empty() {
            Err(ContentError::Empty)
        } else {
            Ok(Self(content))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated title and content, used for both create and update.
#[derive(Debug, Clone)]
pub struct ArticleCommand {
    pub title: Title,
    pub content: Content,
}

impl ArticleCommand {
    pub fn new(title: Title, content: Content) -> Self {
        Self { title, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_owned_by(owner: i64) -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId(10),
            title: Title::new("T".to_string()).unwrap(),
            content: Content::new("C".to_string()).unwrap(),
            owner_id: UserId(owner),
            author: Author {
                id: UserId(owner),
                username: Username::new("bob".to_string()).unwrap(),
                email: EmailAddress::new("bob@x.com".to_string()).unwrap(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_ensure_owned_by() {
        let article = article_owned_by(1);

        assert!(article.ensure_owned_by(UserId(1)).is_ok());

        match article.ensure_owned_by(UserId(2)) {
            Err(ArticleError::Forbidden {
                user_id,
                article_id,
            }) => {
                assert_eq!(user_id, UserId(2));
                assert_eq!(article_id, ArticleId(10));
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_title_validation() {
        assert!(Title::new("Hello".to_string()).is_ok());
        assert_eq!(Title::new(String::new()), Err(TitleError::Empty));
        assert_eq!(Title::new("   ".to_string()), Err(TitleError::Empty));
        assert_eq!(
            Title::new("x".repeat(256)),
            Err(TitleError::TooLong {
                max: 255,
                actual: 256
            })
        );
        assert!(Title::new("x".repeat(255)).is_ok());
    }

    #[test]
    fn test_content_validation() {
        assert!(Content::new("body".to_string()).is_ok());
        assert_eq!(Content::new("\n\t ".to_string()), Err(ContentError::Empty));
    }

    #[test]
    fn test_article_id_from_string() {
        assert_eq!(ArticleId::from_string("7"), Ok(ArticleId(7)));
        assert_eq!(ArticleId::from_string("0"), Ok(ArticleId(0)));
        assert!(ArticleId::from_string("-1").is_err());
        assert!(ArticleId::from_string("seven").is_err());
        assert!(ArticleId::from_string("1.5").is_err());
    }
}
