pub mod article;
pub mod user;

pub use article::SqliteArticleRepository;
pub use user::SqliteUserRepository;
