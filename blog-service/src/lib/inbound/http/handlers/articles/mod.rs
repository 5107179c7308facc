pub mod create_article;
pub mod delete_article;
pub mod get_article;
pub mod list_articles;
pub mod update_article;

pub use create_article::create_article;
pub use delete_article::delete_article;
pub use get_article::get_article;
pub use list_articles::list_articles;
pub use list_articles::list_user_articles;
pub use update_article::update_article;
