pub mod login;
pub mod register;
pub mod user_info;

pub use login::login;
pub use register::register;
pub use user_info::user_info;
