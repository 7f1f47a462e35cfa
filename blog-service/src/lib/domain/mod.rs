pub mod category;
pub mod identity;
pub mod ownership;
pub mod post;
pub mod user;
