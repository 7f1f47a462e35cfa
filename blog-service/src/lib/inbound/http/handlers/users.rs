pub mod info;
pub mod login;
pub mod register;

pub use info::info;
pub use login::login;
pub use register::register;

use serde::Serialize;
use utoipa::ToSchema;

use super::UserData;
use crate::domain::user::models::Session;

/// Body returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SessionResponseData {
    pub user: UserData,
    pub token: String,
}

impl From<&Session> for SessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}
