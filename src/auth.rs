use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use thiserror::Error;
use tracing::info;

use crate::entities::user::{self, Entity as UserEntity, Role};

/// What the presentation gets back from a successful login: enough to greet
/// the user and decide which operations its window exposes.
#[derive(Clone, Debug)]
pub struct UserIdentity {
    pub id: i32,
    pub role: Role,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
}

impl UserIdentity {
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.middle_name)
            .trim_end()
            .to_string()
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    // One message for a wrong login and a wrong password.
    #[error("invalid login or password")]
    InvalidCredentials,
    #[error("store unavailable: {0}")]
    Store(String),
}

/// The single credential check. Anything past this point (sessions, tokens,
/// expiry) is someone else's problem.
pub async fn authenticate(
    db: &DatabaseConnection,
    login: &str,
    password: &str,
) -> Result<UserIdentity, AuthError> {
    let user = UserEntity::find()
        .filter(user::Column::Login.eq(login))
        .one(db)
        .await
        .map_err(|err| AuthError::Store(err.to_string()))?
        .ok_or(AuthError::InvalidCredentials)?;

    user.check_hash(password)
        .map_err(|_| AuthError::InvalidCredentials)?;

    info!(login, role = %user.role.to_string(), "user authenticated");

    Ok(UserIdentity {
        id: user.id,
        role: user.role,
        last_name: user.last_name,
        first_name: user.first_name,
        middle_name: user.middle_name,
    })
}
