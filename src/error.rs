use sea_orm::DbErr;
use thiserror::Error;

/// Every store or filesystem failure is converted to one of these at the
/// boundary of a single catalog operation; raw `DbErr` values never leave
/// the crate.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("no product with id {0} was found")]
    NotFound(i32),
    #[error("product id {0} is already taken")]
    DuplicateKey(i32),
    #[error("referenced {entity} with id {id} does not exist")]
    ConstraintViolation { entity: &'static str, id: i32 },
    #[error("product {0} is present in an order and cannot be deleted")]
    Blocked(i32),
    #[error("not a usable image: {0}")]
    InvalidImage(String),
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(e) => CatalogError::StoreUnavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => CatalogError::StoreUnavailable(e.to_string()),
            other => CatalogError::StoreUnavailable(other.to_string()),
        }
    }
}
