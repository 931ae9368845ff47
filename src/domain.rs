pub mod reservation;
pub mod reservation_time;

use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Debug, Display},
    ops::Deref,
};
use thiserror::Error;

/// エンティティID
pub trait Id:
    Copy
    + Eq
    + Deref<Target = Self::Inner>
    + From<Self::Inner>
    + Display
    + Debug
    + Serialize
    + for<'de> Deserialize<'de>
{
    type Inner;
}

/// 永続化対象のエンティティ
pub trait Entity: Debug + Clone {
    type Id: Id;

    const ENTITY_NAME: &'static str;

    /// 採番前(永続化前)の場合は`None`
    fn id(&self) -> Option<Self::Id>;
}

/// 永続化ゲートウェイのエラー
#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Database connection error: {0}")]
    ConnectionError(Box<dyn Error + Send + Sync>),
    #[error("Database query error: {0}")]
    QueryError(Box<dyn Error + Send + Sync>),
    #[error("Data integrity error: {0}")]
    IntegrityError(String),
}
