pub mod reservation;
pub mod reservation_time;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::DataAccessError;

/// サービス層エラー。呼び出し側(HTTP層)が区別できるよう種別ごとに分ける
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 入力値の検証エラー
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    /// 対象のエンティティが存在しない
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    /// 予約から参照されているため削除できない
    #[error("{entity} with id {id} is still referenced")]
    InUse { entity: &'static str, id: u64 },
    /// 保存済みの参照が壊れている
    #[error("Data integrity violation: {0}")]
    Integrity(String),
    /// 永続化ゲートウェイのエラー
    #[error("Data access error: {0}")]
    DataAccess(DataAccessError),
}

impl From<DataAccessError> for ServiceError {
    fn from(value: DataAccessError) -> Self {
        match value {
            DataAccessError::IntegrityError(reason) => Self::Integrity(reason),
            error => Self::DataAccess(error),
        }
    }
}

/// 予約時刻削除時のガード方式。参照整合性の扱いは設定で選択する
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteGuard {
    /// 存在チェックも参照チェックも行わず、ストレージ層に委ねる
    #[default]
    Unchecked,
    /// 存在しないIDと予約から参照中の時刻の削除を拒否する
    Restrict,
}
