use std::{fmt, str::FromStr};

use async_trait::async_trait;
use chrono::NaiveTime;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::domain::{DataAccessError, Entity, Id};

/// 予約時刻リポジトリ
#[async_trait]
pub trait ReservationTimeRepository: Send + Sync {
    /// すべての予約時刻を登録順で取得する
    async fn find_all(&self) -> Result<Vec<ReservationTime>, DataAccessError>;
    /// IDで予約時刻を検索する
    async fn find_by_id(
        &self,
        id: ReservationTimeId,
    ) -> Result<Option<ReservationTime>, DataAccessError>;
    /// 予約時刻を保存し、採番されたIDを返す
    async fn add(
        &self,
        start_at: &ReservationStartAt,
    ) -> Result<ReservationTimeId, DataAccessError>;
    /// IDの予約時刻が存在するか確認する
    async fn exists(&self, id: ReservationTimeId) -> Result<bool, DataAccessError>;
    /// IDで予約時刻を削除する。存在しないIDの場合は何もしない
    async fn delete(&self, id: ReservationTimeId) -> Result<(), DataAccessError>;
}

/// 予約時刻ID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default,
)]
pub struct ReservationTimeId(u64);

impl Id for ReservationTimeId {
    type Inner = u64;
}

/// 開始時刻。`HH:MM`(24時間表記)を正準形とする
#[serde_as]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationStartAt(#[serde_as(as = "DisplayFromStr")] NaiveTime);

impl FromStr for ReservationStartAt {
    type Err = ReservationTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| ReservationTimeError::InvalidStartAt)
    }
}

impl fmt::Display for ReservationStartAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// 予約時刻エンティティ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationTime {
    id: Option<ReservationTimeId>,
    start_at: ReservationStartAt,
}

impl ReservationTime {
    pub fn new(id: Option<ReservationTimeId>, start_at: ReservationStartAt) -> Self {
        Self { id, start_at }
    }

    pub fn start_at(&self) -> &ReservationStartAt {
        &self.start_at
    }
}

impl Entity for ReservationTime {
    type Id = ReservationTimeId;

    const ENTITY_NAME: &'static str = "time";

    fn id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// 予約時刻エラー
#[derive(Error, Display, Debug)]
pub enum ReservationTimeError {
    /// 開始時刻の形式が不正です
    #[display(fmt = "Invalid start_at, expected HH:MM")]
    InvalidStartAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_at_round_trip() {
        let start_at = "15:40".parse::<ReservationStartAt>().unwrap();
        assert_eq!(start_at.to_string(), "15:40");
    }

    #[test]
    fn test_start_at_rejects_invalid_time() {
        assert!("25:61".parse::<ReservationStartAt>().is_err());
        assert!("".parse::<ReservationStartAt>().is_err());
        assert!("12:02:30".parse::<ReservationStartAt>().is_err());
    }

    #[test]
    fn test_start_at_serializes_to_canonical_string() {
        let start_at = "09:05".parse::<ReservationStartAt>().unwrap();
        assert_eq!(
            serde_json::to_value(start_at).unwrap(),
            serde_json::json!("09:05")
        );
    }

    #[test]
    fn test_reservation_time_equality() {
        let first = ReservationTime::new(Some(1.into()), "12:02".parse().unwrap());
        let second = ReservationTime::new(Some(1.into()), "12:02".parse().unwrap());
        assert_eq!(first, second);
        assert_eq!(first.id(), Some(ReservationTimeId::from(1)));
    }
}
