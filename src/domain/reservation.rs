use std::{fmt, str::FromStr};

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::domain::reservation_time::{ReservationTime, ReservationTimeId};
use crate::domain::{DataAccessError, Entity, Id};

/// 予約リポジトリ
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// すべての予約を予約時刻と結合して登録順で取得する
    async fn find_all(&self) -> Result<Vec<Reservation>, DataAccessError>;
    /// IDで予約を検索する
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DataAccessError>;
    /// 予約を保存し、採番されたIDを返す
    async fn add(&self, reservation: &Reservation) -> Result<ReservationId, DataAccessError>;
    /// IDの予約が存在するか確認する
    async fn exists(&self, id: ReservationId) -> Result<bool, DataAccessError>;
    /// 指定した予約時刻を参照する予約が存在するか確認する
    async fn exists_for_time(&self, time_id: ReservationTimeId) -> Result<bool, DataAccessError>;
    /// IDで予約を削除する。存在しないIDの場合は何もしない
    async fn delete(&self, id: ReservationId) -> Result<(), DataAccessError>;
}

/// 予約ID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default,
)]
pub struct ReservationId(u64);

impl Id for ReservationId {
    type Inner = u64;
}

/// 予約者名。空白のみの名前は許可しない
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, Deref)]
pub struct ReservationName(String);

impl ReservationName {
    pub fn new(value: impl Into<String>) -> Result<Self, ReservationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ReservationError::NameIsBlank);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// 予約日。`YYYY-MM-DD`を正準形とし、内部では暦上の日付として保持する
#[serde_as]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDate(#[serde_as(as = "DisplayFromStr")] NaiveDate);

impl FromStr for ReservationDate {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ReservationError::InvalidDate)
    }
}

impl fmt::Display for ReservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// 予約エンティティ。参照先の予約時刻を読み取り時点のスナップショットとして持つ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    name: ReservationName,
    date: ReservationDate,
    time: ReservationTime,
}

impl Reservation {
    pub fn new(
        id: Option<ReservationId>,
        name: ReservationName,
        date: ReservationDate,
        time: ReservationTime,
    ) -> Self {
        Self {
            id,
            name,
            date,
            time,
        }
    }

    pub fn name(&self) -> &ReservationName {
        &self.name
    }

    pub fn date(&self) -> &ReservationDate {
        &self.date
    }

    pub fn time(&self) -> &ReservationTime {
        &self.time
    }
}

impl Entity for Reservation {
    type Id = ReservationId;

    const ENTITY_NAME: &'static str = "reservation";

    fn id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// 予約エラー
#[derive(Error, Display, Debug)]
pub enum ReservationError {
    /// 名前が空欄です
    #[display(fmt = "Name cannot be blank")]
    NameIsBlank,
    /// 日付の形式が不正です
    #[display(fmt = "Invalid date, expected YYYY-MM-DD")]
    InvalidDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rejects_blank() {
        assert!(ReservationName::new("").is_err());
        assert!(ReservationName::new("   ").is_err());
    }

    #[test]
    fn test_name_keeps_value() {
        let name = ReservationName::new("daon").unwrap();
        assert_eq!(name.value(), "daon");
        assert_eq!(name.to_string(), "daon");
    }

    #[test]
    fn test_date_round_trip() {
        let date = "2024-04-24".parse::<ReservationDate>().unwrap();
        assert_eq!(date.to_string(), "2024-04-24");
    }

    #[test]
    fn test_date_rejects_invalid_calendar_date() {
        assert!("2024-13-40".parse::<ReservationDate>().is_err());
        assert!("2023-02-29".parse::<ReservationDate>().is_err());
        assert!("".parse::<ReservationDate>().is_err());
    }

    #[test]
    fn test_date_serializes_to_canonical_string() {
        let date = "2022-02-22".parse::<ReservationDate>().unwrap();
        assert_eq!(
            serde_json::to_value(date).unwrap(),
            serde_json::json!("2022-02-22")
        );
    }

    #[test]
    fn test_reservation_equality() {
        let time = ReservationTime::new(Some(1.into()), "12:02".parse().unwrap());
        let first = Reservation::new(
            None,
            ReservationName::new("ikjo").unwrap(),
            "2022-02-22".parse().unwrap(),
            time.clone(),
        );
        let second = Reservation::new(
            None,
            ReservationName::new("ikjo").unwrap(),
            "2022-02-22".parse().unwrap(),
            time,
        );
        assert_eq!(first, second);
        assert_eq!(first.id(), None);
    }
}
