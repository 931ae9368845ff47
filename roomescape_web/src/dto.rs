use roomescape::domain::reservation::Reservation;
use roomescape::domain::reservation_time::ReservationTime;
use roomescape::domain::Entity;
use serde::{Deserialize, Serialize};

/// `POST /times`リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationTimeCreateRequest {
    pub start_at: String,
}

/// 予約時刻レスポンス
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationTimeResponse {
    pub id: Option<u64>,
    pub start_at: String,
}

impl From<&ReservationTime> for ReservationTimeResponse {
    fn from(time: &ReservationTime) -> Self {
        Self {
            id: time.id().map(|id| *id),
            start_at: time.start_at().to_string(),
        }
    }
}

/// `POST /reservations`リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreateRequest {
    pub name: String,
    pub date: String,
    pub time_id: u64,
}

/// 予約レスポンス。参照する予約時刻を入れ子で返す
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: Option<u64>,
    pub name: String,
    pub date: String,
    pub time: ReservationTimeResponse,
}

impl From<&Reservation> for ReservationResponse {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id().map(|id| *id),
            name: reservation.name().value().to_owned(),
            date: reservation.date().to_string(),
            time: ReservationTimeResponse::from(reservation.time()),
        }
    }
}
