use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;
use crate::dto::{
    ReservationCreateRequest, ReservationResponse, ReservationTimeCreateRequest,
    ReservationTimeResponse,
};
use crate::error::ApiError;

/// `GET /times`
pub async fn find_all_times(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationTimeResponse>>, ApiError> {
    let times = state.times.find_all().await?;
    Ok(Json(times.iter().map(ReservationTimeResponse::from).collect()))
}

/// `POST /times`
pub async fn create_time(
    State(state): State<AppState>,
    Json(request): Json<ReservationTimeCreateRequest>,
) -> Result<(StatusCode, Json<ReservationTimeResponse>), ApiError> {
    let created = state.times.add(&request.start_at).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationTimeResponse::from(&created)),
    ))
}

/// `DELETE /times/:id`
pub async fn delete_time(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.times.delete(id.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /reservations`
pub async fn find_all_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let reservations = state.reservations.find_all().await?;
    Ok(Json(
        reservations.iter().map(ReservationResponse::from).collect(),
    ))
}

/// `POST /reservations`
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationCreateRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let created = state
        .reservations
        .add(&request.name, &request.date, request.time_id.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(&created)),
    ))
}

/// `DELETE /reservations/:id`
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.reservations.delete(Some(id.into())).await?;
    Ok(StatusCode::NO_CONTENT)
}
