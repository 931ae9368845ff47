use std::sync::Arc;

use axum::routing::{delete, get};
use axum::Router;
use roomescape::infrastructure::memory::{
    InMemoryReservationRepository, InMemoryReservationTimeRepository, InMemoryStore,
};
use roomescape::service::reservation::ReservationService;
use roomescape::service::reservation_time::ReservationTimeService;
use roomescape::RoomescapeConfig;

use crate::handler;

pub type Reservations =
    ReservationService<InMemoryReservationRepository, InMemoryReservationTimeRepository>;
pub type Times =
    ReservationTimeService<InMemoryReservationTimeRepository, InMemoryReservationRepository>;

/// ハンドラ間で共有するアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<Reservations>,
    pub times: Arc<Times>,
}

pub fn router(config: &RoomescapeConfig) -> Router {
    let store = InMemoryStore::new();
    let time_repo = InMemoryReservationTimeRepository::new(store.clone());
    let reservation_repo = InMemoryReservationRepository::new(store);
    let state = AppState {
        reservations: Arc::new(ReservationService::new(
            reservation_repo.clone(),
            time_repo.clone(),
        )),
        times: Arc::new(ReservationTimeService::new(
            time_repo,
            reservation_repo,
            config.reservation_time.delete_guard,
        )),
    };
    Router::new()
        .route(
            "/times",
            get(handler::find_all_times).post(handler::create_time),
        )
        .route("/times/:id", delete(handler::delete_time))
        .route(
            "/reservations",
            get(handler::find_all_reservations).post(handler::create_reservation),
        )
        .route("/reservations/:id", delete(handler::delete_reservation))
        .with_state(state)
}
