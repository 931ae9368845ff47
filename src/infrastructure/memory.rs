use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::reservation::{
    Reservation, ReservationDate, ReservationId, ReservationName, ReservationRepository,
};
use crate::domain::reservation_time::{
    ReservationStartAt, ReservationTime, ReservationTimeId, ReservationTimeRepository,
};
use crate::domain::{DataAccessError, Entity};

#[derive(Debug, Error)]
#[error("in-memory store lock poisoned")]
struct LockPoisoned;

#[derive(Debug, Error)]
#[error("reservation references an unsaved reservation_time")]
struct UnsavedTimeReference;

/// `reservation`テーブルの行。結合前なので時刻は外部キーのみ持つ
#[derive(Clone, Debug)]
struct ReservationRow {
    name: ReservationName,
    date: ReservationDate,
    time_id: u64,
}

#[derive(Debug, Default)]
struct Tables {
    time_seq: u64,
    times: BTreeMap<u64, ReservationStartAt>,
    reservation_seq: u64,
    reservations: BTreeMap<u64, ReservationRow>,
}

impl Tables {
    /// `reservation`と`reservation_time`の内部結合
    fn join(&self, id: u64, row: &ReservationRow) -> Result<Reservation, DataAccessError> {
        let start_at = self.times.get(&row.time_id).copied().ok_or_else(|| {
            DataAccessError::IntegrityError(format!(
                "reservation {} references missing reservation_time {}",
                id, row.time_id
            ))
        })?;
        let time = ReservationTime::new(Some(row.time_id.into()), start_at);
        Ok(Reservation::new(
            Some(id.into()),
            row.name.clone(),
            row.date,
            time,
        ))
    }
}

/// インメモリの永続化ゲートウェイ。`reservation`と`reservation_time`の
/// 2テーブルを1つのロック配下に保持し、IDはテーブルごとの連番で採番する
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DataAccessError> {
        self.tables
            .lock()
            .map_err(|_| DataAccessError::ConnectionError(Box::new(LockPoisoned)))
    }
}

/// `reservation_time`テーブルへのインメモリリポジトリ
#[derive(Clone, Debug)]
pub struct InMemoryReservationTimeRepository {
    store: InMemoryStore,
}

impl InMemoryReservationTimeRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReservationTimeRepository for InMemoryReservationTimeRepository {
    async fn find_all(&self) -> Result<Vec<ReservationTime>, DataAccessError> {
        let tables = self.store.lock()?;
        Ok(tables
            .times
            .iter()
            .map(|(id, start_at)| ReservationTime::new(Some((*id).into()), *start_at))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: ReservationTimeId,
    ) -> Result<Option<ReservationTime>, DataAccessError> {
        let tables = self.store.lock()?;
        Ok(tables
            .times
            .get(&*id)
            .map(|start_at| ReservationTime::new(Some(id), *start_at)))
    }

    async fn add(
        &self,
        start_at: &ReservationStartAt,
    ) -> Result<ReservationTimeId, DataAccessError> {
        let mut tables = self.store.lock()?;
        tables.time_seq += 1;
        let id = tables.time_seq;
        tables.times.insert(id, *start_at);
        Ok(id.into())
    }

    async fn exists(&self, id: ReservationTimeId) -> Result<bool, DataAccessError> {
        let tables = self.store.lock()?;
        Ok(tables.times.contains_key(&*id))
    }

    async fn delete(&self, id: ReservationTimeId) -> Result<(), DataAccessError> {
        let mut tables = self.store.lock()?;
        tables.times.remove(&*id);
        Ok(())
    }
}

/// `reservation`テーブルへのインメモリリポジトリ
#[derive(Clone, Debug)]
pub struct InMemoryReservationRepository {
    store: InMemoryStore,
}

impl InMemoryReservationRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_all(&self) -> Result<Vec<Reservation>, DataAccessError> {
        let tables = self.store.lock()?;
        tables
            .reservations
            .iter()
            .map(|(id, row)| tables.join(*id, row))
            .collect()
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DataAccessError> {
        let tables = self.store.lock()?;
        tables
            .reservations
            .get(&*id)
            .map(|row| tables.join(*id, row))
            .transpose()
    }

    async fn add(&self, reservation: &Reservation) -> Result<ReservationId, DataAccessError> {
        let time_id = reservation
            .time()
            .id()
            .ok_or_else(|| DataAccessError::QueryError(Box::new(UnsavedTimeReference)))?;
        let mut tables = self.store.lock()?;
        tables.reservation_seq += 1;
        let id = tables.reservation_seq;
        tables.reservations.insert(
            id,
            ReservationRow {
                name: reservation.name().clone(),
                date: *reservation.date(),
                time_id: *time_id,
            },
        );
        Ok(id.into())
    }

    async fn exists(&self, id: ReservationId) -> Result<bool, DataAccessError> {
        let tables = self.store.lock()?;
        Ok(tables.reservations.contains_key(&*id))
    }

    async fn exists_for_time(&self, time_id: ReservationTimeId) -> Result<bool, DataAccessError> {
        let tables = self.store.lock()?;
        Ok(tables
            .reservations
            .values()
            .any(|row| row.time_id == *time_id))
    }

    async fn delete(&self, id: ReservationId) -> Result<(), DataAccessError> {
        let mut tables = self.store.lock()?;
        tables.reservations.remove(&*id);
        Ok(())
    }
}
