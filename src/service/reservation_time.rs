use tracing::info;

use crate::domain::reservation::ReservationRepository;
use crate::domain::reservation_time::{
    ReservationStartAt, ReservationTime, ReservationTimeId, ReservationTimeRepository,
};
use crate::domain::Entity;
use crate::service::{DeleteGuard, ServiceError};

/// 予約時刻サービス
pub struct ReservationTimeService<T, R> {
    times: T,
    reservations: R,
    delete_guard: DeleteGuard,
}

impl<T, R> ReservationTimeService<T, R>
where
    T: ReservationTimeRepository,
    R: ReservationRepository,
{
    pub fn new(times: T, reservations: R, delete_guard: DeleteGuard) -> Self {
        Self {
            times,
            reservations,
            delete_guard,
        }
    }

    /// すべての予約時刻を登録順で取得する
    pub async fn find_all(&self) -> Result<Vec<ReservationTime>, ServiceError> {
        Ok(self.times.find_all().await?)
    }

    /// 開始時刻を検証して予約時刻を追加し、保存された行を返す
    pub async fn add(&self, start_at: &str) -> Result<ReservationTime, ServiceError> {
        let start_at: ReservationStartAt =
            start_at.parse().map_err(|error| ServiceError::Validation {
                field: "startAt",
                reason: format!("{}", error),
            })?;
        let id = self.times.add(&start_at).await?;
        let created = self.times.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::Integrity(format!("reservation_time {} missing after insert", id))
        })?;
        info!("予約時刻を追加: id={} start_at={}", id, start_at);
        Ok(created)
    }

    /// 予約時刻を削除する。`DeleteGuard::Restrict`の場合のみ
    /// 存在チェックと参照チェックを行う
    pub async fn delete(&self, id: ReservationTimeId) -> Result<(), ServiceError> {
        if let DeleteGuard::Restrict = self.delete_guard {
            if !self.times.exists(id).await? {
                return Err(ServiceError::NotFound {
                    entity: ReservationTime::ENTITY_NAME,
                    id: *id,
                });
            }
            if self.reservations.exists_for_time(id).await? {
                return Err(ServiceError::InUse {
                    entity: ReservationTime::ENTITY_NAME,
                    id: *id,
                });
            }
        }
        self.times.delete(id).await?;
        info!("予約時刻を削除: id={}", id);
        Ok(())
    }
}
