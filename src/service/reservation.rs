use tracing::info;

use crate::domain::reservation::{
    Reservation, ReservationDate, ReservationId, ReservationName, ReservationRepository,
};
use crate::domain::reservation_time::{
    ReservationTime, ReservationTimeId, ReservationTimeRepository,
};
use crate::domain::Entity;
use crate::service::ServiceError;

/// 予約サービス
pub struct ReservationService<R, T> {
    reservations: R,
    times: T,
}

impl<R, T> ReservationService<R, T>
where
    R: ReservationRepository,
    T: ReservationTimeRepository,
{
    pub fn new(reservations: R, times: T) -> Self {
        Self {
            reservations,
            times,
        }
    }

    /// すべての予約を予約時刻と結合して取得する
    pub async fn find_all(&self) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.reservations.find_all().await?)
    }

    /// 入力値を検証して予約を追加し、保存された行を返す。
    /// 検証は名前、日付、予約時刻の存在の順に行う
    pub async fn add(
        &self,
        name: &str,
        date: &str,
        time_id: ReservationTimeId,
    ) -> Result<Reservation, ServiceError> {
        let name = ReservationName::new(name).map_err(|error| ServiceError::Validation {
            field: "name",
            reason: format!("{}", error),
        })?;
        let date: ReservationDate = date.parse().map_err(|error| ServiceError::Validation {
            field: "date",
            reason: format!("{}", error),
        })?;
        let time = self
            .times
            .find_by_id(time_id)
            .await?
            .ok_or(ServiceError::NotFound {
                entity: ReservationTime::ENTITY_NAME,
                id: *time_id,
            })?;

        let reservation = Reservation::new(None, name, date, time);
        let id = self.reservations.add(&reservation).await?;
        let created = self.reservations.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::Integrity(format!("reservation {} missing after insert", id))
        })?;
        info!("予約を追加: id={} date={} time_id={}", id, date, time_id);
        Ok(created)
    }

    /// 予約を削除する。IDが未指定、または存在しない場合は失敗する
    pub async fn delete(&self, id: Option<ReservationId>) -> Result<(), ServiceError> {
        let id = id.ok_or(ServiceError::Validation {
            field: "id",
            reason: "id cannot be null".to_owned(),
        })?;
        if !self.reservations.exists(id).await? {
            return Err(ServiceError::NotFound {
                entity: Reservation::ENTITY_NAME,
                id: *id,
            });
        }
        self.reservations.delete(id).await?;
        info!("予約を削除: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{
        InMemoryReservationRepository, InMemoryReservationTimeRepository, InMemoryStore,
    };
    use crate::service::reservation_time::ReservationTimeService;
    use crate::service::DeleteGuard;

    struct Fixture {
        reservations:
            ReservationService<InMemoryReservationRepository, InMemoryReservationTimeRepository>,
        times: ReservationTimeService<
            InMemoryReservationTimeRepository,
            InMemoryReservationRepository,
        >,
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let time_repo = InMemoryReservationTimeRepository::new(store.clone());
        let reservation_repo = InMemoryReservationRepository::new(store);
        Fixture {
            reservations: ReservationService::new(reservation_repo.clone(), time_repo.clone()),
            times: ReservationTimeService::new(time_repo, reservation_repo, DeleteGuard::Unchecked),
        }
    }

    #[tokio::test]
    async fn test_add_and_delete_reservation() {
        let fixture = fixture();
        let time = fixture.times.add("10:00").await.unwrap();
        let time_id = time.id().unwrap();

        // 追加
        let created = fixture
            .reservations
            .add("alice", "2024-05-01", time_id)
            .await
            .unwrap();
        let id = created.id().unwrap();
        assert_eq!(created.name().value(), "alice");
        assert_eq!(created.date().to_string(), "2024-05-01");
        assert_eq!(created.time().id(), Some(time_id));
        assert_eq!(created.time().start_at().to_string(), "10:00");

        // 一覧は追加した1件のみ
        let all = fixture.reservations.find_all().await.unwrap();
        assert_eq!(all, vec![created]);

        // 削除後は空になり、同じIDの再削除は失敗する
        fixture.reservations.delete(Some(id)).await.unwrap();
        assert!(fixture.reservations.find_all().await.unwrap().is_empty());
        let error = fixture.reservations.delete(Some(id)).await.unwrap_err();
        assert!(matches!(
            error,
            ServiceError::NotFound { entity: "reservation", .. }
        ));
    }

    #[tokio::test]
    async fn test_add_validates_name_before_date() {
        let fixture = fixture();

        let error = fixture
            .reservations
            .add("", "not-a-date", 1.into())
            .await
            .unwrap_err();

        assert!(matches!(error, ServiceError::Validation { field: "name", .. }));
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_date() {
        let fixture = fixture();

        let error = fixture
            .reservations
            .add("wooteco", "2024-13-40", 1.into())
            .await
            .unwrap_err();

        assert!(matches!(error, ServiceError::Validation { field: "date", .. }));
    }

    #[tokio::test]
    async fn test_add_fails_for_missing_time_id() {
        let fixture = fixture();

        let error = fixture
            .reservations
            .add("wooteco", "2024-04-23", 999999.into())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ServiceError::NotFound { entity: "time", id: 999999 }
        ));
        // 行は作成されない
        assert!(fixture.reservations.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_permits_double_booking() {
        let fixture = fixture();
        let time = fixture.times.add("12:02").await.unwrap();
        let time_id = time.id().unwrap();

        fixture
            .reservations
            .add("daon", "2024-04-24", time_id)
            .await
            .unwrap();
        fixture
            .reservations
            .add("ikjo", "2024-04-24", time_id)
            .await
            .unwrap();

        assert_eq!(fixture.reservations.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_rejects_null_id() {
        let fixture = fixture();

        let error = fixture.reservations.delete(None).await.unwrap_err();

        assert!(matches!(error, ServiceError::Validation { field: "id", .. }));
    }

    #[tokio::test]
    async fn test_delete_fails_for_missing_id() {
        let fixture = fixture();

        let error = fixture
            .reservations
            .delete(Some(999999.into()))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ServiceError::NotFound { entity: "reservation", id: 999999 }
        ));
    }

    #[tokio::test]
    async fn test_find_all_fails_when_stored_time_is_missing() {
        let fixture = fixture();
        let time = fixture.times.add("12:02").await.unwrap();
        let time_id = time.id().unwrap();
        fixture
            .reservations
            .add("daon", "2024-04-24", time_id)
            .await
            .unwrap();

        // Uncheckedガードは参照中の時刻も黙って消す(元実装の挙動)
        fixture.times.delete(time_id).await.unwrap();

        let error = fixture.reservations.find_all().await.unwrap_err();
        assert!(matches!(error, ServiceError::Integrity(_)));
    }
}
