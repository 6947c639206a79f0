//! In-memory ride store.
//!
//! Conditional updates run inside a single write lock, which gives the
//! compare-and-swap semantics `confirm` relies on.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domains::rides::models::{Ride, RideStatus};
use crate::kernel::{AssignOutcome, BaseRideStore, TransitionOutcome};

#[derive(Default)]
pub struct MemoryRideStore {
    inner: RwLock<HashMap<Uuid, Ride>>,
}

impl MemoryRideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRideStore for MemoryRideStore {
    async fn insert(&self, ride: Ride) -> Result<Ride> {
        self.inner.write().await.insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ride>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn find_for_captain(&self, id: Uuid, captain: Uuid) -> Result<Option<Ride>> {
        Ok(self
            .inner
            .read()
            .await
            .get(&id)
            .filter(|ride| ride.captain == Some(captain))
            .cloned())
    }

    async fn find_completed_by_captain(&self, captain: Uuid) -> Result<Vec<Ride>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .filter(|ride| ride.captain == Some(captain) && ride.status == RideStatus::Completed)
            .cloned()
            .collect())
    }

    async fn assign_captain(&self, id: Uuid, captain: Uuid) -> Result<AssignOutcome> {
        let mut rides = self.inner.write().await;
        Ok(match rides.get_mut(&id) {
            None => AssignOutcome::Missing,
            Some(ride) if ride.status == RideStatus::Requested => {
                ride.captain = Some(captain);
                ride.status = RideStatus::Accepted;
                ride.updated_at = Utc::now();
                AssignOutcome::Assigned(ride.clone())
            }
            Some(_) => AssignOutcome::Taken,
        })
    }

    async fn transition(
        &self,
        id: Uuid,
        expected: RideStatus,
        to: RideStatus,
    ) -> Result<TransitionOutcome> {
        let mut rides = self.inner.write().await;
        Ok(match rides.get_mut(&id) {
            None => TransitionOutcome::Missing,
            Some(ride) if ride.status == expected => {
                ride.status = to;
                ride.updated_at = Utc::now();
                TransitionOutcome::Done(ride.clone())
            }
            Some(ride) => TransitionOutcome::WrongState(ride.status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pricing::VehicleClass;
    use tokio_test::assert_ok;

    fn ride() -> Ride {
        let now = Utc::now();
        Ride {
            id: Uuid::new_v4(),
            rider: Uuid::new_v4(),
            captain: None,
            pickup: "Addr-A".into(),
            destination: "Addr-B".into(),
            vehicle: VehicleClass::Car,
            status: RideStatus::Requested,
            otp: "482913".into(),
            fare: 320,
            distance_m: 10_000,
            duration_s: 1_800,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn assign_captain_succeeds_only_while_requested() {
        let store = MemoryRideStore::new();
        let ride = ride();
        let id = ride.id;
        assert_ok!(store.insert(ride).await);

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        match store.assign_captain(id, first).await.unwrap() {
            AssignOutcome::Assigned(updated) => {
                assert_eq!(updated.status, RideStatus::Accepted);
                assert_eq!(updated.captain, Some(first));
            }
            other => panic!("expected Assigned, got {other:?}"),
        }

        // Second confirm loses; first captain sticks.
        assert!(matches!(
            store.assign_captain(id, second).await.unwrap(),
            AssignOutcome::Taken
        ));
        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.captain, Some(first));
    }

    #[tokio::test]
    async fn assign_captain_missing_ride() {
        let store = MemoryRideStore::new();
        assert!(matches!(
            store.assign_captain(Uuid::new_v4(), Uuid::new_v4()).await.unwrap(),
            AssignOutcome::Missing
        ));
    }

    #[tokio::test]
    async fn transition_rejects_wrong_state() {
        let store = MemoryRideStore::new();
        let ride = ride();
        let id = ride.id;
        store.insert(ride).await.unwrap();

        match store
            .transition(id, RideStatus::Accepted, RideStatus::Ongoing)
            .await
            .unwrap()
        {
            TransitionOutcome::WrongState(actual) => assert_eq!(actual, RideStatus::Requested),
            other => panic!("expected WrongState, got {other:?}"),
        }

        // Status unchanged on failure.
        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, RideStatus::Requested);
    }

    #[tokio::test]
    async fn find_for_captain_filters_by_assignment() {
        let store = MemoryRideStore::new();
        let ride = ride();
        let id = ride.id;
        store.insert(ride).await.unwrap();

        let captain = Uuid::new_v4();
        store.assign_captain(id, captain).await.unwrap();

        assert!(store.find_for_captain(id, captain).await.unwrap().is_some());
        assert!(store
            .find_for_captain(id, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn completed_rides_query_filters_status_and_captain() {
        let store = MemoryRideStore::new();
        let captain = Uuid::new_v4();

        let mut done = ride();
        done.captain = Some(captain);
        done.status = RideStatus::Completed;
        store.insert(done).await.unwrap();

        let mut ongoing = ride();
        ongoing.captain = Some(captain);
        ongoing.status = RideStatus::Ongoing;
        store.insert(ongoing).await.unwrap();

        let completed = store.find_completed_by_captain(captain).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status, RideStatus::Completed);
    }
}
