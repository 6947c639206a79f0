//! End-to-end lifecycle scenarios over the in-memory wiring with the
//! provider offline (deterministic synthetic estimates).

use chrono::Utc;
use uuid::Uuid;

use server_core::domains::captains::models::Captain;
use server_core::domains::pricing::{self, VehicleClass};
use server_core::domains::realtime::{events, EntityKind};
use server_core::domains::riders::models::Rider;
use server_core::domains::rides::actions::{
    captain_stats, confirm_ride, create_and_dispatch, create_ride, end_ride, get_fare,
    get_suggestions, start_ride,
};
use server_core::domains::rides::dispatch::spawn_new_ride_broadcast;
use server_core::domains::rides::{RideError, RideStatus};
use server_core::kernel::{
    telemetry, BaseCaptainDirectory, BaseMapsService, BaseRideStore, BaseRiderDirectory,
    ServerDeps,
};

struct World {
    deps: ServerDeps,
    rider: Uuid,
    captain: Uuid,
}

async fn world() -> World {
    telemetry::init();
    let deps = ServerDeps::in_memory_offline(2.0);

    let rider = Rider::new("Meera");
    let rider_id = rider.id;
    deps.riders.upsert(rider).await.unwrap();

    let captain = Captain::new("Asha", VehicleClass::Car);
    let captain_id = captain.id;
    deps.captains.upsert(captain).await.unwrap();

    World {
        deps,
        rider: rider_id,
        captain: captain_id,
    }
}

#[tokio::test]
async fn scenario_a_create_with_provider_unavailable() {
    let w = world().await;

    let estimate = w.deps.maps.resolve_trip("Addr-A", "Addr-B").await;
    let before = pricing::quote(estimate.distance_m, estimate.duration_s, Utc::now(), &w.deps.rates);

    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();

    let after = pricing::quote(estimate.distance_m, estimate.duration_s, Utc::now(), &w.deps.rates);

    assert_eq!(ride.status, RideStatus::Requested);
    assert!(ride.captain.is_none());
    assert_eq!(ride.distance_m, estimate.distance_m);
    assert_eq!(ride.duration_s, estimate.duration_s);

    let otp = ride.otp.as_deref().expect("creator receives the otp once");
    assert_eq!(otp.len(), 6);
    assert!(otp.bytes().all(|b| b.is_ascii_digit()));

    // The surge bucket can only flip if the hour rolled over mid-test.
    let expected_before = before.fare(VehicleClass::Car).unwrap();
    let expected_after = after.fare(VehicleClass::Car).unwrap();
    assert!(
        ride.fare == expected_before || ride.fare == expected_after,
        "fare {} not in {{{expected_before}, {expected_after}}}",
        ride.fare
    );
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let w = world().await;

    assert!(matches!(
        create_ride(w.rider, "", "Addr-B", VehicleClass::Car, &w.deps).await,
        Err(RideError::Validation("pickup"))
    ));
    assert!(matches!(
        create_ride(w.rider, "Addr-A", "  ", VehicleClass::Car, &w.deps).await,
        Err(RideError::Validation("destination"))
    ));
    assert!(matches!(
        create_ride(Uuid::new_v4(), "Addr-A", "Addr-B", VehicleClass::Car, &w.deps).await,
        Err(RideError::Validation("rider"))
    ));
}

#[tokio::test]
async fn scenario_b_confirm_assigns_captain() {
    let w = world().await;
    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();

    let confirmed = confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();
    assert_eq!(confirmed.status, RideStatus::Accepted);
    assert_eq!(confirmed.captain.as_ref().unwrap().id, w.captain);
    assert!(confirmed.otp.is_none(), "otp withheld after creation");
}

#[tokio::test]
async fn second_confirm_conflicts_and_first_captain_sticks() {
    let w = world().await;
    let other = Captain::new("Ravi", VehicleClass::Moto);
    let other_id = other.id;
    w.deps.captains.upsert(other).await.unwrap();

    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();

    confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();
    assert!(matches!(
        confirm_ride(ride.id, other_id, &w.deps).await,
        Err(RideError::Conflict)
    ));

    let stored = w.deps.rides.find_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(stored.captain, Some(w.captain));
}

#[tokio::test]
async fn confirm_unknown_ride_is_not_found() {
    let w = world().await;
    assert!(matches!(
        confirm_ride(Uuid::new_v4(), w.captain, &w.deps).await,
        Err(RideError::NotFound)
    ));
}

#[tokio::test]
async fn scenario_c_start_verifies_otp() {
    let w = world().await;
    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();
    let otp = ride.otp.clone().unwrap();
    confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();

    // Generated OTPs never start with '0', so this always differs.
    assert!(matches!(
        start_ride(ride.id, "000000", w.captain, &w.deps).await,
        Err(RideError::OtpMismatch)
    ));
    let stored = w.deps.rides.find_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RideStatus::Accepted, "failure must not mutate status");

    let started = start_ride(ride.id, &otp, w.captain, &w.deps).await.unwrap();
    assert_eq!(started.status, RideStatus::Ongoing);
}

#[tokio::test]
async fn out_of_order_transitions_fail_with_state_error() {
    let w = world().await;
    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();
    let otp = ride.otp.clone().unwrap();

    // start on a requested ride
    assert!(matches!(
        start_ride(ride.id, &otp, w.captain, &w.deps).await,
        Err(RideError::InvalidState {
            actual: RideStatus::Requested,
            ..
        })
    ));

    confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();

    // end on an accepted ride
    assert!(matches!(
        end_ride(ride.id, w.captain, &w.deps).await,
        Err(RideError::InvalidState {
            actual: RideStatus::Accepted,
            ..
        })
    ));

    let stored = w.deps.rides.find_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RideStatus::Accepted);
}

#[tokio::test]
async fn scenario_d_foreign_captain_cannot_end_ride() {
    let w = world().await;
    let foreign = Captain::new("Zoya", VehicleClass::Auto);
    let foreign_id = foreign.id;
    w.deps.captains.upsert(foreign).await.unwrap();

    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();
    let otp = ride.otp.clone().unwrap();
    confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();
    start_ride(ride.id, &otp, w.captain, &w.deps).await.unwrap();

    assert!(matches!(
        end_ride(ride.id, foreign_id, &w.deps).await,
        Err(RideError::NotFound)
    ));
    let stored = w.deps.rides.find_by_id(ride.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RideStatus::Ongoing);

    let ended = end_ride(ride.id, w.captain, &w.deps).await.unwrap();
    assert_eq!(ended.status, RideStatus::Completed);
}

#[tokio::test]
async fn rider_receives_status_events_without_otp() {
    let w = world().await;

    let (channel, mut rx) = w.deps.gateway.open_channel().await;
    w.deps
        .gateway
        .join(channel, w.rider, EntityKind::Rider)
        .await
        .unwrap();

    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();
    let otp = ride.otp.clone().unwrap();

    confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();
    let envelope = rx.recv().await.unwrap();
    assert_eq!(envelope.event, events::RIDE_CONFIRMED);
    assert!(envelope.data.get("otp").is_none());

    start_ride(ride.id, &otp, w.captain, &w.deps).await.unwrap();
    assert_eq!(rx.recv().await.unwrap().event, events::RIDE_STARTED);

    end_ride(ride.id, w.captain, &w.deps).await.unwrap();
    assert_eq!(rx.recv().await.unwrap().event, events::RIDE_ENDED);
}

#[tokio::test]
async fn lifecycle_progresses_even_when_rider_disconnected() {
    // No channel bound for the rider; deliveries drop, operations succeed.
    let w = world().await;
    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();
    let otp = ride.otp.clone().unwrap();

    confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();
    start_ride(ride.id, &otp, w.captain, &w.deps).await.unwrap();
    let ended = end_ride(ride.id, w.captain, &w.deps).await.unwrap();
    assert_eq!(ended.status, RideStatus::Completed);
}

#[tokio::test]
async fn new_ride_broadcast_reaches_connected_captain() {
    let w = world().await;

    // Connected captain with no reported location: the default policy
    // includes them regardless of the pickup point.
    let (channel, mut rx) = w.deps.gateway.open_channel().await;
    w.deps
        .gateway
        .join(channel, w.captain, EntityKind::Captain)
        .await
        .unwrap();

    let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();

    let handle = spawn_new_ride_broadcast(w.deps.clone(), ride.clone());
    handle.await.unwrap();

    let envelope = rx.recv().await.unwrap();
    assert_eq!(envelope.event, events::NEW_RIDE);
    assert_eq!(envelope.data["id"], serde_json::json!(ride.id.to_string()));
    assert!(envelope.data.get("otp").is_none(), "broadcast must redact the otp");
}

#[tokio::test]
async fn create_and_dispatch_answers_creator_then_broadcasts() {
    let w = world().await;

    let (channel, mut rx) = w.deps.gateway.open_channel().await;
    w.deps
        .gateway
        .join(channel, w.captain, EntityKind::Captain)
        .await
        .unwrap();

    let (ride, handle) = create_and_dispatch(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
        .await
        .unwrap();

    // The creator's copy carries the otp; the ride is committed before
    // the broadcast task runs.
    assert_eq!(ride.status, RideStatus::Requested);
    assert!(ride.otp.is_some());

    handle.await.unwrap();
    let envelope = rx.recv().await.unwrap();
    assert_eq!(envelope.event, events::NEW_RIDE);
    assert_eq!(envelope.data["id"], serde_json::json!(ride.id.to_string()));
    assert!(envelope.data.get("otp").is_none(), "broadcast must redact the otp");
}

#[tokio::test]
async fn fare_query_prices_all_classes() {
    let w = world().await;

    let fare = get_fare("Addr-A", "Addr-B", &w.deps).await.unwrap();
    for class in [VehicleClass::Car, VehicleClass::Auto, VehicleClass::Moto] {
        let minimum = w.deps.rates.get(class).unwrap().minimum_fare;
        assert!(fare.quote.fare(class).unwrap() >= minimum);
    }
    assert!(!fare.distance.is_empty());

    assert!(matches!(
        get_fare("", "Addr-B", &w.deps).await,
        Err(RideError::Validation("pickup"))
    ));
}

#[tokio::test]
async fn suggestions_query_requires_input() {
    let w = world().await;

    let hits = get_suggestions("airport", &w.deps).await.unwrap();
    assert!(!hits.is_empty());

    assert!(matches!(
        get_suggestions("   ", &w.deps).await,
        Err(RideError::Validation("input"))
    ));
}

#[tokio::test]
async fn captain_stats_aggregate_completed_rides() {
    let w = world().await;

    let mut total = 0;
    for _ in 0..2 {
        let ride = create_ride(w.rider, "Addr-A", "Addr-B", VehicleClass::Car, &w.deps)
            .await
            .unwrap();
        let otp = ride.otp.clone().unwrap();
        confirm_ride(ride.id, w.captain, &w.deps).await.unwrap();
        start_ride(ride.id, &otp, w.captain, &w.deps).await.unwrap();
        let ended = end_ride(ride.id, w.captain, &w.deps).await.unwrap();
        total += ended.fare;
    }

    let stats = captain_stats(w.captain, &w.deps).await.unwrap();
    assert_eq!(stats.total_trips, 2);
    assert_eq!(stats.total_earnings, total);
    assert!(stats.hours_online > 0.0);
}
