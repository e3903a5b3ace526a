//! Regras de reserva contra um banco real: sobreposição, anulação e reativação.
//!
//! Cada teste recebe um banco novo do `#[sqlx::test]`, com as migrações aplicadas.

mod common;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::PgPool;

use terrain_booking::{
    common::error::AppError,
    models::reservation::{ReservationPayload, ReservationStatus, ReservationUpdatePayload},
    AppState,
};

struct Seed {
    state: AppState,
    owner_id: i64,
    terrain_id: i64,
    ana: i64,
    bruno: i64,
}

async fn insert_client(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO clients (email, nom, password_hash) VALUES ($1, 'Cliente', 'x') RETURNING id")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed(pool: PgPool) -> Seed {
    let owner_id: i64 = sqlx::query_scalar(
        "INSERT INTO owners (email, nom, password_hash) VALUES ('dono@example.com', 'Dono', 'x') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let complex_id: i64 = sqlx::query_scalar(
        "INSERT INTO complexes (owner_id, nom, ville, adress) VALUES ($1, 'Arena', 'Rabat', 'Rue 1') RETURNING id",
    )
    .bind(owner_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    let terrain_id: i64 = sqlx::query_scalar(
        "INSERT INTO terrains (complexe_id, nom, prix_terrain, heure_ouverture, heure_fermeture) \
         VALUES ($1, 'Terrain A', 300, 9, 23) RETURNING id",
    )
    .bind(complex_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let ana = insert_client(&pool, "ana@example.com").await;
    let bruno = insert_client(&pool, "bruno@example.com").await;

    Seed {
        state: AppState::with_pool(pool, common::test_settings()),
        owner_id,
        terrain_id,
        ana,
        bruno,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 14).unwrap()
}

fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

fn on_day(hour: u32) -> NaiveDateTime {
    day().and_time(at(hour))
}

fn booking(terrain_id: i64, start: u32, end: u32) -> ReservationPayload {
    ReservationPayload {
        terrain_id,
        date: day(),
        heure_debut: at(start),
        heure_fin: at(end),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn overlapping_booking_is_a_conflict(pool: PgPool) {
    let s = seed(pool).await;
    let service = &s.state.reservation_service;

    let first = service.create(s.ana, &booking(s.terrain_id, 14, 16)).await.unwrap();
    assert_eq!(first.status, ReservationStatus::Confirmee);
    assert_eq!(first.duree, 120);

    let err = service
        .create(s.bruno, &booking(s.terrain_id, 15, 17))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = service
        .create(s.bruno, &booking(s.terrain_id, 13, 18))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn back_to_back_bookings_are_accepted(pool: PgPool) {
    let s = seed(pool).await;
    let service = &s.state.reservation_service;

    service.create(s.ana, &booking(s.terrain_id, 14, 16)).await.unwrap();
    service.create(s.bruno, &booking(s.terrain_id, 16, 18)).await.unwrap();
    service.create(s.bruno, &booking(s.terrain_id, 12, 14)).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn update_does_not_collide_with_itself(pool: PgPool) {
    let s = seed(pool).await;
    let service = &s.state.reservation_service;

    let reservation = service.create(s.ana, &booking(s.terrain_id, 14, 16)).await.unwrap();
    let updated = service
        .update(
            reservation.id,
            &ReservationUpdatePayload {
                terrain_id: s.terrain_id,
                date: day(),
                heure_debut: at(14),
                heure_fin: at(17),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.heure_fin, at(17));
    assert_eq!(updated.duree, 180);
}

#[sqlx::test(migrations = "./migrations")]
async fn cancelled_booking_frees_its_slot(pool: PgPool) {
    let s = seed(pool).await;
    let service = &s.state.reservation_service;

    let reservation = service.create(s.ana, &booking(s.terrain_id, 14, 16)).await.unwrap();
    let cancelled = service
        .cancel_by_client(s.ana, reservation.id, on_day(8))
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Annulee);

    service.create(s.bruno, &booking(s.terrain_id, 14, 16)).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn client_cancellation_rules(pool: PgPool) {
    let s = seed(pool).await;
    let service = &s.state.reservation_service;

    let reservation = service.create(s.ana, &booking(s.terrain_id, 14, 16)).await.unwrap();

    // Menos de 3h antes
    let err = service
        .cancel_by_client(s.ana, reservation.id, on_day(12))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CancellationClosed));

    let err = service
        .cancel_by_client(s.bruno, reservation.id, on_day(8))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    service
        .cancel_by_client(s.ana, reservation.id, on_day(8))
        .await
        .unwrap();
    let err = service
        .cancel_by_client(s.ana, reservation.id, on_day(8))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn owner_cannot_revive_a_cancelled_booking_over_a_new_one(pool: PgPool) {
    let s = seed(pool).await;
    let reservations = &s.state.reservation_service;
    let owners = &s.state.owner_service;

    let old = reservations.create(s.ana, &booking(s.terrain_id, 14, 16)).await.unwrap();
    reservations
        .cancel_by_client(s.ana, old.id, on_day(8))
        .await
        .unwrap();
    reservations
        .create(s.bruno, &booking(s.terrain_id, 14, 16))
        .await
        .unwrap();

    let err = owners
        .set_reservation_status(s.owner_id, old.id, ReservationStatus::Validee)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn owner_can_revive_a_cancelled_booking_when_slot_is_free(pool: PgPool) {
    let s = seed(pool).await;
    let reservations = &s.state.reservation_service;

    let old = reservations.create(s.ana, &booking(s.terrain_id, 14, 16)).await.unwrap();
    reservations
        .cancel_by_client(s.ana, old.id, on_day(8))
        .await
        .unwrap();

    let revived = s
        .state
        .owner_service
        .set_reservation_status(s.owner_id, old.id, ReservationStatus::Validee)
        .await
        .unwrap();
    assert_eq!(revived.status, ReservationStatus::Validee);
}

#[sqlx::test(migrations = "./migrations")]
async fn dashboard_counts_today_from_the_given_date(pool: PgPool) {
    let s = seed(pool).await;
    s.state
        .reservation_service
        .create(s.ana, &booking(s.terrain_id, 14, 16))
        .await
        .unwrap();

    let dashboard = &s.state.dashboard_service;
    let stats = dashboard.owner_stats(s.owner_id, day()).await.unwrap();
    assert_eq!(stats.counters.reservations_aujourdhui, 1);
    assert_eq!(stats.counters.total_reservations, 1);
    assert_eq!(stats.recent_reservations.len(), 1);

    let stats = dashboard
        .owner_stats(s.owner_id, day() + Duration::days(1))
        .await
        .unwrap();
    assert_eq!(stats.counters.reservations_aujourdhui, 0);
}
