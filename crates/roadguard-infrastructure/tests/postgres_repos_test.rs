//! Adapter tests against a live PostgreSQL. They are skipped unless
//! `DATABASE_URL` points at a scratch database.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use roadguard_core::domain::{split_sql_script, NewUser};
use roadguard_core::repositories::{DriverRepository, MaintenanceRepository, UserRepository};
use roadguard_core::DomainError;
use roadguard_infrastructure::{
    PgDriverRepository, PgMaintenanceRepository, PgUserRepository, INIT_SCRIPT,
};
use sqlx::PgPool;
use tokio::sync::OnceCell;

static SCHEMA: OnceCell<()> = OnceCell::const_new();

async fn seeded_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let pool = PgPool::connect(&url).await.unwrap();
    SCHEMA
        .get_or_init(|| async {
            let outcomes = PgMaintenanceRepository::new(pool.clone())
                .execute_statements(&split_sql_script(INIT_SCRIPT))
                .await
                .unwrap();
            assert!(outcomes.iter().all(|o| o.is_success()), "{outcomes:?}");
        })
        .await;
    Some(pool)
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.into(),
        email: email.into(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        first_name: None,
        last_name: None,
    }
}

#[tokio::test]
async fn active_routes_keep_the_newest_in_progress_route_per_driver() {
    let Some(pool) = seeded_pool().await else {
        return;
    };

    // An older "En Curso" route for driver 1 next to the seeded one.
    sqlx::query(
        "INSERT INTO rutas (ruta_id, conductor_id, origen_id, destino_id, fecha_inicio, \
         tiempo_estimado, estado, distancia_km) \
         VALUES (9001, 1, 2, 3, NOW() - INTERVAL '3 days', 60, 'En Curso', 10.0) \
         ON CONFLICT (ruta_id) DO NOTHING",
    )
    .execute(&pool)
    .await
    .unwrap();

    let routes = PgDriverRepository::new(pool.clone())
        .find_active_routes()
        .await
        .unwrap();

    let drivers: HashSet<i32> = routes.iter().map(|r| r.conductor_id).collect();
    assert_eq!(drivers.len(), routes.len());
    assert!(routes.iter().all(|r| r.is_in_progress()));

    let carlos = routes.iter().find(|r| r.conductor_id == 1).unwrap();
    assert_eq!(carlos.ruta_id, 1);
    assert!(!carlos.origen.is_empty());

    sqlx::query("DELETE FROM rutas WHERE ruta_id = 9001")
        .execute(&pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn concurrent_duplicate_registrations_yield_one_conflict() {
    let Some(pool) = seeded_pool().await else {
        return;
    };
    let repo = Arc::new(PgUserRepository::new(pool.clone()));
    let tag = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let username = format!("dup{}", tag);

    let first = new_user(&username, &format!("{}@a.co", username));
    let second = new_user(&username, &format!("{}@b.co", username));
    let (a, b) = tokio::join!(repo.create(&first), repo.create(&second));

    let conflicts: Vec<DomainError> = [a, b].into_iter().filter_map(Result::err).collect();
    assert_eq!(conflicts.len(), 1);
    assert!(matches!(conflicts[0], DomainError::UsernameAlreadyExists(_)));

    let same_email = new_user(&format!("{}x", username), &format!("{}@a.co", username));
    assert!(matches!(
        repo.create(&same_email).await,
        Err(DomainError::EmailAlreadyExists(_))
    ));

    sqlx::query("DELETE FROM users WHERE username LIKE $1")
        .bind(format!("{}%", username))
        .execute(&pool)
        .await
        .unwrap();
}
