//! Shared fixtures for the router tests: in-memory repositories and request
//! helpers.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use roadguard_api::{build_router, ApiSettings, AppState, Repositories};
use roadguard_core::domain::{Alert, Driver, NewUser, Route, StatementOutcome, User};
use roadguard_core::repositories::{
    AlertRepository, DriverRepository, MaintenanceRepository, UserRepository,
};
use roadguard_core::DomainError;
use roadguard_security::{JwtService, PasswordService};
use serde_json::Value;
use tower::ServiceExt;

pub const COOKIE_NAME: &str = "roadguard_session";

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn seed(&self, username: &str, email: &str, password: &str) {
        let mut users = self.users.lock().unwrap();
        let user_id = users.len() as i32 + 1;
        users.push(User {
            user_id,
            username: username.into(),
            password: PasswordService::hash(password).unwrap(),
            first_name: Some("María".into()),
            last_name: Some("López".into()),
            email: email.into(),
        });
    }

    pub fn stored_hash(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password.clone())
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists(user.username.clone()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        let created = User {
            user_id: users.len() as i32 + 1,
            username: user.username.clone(),
            password: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Drivers, routes and alerts, optionally failing every query.
#[derive(Default)]
pub struct InMemoryFleet {
    pub drivers: Vec<Driver>,
    pub routes: Vec<Route>,
    pub alerts: Vec<Alert>,
    pub failure: Option<String>,
}

impl InMemoryFleet {
    fn check(&self) -> Result<(), DomainError> {
        match &self.failure {
            Some(detail) => Err(DomainError::DatabaseError(detail.clone())),
            None => Ok(()),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            failure: Some(detail.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl DriverRepository for InMemoryFleet {
    async fn list_drivers(&self) -> Result<Vec<Driver>, DomainError> {
        self.check()?;
        let mut drivers = self.drivers.clone();
        drivers.sort_by(|a, b| {
            b.estado
                .cmp(&a.estado)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(drivers)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Driver>, DomainError> {
        self.check()?;
        Ok(self.drivers.iter().find(|d| d.conductor_id == id).cloned())
    }

    async fn find_active_routes(&self) -> Result<Vec<Route>, DomainError> {
        self.check()?;
        Ok(self
            .routes
            .iter()
            .filter(|r| r.is_in_progress())
            .cloned()
            .collect())
    }

    async fn find_recent_routes(&self, driver_id: i32, limit: i64) -> Result<Vec<Route>, DomainError> {
        self.check()?;
        let mut routes: Vec<Route> = self
            .routes
            .iter()
            .filter(|r| r.conductor_id == driver_id)
            .cloned()
            .collect();
        routes.sort_by(|a, b| b.fecha_inicio.cmp(&a.fecha_inicio));
        routes.truncate(limit as usize);
        Ok(routes)
    }
}

#[async_trait]
impl AlertRepository for InMemoryFleet {
    async fn find_by_driver(&self, driver_id: i32) -> Result<Vec<Alert>, DomainError> {
        self.check()?;
        Ok(self
            .alerts
            .iter()
            .filter(|a| a.conductor_id == driver_id)
            .cloned()
            .collect())
    }
}

pub struct StubMaintenance {
    pub reachable: bool,
}

#[async_trait]
impl MaintenanceRepository for StubMaintenance {
    async fn ping(&self) -> Result<(), DomainError> {
        if self.reachable {
            Ok(())
        } else {
            Err(DomainError::ConnectionError("connection refused".into()))
        }
    }

    async fn execute_statements(
        &self,
        statements: &[String],
    ) -> Result<Vec<StatementOutcome>, DomainError> {
        if !self.reachable {
            return Err(DomainError::ConnectionError("connection refused".into()));
        }
        Ok(statements
            .iter()
            .map(|s| StatementOutcome::success(s))
            .collect())
    }
}

pub fn driver(id: i32, first_name: &str, estado: &str, estilo: &str) -> Driver {
    Driver {
        conductor_id: id,
        first_name: first_name.into(),
        last_name: "Pérez".into(),
        age: 30 + id,
        bus_asignado: format!("B-{}", 100 + id),
        placa: format!("PLC{:03}", id),
        estado: estado.into(),
        estilo_conduccion: estilo.into(),
        imagen_url: None,
    }
}

pub fn route(id: i32, driver_id: i32, estado: &str, started: DateTime<Utc>, estimate: i32) -> Route {
    Route {
        ruta_id: id,
        conductor_id: driver_id,
        origen_id: 1,
        destino_id: 2,
        fecha_inicio: started,
        tiempo_estimado: estimate,
        estado: estado.into(),
        distancia_km: 140.5,
        origen: "Bogotá".into(),
        destino: "Tunja".into(),
    }
}

pub fn alert(id: i32, driver_id: i32, tipo: &str, fecha: DateTime<Utc>) -> Alert {
    Alert {
        alerta_id: id,
        conductor_id: driver_id,
        tipo: tipo.into(),
        descripcion: format!("Evento {}", id),
        fecha,
    }
}

/// Two drivers: Carlos (1) on an "En Curso" route, Andrés (2) idle.
pub fn sample_fleet() -> InMemoryFleet {
    let now = Utc::now();
    let mut routes = vec![
        route(1, 1, "En Curso", now - Duration::minutes(95), 180),
        route(2, 1, "Finalizada", now - Duration::days(3), 120),
    ];
    for i in 0..6 {
        routes.push(route(10 + i, 2, "Finalizada", now - Duration::days(10 + i as i64), 60));
    }

    InMemoryFleet {
        drivers: vec![
            driver(1, "Carlos", "En Ruta", "Normal"),
            driver(2, "Andrés", "Disponible", "Agresivo"),
        ],
        routes,
        alerts: vec![
            alert(1, 1, "Proximidad", now - Duration::days(2)),
            alert(2, 1, "Maniobra Peligrosa", now - Duration::hours(1)),
            alert(3, 1, "Maniobra Peligrosa", now - Duration::days(40)),
        ],
        failure: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUsers>,
    pub jwt: Arc<JwtService>,
}

impl TestApp {
    pub fn new(fleet: InMemoryFleet) -> Self {
        Self::with_options(fleet, true, true)
    }

    pub fn with_options(fleet: InMemoryFleet, allow_init_script: bool, db_reachable: bool) -> Self {
        let users = Arc::new(InMemoryUsers::default());
        users.seed("mlopez", "mlopez@roadguard.co", "clave123");

        let fleet = Arc::new(fleet);
        let jwt = Arc::new(JwtService::new("router-test-secret", 3600));
        let state = AppState::new(
            Repositories {
                users: users.clone(),
                drivers: fleet.clone(),
                alerts: fleet,
                maintenance: Arc::new(StubMaintenance {
                    reachable: db_reachable,
                }),
            },
            jwt.clone(),
            ApiSettings {
                cookie_name: COOKIE_NAME.into(),
                cookie_secure: false,
                allow_init_script,
                static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../static").into(),
                display_offset: FixedOffset::east_opt(0).unwrap(),
            },
            "CREATE TABLE IF NOT EXISTS ciudades (ciudad_id SERIAL PRIMARY KEY, nombre VARCHAR(100) NOT NULL);\nSELECT 1;",
        )
        .unwrap();

        Self {
            router: build_router(state),
            users,
            jwt,
        }
    }

    /// Cookie header of a freshly issued session for `mlopez`.
    pub fn session_cookie(&self) -> String {
        let (_, token) = self.jwt.issue_session(1, "mlopez", Some("María"), None).unwrap();
        format!("{}={}", COOKIE_NAME, token)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_session(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .header(header::COOKIE, self.session_cookie())
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
