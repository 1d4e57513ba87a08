// ============================================================================
// RoadGuard API - Page Handlers
// File: crates/roadguard-api/src/handlers/pages.rs
// ============================================================================
//! Server-rendered pages: login, register, forgot-password, dashboard and
//! driver report.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{FixedOffset, Utc};
use rand::Rng;
use roadguard_core::domain::{Alert, AlertKind, Driver};
use roadguard_core::messages;
use roadguard_core::services::{DriverOverview, DriverReport, RegisterInput};
use roadguard_shared::constants::DEFAULT_DRIVER_IMAGE;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{FormPayload, IdQuery, MaybeSession, PageSession};
use crate::handlers::auth::{clear_session_cookie, session_cookie, with_cookie, LoginRequest};
use crate::views::{self, format_spanish_datetime, Notice, ViewError};
use crate::state::AppState;

const NOT_ASSIGNED: &str = "No asignado";
const NOT_AVAILABLE: &str = "No disponible";

// ----------------------------------------------------------------------------
// Forms
// ----------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
}

impl RegisterForm {
    /// First failing rule, in the order the form reports them.
    fn first_error(&self) -> Option<&'static str> {
        let errors = self.validate().err()?;
        let fields = errors.field_errors();
        if fields.contains_key("confirm_password") {
            Some(messages::PASSWORDS_DO_NOT_MATCH)
        } else if fields.contains_key("email") && !self.email.is_empty() {
            Some(messages::INVALID_EMAIL)
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ForgotPasswordForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub new_password: String,
    #[validate(must_match(other = "new_password"))]
    pub confirm_password: String,
}

impl ForgotPasswordForm {
    fn first_error(&self) -> Option<&'static str> {
        let errors = self.validate().err()?;
        let fields = errors.field_errors();
        if fields.contains_key("confirm_password") {
            Some(messages::PASSWORDS_DO_NOT_MATCH)
        } else if fields.contains_key("new_password") {
            Some(messages::PASSWORD_TOO_SHORT)
        } else if fields.contains_key("email") && !self.email.is_empty() {
            Some(messages::INVALID_EMAIL)
        } else {
            None
        }
    }
}

// ----------------------------------------------------------------------------
// View models
// ----------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct LoginPage {
    title: &'static str,
    username: String,
    notice: Option<Notice>,
}

#[derive(Debug, Default, Serialize)]
struct RegisterEcho {
    first_name: String,
    last_name: String,
    username: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct RegisterPage {
    title: &'static str,
    form: RegisterEcho,
    registered: bool,
    notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordPage {
    title: &'static str,
    email: String,
    updated: bool,
    notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
struct DriverSummary {
    id: i32,
    full_name: String,
    image: String,
    age: i32,
    bus_asignado: String,
    placa: String,
    estado: String,
    status_class: &'static str,
    estilo_conduccion: String,
    style_class: &'static str,
    drives_normally: bool,
}

impl From<&Driver> for DriverSummary {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.conductor_id,
            full_name: driver.full_name(),
            image: driver
                .imagen_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DRIVER_IMAGE.to_string()),
            age: driver.age,
            bus_asignado: driver.bus_asignado.clone(),
            placa: driver.placa.clone(),
            estado: driver.estado.clone(),
            status_class: if driver.is_on_route() {
                "status-active"
            } else {
                "status-inactive"
            },
            estilo_conduccion: driver.estilo_conduccion.clone(),
            style_class: if driver.drives_normally() {
                "style-normal"
            } else {
                "style-dangerous"
            },
            drives_normally: driver.drives_normally(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DriverCard {
    #[serde(flatten)]
    driver: DriverSummary,
    origen: String,
    destino: String,
    tiempo_transcurrido: String,
    tiempo_restante: String,
    distancia: String,
    // Display-only figures, regenerated on every render.
    maneuvers: u32,
    maneuver_alerts: u32,
    proximity_alerts: u32,
}

#[derive(Debug, Serialize)]
struct DashboardPage {
    title: &'static str,
    username: String,
    cards: Vec<DriverCard>,
    notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
struct AlertEntry {
    tipo: String,
    descripcion: String,
    fecha: String,
    class: &'static str,
}

impl AlertEntry {
    fn new(alert: &Alert, offset: &FixedOffset) -> Self {
        Self {
            tipo: alert.tipo.clone(),
            descripcion: alert.descripcion.clone(),
            fecha: format_spanish_datetime(alert.fecha.with_timezone(offset)),
            class: match alert.kind() {
                AlertKind::DangerousManeuver => "alert-dangerous",
                AlertKind::Proximity => "alert-warning",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportPage {
    title: &'static str,
    username: String,
    driver: Option<DriverSummary>,
    alerts: Vec<AlertEntry>,
    chart_json: Option<String>,
    notice: Option<Notice>,
}

fn build_cards(overview: Vec<DriverOverview>) -> Vec<DriverCard> {
    let mut rng = rand::rng();
    overview
        .into_iter()
        .map(|DriverOverview { driver, route }| {
            let route = route.as_ref();
            DriverCard {
                driver: DriverSummary::from(&driver),
                origen: route
                    .map(|r| r.route.origen.clone())
                    .unwrap_or_else(|| NOT_ASSIGNED.to_string()),
                destino: route
                    .map(|r| r.route.destino.clone())
                    .unwrap_or_else(|| NOT_ASSIGNED.to_string()),
                tiempo_transcurrido: route
                    .map(|r| r.tiempo_transcurrido.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                tiempo_restante: route
                    .map(|r| r.tiempo_restante.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                distancia: route
                    .map(|r| r.route.distancia_km)
                    .filter(|km| *km != 0.0)
                    .map(|km| format!("{} km", km))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                maneuvers: rng.random_range(5..=34),
                maneuver_alerts: rng.random_range(0..=9),
                proximity_alerts: rng.random_range(0..=7),
            }
        })
        .collect()
}

fn report_page(
    username: String,
    report: DriverReport,
    offset: &FixedOffset,
) -> Result<ReportPage, ViewError> {
    // A driver with only old alerts still gets an (empty) chart.
    let chart_json = if report.alerts.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&report.chart)?)
    };

    Ok(ReportPage {
        title: "Informe del conductor",
        username,
        driver: Some(DriverSummary::from(&report.driver)),
        alerts: report
            .alerts
            .iter()
            .map(|alert| AlertEntry::new(alert, offset))
            .collect(),
        chart_json,
        notice: None,
    })
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

/// GET /
pub async fn root() -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Response, ViewError> {
    if session.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let page = LoginPage {
        title: "Iniciar sesión",
        username: String::new(),
        notice: None,
    };
    Ok(state.views.render(views::LOGIN, &page)?.into_response())
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    FormPayload(form): FormPayload<LoginRequest>,
) -> Result<Response, ViewError> {
    match state.auth.login(&form.username, &form.password).await {
        Ok(result) => {
            let cookie = session_cookie(
                &state.settings,
                &result.token,
                result.session.remaining_seconds(),
            );
            Ok(with_cookie(Redirect::to("/dashboard").into_response(), &cookie))
        }
        Err(e) => {
            let message = ApiError::from(e).message();
            warn!("Login page rejected {}: {}", form.username.trim(), message);
            let page = LoginPage {
                title: "Iniciar sesión",
                username: form.username.trim().to_string(),
                notice: Some(Notice::error(message)),
            };
            Ok(state.views.render(views::LOGIN, &page)?.into_response())
        }
    }
}

/// GET /register
pub async fn register_page(State(state): State<AppState>) -> Result<Response, ViewError> {
    let page = RegisterPage {
        title: "Registro",
        form: RegisterEcho::default(),
        registered: false,
        notice: None,
    };
    Ok(state.views.render(views::REGISTER, &page)?.into_response())
}

/// POST /register
pub async fn register_submit(
    State(state): State<AppState>,
    FormPayload(mut form): FormPayload<RegisterForm>,
) -> Result<Response, ViewError> {
    form.username = form.username.trim().to_string();
    form.email = form.email.trim().to_string();

    let echo = RegisterEcho {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        username: form.username.clone(),
        email: form.email.clone(),
    };

    let outcome = match form.first_error() {
        Some(message) => Err(message.to_string()),
        None => state
            .auth
            .register(RegisterInput {
                username: form.username,
                email: form.email,
                password: form.password,
                confirm_password: Some(form.confirm_password),
                first_name: Some(form.first_name),
                last_name: Some(form.last_name),
            })
            .await
            .map_err(|e| ApiError::from(e).message()),
    };

    let page = match outcome {
        Ok(_) => RegisterPage {
            title: "Registro",
            form: RegisterEcho::default(),
            registered: true,
            notice: Some(Notice::success(messages::REGISTER_SUCCESS)),
        },
        Err(message) => {
            warn!("Registration form rejected: {}", message);
            RegisterPage {
                title: "Registro",
                form: echo,
                registered: false,
                notice: Some(Notice::error(message)),
            }
        }
    };
    Ok(state.views.render(views::REGISTER, &page)?.into_response())
}

/// GET /forgot-password
pub async fn forgot_password_page(State(state): State<AppState>) -> Result<Response, ViewError> {
    let page = ForgotPasswordPage {
        title: "Cambiar contraseña",
        email: String::new(),
        updated: false,
        notice: None,
    };
    Ok(state.views.render(views::FORGOT_PASSWORD, &page)?.into_response())
}

/// POST /forgot-password
pub async fn forgot_password_submit(
    State(state): State<AppState>,
    FormPayload(mut form): FormPayload<ForgotPasswordForm>,
) -> Result<Response, ViewError> {
    form.email = form.email.trim().to_string();

    let outcome = match form.first_error() {
        Some(message) => Err(message.to_string()),
        None => state
            .auth
            .reset_password(&form.email, &form.new_password, Some(&form.confirm_password))
            .await
            .map_err(|e| ApiError::from(e).message()),
    };

    let page = match outcome {
        Ok(()) => ForgotPasswordPage {
            title: "Cambiar contraseña",
            email: String::new(),
            updated: true,
            notice: Some(Notice::success(messages::RESET_SUCCESS)),
        },
        Err(message) => ForgotPasswordPage {
            title: "Cambiar contraseña",
            email: form.email,
            updated: false,
            notice: Some(Notice::error(message)),
        },
    };
    Ok(state.views.render(views::FORGOT_PASSWORD, &page)?.into_response())
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    PageSession(session): PageSession,
) -> Result<Response, ViewError> {
    let (cards, notice) = match state.drivers.list_drivers(Utc::now()).await {
        Ok(overview) => (build_cards(overview), None),
        Err(e) => {
            let message = ApiError::from_domain(e, messages::CTX_LIST_DRIVERS).message();
            warn!("Dashboard without drivers: {}", message);
            (Vec::new(), Some(Notice::error(message)))
        }
    };

    let page = DashboardPage {
        title: "Panel de conductores",
        username: session.username,
        cards,
        notice,
    };
    Ok(state.views.render(views::DASHBOARD, &page)?.into_response())
}

/// GET /driver-report?id=N
pub async fn driver_report(
    State(state): State<AppState>,
    PageSession(session): PageSession,
    query: IdQuery,
) -> Result<Response, ViewError> {
    let Some(id) = query.driver_id() else {
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let page = match state.alerts.driver_report(id, Utc::now()).await {
        Ok(report) => report_page(session.username, report, &state.settings.display_offset)?,
        Err(e) => {
            let message = ApiError::from_domain(e, messages::CTX_GET_ALERTS).message();
            ReportPage {
                title: "Informe del conductor",
                username: session.username,
                driver: None,
                alerts: Vec::new(),
                chart_json: None,
                notice: Some(Notice::error(format!(
                    "{}: {}",
                    messages::LOAD_DATA_ERROR,
                    message
                ))),
            }
        }
    };
    Ok(state.views.render(views::DRIVER_REPORT, &page)?.into_response())
}

/// POST /logout
pub async fn logout_page(State(state): State<AppState>) -> Response {
    with_cookie(
        Redirect::to("/login").into_response(),
        &clear_session_cookie(&state.settings),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use roadguard_core::domain::{AlertChart, Route};

    fn driver(estilo: &str, imagen_url: Option<&str>) -> Driver {
        Driver {
            conductor_id: 8,
            first_name: "Laura".into(),
            last_name: "Martínez".into(),
            age: 35,
            bus_asignado: "B-215".into(),
            placa: "SNQ318".into(),
            estado: "En Ruta".into(),
            estilo_conduccion: estilo.into(),
            imagen_url: imagen_url.map(str::to_string),
        }
    }

    #[test]
    fn card_without_route_uses_placeholders() {
        let cards = build_cards(vec![DriverOverview {
            driver: driver("Agresivo", None),
            route: None,
        }]);
        let card = &cards[0];

        assert_eq!(card.driver.image, "img/img.jpg");
        assert_eq!(card.driver.status_class, "status-active");
        assert_eq!(card.driver.style_class, "style-dangerous");
        assert_eq!(card.origen, "No asignado");
        assert_eq!(card.tiempo_restante, "No disponible");
        assert_eq!(card.distancia, "No disponible");
        assert!((5..=34).contains(&card.maneuvers));
        assert!(card.maneuver_alerts <= 9);
        assert!(card.proximity_alerts <= 7);
    }

    #[test]
    fn card_with_route_shows_timing_and_distance() {
        let start = Utc.with_ymd_and_hms(2025, 5, 3, 8, 0, 0).unwrap();
        let route = Route {
            ruta_id: 1,
            conductor_id: 8,
            origen_id: 2,
            destino_id: 3,
            fecha_inicio: start,
            tiempo_estimado: 540,
            estado: "En Curso".into(),
            distancia_km: 415.0,
            origen: "Medellín".into(),
            destino: "Cali".into(),
        };
        let cards = build_cards(vec![DriverOverview {
            driver: driver("Normal", Some("img/laura.jpg")),
            route: Some(route.into_active(start + Duration::minutes(20))),
        }]);
        let card = &cards[0];

        assert_eq!(card.driver.image, "img/laura.jpg");
        assert_eq!(card.driver.style_class, "style-normal");
        assert_eq!(card.destino, "Cali");
        assert_eq!(card.tiempo_transcurrido, "20 minuto(s)");
        assert_eq!(card.tiempo_restante, "8 hora(s) 40 minuto(s)");
        assert_eq!(card.distancia, "415 km");
    }

    #[test]
    fn forgot_password_checks_match_before_length() {
        let form = ForgotPasswordForm {
            email: "a@roadguard.co".into(),
            new_password: "abc".into(),
            confirm_password: "abd".into(),
        };
        assert_eq!(form.first_error(), Some(messages::PASSWORDS_DO_NOT_MATCH));

        let form = ForgotPasswordForm {
            confirm_password: "abc".into(),
            ..form
        };
        assert_eq!(form.first_error(), Some(messages::PASSWORD_TOO_SHORT));
    }

    #[test]
    fn register_form_rejects_malformed_email() {
        let form = RegisterForm {
            username: "cruiz".into(),
            email: "no-es-correo".into(),
            password: "secreta".into(),
            confirm_password: "secreta".into(),
            ..Default::default()
        };
        assert_eq!(form.first_error(), Some(messages::INVALID_EMAIL));
    }

    #[test]
    fn alert_entries_get_severity_class_and_spanish_date() {
        let alert = Alert {
            alerta_id: 1,
            conductor_id: 8,
            tipo: "Maniobra Peligrosa".into(),
            descripcion: "Frenado brusco".into(),
            fecha: Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap(),
        };
        let entry = AlertEntry::new(&alert, &FixedOffset::east_opt(0).unwrap());
        assert_eq!(entry.class, "alert-dangerous");
        assert_eq!(entry.fecha, "18 de octubre de 2026, 14:05");

        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            AlertEntry::new(&alert, &bogota).fecha,
            "18 de octubre de 2026, 09:05"
        );
    }

    #[test]
    fn report_with_only_old_alerts_still_renders_a_chart() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let alerts = vec![Alert {
            alerta_id: 1,
            conductor_id: 8,
            tipo: "Proximidad".into(),
            descripcion: "Vehículo cercano".into(),
            fecha: now - Duration::days(40),
        }];
        let utc = FixedOffset::east_opt(0).unwrap();
        let report = DriverReport {
            driver: driver("Normal", None),
            chart: AlertChart::from_alerts(&alerts, now, utc),
            alerts,
        };

        let page = report_page("admin".into(), report, &utc).unwrap();
        assert_eq!(page.alerts.len(), 1);
        let chart: serde_json::Value = serde_json::from_str(&page.chart_json.unwrap()).unwrap();
        assert_eq!(chart["labels"], serde_json::json!([]));
    }

    #[test]
    fn report_without_alerts_has_no_chart() {
        let report = DriverReport {
            driver: driver("Normal", None),
            alerts: vec![],
            chart: AlertChart::default(),
        };
        let page = report_page("admin".into(), report, &FixedOffset::east_opt(0).unwrap()).unwrap();
        assert!(page.chart_json.is_none());
    }
}
