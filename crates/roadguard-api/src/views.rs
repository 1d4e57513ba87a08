//! Server-rendered pages (handlebars)

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use handlebars::Handlebars;
use roadguard_core::messages;
use serde::Serialize;
use thiserror::Error;

pub const LOGIN: &str = "login";
pub const REGISTER: &str = "register";
pub const FORGOT_PASSWORD: &str = "forgot_password";
pub const DASHBOARD: &str = "dashboard";
pub const DRIVER_REPORT: &str = "driver_report";

const TEMPLATES: [(&str, &str); 5] = [
    (LOGIN, include_str!("../templates/login.hbs")),
    (REGISTER, include_str!("../templates/register.hbs")),
    (FORGOT_PASSWORD, include_str!("../templates/forgot_password.hbs")),
    (DASHBOARD, include_str!("../templates/dashboard.hbs")),
    (DRIVER_REPORT, include_str!("../templates/driver_report.hbs")),
];

const PARTIALS: [(&str, &str); 2] = [
    ("head", include_str!("../templates/partials/head.hbs")),
    ("notice", include_str!("../templates/partials/notice.hbs")),
];

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        tracing::error!("Page rendering failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR).into_response()
    }
}

/// Compiled page templates.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();

        for (name, source) in PARTIALS {
            registry
                .register_partial(name, source)
                .map_err(Box::new)?;
        }
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(Box::new)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, ViewError> {
        Ok(Html(self.registry.render(name, data)?))
    }
}

/// Message box shown above a form.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub text: String,
    pub kind: &'static str,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: "error",
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: "success",
        }
    }
}

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// `18 de octubre de 2026, 14:05`
pub fn format_spanish_datetime<Tz: TimeZone>(value: DateTime<Tz>) -> String {
    let month = MONTHS[value.month0() as usize];
    format!(
        "{} de {} de {}, {:02}:{:02}",
        value.day(),
        month,
        value.year(),
        value.hour(),
        value.minute()
    )
}
