//! Application-wide constants

pub const SESSION_COOKIE_NAME: &str = "roadguard_session";
pub const TOKEN_TYPE_SESSION: &str = "session";

/// Number of past routes returned with a single driver
pub const RECENT_ROUTES_LIMIT: i64 = 5;

/// Window covered by the alert chart on the driver report
pub const ALERT_CHART_WINDOW_DAYS: i64 = 30;

/// Preview length for statements reported by the SQL bootstrap
pub const SQL_PREVIEW_CHARS: usize = 50;

pub const ROUTE_STATUS_IN_PROGRESS: &str = "En Curso";
pub const DRIVER_STATUS_ON_ROUTE: &str = "En Ruta";
pub const DRIVING_STYLE_NORMAL: &str = "Normal";
pub const ALERT_TYPE_DANGEROUS_MANEUVER: &str = "Maniobra Peligrosa";

pub const DEFAULT_DRIVER_IMAGE: &str = "img/img.jpg";
