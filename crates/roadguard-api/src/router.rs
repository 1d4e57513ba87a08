//! Route table

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{alerts, auth, bootstrap, drivers, health, method_not_allowed, pages};
use crate::state::AppState;

/// JSON endpoints under `/backend`. Each one also answers on its legacy
/// `.php` path.
fn backend_routes() -> Router<AppState> {
    let endpoints: [(&str, MethodRouter<AppState>); 10] = [
        ("login", post(auth::login)),
        ("register", post(auth::register)),
        ("reset-password", post(auth::reset_password)),
        ("logout", post(auth::logout)),
        ("session", get(auth::session)),
        ("get_drivers", get(drivers::get_drivers)),
        ("get_driver", get(drivers::get_driver)),
        ("get_driver_alerts", get(alerts::get_driver_alerts)),
        ("get_driver_report", get(alerts::get_driver_report)),
        (
            "execute-sql",
            get(bootstrap::execute_sql).post(bootstrap::execute_sql),
        ),
    ];

    endpoints
        .into_iter()
        .fold(Router::new(), |router, (name, endpoint)| {
            let endpoint = endpoint.fallback(method_not_allowed);
            router
                .route(&format!("/{}", name), endpoint.clone())
                .route(&format!("/{}.php", name), endpoint)
        })
}

fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route(
            "/register",
            get(pages::register_page).post(pages::register_submit),
        )
        .route(
            "/forgot-password",
            get(pages::forgot_password_page).post(pages::forgot_password_submit),
        )
        .route("/dashboard", get(pages::dashboard))
        .route("/driver-report", get(pages::driver_report))
        .route("/logout", post(pages::logout_page))
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.settings.static_dir);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/backend", backend_routes())
        .merge(page_routes())
        // Static assets (css, img)
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
