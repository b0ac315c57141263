//! Home page: catalog counts and the session's visit counter

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, services::catalog::CatalogCounts, AppState};

#[derive(Serialize, ToSchema)]
pub struct HomePage {
    #[serde(flatten)]
    pub counts: CatalogCounts,
    /// Visits from this session before the current one
    pub num_visits: i64,
}

/// Reuse the session named by the cookie, or start a new one
fn session_id(jar: &CookieJar, cookie_name: &str) -> (Uuid, bool) {
    match jar
        .get(cookie_name)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    }
}

/// Home page
#[utoipa::path(
    get,
    path = "/index",
    tag = "home",
    responses(
        (status = 200, description = "Catalog counts and visit count", body = HomePage)
    )
)]
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> AppResult<(CookieJar, Json<HomePage>)> {
    let cookie_name = state.config.session.cookie_name.clone();
    let (session, fresh) = session_id(&jar, &cookie_name);
    if fresh {
        tracing::debug!("Starting session {}", session);
    }

    let counts = state.services.catalog.counts().await?;
    let num_visits = state.services.sessions.record_visit(&session.to_string()).await?;

    let cookie = Cookie::build((cookie_name, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(HomePage { counts, num_visits })))
}
