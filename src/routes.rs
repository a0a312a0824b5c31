use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::{
    models::SteamIdBody,
    response::{self, ApiError},
    steam::{is_numeric_id, SteamClient},
    SharedAppState,
};

const VANITY_FAILURE: &str = "Unable to verify id";
const OWNED_GAMES_FAILURE: &str = "Unable to query owned games";

/// Resolve a vanity name (or pass through a SteamID64) to a SteamID64.
pub async fn resolve_steam_id(
    steam: &SteamClient,
    key: &str,
    vanity: &str,
) -> Result<Response, ApiError> {
    if vanity.is_empty() {
        return Err(ApiError::InvalidQuery);
    }

    tracing::debug!("[resolve_steam_id] vanity: {}", vanity);

    let resolved = match steam.resolve_vanity_url(key, vanity).await {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("💥 Failed to resolve vanity {:?}: {}", vanity, e);
            return Err(ApiError::Upstream(VANITY_FAILURE));
        }
    };

    // the caller may have passed a steamid already
    let steamid = match resolved.resolved_id() {
        Some(id) => id.to_string(),
        None if is_numeric_id(vanity) => vanity.to_string(),
        None => return Err(ApiError::NotFound),
    };

    Ok(response::json(&SteamIdBody { steamid }, StatusCode::OK))
}

/// Fetch the owned games of a SteamID64, free games and app info included.
pub async fn fetch_owned_games(
    steam: &SteamClient,
    key: &str,
    steamid: &str,
) -> Result<Response, ApiError> {
    if steamid.is_empty() {
        return Err(ApiError::InvalidQuery);
    }

    tracing::debug!("[fetch_owned_games] steamid: {}", steamid);

    let owned = match steam.get_owned_games(key, steamid).await {
        Ok(owned) => owned,
        Err(e) => {
            tracing::error!("💥 Failed to query owned games of {:?}: {}", steamid, e);
            return Err(ApiError::Upstream(OWNED_GAMES_FAILURE));
        }
    };

    match owned.into_owned_games() {
        Some(body) => {
            tracing::debug!("[fetch_owned_games] {} games", body.game_count);
            Ok(response::json(&body, StatusCode::OK))
        }
        None => Err(ApiError::NotFound),
    }
}

/// The path segment right after `route`, percent-decoded.
///
/// A segment that doesn't decode to UTF-8 is passed on as written.
fn id_param(uri: &Uri, route: &str) -> String {
    let raw = uri
        .path()
        .split('/')
        .skip_while(|segment| *segment != route)
        .nth(1)
        .unwrap_or_default();

    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

async fn steamid_query(
    State(state): State<SharedAppState>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let vanity = id_param(&uri, "steamid-query");
    resolve_steam_id(&state.steam, &state.api_key, &vanity).await
}

async fn owned_games(
    State(state): State<SharedAppState>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let steamid = id_param(&uri, "owned-games");
    fetch_owned_games(&state.steam, &state.api_key, &steamid).await
}

async fn missing_query() -> ApiError {
    ApiError::InvalidQuery
}

pub async fn handle_404(url: Uri) -> impl IntoResponse {
    tracing::info!("404: {:?}", url);
    ApiError::NotFound
}

pub fn api_routes(state: SharedAppState) -> Router<SharedAppState> {
    Router::new()
        .route("/steamid-query", any(missing_query))
        .route("/steamid-query/", any(missing_query))
        .route("/steamid-query/{id}", any(steamid_query))
        .route("/steamid-query/{id}/{*rest}", any(steamid_query))
        .route("/owned-games", any(missing_query))
        .route("/owned-games/", any(missing_query))
        .route("/owned-games/{id}", any(owned_games))
        .route("/owned-games/{id}/{*rest}", any(owned_games))
        .with_state(state)
}
