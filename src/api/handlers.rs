//! Request handlers for the API endpoints.

use std::fmt;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;

use super::AppState;
use super::render;
use super::types::{AssetResponse, ErrorResponse};
use crate::reducer::ReduceError;
use crate::resolver::{ResolveError, resolve};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Renders the reduced demand of an asset as an HTML page.
///
/// `GET /asset/{asset_id}` → 200 + HTML
/// `GET /asset/999` (unknown) → 400 + `ErrorResponse`
/// `GET /asset/abc` (not an id) → 404 + `ErrorResponse`
pub async fn get_asset_page(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let response = process(&state, &raw_id)?;
    Ok(Html(render::asset_page(&response)))
}

/// Returns the reduced demand of an asset as JSON.
///
/// `GET /api/asset/{asset_id}` → 200 + `AssetResponse` JSON
pub async fn get_asset_json(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<AssetResponse>, ApiError> {
    process(&state, &raw_id).map(Json)
}

/// Resolves and reduces one asset, mapping every failure to a uniform 400.
///
/// Only digit strings are asset ids; anything else is a 404 like an
/// unmatched route. The underlying error is logged and never sent to the
/// caller.
fn process(state: &AppState, raw_id: &str) -> Result<AssetResponse, ApiError> {
    if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err((StatusCode::NOT_FOUND, Json(ErrorResponse::not_found())));
    }

    tracing::debug!(asset_id = raw_id, "asset lookup");
    lookup(state, raw_id).map_err(|err| {
        tracing::error!(asset_id = raw_id, %err, "error processing asset");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::invalid_asset()))
    })
}

fn lookup(state: &AppState, raw_id: &str) -> Result<AssetResponse, LookupError> {
    let asset_id: u32 = raw_id
        .parse()
        .map_err(|_| LookupError::IdOutOfRange(raw_id.to_string()))?;
    let record = resolve(&state.store, asset_id)?;
    let reduced = state.reducer.reduce(&record)?;
    Ok(AssetResponse::new(record.name, reduced))
}

#[derive(Debug)]
enum LookupError {
    /// Digit string too large for an asset id.
    IdOutOfRange(String),
    Resolve(ResolveError),
    Reduce(ReduceError),
}

impl From<ResolveError> for LookupError {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl From<ReduceError> for LookupError {
    fn from(err: ReduceError) -> Self {
        Self::Reduce(err)
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdOutOfRange(raw) => write!(f, "asset id {raw} is out of range"),
            Self::Resolve(err) => fmt::Display::fmt(err, f),
            Self::Reduce(err) => fmt::Display::fmt(err, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::reducer::{ELECTRICITY_SYSTEM, Reducer, ZeroDemandPolicy};
    use crate::store::EnergyStore;

    const DATA: &str = r#"{
        "asset": [{"name": "Office"}, {"name": "Kiosk"}, {"name": "Orphan"}],
        "energy_type": [{"name": "heat"}, {"name": "electricity"}, {"name": "gas"}],
        "energy_system": [{"name": "electricity"}, {"name": "gas"}],
        "asset_energy_demand": [
            {"asset": 1, "energy_type": 1, "energy_demand": 10},
            {"asset": 1, "energy_type": 3, "energy_demand": 5},
            {"asset": 2, "energy_type": 2, "energy_demand": 2},
            {"asset": 3, "energy_type": 1, "energy_demand": 1}
        ],
        "asset_energy_output": [
            {"asset": 1, "energy_output": 6},
            {"asset": 2, "energy_output": 2}
        ],
        "asset_energy_system": [
            {"asset": 1, "energy_type": 1, "energy_system": 1},
            {"asset": 1, "energy_type": 3, "energy_system": 2},
            {"asset": 2, "energy_type": 2, "energy_system": 1},
            {"asset": 3, "energy_type": 1, "energy_system": 5}
        ]
    }"#;

    fn make_test_state(zero_demand: ZeroDemandPolicy) -> Arc<AppState> {
        Arc::new(AppState {
            store: EnergyStore::from_json_str(DATA).unwrap(),
            reducer: Reducer::new(ELECTRICITY_SYSTEM, zero_demand),
        })
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, Vec<u8>) {
        let app = router(state);
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn asset_page_returns_200_html() {
        let (status, body) = get(make_test_state(ZeroDemandPolicy::default()), "/asset/1").await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Office"));
        assert!(html.contains("66.67"));
        assert!(html.contains("<td>heat</td>"));
    }

    #[tokio::test]
    async fn asset_json_returns_reduced_figures() {
        let (status, body) =
            get(make_test_state(ZeroDemandPolicy::default()), "/api/asset/1").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "Office");
        assert_eq!(json["energy_demand"]["heat"], 4.0);
        assert_eq!(json["energy_demand"]["gas"], 5.0);
        assert_eq!(json["total_energy_demand"], 9.0);
        assert_eq!(json["energy_output_reduction"], "66.67");
    }

    #[tokio::test]
    async fn unknown_asset_returns_400() {
        for uri in ["/asset/999", "/asset/0", "/api/asset/999"] {
            let (status, body) = get(make_test_state(ZeroDemandPolicy::default()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"], "Invalid asset ID or data format");
        }
    }

    #[tokio::test]
    async fn id_beyond_u32_returns_uniform_400() {
        for uri in [
            "/asset/4294967296",
            "/api/asset/4294967296",
            "/asset/99999999999999999999999999",
        ] {
            let (status, body) = get(make_test_state(ZeroDemandPolicy::default()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                String::from_utf8(body).unwrap(),
                r#"{"error":"Invalid asset ID or data format"}"#,
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn dangling_reference_returns_400() {
        let (status, _) = get(make_test_state(ZeroDemandPolicy::default()), "/asset/3").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        for uri in ["/asset/abc", "/asset/-1", "/asset/1.5", "/api/asset/x1"] {
            let (status, _) = get(make_test_state(ZeroDemandPolicy::default()), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn zero_total_demand_follows_policy() {
        let (status, body) =
            get(make_test_state(ZeroDemandPolicy::NotAvailable), "/api/asset/2").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total_energy_demand"], 0.0);
        assert_eq!(json["energy_output_reduction"], "N/A");

        let (status, _) = get(make_test_state(ZeroDemandPolicy::Error), "/api/asset/2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
