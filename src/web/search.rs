//! Catalog search handler.

use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::state::AppState;
use crate::unipa::Anno;
use crate::web::error::{ApiError, upstream_error};
use crate::web::routes::{cache, with_cache_control};

#[derive(Deserialize)]
pub struct SearchParams {
    /// Collected as a list so a repeated `anno` can be rejected as ambiguous.
    #[serde(default)]
    pub anno: Vec<String>,
}

/// `GET /api/unipa/search?anno=YYYY` (also accepts `anno=YYYY/YYYY`)
pub(super) async fn search_unipa(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let anno = match params.anno.as_slice() {
        [raw] => raw.parse::<Anno>().map_err(|_| ApiError::invalid_anno())?,
        // Missing and repeated parameters are both rejected outright.
        _ => return Err(ApiError::missing_anno()),
    };

    let results = state
        .unipa
        .search(anno)
        .await
        .map_err(|e| upstream_error("Catalog search", e))?;

    Ok(with_cache_control(results, cache::SEARCH))
}
