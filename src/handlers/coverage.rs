use super::AppState;
use crate::{
    Error, Result,
    types::{CoverageQuery, CoverageResponse, CoverageValues, Fidelity},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_STEP: u32 = 1;

/// Estimated read density for one region of an alignment file
pub async fn get_coverage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CoverageQuery>,
) -> Result<Json<CoverageResponse>> {
    let reference_name = query
        .reference_name
        .ok_or_else(|| Error::InvalidInput("referenceName is required".to_string()))?;
    let start = query.start.unwrap_or(1);
    let end = query
        .end
        .ok_or_else(|| Error::InvalidInput("end is required".to_string()))?;
    let width = query.width.unwrap_or(DEFAULT_WIDTH);
    let step = query.step.unwrap_or(DEFAULT_STEP);

    let session = state.session(&id).await?;

    let name = reference_name.clone();
    let values = tokio::task::spawn_blocking(move || {
        session.estimate_density(&name, start, end, width, step)
    })
    .await
    .map_err(|e| Error::Internal(format!("density task failed: {}", e)))??;

    Ok(Json(CoverageResponse {
        coverage: CoverageValues {
            reference_name,
            from: start,
            to: end,
            step,
            fidelity: Fidelity::for_region(start, end, width),
            value_list: value_list(&values),
            values,
        },
    }))
}

/// Join values truncated to integers with `;`.
fn value_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| (*v as i64).to_string())
        .collect::<Vec<_>>()
        .join(";")
}
