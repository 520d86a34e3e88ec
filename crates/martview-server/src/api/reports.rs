use axum::{extract::State, response::IntoResponse, Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use martview_core::{ClientConfig, DateRange};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateReportRequest {
    client: ClientConfig,
    date_range: DateRange,
}

/// POST /api/reports/generate
///
/// Body: `{ "client": ClientConfig, "dateRange": DateRange }`. Generation
/// itself never fails; only malformed input is rejected.
pub(super) async fn generate_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&request, &req_id.0)?;

    let report = state
        .builder
        .generate(&request.client, &request.date_range)
        .await;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn validate(request: &GenerateReportRequest, request_id: &str) -> Result<(), ApiError> {
    if request.client.client_name.trim().is_empty() {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "client.clientName must not be empty",
        ));
    }
    let start = parse_date(&request.date_range.start_date, "startDate", request_id)?;
    let end = parse_date(&request.date_range.end_date, "endDate", request_id)?;
    if start > end {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "dateRange.startDate must not be after dateRange.endDate",
        ));
    }
    Ok(())
}

fn parse_date(value: &str, field: &str, request_id: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::new(
            request_id,
            "validation_error",
            format!("dateRange.{field} must be an ISO date (YYYY-MM-DD), got '{value}'"),
        )
    })
}
