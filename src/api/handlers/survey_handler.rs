use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::survey_dto::*, handlers::extract_visitor_id},
    error::AppError,
};

/// List the surveys this visitor has not completed yet
pub async fn list_surveys(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let visitor_id = extract_visitor_id(&headers);
    debug!("Listing available surveys for visitor {}", visitor_id);

    let listings = state.flow_service.list_available(&visitor_id).await?;

    let surveys: Vec<SurveyInfoResponse> = listings
        .into_iter()
        .map(|l| SurveyInfoResponse {
            survey_id: l.survey_id,
            title: l.title,
            instructions: l.instructions,
            question_count: l.question_count,
        })
        .collect();

    let response = SurveyListResponse {
        total: surveys.len(),
        surveys,
    };

    Ok(Json(response))
}
