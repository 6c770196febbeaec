use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::debug;
use validator::Validate;

use crate::{
    api::{app_state::AppState, dto::flow_dto::*, handlers::extract_visitor_id},
    error::AppError,
    services::flow::{NextStep, QuestionView, StartOutcome},
};

/// Begin an attempt at the given survey.
/// The completion marker is checked here and passed into the flow service.
pub async fn begin_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let visitor_id = extract_visitor_id(&headers);
    debug!("Beginning survey {} for visitor {}", survey_id, visitor_id);

    let already_done = state.marker_store.is_done(&visitor_id, &survey_id).await?;
    let outcome = state
        .flow_service
        .start_attempt(&visitor_id, &survey_id, already_done)
        .await?;

    let (status_code, response) = match outcome {
        StartOutcome::AlreadyDone => (
            StatusCode::OK,
            BeginSurveyResponse {
                survey_id,
                status: "already_done".to_string(),
                next_index: None,
            },
        ),
        StartOutcome::Started { first_index } => {
            state.metrics.record_attempt_started();
            (
                StatusCode::CREATED,
                BeginSurveyResponse {
                    survey_id,
                    status: "started".to_string(),
                    next_index: Some(first_index),
                },
            )
        }
    };

    Ok((status_code, Json(response)))
}

/// Show the question at the requested index (read-only)
pub async fn show_question(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let visitor_id = extract_visitor_id(&headers);
    debug!("Showing question {} for visitor {}", index, visitor_id);

    let view = state.flow_service.show_question(&visitor_id, index).await?;

    let response = match view {
        QuestionView::Complete => ShowQuestionResponse {
            status: "complete".to_string(),
            question: None,
            redirect_to: None,
            warning: None,
        },
        QuestionView::Question {
            index,
            total,
            question,
        } => ShowQuestionResponse {
            status: "question".to_string(),
            question: Some(QuestionPayload {
                index,
                total,
                prompt: question.prompt,
                choices: question.choices,
            }),
            redirect_to: None,
            warning: None,
        },
        QuestionView::Redirect { to, warning } => ShowQuestionResponse {
            status: "redirect".to_string(),
            question: None,
            redirect_to: Some(to),
            warning: Some(warning),
        },
    };

    Ok(Json(response))
}

/// Submit the answer for the question at the given index
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let visitor_id = extract_visitor_id(&headers);
    debug!(
        "Submitting answer for question {} from visitor {}",
        index, visitor_id
    );

    let next = state
        .flow_service
        .submit_answer(&visitor_id, index, &request.choice)
        .await?;
    state.metrics.record_answer();

    let next_index = match next {
        NextStep::Question { index } => index,
        // Submitting never detects completion itself; the next
        // question view does. Kept for exhaustiveness.
        NextStep::Summary => index + 1,
    };

    Ok(Json(SubmitAnswerResponse { next_index }))
}

/// Skip the current question
pub async fn skip_question(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let visitor_id = extract_visitor_id(&headers);
    debug!("Skipping question for visitor {}", visitor_id);

    let next = state.flow_service.skip_question(&visitor_id).await?;
    state.metrics.record_skip();

    let response = match next {
        NextStep::Question { index } => SkipQuestionResponse {
            status: "question".to_string(),
            next_index: Some(index),
        },
        NextStep::Summary => SkipQuestionResponse {
            status: "summary".to_string(),
            next_index: None,
        },
    };

    Ok(Json(response))
}

/// Finalize the attempt: pair questions with answers, set the
/// completion marker and return the thank-you summary
pub async fn thankyou(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let visitor_id = extract_visitor_id(&headers);
    debug!("Finalizing survey for visitor {}", visitor_id);

    let summary = state.flow_service.finalize(&visitor_id).await?;
    state.metrics.record_attempt_finalized();

    let entries: Vec<SummaryEntryResponse> = summary
        .entries
        .into_iter()
        .map(|e| SummaryEntryResponse {
            prompt: e.question.prompt,
            answer: e.answer.choice().map(|c| c.to_string()),
            skipped: e.answer.is_skipped(),
        })
        .collect();

    let response = SummaryResponse {
        survey_id: summary.survey_id,
        title: summary.title,
        entries,
        completed_at: summary.completed_at,
    };

    Ok(Json(response))
}
