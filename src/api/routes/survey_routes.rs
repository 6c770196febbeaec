//! Survey Routes
//!
//! 定义问卷作答流程的 API 路由。

use crate::api::handlers::flow_handler::*;
use crate::api::handlers::survey_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建问卷路由器
pub fn create_survey_router() -> Router<AppState> {
    Router::new()
        .route("/surveys", get(list_surveys))
        .route("/surveys/:survey_id/begin", post(begin_survey))
        .route("/questions/:index", get(show_question))
        .route("/answers/:index", post(submit_answer))
        .route("/skip", post(skip_question))
        .route("/thankyou", get(thankyou))
}
