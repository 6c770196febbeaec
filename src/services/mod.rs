//! 服务模块

pub mod flow;

pub use flow::{
    NextStep, QuestionView, StartOutcome, SummaryEntry, SurveyFlowService, SurveyListing,
    SurveySummary, create_survey_flow_service,
};
