// Integration tests for the survey flow state machine
//
// Tests cover:
// - Finalize pairing over every catalog survey
// - Question view idempotence
// - Skip handling
// - Attempt restarts
// - Completion marker behavior across attempts

use std::sync::Arc;

use chrono::Duration;
use surveyflow::catalog::SurveyCatalog;
use surveyflow::error::AppError;
use surveyflow::services::flow::{
    NextStep, QuestionView, StartOutcome, SurveyFlowService, SurveyFlowServiceImpl,
};
use surveyflow::storage::{
    CompletionMarkerStore, MemoryCompletionMarkerStore, MemorySessionStore, SessionStore,
};

struct Harness {
    catalog: Arc<SurveyCatalog>,
    markers: Arc<dyn CompletionMarkerStore>,
    service: SurveyFlowServiceImpl,
}

fn harness() -> Harness {
    let catalog = Arc::new(SurveyCatalog::builtin());
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(Duration::days(1)));
    let markers: Arc<dyn CompletionMarkerStore> =
        Arc::new(MemoryCompletionMarkerStore::new(Duration::days(730)));
    let service = SurveyFlowServiceImpl::new(catalog.clone(), sessions, markers.clone());
    Harness {
        catalog,
        markers,
        service,
    }
}

#[tokio::test]
async fn finalize_pairs_every_question_with_its_answer() {
    let h = harness();

    // Answer every survey in the catalog with the first choice of each
    // question; the summary must pair questions and answers in order.
    for survey_id in h.catalog.ids() {
        let visitor = format!("visitor_{}", survey_id);
        let survey = h.catalog.get(survey_id).unwrap().clone();

        h.service
            .start_attempt(&visitor, survey_id, false)
            .await
            .unwrap();

        for (index, question) in survey.questions.iter().enumerate() {
            let choice = question.choices.first().unwrap();
            h.service
                .submit_answer(&visitor, index, choice)
                .await
                .unwrap();
        }

        let summary = h.service.finalize(&visitor).await.unwrap();
        assert_eq!(summary.entries.len(), survey.question_count());
        for (i, entry) in summary.entries.iter().enumerate() {
            assert_eq!(entry.question, survey.questions[i]);
            assert_eq!(
                entry.answer.choice(),
                Some(survey.questions[i].choices[0].as_str())
            );
        }
    }
}

#[tokio::test]
async fn show_question_is_idempotent_observation() {
    let h = harness();
    h.service
        .start_attempt("v1", "satisfaction", false)
        .await
        .unwrap();

    let first = h.service.show_question("v1", 0).await.unwrap();
    let second = h.service.show_question("v1", 0).await.unwrap();
    assert_eq!(first, second);
    assert!(matches!(first, QuestionView::Question { index: 0, .. }));
}

#[tokio::test]
async fn skip_appends_one_marker_and_advances() {
    let h = harness();
    h.service
        .start_attempt("v1", "satisfaction", false)
        .await
        .unwrap();

    let next = h.service.skip_question("v1").await.unwrap();
    assert_eq!(next, NextStep::Question { index: 1 });

    // Progress moved by exactly one: question 1 is now current
    let view = h.service.show_question("v1", 1).await.unwrap();
    assert!(matches!(view, QuestionView::Question { index: 1, .. }));
}

#[tokio::test]
async fn skipping_everything_ends_in_an_all_skipped_summary() {
    let h = harness();
    let total = h.catalog.get("personality").unwrap().question_count();

    h.service
        .start_attempt("v1", "personality", false)
        .await
        .unwrap();

    for i in 0..total {
        let next = h.service.skip_question("v1").await.unwrap();
        if i + 1 < total {
            assert_eq!(next, NextStep::Question { index: i + 1 });
        } else {
            assert_eq!(next, NextStep::Summary);
        }
    }

    let summary = h.service.finalize("v1").await.unwrap();
    assert!(summary.entries.iter().all(|e| e.answer.is_skipped()));
}

#[tokio::test]
async fn starting_a_new_attempt_discards_prior_progress() {
    let h = harness();
    h.service
        .start_attempt("v1", "satisfaction", false)
        .await
        .unwrap();
    h.service.submit_answer("v1", 0, "Yes").await.unwrap();
    h.service.submit_answer("v1", 1, "No").await.unwrap();

    h.service
        .start_attempt("v1", "personality", false)
        .await
        .unwrap();

    let view = h.service.show_question("v1", 0).await.unwrap();
    match view {
        QuestionView::Question {
            index, question, ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(question.prompt, "Do you ever dream about code?");
        }
        other => panic!("expected fresh first question, got {:?}", other),
    }
}

#[tokio::test]
async fn completion_marker_blocks_retake_across_attempts() {
    let h = harness();
    let visitor = "v1";

    h.service
        .start_attempt(visitor, "satisfaction", false)
        .await
        .unwrap();
    let total = h.catalog.get("satisfaction").unwrap().question_count();
    for i in 0..total {
        h.service
            .submit_answer(visitor, i, "Yes")
            .await
            .unwrap();
    }
    h.service.finalize(visitor).await.unwrap();

    // The caller consults the marker store and the flow service
    // short-circuits without touching session state.
    let done = h.markers.is_done(visitor, "satisfaction").await.unwrap();
    assert!(done);
    let outcome = h
        .service
        .start_attempt(visitor, "satisfaction", done)
        .await
        .unwrap();
    assert_eq!(outcome, StartOutcome::AlreadyDone);

    // The listing no longer offers the finished survey
    let listings = h.service.list_available(visitor).await.unwrap();
    assert!(listings.iter().all(|l| l.survey_id != "satisfaction"));
}

#[tokio::test]
async fn finalize_without_a_session_is_a_sequencing_error() {
    let h = harness();
    let err = h.service.finalize("v1").await.unwrap_err();
    assert!(matches!(err, AppError::Sequencing(_)));
}
