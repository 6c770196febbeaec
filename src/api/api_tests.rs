#[cfg(test)]
mod flow_api_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::api::{app_state::AppState, create_router};

    fn test_app() -> Router {
        create_router(AppState::development())
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        visitor: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-Visitor-Id", visitor);

        let request = match body {
            Some(payload) => {
                builder = builder.header("Content-Type", "application/json");
                builder.body(Body::from(payload.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_full_survey_flow_over_http() {
        let app = test_app();

        // The builtin satisfaction survey has four questions
        let (status, body) =
            send(&app, "POST", "/api/v1/surveys/satisfaction/begin", "v1", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "started");
        assert_eq!(body["next_index"], 0);

        let (status, body) = send(&app, "GET", "/api/v1/questions/0", "v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "question");
        assert_eq!(body["question"]["prompt"], "Have you shopped here before?");
        assert_eq!(body["question"]["total"], 4);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/answers/0",
            "v1",
            Some(json!({"choice": "Yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["next_index"], 1);

        let (_, body) = send(
            &app,
            "POST",
            "/api/v1/answers/1",
            "v1",
            Some(json!({"choice": "No"})),
        )
        .await;
        assert_eq!(body["next_index"], 2);

        let (status, body) = send(&app, "POST", "/api/v1/skip", "v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "question");
        assert_eq!(body["next_index"], 3);

        let (_, body) = send(
            &app,
            "POST",
            "/api/v1/answers/3",
            "v1",
            Some(json!({"choice": "Yes"})),
        )
        .await;
        assert_eq!(body["next_index"], 4);

        // The question view detects completion
        let (status, body) = send(&app, "GET", "/api/v1/questions/4", "v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "complete");

        let (status, body) = send(&app, "GET", "/api/v1/thankyou", "v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["survey_id"], "satisfaction");
        assert_eq!(body["entries"].as_array().unwrap().len(), 4);
        assert_eq!(body["entries"][0]["answer"], "Yes");
        assert_eq!(body["entries"][2]["skipped"], true);
        assert_eq!(body["entries"][2]["answer"], Value::Null);

        // A finished survey cannot be retaken
        let (status, body) =
            send(&app, "POST", "/api/v1/surveys/satisfaction/begin", "v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "already_done");
        assert_eq!(body["next_index"], Value::Null);

        // ...and no longer shows up in the listing
        let (status, body) = send(&app, "GET", "/api/v1/surveys", "v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["surveys"][0]["survey_id"], "personality");
    }

    #[tokio::test]
    async fn test_begin_unknown_survey_returns_404() {
        let app = test_app();

        let (status, body) =
            send(&app, "POST", "/api/v1/surveys/unknown_id/begin", "v1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_question_without_session_returns_409() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/api/v1/questions/0", "v1", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "SEQUENCING_ERROR");
    }

    #[tokio::test]
    async fn test_submit_missing_choice_returns_400() {
        let app = test_app();

        send(&app, "POST", "/api/v1/surveys/satisfaction/begin", "v1", None).await;

        let (status, body) = send(&app, "POST", "/api/v1/answers/0", "v1", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        // Session state is left unmodified
        let (_, body) = send(&app, "GET", "/api/v1/questions/0", "v1", None).await;
        assert_eq!(body["status"], "question");
        assert_eq!(body["question"]["index"], 0);
    }

    #[tokio::test]
    async fn test_stale_question_index_redirects() {
        let app = test_app();

        send(&app, "POST", "/api/v1/surveys/satisfaction/begin", "v1", None).await;

        let (status, body) = send(&app, "GET", "/api/v1/questions/2", "v1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "redirect");
        assert_eq!(body["redirect_to"], 0);
        assert!(body["warning"].as_str().unwrap().contains('2'));
    }
}
