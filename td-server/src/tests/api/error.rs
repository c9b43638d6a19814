use crate::ApiError;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let response = ApiError::not_found("Task not found").into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Task not found");
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let response = ApiError::validation("Title too long", Some("title")).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "title");
}

#[tokio::test]
async fn test_validation_error_without_field_omits_key() {
    let response = ApiError::validation("boardId or listId is required", None).into_response();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_invalid_target_returns_400() {
    let response = ApiError::invalid_target("List belongs to a different board").into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "INVALID_TARGET");
}

#[tokio::test]
async fn test_unauthorized_returns_401() {
    let response = ApiError::unauthorized("Missing Authorization header").into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let response = ApiError::internal("Database operation failed").into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_row_not_found_maps_to_not_found() {
    let db_error = td_db::DbError::from(sqlx::Error::RowNotFound);
    let api_error = ApiError::from(db_error);

    assert!(matches!(api_error, ApiError::NotFound { .. }));
}

#[test]
fn test_invalid_priority_maps_to_validation_with_field() {
    let core_error = "Urgent".parse::<td_core::Priority>().unwrap_err();
    let api_error = ApiError::from(core_error);

    match api_error {
        ApiError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("priority")),
        other => panic!("Expected Validation, got {:?}", other),
    }
}
