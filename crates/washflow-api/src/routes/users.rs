//! Routes for the user directory and role-scoped appointment views.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::instrument;
use washflow_appointments::domain::appointment::Appointment;
use washflow_catalog::domain::entities::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /lookup.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    /// The email to resolve.
    pub email: String,
}

/// POST /lookup
#[instrument(skip_all)]
async fn lookup(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state.engine.lookup_user(&request.email)?;
    Ok(Json(user.clone()))
}

/// GET /{user_id}/appointments
#[instrument(skip(state))]
async fn appointments_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointments = state.engine.list_appointments_for_user(&user_id).await?;
    Ok(Json(appointments))
}

/// Returns the router for the user directory.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lookup", post(lookup))
        .route("/{user_id}/appointments", get(appointments_for_user))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_state;

    fn lookup_request(email: &str) -> Request<Body> {
        let body = serde_json::json!({ "email": email });
        Request::builder()
            .method("POST")
            .uri("/lookup")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_returns_user_with_role() {
        // Arrange
        let app = router().with_state(test_state::seeded().await);

        // Act
        let response = app
            .oneshot(lookup_request("PARCEIRO@lavagem.com.br"))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = test_state::json_body(response).await;
        assert_eq!(json["id"], "u2");
        assert_eq!(json["role"]["kind"], "partner");
        assert_eq!(json["role"]["partner_id"], "p1");
    }

    #[tokio::test]
    async fn test_lookup_unknown_email_returns_404() {
        let app = router().with_state(test_state::seeded().await);

        let response = app
            .oneshot(lookup_request("nobody@example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = test_state::json_body(response).await;
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_admin_sees_every_appointment() {
        // Arrange
        let app = router().with_state(test_state::seeded().await);
        let request = Request::builder()
            .uri("/u3/appointments")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = test_state::json_body(response).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_appointments_returns_404() {
        let app = router().with_state(test_state::seeded().await);
        let request = Request::builder()
            .uri("/u404/appointments")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
