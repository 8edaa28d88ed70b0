use application::CommentsApp;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use domain::{CommentView, DomainError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub type AppState = Arc<CommentsApp>;

/// Domain failures rendered as HTTP responses.
///
/// A missing user or course is a 404 with the message in the body; anything
/// else is a 500.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            error!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/comentarios", get(list_comments).post(create_comment))
        .route("/api/comentarios/", get(list_comments))
        .route(
            "/api/comentarios/:id",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route("/api/comentarios/curso/:curso_id", get(comments_by_course))
        .route("/api/comentarios/usuario/:usuario_id", get(comments_by_user))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Handler functions
async fn create_comment(
    State(app): State<AppState>,
    Json(payload): Json<CommentView>,
) -> Result<Json<CommentView>, ApiError> {
    let created = app.comment_service.create(payload).await?;
    info!("Created comment {:?}", created.id_comentario);
    Ok(Json(created))
}

async fn list_comments(State(app): State<AppState>) -> Result<Json<Vec<CommentView>>, ApiError> {
    Ok(Json(app.comment_service.list_all().await?))
}

async fn get_comment(
    State(app): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    Ok(match app.comment_service.get_by_id(id).await? {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

async fn update_comment(
    State(app): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CommentView>,
) -> Result<Response, ApiError> {
    Ok(match app.comment_service.update(id, payload).await? {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

async fn delete_comment(
    State(app): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if app.comment_service.delete(id).await? {
        info!("Deleted comment {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

async fn comments_by_course(
    State(app): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    Ok(Json(app.comment_service.list_by_course(course_id).await?))
}

async fn comments_by_user(
    State(app): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    Ok(Json(app.comment_service.list_by_user(user_id).await?))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_router() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.db");
        let app = CommentsApp::new(path.to_str().unwrap()).unwrap();
        app.seed_demo_data().await.unwrap();
        (dir, router(Arc::new(app)))
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn comment_json(user_id: i32, course_id: i32, text: &str) -> Value {
        json!({
            "calificacion": 5,
            "comentario": text,
            "fecha": "2024-05-17",
            "usuario": {"idUser": user_id, "username": "client supplied"},
            "curso": {"idCurso": course_id, "nombreCurso": "client supplied"}
        })
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let (_dir, router) = test_router().await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/comentarios",
            Some(comment_json(1, 1, "¡Gran curso!")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let created: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(created["idComentario"], 1);
        assert_eq!(created["usuario"]["username"], "testuser");
        assert_eq!(created["curso"]["nombreCurso"], "Curso de Mockito");

        let (status, body) = send(&router, Method::GET, "/api/comentarios/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_with_unknown_user_is_404_with_message() {
        let (_dir, router) = test_router().await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/comentarios",
            Some(comment_json(99, 1, "x")),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("Usuario no encontrado"));
    }

    #[tokio::test]
    async fn list_is_empty_array_on_both_paths() {
        let (_dir, router) = test_router().await;

        for uri in ["/api/comentarios/", "/api/comentarios"] {
            let (status, body) = send(&router, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
        }
    }

    #[tokio::test]
    async fn missing_comment_is_404_with_empty_body() {
        let (_dir, router) = test_router().await;

        let (status, body) = send(&router, Method::GET, "/api/comentarios/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());

        let (status, body) = send(
            &router,
            Method::PUT,
            "/api/comentarios/7",
            Some(comment_json(1, 1, "x")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());

        let (status, _) = send(&router, Method::DELETE, "/api/comentarios/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_then_delete() {
        let (_dir, router) = test_router().await;
        send(&router, Method::POST, "/api/comentarios", Some(comment_json(1, 1, "Primero"))).await;

        let mut change = comment_json(2, 3, "Comentario actualizado");
        change["calificacion"] = json!(4);
        change["idComentario"] = json!(50);
        let (status, body) = send(&router, Method::PUT, "/api/comentarios/1", Some(change)).await;
        assert_eq!(status, StatusCode::OK);
        let updated: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated["idComentario"], 1);
        assert_eq!(updated["calificacion"], 4);
        assert_eq!(updated["comentario"], "Comentario actualizado");
        assert_eq!(updated["curso"]["idCurso"], 3);

        let (status, body) = send(&router, Method::DELETE, "/api/comentarios/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(&router, Method::GET, "/api/comentarios/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_with_unknown_course_is_404_with_message() {
        let (_dir, router) = test_router().await;
        send(&router, Method::POST, "/api/comentarios", Some(comment_json(1, 1, "Primero"))).await;

        let (status, body) = send(
            &router,
            Method::PUT,
            "/api/comentarios/1",
            Some(comment_json(1, 404, "x")),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("Curso no encontrado"));
    }

    #[tokio::test]
    async fn lists_by_course_and_user() {
        let (_dir, router) = test_router().await;
        for (user, course) in [(1, 1), (2, 1), (1, 2)] {
            let payload = comment_json(user, course, "ok");
            send(&router, Method::POST, "/api/comentarios", Some(payload)).await;
        }

        let (status, body) = send(&router, Method::GET, "/api/comentarios/curso/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let by_course: Vec<Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(by_course.len(), 2);
        assert!(by_course.iter().all(|c| c["curso"]["idCurso"] == 1));

        let (_, body) = send(&router, Method::GET, "/api/comentarios/usuario/1", None).await;
        let by_user: Vec<Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(by_user.len(), 2);
        assert!(by_user.iter().all(|c| c["usuario"]["idUser"] == 1));

        let (status, body) = send(&router, Method::GET, "/api/comentarios/usuario/999", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (_dir, router) = test_router().await;

        let (status, body) = send(&router, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "healthy");
    }
}
