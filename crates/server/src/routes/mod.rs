use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use shared::Scene;

use crate::build::{self, ProjectRequest, ProjectResponse};
use crate::AppState;

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Presets first, then uploaded scenes
pub async fn list_scenes(State(state): State<AppState>) -> Json<Value> {
    let mut scenes: Vec<Value> = state
        .presets
        .iter()
        .map(|(id, scene)| {
            json!({ "id": id, "name": scene.name, "shapes": scene.shapes.len(), "source": "preset" })
        })
        .collect();

    let stored = state.stored.read().await;
    let mut uploaded: Vec<(&String, &Scene)> = stored.iter().collect();
    uploaded.sort_by(|a, b| a.1.name.cmp(&b.1.name).then_with(|| a.0.cmp(b.0)));
    scenes.extend(uploaded.into_iter().map(|(id, scene)| {
        json!({ "id": id, "name": scene.name, "shapes": scene.shapes.len(), "source": "stored" })
    }));

    Json(json!({ "scenes": scenes }))
}

pub async fn get_scene(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Scene>, StatusCode> {
    state.scene(&id).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Validate and store an uploaded scene
pub async fn create_scene(
    State(state): State<AppState>,
    Json(scene): Json<Scene>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let scene = tokio::task::spawn_blocking(move || match scene.validate() {
        Ok(()) => Ok(scene),
        Err(e) => {
            tracing::error!("Rejected scene '{}': {}", scene.name, e);
            Err(StatusCode::BAD_REQUEST)
        }
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    let id = uuid::Uuid::new_v4().to_string();
    tracing::info!(%id, name = %scene.name, shapes = scene.shapes.len(), "Stored scene");
    state.stored.write().await.insert(id.clone(), scene);

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Scene + camera → projected wireframe
pub async fn project(
    State(state): State<AppState>,
    Json(request): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>, StatusCode> {
    if !request.time.is_finite() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let scene = match (request.scene, request.scene_id) {
        (Some(scene), _) => scene,
        (None, Some(id)) => state.scene(&id).await.ok_or(StatusCode::NOT_FOUND)?,
        (None, None) => return Err(StatusCode::BAD_REQUEST),
    };
    let camera = request.camera;
    let time = request.time;

    let response = tokio::task::spawn_blocking(move || build::project_wireframe(scene, camera, time))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .map_err(|e| {
            tracing::error!("Project error: {}", e);
            StatusCode::BAD_REQUEST
        })?;

    Ok(Json(response))
}

/// Inspect scene → JSON metrics
pub async fn inspect(Json(scene): Json<Scene>) -> Result<Json<Value>, StatusCode> {
    let info = tokio::task::spawn_blocking(move || build::inspect_scene(&scene))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(info))
}
