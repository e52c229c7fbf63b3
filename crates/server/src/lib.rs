use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use shared::scenes::{preset, preset_names};
use shared::{FieldError, Scene};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub mod build;
pub mod routes;

/// Адрес по умолчанию, если `ANAVIEW_ADDR` не задан
pub const DEFAULT_ADDR: &str = "0.0.0.0:3001";

/// Адрес сервера из окружения
pub fn bind_addr() -> String {
    std::env::var("ANAVIEW_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string())
}

#[derive(Clone)]
pub struct AppState {
    /// Предустановленные сцены, построенные один раз при старте
    pub presets: Arc<BTreeMap<String, Scene>>,
    /// Загруженные пользователем сцены по uuid
    pub stored: Arc<RwLock<HashMap<String, Scene>>>,
}

impl AppState {
    pub fn new() -> Result<Self, FieldError> {
        let presets = preset_names()
            .iter()
            .map(|name| Ok((name.to_string(), preset(name)?)))
            .collect::<Result<BTreeMap<_, _>, FieldError>>()?;
        tracing::info!(count = presets.len(), "Built preset scenes");

        Ok(Self {
            presets: Arc::new(presets),
            stored: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Найти сцену по имени пресета или uuid
    pub async fn scene(&self, id: &str) -> Option<Scene> {
        if let Some(scene) = self.presets.get(id) {
            return Some(scene.clone());
        }
        self.stored.read().await.get(id).cloned()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/scenes", get(routes::list_scenes).post(routes::create_scene))
        .route("/api/scenes/{id}", get(routes::get_scene))
        .route("/api/project", post(routes::project))
        .route("/api/inspect", post(routes::inspect))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
