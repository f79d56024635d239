pub mod users;

use crate::config::Config;
use crate::db::UserStore;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UserStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = UserStore::new(&config.database_path, config.query_mode);
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let debug = state.config.debug;

    let router = Router::new()
        .route("/users", get(users::get_users))
        .with_state(state);

    if debug {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
