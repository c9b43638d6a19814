use crate::api::activity::activity::list_activity;
use crate::api::boards::boards::{
    create_board, delete_board, get_board, list_boards, update_board,
};
use crate::api::lists::lists::{create_list, delete_list, get_list, list_lists, update_list};
use crate::api::tasks::tasks::{create_task, delete_task, get_task, search_tasks, update_task};
use crate::health;

use td_ws::AppState;

use axum::{
    Router,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // WebSocket endpoint
        .route("/ws", get(td_ws::handler))
        // Health check endpoint
        .route("/health", get(health::health_check))
        // Boards
        .route("/api/boards", get(list_boards).post(create_board))
        .route(
            "/api/boards/{id}",
            get(get_board).put(update_board).delete(delete_board),
        )
        // Lists
        .route("/api/lists", get(list_lists).post(create_list))
        .route(
            "/api/lists/{id}",
            get(get_list).put(update_list).delete(delete_list),
        )
        // Tasks
        .route("/api/tasks", get(search_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        // Activity feed
        .route("/api/activity", get(list_activity))
        // Add shared state
        .with_state(state)
        // CORS middleware (allow all origins for browser clients)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
