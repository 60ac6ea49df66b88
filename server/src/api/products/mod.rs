//! Product API module

mod handler;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/createProduct", post(handler::create))
        .route("/updateProduct", put(handler::update))
        .route("/deleteProduct", delete(handler::delete))
        .route("/getProduct", get(handler::list))
}
