//! Delivery API module

mod handler;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/createDelivery", post(handler::create))
        .route("/getDeliveries", get(handler::list))
        .route("/updateDelivery/{id}", put(handler::update))
        .route("/deleteDelivery/{id}", delete(handler::delete))
}
