//! Recipe API module

mod handler;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/addRecipe", post(handler::create))
        .route("/getRecipes", get(handler::list))
        .route("/deleteRecipe/{id}", delete(handler::delete))
        .route("/useRecipe/{id}", post(handler::use_recipe))
}
