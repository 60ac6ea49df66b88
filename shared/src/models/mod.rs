//! Domain models
//!
//! Each entity file carries the row type plus its Create/Update payloads,
//! following the entity / CreateDto / UpdateDto convention.

pub mod delivery;
pub mod product;
pub mod recipe;

pub use delivery::{
    Delivery, DeliveryCreate, DeliveryExpanded, DeliveryLine, DeliveryLineExpanded, DeliveryUpdate,
};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use recipe::{
    Recipe, RecipeCreate, RecipeExpanded, RecipeIngredient, RecipeIngredientExpanded,
    RecipeIngredientInput,
};
