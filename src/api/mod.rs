//! API Module
//!
//! HTTP handlers and routing for the items REST API.
//!
//! # Endpoints
//! - `GET /items` - List every item
//! - `GET /items/search?name=` - Case-insensitive name search
//! - `GET /items/:id` - Fetch one item
//! - `POST /items` - Create an item
//! - `PUT /items/:id` - Rename an item
//! - `DELETE /items/:id` - Delete an item
//! - `GET /ping`, `GET /health` - Liveness endpoints

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
