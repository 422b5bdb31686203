//! Items API - A small JSON CRUD service for items
//!
//! Serves list, lookup, search, create, update and delete over HTTP, with an
//! optional look-aside cache (Redis or in-process) in front of the store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;


pub use api::AppState;
pub use config::Config;
pub use service::ItemService;
pub use store::ItemStore;
pub use tasks::spawn_cleanup_task;
