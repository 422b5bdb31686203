//! Request and Response models for the items API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::Item;
pub use requests::{ItemPayload, SearchQuery};
pub use responses::{ErrorResponse, HealthResponse, PingResponse};
