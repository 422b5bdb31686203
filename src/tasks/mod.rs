//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: sweeps expired entries from the in-process cache backend

mod cleanup;

pub use cleanup::spawn_cleanup_task;
