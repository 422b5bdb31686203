//! API Handlers
//!
//! HTTP request handlers for each items endpoint. Each one validates its
//! input, delegates to [`ItemService`] and maps the outcome to a status.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tokio::task::JoinHandle;

use crate::cache::{CacheBackend, ItemCache, MemoryBackend, RedisBackend};
use crate::config::{CacheBackendKind, Config};
use crate::error::Result;
use crate::models::{HealthResponse, Item, ItemPayload, PingResponse, SearchQuery};
use crate::service::ItemService;
use crate::store::ItemStore;
use crate::tasks::spawn_cleanup_task;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Item operations, cached or not
    pub items: ItemService,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(items: ItemService) -> Self {
        Self { items }
    }

    /// State with a seeded store and no cache.
    pub fn uncached() -> Self {
        Self::new(ItemService::uncached(ItemStore::seeded()))
    }

    /// Creates a new AppState from configuration.
    ///
    /// Connects or builds the configured cache backend. The in-process
    /// backend also gets its cleanup task, whose handle is returned so the
    /// caller can abort it on shutdown.
    pub async fn from_config(config: &Config) -> Result<(Self, Option<JoinHandle<()>>)> {
        let store = if config.seed_items {
            ItemStore::seeded()
        } else {
            ItemStore::new()
        };

        let mut cleanup = None;
        let backend: Arc<dyn CacheBackend> = match config.cache_backend {
            CacheBackendKind::Disabled => {
                return Ok((Self::new(ItemService::uncached(store)), None));
            }
            CacheBackendKind::Memory => {
                let backend = MemoryBackend::new(config.cache_max_entries);
                cleanup = Some(spawn_cleanup_task(backend.store(), config.cleanup_interval));
                Arc::new(backend)
            }
            CacheBackendKind::Redis => Arc::new(RedisBackend::connect(&config.redis_url).await?),
        };

        let cache = ItemCache::new(backend)
            .with_ttl(config.cache_ttl())
            .with_fallback_on_error(config.cache_fallback_on_error);
        Ok((Self::new(ItemService::cached(store, cache)), cleanup))
    }
}

/// Handler for GET /items
pub async fn list_items_handler(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    let items = state.items.list_all().await?;
    Ok(Json(items))
}

/// Handler for GET /items/:id
pub async fn get_item_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<Item>> {
    let Path(id) = id?;
    let item = state.items.get_by_id(id).await?;
    Ok(Json(item))
}

/// Handler for GET /items/search?name=
///
/// Matches are case-insensitive substrings of the item name.
pub async fn search_items_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Item>>> {
    let Query(query) = query?;
    let found = state.items.search_by_name(query.term()?).await?;
    Ok(Json(found))
}

/// Handler for POST /items
///
/// Any `id` in the body is ignored; the store assigns one.
pub async fn create_item_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ItemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let Json(payload) = payload?;
    let item = state.items.create(payload.name).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for PUT /items/:id
///
/// The path id wins over any id in the body.
pub async fn update_item_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
    payload: std::result::Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let item = state.items.update(id, payload.name).await?;
    Ok(Json(item))
}

/// Handler for DELETE /items/:id
pub async fn delete_item_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    state.items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /ping
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
