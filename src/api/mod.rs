mod handlers;

pub use handlers::{AdoptPlantInput, DuePlants, IdentifyInput, PlantDetail, PlantWithCare};

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;
use crate::identify::Identifier;
use crate::store::CollectionStore;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: CollectionStore,
    pub identifier: Arc<dyn Identifier>,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        store: CollectionStore,
        identifier: Arc<dyn Identifier>,
    ) -> Self {
        Self {
            catalog,
            store,
            identifier,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Catalog
        .route("/species", get(handlers::list_species))
        .route("/species/{id}", get(handlers::get_species))
        .route("/tips", get(handlers::list_tips))
        .route("/tips/{id}", get(handlers::get_tip))
        // Collection
        .route(
            "/plants",
            get(handlers::list_plants).post(handlers::adopt_plant),
        )
        .route("/plants/due", get(handlers::due_plants))
        .route(
            "/plants/{id}",
            get(handlers::get_plant)
                .patch(handlers::update_plant)
                .delete(handlers::remove_plant),
        )
        .route("/plants/{id}/water", post(handlers::water_plant))
        .route("/plants/{id}/fertilize", post(handlers::fertilize_plant))
        .route("/suggestions", get(handlers::suggestions))
        // Identification
        .route("/identify", post(handlers::identify))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
