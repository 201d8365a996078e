use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::care::{self, CareStatus};
use crate::error::StoreError;
use crate::models::*;

type ApiResult<T> = Result<T, (StatusCode, String)>;

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{} not found", what))
}

fn bad_request(msg: String) -> (StatusCode, String) {
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

// ============================================================
// Response types
// ============================================================

/// A tracked plant together with its care state at request time.
#[derive(Debug, Clone, Serialize)]
pub struct PlantWithCare {
    #[serde(flatten)]
    pub plant: TrackedPlant,
    pub care: CareStatus,
}

impl PlantWithCare {
    fn evaluate(plant: TrackedPlant, now: chrono::DateTime<Utc>) -> Self {
        let care = CareStatus::evaluate(&plant, now);
        Self { plant, care }
    }
}

/// Detail view: the collection entry if the id is tracked, else the species.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PlantDetail {
    Tracked(PlantWithCare),
    Catalog(Species),
}

#[derive(Debug, Clone, Serialize)]
pub struct DuePlants {
    pub water: Vec<PlantWithCare>,
    pub fertilize: Vec<PlantWithCare>,
}

// ============================================================
// Request types
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptPlantInput {
    pub species_id: String,
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyInput {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeciesQuery {
    #[serde(default)]
    pub q: String,
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub limit: Option<usize>,
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Catalog
// ============================================================

pub async fn list_species(
    State(state): State<AppState>,
    Query(query): Query<SpeciesQuery>,
) -> ApiResult<Json<Vec<Species>>> {
    let difficulty = match query.difficulty.as_deref() {
        None | Some("") => None,
        Some(s) => Some(
            Difficulty::from_str(s).ok_or_else(|| bad_request(format!("Invalid difficulty: {}", s)))?,
        ),
    };

    let species = state
        .catalog
        .filter_species(&query.q, difficulty)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(species))
}

pub async fn get_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Species>> {
    state
        .catalog
        .find_species(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Species"))
}

pub async fn list_tips(
    State(state): State<AppState>,
    Query(query): Query<TipsQuery>,
) -> ApiResult<Json<Vec<CareTip>>> {
    let category = match query.category.as_deref() {
        None | Some("") | Some("all") => None,
        Some(s) => Some(
            TipCategory::from_str(s).ok_or_else(|| bad_request(format!("Invalid category: {}", s)))?,
        ),
    };

    let tips = state
        .catalog
        .filter_tips(category)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(tips))
}

pub async fn get_tip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CareTip>> {
    state
        .catalog
        .find_tip(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Tip"))
}

pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> Json<Vec<Species>> {
    let owned = state.store.list();
    let picks = state
        .catalog
        .suggestions(&owned, query.limit.unwrap_or(3), &mut rand::thread_rng())
        .into_iter()
        .cloned()
        .collect();
    Json(picks)
}

// ============================================================
// Collection
// ============================================================

pub async fn list_plants(State(state): State<AppState>) -> Json<Vec<PlantWithCare>> {
    let now = Utc::now();
    Json(
        state
            .store
            .list()
            .into_iter()
            .map(|p| PlantWithCare::evaluate(p, now))
            .collect(),
    )
}

pub async fn adopt_plant(
    State(state): State<AppState>,
    Json(input): Json<AdoptPlantInput>,
) -> ApiResult<(StatusCode, Json<TrackedPlant>)> {
    match state
        .store
        .adopt(&state.catalog, &input.species_id, input.nickname, Utc::now())
    {
        Ok(plant) => Ok((StatusCode::CREATED, Json(plant))),
        Err(e @ StoreError::AlreadyTracked(_)) => Err((StatusCode::CONFLICT, e.to_string())),
        Err(e @ StoreError::UnknownSpecies(_)) => Err((StatusCode::NOT_FOUND, e.to_string())),
    }
}

pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PlantDetail>> {
    if let Some(plant) = state.store.get(&id) {
        return Ok(Json(PlantDetail::Tracked(PlantWithCare::evaluate(
            plant,
            Utc::now(),
        ))));
    }

    state
        .catalog
        .find_species(&id)
        .cloned()
        .map(|s| Json(PlantDetail::Catalog(s)))
        .ok_or_else(|| not_found("Plant"))
}

pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<PlantUpdate>,
) -> StatusCode {
    state.store.update(&id, update);
    StatusCode::NO_CONTENT
}

pub async fn remove_plant(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.store.remove(&id);
    StatusCode::NO_CONTENT
}

pub async fn water_plant(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.store.water(&id);
    StatusCode::NO_CONTENT
}

pub async fn fertilize_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    state.store.fertilize(&id);
    StatusCode::NO_CONTENT
}

pub async fn due_plants(State(state): State<AppState>) -> Json<DuePlants> {
    let now = Utc::now();
    let plants = state.store.list();
    let collect = |due: Vec<&TrackedPlant>| -> Vec<PlantWithCare> {
        due.into_iter()
            .map(|p| PlantWithCare::evaluate(p.clone(), now))
            .collect()
    };

    Json(DuePlants {
        water: collect(care::plants_needing_water(&plants, now)),
        fertilize: collect(care::plants_needing_fertilizer(&plants, now)),
    })
}

// ============================================================
// Identification
// ============================================================

pub async fn identify(
    State(state): State<AppState>,
    Json(input): Json<IdentifyInput>,
) -> Json<Option<Species>> {
    Json(state.identifier.identify(&input.image).await)
}
