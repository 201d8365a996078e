use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::species::Species;

/// A plant in the user's collection.
///
/// Tracked plants carry a full copy of the [`Species`] they were created from
/// (flattened into the same JSON object) plus the owner's care history. The
/// species fields can drift from the catalog afterwards, e.g. when the owner
/// adjusts `water_frequency` for their own conditions.
///
/// Absent optional fields are omitted from the JSON form rather than written
/// as `null`, so a restored collection compares equal to the one that was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedPlant {
    #[serde(flatten)]
    pub species: Species,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub added_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fertilized: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<HealthStatus>,
}

impl TrackedPlant {
    /// Start tracking a species. No care has been recorded yet.
    pub fn from_species(species: Species, added_date: DateTime<Utc>) -> Self {
        Self {
            species,
            nickname: None,
            added_date,
            last_watered: None,
            last_fertilized: None,
            notes: None,
            health_status: None,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.species.id
    }

    /// The nickname if one was given, otherwise the species name.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.species.name)
    }

    /// Merge a partial update. Fields left as `None` keep their current value.
    pub fn apply(&mut self, update: PlantUpdate) {
        if let Some(nickname) = update.nickname {
            self.nickname = Some(nickname);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(status) = update.health_status {
            self.health_status = Some(status);
        }
        if let Some(at) = update.last_watered {
            self.last_watered = Some(at);
        }
        if let Some(at) = update.last_fertilized {
            self.last_fertilized = Some(at);
        }
        if let Some(days) = update.water_frequency {
            self.species.water_frequency = days;
        }
        if let Some(days) = update.fertilize_frequency {
            self.species.fertilize_frequency = days;
        }
    }
}

/// Owner's assessment of how a plant is doing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    Healthy,
    NeedsAttention,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::NeedsAttention => "needs-attention",
            Self::Unhealthy => "unhealthy",
        }
    }
}

/// Input for updating a tracked plant. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantUpdate {
    pub nickname: Option<String>,
    pub notes: Option<String>,
    pub health_status: Option<HealthStatus>,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
    pub water_frequency: Option<u32>,
    pub fertilize_frequency: Option<u32>,
}
