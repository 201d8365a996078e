use serde::{Deserialize, Serialize};

/// A plant species from the built-in catalog.
///
/// Species records are immutable reference data. Identifiers are unique within
/// the catalog; the JSON representation uses camelCase keys so that persisted
/// collections stay readable by the mobile client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    /// Image reference (URL or asset path).
    pub image: String,
    pub description: String,
    /// Days between waterings.
    pub water_frequency: u32,
    pub light_requirement: LightRequirement,
    pub humidity: HumidityLevel,
    pub temperature: TemperatureRange,
    /// Days between fertilizer applications.
    pub fertilize_frequency: u32,
    pub difficulty: Difficulty,
    pub toxicity: Toxicity,
    /// Propagation methods, most common first.
    pub propagation: Vec<String>,
    pub common_issues: Vec<Issue>,
    pub tips: Vec<String>,
}

/// Comfortable temperature range in degrees Celsius. `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// A common problem, how to recognize it and how to fix it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub name: String,
    pub symptoms: Vec<String>,
    pub solutions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LightRequirement {
    Low,
    Medium,
    BrightIndirect,
    Direct,
}

impl LightRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::BrightIndirect => "bright-indirect",
            Self::Direct => "direct",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HumidityLevel {
    Low,
    Medium,
    High,
}

/// How demanding a species is to keep alive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "moderate" => Some(Self::Moderate),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Toxicity {
    NonToxic,
    MildlyToxic,
    Toxic,
    VeryToxic,
}

impl Toxicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonToxic => "non-toxic",
            Self::MildlyToxic => "mildly-toxic",
            Self::Toxic => "toxic",
            Self::VeryToxic => "very-toxic",
        }
    }
}
