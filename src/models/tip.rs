use serde::{Deserialize, Serialize};

/// An advice article from the built-in care guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTip {
    pub id: String,
    pub title: String,
    /// Article body text.
    pub content: String,
    pub category: TipCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Watering,
    Light,
    Soil,
    Fertilizing,
    Propagation,
    Pests,
    General,
}

impl TipCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Light => "light",
            Self::Soil => "soil",
            Self::Fertilizing => "fertilizing",
            Self::Propagation => "propagation",
            Self::Pests => "pests",
            Self::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "watering" => Some(Self::Watering),
            "light" => Some(Self::Light),
            "soil" => Some(Self::Soil),
            "fertilizing" => Some(Self::Fertilizing),
            "propagation" => Some(Self::Propagation),
            "pests" => Some(Self::Pests),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}
