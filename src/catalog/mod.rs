//! Built-in plant and care-tip catalogs.
//!
//! Both catalogs ship inside the binary as JSON documents and are parsed once
//! at startup. Lookups and filters are read-only and preserve catalog order.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::CatalogError;
use crate::models::*;

const SPECIES_JSON: &str = include_str!("species.json");
const TIPS_JSON: &str = include_str!("tips.json");

#[derive(Debug, Clone)]
pub struct Catalog {
    species: Vec<Species>,
    tips: Vec<CareTip>,
}

impl Catalog {
    /// Parse the catalogs compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(SPECIES_JSON, TIPS_JSON)?;
        tracing::debug!(
            "Loaded built-in catalog: {} species, {} tips",
            catalog.species.len(),
            catalog.tips.len()
        );
        Ok(catalog)
    }

    pub fn from_json(species_json: &str, tips_json: &str) -> Result<Self, CatalogError> {
        let species = serde_json::from_str(species_json)?;
        let tips = serde_json::from_str(tips_json)?;
        Self::new(species, tips)
    }

    /// Build a catalog, checking that identifiers are unique and temperature
    /// ranges are well-formed.
    pub fn new(species: Vec<Species>, tips: Vec<CareTip>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for s in &species {
            if !seen.insert(s.id.as_str()) {
                return Err(CatalogError::DuplicateSpecies(s.id.clone()));
            }
            if !s.temperature.is_valid() {
                return Err(CatalogError::InvalidTemperature(s.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for tip in &tips {
            if !seen.insert(tip.id.as_str()) {
                return Err(CatalogError::DuplicateTip(tip.id.clone()));
            }
        }

        Ok(Self { species, tips })
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn tips(&self) -> &[CareTip] {
        &self.tips
    }

    pub fn find_species(&self, id: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn find_tip(&self, id: &str) -> Option<&CareTip> {
        self.tips.iter().find(|t| t.id == id)
    }

    /// Species whose common or scientific name contains `query`, ignoring case.
    ///
    /// When `difficulty` is given, only species with exactly that difficulty
    /// match. An empty query matches every species.
    pub fn filter_species(&self, query: &str, difficulty: Option<Difficulty>) -> Vec<&Species> {
        let needle = query.to_lowercase();
        self.species
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.scientific_name.to_lowercase().contains(&needle)
            })
            .filter(|s| difficulty.map_or(true, |d| s.difficulty == d))
            .collect()
    }

    /// Tips in `category`, or the whole guide when no category is given.
    pub fn filter_tips(&self, category: Option<TipCategory>) -> Vec<&CareTip> {
        self.tips
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect()
    }

    /// Up to `limit` species, in random order, that are not already in the
    /// collection.
    pub fn suggestions<R>(&self, owned: &[TrackedPlant], limit: usize, rng: &mut R) -> Vec<&Species>
    where
        R: Rng + ?Sized,
    {
        let owned: HashSet<&str> = owned.iter().map(|p| p.id()).collect();
        let mut available: Vec<&Species> = self
            .species
            .iter()
            .filter(|s| !owned.contains(s.id.as_str()))
            .collect();
        available.shuffle(rng);
        available.truncate(limit);
        available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("built-in catalog should parse")
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = catalog();
        assert_eq!(catalog.species().len(), 12);
        assert_eq!(catalog.tips().len(), 8);
        assert_eq!(catalog.species()[0].name, "Monstera Deliciosa");
    }

    #[test]
    fn rejects_duplicate_species_ids() {
        let mut species = catalog().species().to_vec();
        species[1].id = species[0].id.clone();

        let err = Catalog::new(species, vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSpecies(id) if id == "1"));
    }

    #[test]
    fn rejects_inverted_temperature_range() {
        let mut species = catalog().species().to_vec();
        species[2].temperature = TemperatureRange { min: 30.0, max: 10.0 };

        let err = Catalog::new(species, vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTemperature(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json("[{\"id\": 1}]", "[]"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn suggestions_skip_owned_species() {
        let catalog = catalog();
        let owned: Vec<TrackedPlant> = catalog.species()[..10]
            .iter()
            .cloned()
            .map(|s| TrackedPlant::from_species(s, Utc::now()))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let picks = catalog.suggestions(&owned, 3, &mut rng);

        assert_eq!(picks.len(), 2);
        assert!(picks.iter().all(|s| s.id == "11" || s.id == "12"));
    }

    #[test]
    fn suggestions_are_empty_when_everything_is_owned() {
        let catalog = catalog();
        let owned: Vec<TrackedPlant> = catalog
            .species()
            .iter()
            .cloned()
            .map(|s| TrackedPlant::from_species(s, Utc::now()))
            .collect();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(catalog.suggestions(&owned, 3, &mut rng).is_empty());
    }
}
