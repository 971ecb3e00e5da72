//! Lookup over the bundled Gen 1 roster.

use super::error::CatalogError;
use super::pokemon::{Pokemon, PokemonId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Bundled roster table.
const BUNDLED_POKEMON: &str = include_str!("../../data/pokemon.json");

/// Highest Pokedex number in the roster.
pub const MAX_POKEMON_ID: u16 = 150;

/// Read-only entity catalog.
///
/// Entries are held behind `Arc` so that a grid cell can share the entry
/// with the catalog without copying it.
#[derive(Debug, Clone)]
pub struct Pokedex {
    entries: Vec<Arc<Pokemon>>,
}

impl Pokedex {
    /// Loads the roster compiled into the binary.
    #[instrument]
    pub fn load_bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_POKEMON)
    }

    /// Parses and validates a roster table.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, duplicate or out-of-range ids, entries
    /// without types or moves, and move identifiers that are not camelCase.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<Pokemon> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for entry in &entries {
            let id = entry.id().get();
            if !(1..=MAX_POKEMON_ID).contains(&id) {
                return Err(CatalogError::new(format!(
                    "Pokemon id {} outside 1-{}",
                    id, MAX_POKEMON_ID
                )));
            }
            if !seen.insert(id) {
                return Err(CatalogError::new(format!("Duplicate Pokemon id {}", id)));
            }
            if entry.types().is_empty() {
                return Err(CatalogError::new(format!("{} has no types", entry.name())));
            }
            if entry.moves().is_empty() {
                return Err(CatalogError::new(format!("{} has no moves", entry.name())));
            }
            if let Some(bad) = entry.moves().iter().find(|m| m.is_empty() || m.contains('-')) {
                return Err(CatalogError::new(format!(
                    "{} has malformed move '{}'",
                    entry.name(),
                    bad
                )));
            }
        }

        let mut entries: Vec<Arc<Pokemon>> = entries.into_iter().map(Arc::new).collect();
        entries.sort_by_key(|p| *p.id());

        info!(count = entries.len(), "Pokedex loaded");
        Ok(Self { entries })
    }

    /// Looks up a Pokemon by Pokedex number.
    #[instrument(skip(self))]
    pub fn get(&self, id: PokemonId) -> Option<Arc<Pokemon>> {
        self.entries
            .binary_search_by_key(&id, |p| *p.id())
            .ok()
            .map(|idx| Arc::clone(&self.entries[idx]))
    }

    /// Returns every entry in Pokedex order.
    ///
    /// The returned vector is a fresh copy; callers may reorder it freely.
    pub fn all(&self) -> Vec<Arc<Pokemon>> {
        self.entries.clone()
    }

    /// Looks up a Pokemon by name, ignoring case. Empty input finds nothing.
    #[instrument(skip(self))]
    pub fn by_name(&self, name: &str) -> Option<Arc<Pokemon>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .find(|p| p.name().to_lowercase() == wanted)
            .cloned()
    }

    /// Resolves either a Pokedex number or a name.
    #[instrument(skip(self))]
    pub fn resolve(&self, query: &str) -> Option<Arc<Pokemon>> {
        match query.trim().parse::<u16>() {
            Ok(num) => self.get(PokemonId(num)),
            Err(_) => {
                debug!("Query is not numeric, searching by name");
                self.by_name(query)
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"[
        {"id":4,"name":"Charmander","types":["fire"],"evolutionStage":"basic","moves":["ember"]},
        {"id":1,"name":"Bulbasaur","types":["grass","poison"],"evolutionStage":"basic","moves":["vineWhip"]}
    ]"#;

    #[test]
    fn test_entries_sorted_by_id() {
        let dex = Pokedex::from_json(TINY).unwrap();
        let ids: Vec<u16> = dex.all().iter().map(|p| p.id().get()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            {"id":1,"name":"A","types":["normal"],"evolutionStage":"basic","moves":["tackle"]},
            {"id":1,"name":"B","types":["normal"],"evolutionStage":"basic","moves":["tackle"]}
        ]"#;
        let err = Pokedex::from_json(json).unwrap_err();
        assert!(err.message.contains("Duplicate"));
    }

    #[test]
    fn test_out_of_range_id_rejected() {
        let json = r#"[{"id":151,"name":"Mew","types":["psychic"],"evolutionStage":"basic","moves":["pound"]}]"#;
        assert!(Pokedex::from_json(json).is_err());
    }

    #[test]
    fn test_hyphenated_move_rejected() {
        let json = r#"[{"id":1,"name":"A","types":["normal"],"evolutionStage":"basic","moves":["vine-whip"]}]"#;
        assert!(Pokedex::from_json(json).is_err());
    }

    #[test]
    fn test_resolve_by_number_or_name() {
        let dex = Pokedex::from_json(TINY).unwrap();
        assert_eq!(dex.resolve("4").unwrap().name(), "Charmander");
        assert_eq!(dex.resolve("bulbasaur").unwrap().id().get(), 1);
        assert!(dex.resolve("7").is_none());
    }
}
