//! Entity domain types: the Gen 1 roster.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Pokedex number (1-150 for the bundled roster).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PokemonId(pub u16);

impl PokemonId {
    /// Returns the raw Pokedex number.
    pub fn get(self) -> u16 {
        self.0
    }
}

/// Elemental type tag, as it stood in Gen 1.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    /// Normal.
    Normal,
    /// Fire.
    Fire,
    /// Water.
    Water,
    /// Electric.
    Electric,
    /// Grass.
    Grass,
    /// Ice.
    Ice,
    /// Fighting.
    Fighting,
    /// Poison.
    Poison,
    /// Ground.
    Ground,
    /// Flying.
    Flying,
    /// Psychic.
    Psychic,
    /// Bug.
    Bug,
    /// Rock.
    Rock,
    /// Ghost.
    Ghost,
    /// Dragon.
    Dragon,
}

/// Position of a Pokemon within its evolution chain.
///
/// Chains that only gained a pre-evolution in later generations
/// (Pikachu, Clefairy, ...) count from their Gen 1 base.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EvolutionStage {
    /// First in its chain, or does not evolve.
    Basic,
    /// First evolution.
    Stage1,
    /// Final evolution of a three-stage chain.
    Stage2,
}

/// A single roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    /// Pokedex number.
    id: PokemonId,
    /// Display name (e.g. "Bulbasaur").
    name: String,
    /// One or two type tags, primary first.
    types: Vec<PokemonType>,
    /// Evolution stage.
    evolution_stage: EvolutionStage,
    /// Learnable move identifiers in camelCase.
    moves: Vec<String>,
}

impl Pokemon {
    /// Creates a roster entry.
    pub fn new(
        id: impl Into<PokemonId>,
        name: impl Into<String>,
        types: Vec<PokemonType>,
        evolution_stage: EvolutionStage,
        moves: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            types,
            evolution_stage,
            moves,
        }
    }

    /// Returns true if this Pokemon carries the given type.
    pub fn has_type(&self, ty: PokemonType) -> bool {
        self.types.contains(&ty)
    }

    /// Returns true if the move identifier is in this Pokemon's learnset.
    pub fn knows_move(&self, name: &str) -> bool {
        self.moves.iter().any(|m| m == name)
    }
}

impl std::fmt::Display for Pokemon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types = self
            .types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "#{:03} {} ({}, {})", self.id.0, self.name, types, self.evolution_stage)
    }
}
