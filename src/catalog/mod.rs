//! Static data collaborators: the Pokemon roster and the level table.

mod error;
mod levels;
mod pokedex;
mod pokemon;
mod sprites;

pub use error::CatalogError;
pub use levels::{Criteria, CriteriaKind, CriteriaValue, Level, LevelCatalog, LevelId};
pub use pokedex::{MAX_POKEMON_ID, Pokedex};
pub use pokemon::{EvolutionStage, Pokemon, PokemonId, PokemonType};
pub use sprites::{DEFAULT_SPRITE_CDN_URL, sprite_url};
