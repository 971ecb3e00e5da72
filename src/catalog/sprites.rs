//! Sprite URL construction. Fetching the image is left to the front end.

use super::pokemon::PokemonId;

/// Default sprite CDN (PokeAPI sprites repository).
pub const DEFAULT_SPRITE_CDN_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Builds the sprite URL for a Pokemon under the given CDN base.
pub fn sprite_url(base: &str, id: PokemonId) -> String {
    format!("{}/{}.png", base.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base() {
        assert_eq!(
            sprite_url(DEFAULT_SPRITE_CDN_URL, PokemonId(25)),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(sprite_url("http://cdn/", PokemonId(1)), "http://cdn/1.png");
    }
}
