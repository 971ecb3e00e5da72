//! Tests for the puzzle grid transition function.

use pokegrid::{
    Action, CellPosition, EvolutionStage, GRID_SIZE, GameState, GridEngine, LevelId,
    OverwritePolicy, Pokemon, PokemonId, PokemonType, TransitionError, apply,
    create_initial_grid, create_initial_state,
};
use std::collections::BTreeSet;
use std::sync::Arc;

fn pokemon(id: u16, name: &str) -> Arc<Pokemon> {
    Arc::new(Pokemon::new(
        PokemonId(id),
        name,
        vec![PokemonType::Normal],
        EvolutionStage::Basic,
        vec!["tackle".to_string()],
    ))
}

fn at(row: usize, col: usize) -> CellPosition {
    CellPosition::new(row, col)
}

fn initial() -> Arc<GameState> {
    Arc::new(create_initial_state())
}

fn ids(values: &[u16]) -> BTreeSet<PokemonId> {
    values.iter().copied().map(PokemonId).collect()
}

#[test]
fn test_initial_grid_has_every_coordinate_once() {
    let grid = create_initial_grid();
    assert_eq!(grid.size(), GRID_SIZE);
    assert_eq!(grid.cells().len(), GRID_SIZE * GRID_SIZE);
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let cell = grid.get(at(row, col)).expect("cell exists");
            assert_eq!(*cell.position(), at(row, col));
            assert!(cell.is_empty());
        }
    }
}

#[test]
fn test_initial_state_is_blank() {
    let state = create_initial_state();
    assert_eq!(state.selection(), None);
    assert!(state.used().is_empty());
    assert_eq!(state.level(), None);
    assert!(state.grid().cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_select_cell_replaces_selection_only() {
    let s0 = apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let s1 = apply(&s0, &Action::select(at(2, 1))).unwrap();

    assert_eq!(s1.selection(), Some(at(2, 1)));
    assert_eq!(s1.grid(), s0.grid());
    assert_eq!(s1.used(), s0.used());

    let s2 = apply(&s1, &Action::deselect()).unwrap();
    assert_eq!(s2.selection(), None);
}

#[test]
fn test_place_sets_cell_marks_used_and_deselects() {
    let selected = apply(&initial(), &Action::select(at(1, 1))).unwrap();
    let bulbasaur = pokemon(1, "Bulbasaur");
    let placed = apply(&selected, &Action::place(at(0, 2), Arc::clone(&bulbasaur))).unwrap();

    assert_eq!(placed.pokemon_at(at(0, 2)), Some(&bulbasaur));
    assert!(placed.is_used(PokemonId(1)));
    assert_eq!(placed.selection(), None);
}

#[test]
fn test_place_then_clear_scenario() {
    let s = apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let s = apply(&s, &Action::place(at(1, 1), pokemon(4, "Charmander"))).unwrap();
    let s = apply(&s, &Action::ClearCell(at(0, 0))).unwrap();

    assert!(s.pokemon_at(at(0, 0)).is_none());
    assert_eq!(s.pokemon_at(at(1, 1)).map(|p| *p.id()), Some(PokemonId(4)));
    assert_eq!(s.used(), &ids(&[4]));
}

#[test]
fn test_three_distinct_placements_in_any_order() {
    let placements = [
        (at(0, 0), pokemon(1, "Bulbasaur")),
        (at(1, 1), pokemon(4, "Charmander")),
        (at(2, 2), pokemon(7, "Squirtle")),
    ];

    let forward = placements.iter().fold(initial(), |s, (pos, p)| {
        apply(&s, &Action::place(*pos, Arc::clone(p))).unwrap()
    });
    let backward = placements.iter().rev().fold(initial(), |s, (pos, p)| {
        apply(&s, &Action::place(*pos, Arc::clone(p))).unwrap()
    });

    assert_eq!(forward.used(), &ids(&[1, 4, 7]));
    assert_eq!(forward.used(), backward.used());
    assert_eq!(forward.grid(), backward.grid());
}

#[test]
fn test_clear_cell_is_idempotent() {
    let s = apply(&initial(), &Action::place(at(1, 0), pokemon(25, "Pikachu"))).unwrap();
    for pos in CellPosition::all(GRID_SIZE) {
        let once = apply(&s, &Action::ClearCell(pos)).unwrap();
        let twice = apply(&once, &Action::ClearCell(pos)).unwrap();
        assert_eq!(once, twice, "clearing {} twice", pos);
    }
}

#[test]
fn test_clear_empty_cell_keeps_selection_and_used() {
    let s = apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let s = apply(&s, &Action::select(at(2, 2))).unwrap();
    let cleared = apply(&s, &Action::ClearCell(at(2, 1))).unwrap();

    assert_eq!(cleared.selection(), Some(at(2, 2)));
    assert_eq!(cleared.used(), &ids(&[1]));
}

#[test]
fn test_clearing_one_alias_keeps_id_used() {
    let mew = pokemon(150, "Mewtwo");
    let s = apply(&initial(), &Action::place(at(0, 0), Arc::clone(&mew))).unwrap();
    let s = apply(&s, &Action::place(at(2, 2), Arc::clone(&mew))).unwrap();

    let s = apply(&s, &Action::ClearCell(at(0, 0))).unwrap();
    assert!(s.is_used(PokemonId(150)));

    let s = apply(&s, &Action::ClearCell(at(2, 2))).unwrap();
    assert!(!s.is_used(PokemonId(150)));
}

#[test]
fn test_reset_grid_keeps_level() {
    let s = apply(&initial(), &Action::SetLevel(LevelId(3))).unwrap();
    let s = apply(&s, &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let s = apply(&s, &Action::select(at(1, 2))).unwrap();
    let reset = apply(&s, &Action::ResetGrid).unwrap();

    assert!(reset.used().is_empty());
    assert_eq!(reset.selection(), None);
    assert_eq!(reset.level(), Some(LevelId(3)));
    assert_eq!(reset.grid(), &create_initial_grid());
}

#[test]
fn test_set_level_yields_clean_board() {
    let s = apply(&initial(), &Action::place(at(1, 1), pokemon(4, "Charmander"))).unwrap();
    let s = apply(&s, &Action::select(at(0, 0))).unwrap();
    let switched = apply(&s, &Action::SetLevel(LevelId(2))).unwrap();

    assert_eq!(switched.grid(), &create_initial_grid());
    assert!(switched.used().is_empty());
    assert_eq!(switched.selection(), None);
    assert_eq!(switched.level(), Some(LevelId(2)));
}

#[test]
fn test_unknown_action_returns_same_snapshot() {
    let s = apply(&initial(), &Action::place(at(0, 1), pokemon(1, "Bulbasaur"))).unwrap();
    let same = apply(&s, &Action::Unknown).unwrap();
    assert!(Arc::ptr_eq(&s, &same));
}

#[test]
fn test_out_of_bounds_rejected() {
    let s = initial();
    let cases = [
        Action::place(at(3, 0), pokemon(1, "Bulbasaur")),
        Action::ClearCell(at(0, 3)),
        Action::select(at(5, 5)),
    ];
    for action in cases {
        let err = apply(&s, &action).unwrap_err();
        assert!(
            matches!(err, TransitionError::OutOfBounds { size: GRID_SIZE, .. }),
            "{} should be out of bounds, got {:?}",
            action,
            err
        );
    }
    assert_eq!(*s, create_initial_state());
}

#[test]
fn test_prior_snapshot_unchanged_after_transition() {
    let before = apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let held = Arc::clone(&before);
    let copy = (*before).clone();

    let after = apply(&before, &Action::place(at(1, 1), pokemon(4, "Charmander"))).unwrap();
    let after = apply(&after, &Action::ClearCell(at(0, 0))).unwrap();
    let _ = apply(&after, &Action::ResetGrid).unwrap();

    assert_eq!(*held, copy);
    assert!(held.is_used(PokemonId(1)));
    assert!(held.pokemon_at(at(1, 1)).is_none());
}

#[test]
fn test_overwrite_retains_displaced_id_by_default() {
    let s = apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let s = apply(&s, &Action::place(at(0, 0), pokemon(4, "Charmander"))).unwrap();

    assert_eq!(s.pokemon_at(at(0, 0)).map(|p| *p.id()), Some(PokemonId(4)));
    assert_eq!(s.used(), &ids(&[1, 4]));
}

#[test]
fn test_overwrite_releases_displaced_id_when_configured() {
    let engine = GridEngine::new(OverwritePolicy::Release);
    let s = engine
        .apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur")))
        .unwrap();
    let s = engine
        .apply(&s, &Action::place(at(0, 0), pokemon(4, "Charmander")))
        .unwrap();

    assert_eq!(s.used(), &ids(&[4]));
    assert_eq!(s.used(), &s.grid().occupant_ids());
}

#[test]
fn test_release_keeps_id_held_elsewhere() {
    let engine = GridEngine::new(OverwritePolicy::Release);
    let bulbasaur = pokemon(1, "Bulbasaur");
    let s = engine
        .apply(&initial(), &Action::place(at(0, 0), Arc::clone(&bulbasaur)))
        .unwrap();
    let s = engine
        .apply(&s, &Action::place(at(0, 1), Arc::clone(&bulbasaur)))
        .unwrap();
    let s = engine
        .apply(&s, &Action::place(at(0, 0), pokemon(7, "Squirtle")))
        .unwrap();

    assert_eq!(s.used(), &ids(&[1, 7]));
}

#[test]
fn test_replacing_with_same_pokemon_is_stable() {
    let bulbasaur = pokemon(1, "Bulbasaur");
    for policy in [OverwritePolicy::Retain, OverwritePolicy::Release] {
        let engine = GridEngine::new(policy);
        let s = engine
            .apply(&initial(), &Action::place(at(2, 0), Arc::clone(&bulbasaur)))
            .unwrap();
        let s = engine
            .apply(&s, &Action::place(at(2, 0), Arc::clone(&bulbasaur)))
            .unwrap();
        assert_eq!(s.used(), &ids(&[1]), "policy {}", policy);
    }
}

#[test]
fn test_switching_to_release_on_retained_state() {
    let s = apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let s = apply(&s, &Action::place(at(0, 0), pokemon(4, "Charmander"))).unwrap();
    assert_eq!(s.used(), &ids(&[1, 4]));

    let release = GridEngine::new(OverwritePolicy::Release);
    let selected = release.apply(&s, &Action::select(at(1, 1))).unwrap();
    assert_eq!(selected.selection(), Some(at(1, 1)));
    assert_eq!(selected.used(), &ids(&[1, 4]));

    let placed = release
        .apply(&selected, &Action::place(at(2, 2), pokemon(7, "Squirtle")))
        .unwrap();
    assert_eq!(placed.used(), &ids(&[1, 4, 7]));

    let cleared = release.apply(&placed, &Action::ClearCell(at(0, 0))).unwrap();
    assert_eq!(cleared.used(), &ids(&[1, 7]));
}

#[test]
fn test_malformed_snapshot_rejected() {
    let json = r#"{"grid":{"size":3,"cells":[]},"selection":null,"used":[],"level":null}"#;
    let err = serde_json::from_str::<GameState>(json).unwrap_err();
    assert!(err.to_string().contains("one cell per coordinate"), "{}", err);
}

#[test]
fn test_snapshot_with_untracked_occupant_rejected() {
    let s = apply(&initial(), &Action::place(at(1, 2), pokemon(25, "Pikachu"))).unwrap();
    let mut value = serde_json::to_value(&*s).unwrap();
    value["used"] = serde_json::json!([]);

    assert!(serde_json::from_value::<GameState>(value).is_err());
}

#[test]
fn test_snapshot_round_trip_keeps_playing() {
    let s = apply(&initial(), &Action::place(at(0, 0), pokemon(1, "Bulbasaur"))).unwrap();
    let s = apply(&s, &Action::place(at(0, 1), pokemon(1, "Bulbasaur"))).unwrap();
    let restored: GameState = serde_json::from_str(&serde_json::to_string(&*s).unwrap()).unwrap();
    assert_eq!(restored, *s);

    let restored = Arc::new(restored);
    let cleared = apply(&restored, &Action::ClearCell(at(0, 0))).unwrap();
    assert!(cleared.is_used(PokemonId(1)));
    assert_eq!(cleared.grid().count_of(PokemonId(1)), 1);
}

#[test]
fn test_occupancy_counts_follow_transitions() {
    let bulbasaur = pokemon(1, "Bulbasaur");
    let s = apply(&initial(), &Action::place(at(0, 0), Arc::clone(&bulbasaur))).unwrap();
    let s = apply(&s, &Action::place(at(1, 1), Arc::clone(&bulbasaur))).unwrap();
    assert_eq!(s.grid().count_of(PokemonId(1)), 2);

    let s = apply(&s, &Action::place(at(1, 1), pokemon(4, "Charmander"))).unwrap();
    assert_eq!(s.grid().count_of(PokemonId(1)), 1);
    assert_eq!(s.grid().occupant_ids(), ids(&[1, 4]));

    let s = apply(&s, &Action::ResetGrid).unwrap();
    assert_eq!(s.grid().count_of(PokemonId(1)), 0);
}
