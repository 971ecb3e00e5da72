//! Level definitions and the bundled level table.
//!
//! A level names three row criteria and three column criteria. The grid
//! engine only ever sees a [`LevelId`]; criteria are carried here for
//! display and for whatever scoring layer sits on top.

use super::error::CatalogError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};

/// Bundled level table.
const BUNDLED_LEVELS: &str = include_str!("../../data/levels.json");

/// Level number.
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
pub struct LevelId(pub u32);

/// Kind of rule a row or column imposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CriteriaKind {
    /// Pokemon must carry a single type.
    Type,
    /// Pokemon must carry both listed types.
    DualType,
    /// Pokemon must be at an evolution stage.
    Evolution,
    /// Pokemon must know the listed move (any of, when several are listed).
    Moveset,
}

/// Value a criterion matches against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CriteriaValue {
    /// A single type, stage or move.
    One(String),
    /// Several values (dual types, alternative moves).
    Many(Vec<String>),
}

impl CriteriaValue {
    /// Returns the values as a slice-like list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            CriteriaValue::One(v) => vec![v.as_str()],
            CriteriaValue::Many(vs) => vs.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for CriteriaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.values().join("/"))
    }
}

/// A rule attached to one row or one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Criteria {
    /// Kind of rule.
    #[serde(rename = "type")]
    kind: CriteriaKind,
    /// Value(s) the rule refers to.
    value: CriteriaValue,
}

impl Criteria {
    /// Creates a criterion.
    pub fn new(kind: CriteriaKind, value: CriteriaValue) -> Self {
        Self { kind, value }
    }
}

impl std::fmt::Display for Criteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}

/// A puzzle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Level {
    /// Level number (1-9 in the bundled table).
    id: LevelId,
    /// Display name.
    name: String,
    /// Row criteria, top to bottom.
    rows: [Criteria; 3],
    /// Column criteria, left to right.
    columns: [Criteria; 3],
}

impl Level {
    /// Iterates over all six criteria, rows first.
    pub fn criteria(&self) -> impl Iterator<Item = &Criteria> {
        self.rows.iter().chain(self.columns.iter())
    }
}

/// Read-only level catalog.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Arc<Level>>,
}

impl LevelCatalog {
    /// Loads the level table compiled into the binary.
    #[instrument]
    pub fn load_bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_LEVELS)
    }

    /// Parses and validates a level table.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or duplicate level ids.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for level in &levels {
            if !seen.insert(level.id) {
                return Err(CatalogError::new(format!("Duplicate level id {}", level.id)));
            }
        }

        let mut levels: Vec<Arc<Level>> = levels.into_iter().map(Arc::new).collect();
        levels.sort_by_key(|l| l.id);

        info!(count = levels.len(), "Level catalog loaded");
        Ok(Self { levels })
    }

    /// Looks up a level by id.
    #[instrument(skip(self))]
    pub fn get(&self, id: LevelId) -> Option<Arc<Level>> {
        self.levels.iter().find(|l| l.id == id).cloned()
    }

    /// Returns every level in id order, as a fresh copy.
    pub fn all(&self) -> Vec<Arc<Level>> {
        self.levels.clone()
    }

    /// Number of levels.
    pub fn count(&self) -> usize {
        self.levels.len()
    }
}
