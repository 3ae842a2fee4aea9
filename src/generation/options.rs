//! Host parameter mapping
//!
//! The host collects named values from the user and hands them over as a
//! flat map. Keys are the labels shown to the user; a trailing `:` is
//! ignored so "Trunk Max Life:" and "Trunk Max Life" are the same key.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::Result;
use crate::voxel::block::{ids, Block};

/// Option keys, without the trailing colon
pub mod keys {
    pub const OPERATION: &str = "Operation";

    pub const TRUNK_MAX_LIFE: &str = "Trunk Max Life";
    pub const TRUNK_MATERIAL: &str = "Trunk Material";
    pub const BRANCH_AT_END_OF_LIFE: &str = "Branch at End of Life";
    pub const TRUNK_THICKNESS_RATIO: &str = "Trunk Age to Thickness Ratio";
    pub const SPLIT_ONE_IN: &str = "Splitting Percentage: 1 in";
    pub const SPLIT_LIFE_MULTIPLIER: &str = "Split Trunk Life Multiplier";
    pub const CURVE_ONE_IN: &str = "Curving Percentage: 1 in";
    pub const CURVE_MAX_ANGLE: &str = "Curving Max Angle";

    pub const BRANCH_ONE_IN: &str = "Branching Percentage: 1 in";
    pub const BRANCH_MIN_ANGLE: &str = "Branching Min Angle";
    pub const BRANCH_MAX_ANGLE: &str = "Branching Max Angle";
    pub const BRANCH_LIFE_MULTIPLIER: &str = "Branch Life Multiplier";
    pub const BRANCH_MATERIAL: &str = "Branch Material";
    pub const BRANCH_THICKNESS_RATIO: &str = "Branch Age to Thickness Ratio";
    pub const BRANCH_CURVE_ONE_IN: &str = "Branch Curving Percentage: 1 in";
    pub const BRANCH_CURVE_MAX_ANGLE: &str = "Branch Curving Max Angle";

    pub const LEAVES_ONE_IN: &str = "Leaves Percentage: 1 in";
    pub const LEAVES_COUNT: &str = "Number of Leaves Spawned";
    pub const LEAVES_MAX_LIFE: &str = "Leaves Max Life";
    pub const LEAVES_MATERIAL: &str = "Leaves Material";
    pub const LEAVES_THICKNESS_RATIO: &str = "Leaves Age to Thickness Ratio";

    /// Every key a complete mapping carries
    pub const ALL: [&str; 22] = [
        OPERATION,
        TRUNK_MAX_LIFE,
        TRUNK_MATERIAL,
        BRANCH_AT_END_OF_LIFE,
        TRUNK_THICKNESS_RATIO,
        SPLIT_ONE_IN,
        SPLIT_LIFE_MULTIPLIER,
        CURVE_ONE_IN,
        CURVE_MAX_ANGLE,
        BRANCH_ONE_IN,
        BRANCH_MIN_ANGLE,
        BRANCH_MAX_ANGLE,
        BRANCH_LIFE_MULTIPLIER,
        BRANCH_MATERIAL,
        BRANCH_THICKNESS_RATIO,
        BRANCH_CURVE_ONE_IN,
        BRANCH_CURVE_MAX_ANGLE,
        LEAVES_ONE_IN,
        LEAVES_COUNT,
        LEAVES_MAX_LIFE,
        LEAVES_MATERIAL,
        LEAVES_THICKNESS_RATIO,
    ];
}

/// One host-supplied value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Material(Block),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Number(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Number(v as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

impl From<Block> for OptionValue {
    fn from(v: Block) -> Self {
        OptionValue::Material(v)
    }
}

/// Flat key/value mapping supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeOptions {
    values: BTreeMap<String, OptionValue>,
}

fn normalize_key(key: &str) -> String {
    key.trim().trim_end_matches(':').trim_end().to_string()
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The values the classic tree tool starts with
    pub fn defaults() -> Self {
        let wood = Block::new(ids::LOG, 0);
        let mut options = Self::new();
        options
            .set(keys::OPERATION, "Create Tree")
            .set(keys::TRUNK_MAX_LIFE, 50)
            .set(keys::TRUNK_MATERIAL, wood)
            .set(keys::BRANCH_AT_END_OF_LIFE, true)
            .set(keys::TRUNK_THICKNESS_RATIO, 0.04)
            .set(keys::SPLIT_ONE_IN, 100)
            .set(keys::SPLIT_LIFE_MULTIPLIER, 0.5)
            .set(keys::CURVE_ONE_IN, 10)
            .set(keys::CURVE_MAX_ANGLE, 30)
            .set(keys::BRANCH_ONE_IN, 8)
            .set(keys::BRANCH_MIN_ANGLE, 30)
            .set(keys::BRANCH_MAX_ANGLE, 50)
            .set(keys::BRANCH_LIFE_MULTIPLIER, 0.75)
            .set(keys::BRANCH_MATERIAL, wood)
            .set(keys::BRANCH_THICKNESS_RATIO, 0.02)
            .set(keys::BRANCH_CURVE_ONE_IN, 5)
            .set(keys::BRANCH_CURVE_MAX_ANGLE, 15)
            .set(keys::LEAVES_ONE_IN, 4)
            .set(keys::LEAVES_COUNT, 3)
            .set(keys::LEAVES_MAX_LIFE, 4)
            .set(keys::LEAVES_MATERIAL, Block::new(ids::LEAVES, 0))
            .set(keys::LEAVES_THICKNESS_RATIO, 0.5);
        options
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.values.insert(normalize_key(key), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(&normalize_key(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.values.remove(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a JSON object of key/value pairs
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, OptionValue> = serde_json::from_str(json)?;
        let values = raw
            .into_iter()
            .map(|(k, v)| (normalize_key(&k), v))
            .collect();
        Ok(Self { values })
    }

    /// Load from a JSON file (sync)
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn require(&self, key: &str) -> std::result::Result<&OptionValue, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn wrong_type(key: &str, expected: &'static str) -> ConfigError {
        ConfigError::WrongType { key: key.to_string(), expected }
    }

    /// Finite number
    pub fn number(&self, key: &str) -> std::result::Result<f64, ConfigError> {
        match self.require(key)? {
            OptionValue::Number(n) if n.is_finite() => Ok(*n),
            _ => Err(Self::wrong_type(key, "a finite number")),
        }
    }

    /// Whole number
    pub fn integer(&self, key: &str) -> std::result::Result<i64, ConfigError> {
        let n = self.number(key).map_err(|e| match e {
            ConfigError::WrongType { .. } => Self::wrong_type(key, "a whole number"),
            other => other,
        })?;
        if n.fract() != 0.0 || n.abs() > i32::MAX as f64 {
            return Err(Self::wrong_type(key, "a whole number"));
        }
        Ok(n as i64)
    }

    pub fn flag(&self, key: &str) -> std::result::Result<bool, ConfigError> {
        match self.require(key)? {
            OptionValue::Bool(b) => Ok(*b),
            _ => Err(Self::wrong_type(key, "true or false")),
        }
    }

    pub fn text(&self, key: &str) -> std::result::Result<&str, ConfigError> {
        match self.require(key)? {
            OptionValue::Text(s) => Ok(s),
            _ => Err(Self::wrong_type(key, "text")),
        }
    }

    pub fn material(&self, key: &str) -> std::result::Result<Block, ConfigError> {
        match self.require(key)? {
            OptionValue::Material(b) => Ok(*b),
            _ => Err(Self::wrong_type(key, "a material {\"id\", \"data\"}")),
        }
    }
}
