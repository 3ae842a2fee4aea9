//! Typed configuration parsed from host options.

use crate::core::error::ConfigError;
use crate::core::types::Result;
use crate::generation::options::{keys, TreeOptions};
use crate::generation::Operation;
use crate::voxel::block::Block;
use crate::voxel::edit::DecayRules;
use crate::voxel::procgen::tree::{BranchParams, LeafParams, TreeParams, TrunkParams};

/// Everything one operation needs, validated up front.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    pub operation: Operation,
    /// Growth parameters for all three cell kinds.
    pub params: TreeParams,
    /// Material families and threshold for leaf decay. Not host options.
    pub decay: DecayRules,
    /// Cap on direction resampling (None = never give up).
    pub max_sampling_attempts: Option<u32>,
}

impl TreeConfig {
    /// Parse and validate every key. Nothing is defaulted: a missing key is an error.
    pub fn from_options(options: &TreeOptions) -> Result<Self> {
        let operation = options.text(keys::OPERATION)?.parse::<Operation>()?;

        let trunk = TrunkParams {
            max_life: life(options, keys::TRUNK_MAX_LIFE)?,
            material: options.material(keys::TRUNK_MATERIAL)?,
            branch_at_end_of_life: options.flag(keys::BRANCH_AT_END_OF_LIFE)?,
            thickness_ratio: non_negative(options, keys::TRUNK_THICKNESS_RATIO)?,
            split_one_in: count(options, keys::SPLIT_ONE_IN)?,
            split_life_multiplier: non_negative(options, keys::SPLIT_LIFE_MULTIPLIER)?,
            curve_one_in: count(options, keys::CURVE_ONE_IN)?,
            curve_max_angle: options.number(keys::CURVE_MAX_ANGLE)?,
        };

        let branch = BranchParams {
            one_in: count(options, keys::BRANCH_ONE_IN)?,
            min_angle: options.number(keys::BRANCH_MIN_ANGLE)?,
            max_angle: options.number(keys::BRANCH_MAX_ANGLE)?,
            life_multiplier: non_negative(options, keys::BRANCH_LIFE_MULTIPLIER)?,
            material: options.material(keys::BRANCH_MATERIAL)?,
            thickness_ratio: non_negative(options, keys::BRANCH_THICKNESS_RATIO)?,
            curve_one_in: count(options, keys::BRANCH_CURVE_ONE_IN)?,
            curve_max_angle: options.number(keys::BRANCH_CURVE_MAX_ANGLE)?,
        };

        let leaves = LeafParams {
            one_in: count(options, keys::LEAVES_ONE_IN)?,
            count: count(options, keys::LEAVES_COUNT)?,
            max_life: life(options, keys::LEAVES_MAX_LIFE)?,
            material: options.material(keys::LEAVES_MATERIAL)?,
            thickness_ratio: non_negative(options, keys::LEAVES_THICKNESS_RATIO)?,
        };

        Ok(Self {
            operation,
            params: TreeParams { trunk, branch, leaves },
            decay: DecayRules::default(),
            max_sampling_attempts: None,
        })
    }

    /// Give up on impossible angle ranges after `attempts` rejected samples.
    pub fn with_sampling_limit(mut self, attempts: u32) -> Self {
        self.max_sampling_attempts = Some(attempts);
        self
    }

    /// The three materials a tree is made of, as deletion matches them.
    pub fn tree_materials(&self) -> [Block; 3] {
        [
            self.params.trunk.material,
            self.params.branch.material,
            self.params.leaves.material,
        ]
    }
}

/// Non-negative whole number, used for "1 in N" keys and the leaf count
fn count(options: &TreeOptions, key: &str) -> std::result::Result<u32, ConfigError> {
    let n = options.integer(key)?;
    u32::try_from(n).map_err(|_| ConfigError::OutOfRange {
        key: key.to_string(),
        reason: format!("{} is negative", n),
    })
}

fn life(options: &TreeOptions, key: &str) -> std::result::Result<i32, ConfigError> {
    let n = options.integer(key)?;
    if n < 0 {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            reason: format!("life {} is negative", n),
        });
    }
    // integer() already bounds the magnitude to i32
    Ok(n as i32)
}

fn non_negative(options: &TreeOptions, key: &str) -> std::result::Result<f64, ConfigError> {
    let value = options.number(key)?;
    if value < 0.0 {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            reason: format!("{} is negative", value),
        });
    }
    Ok(value)
}
