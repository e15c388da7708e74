//! Campaign profiles loaded from JSON
//!
//! A profile file declares a roster of campaigns with their placement
//! configs and kind lists, so deployments can retune spawning without
//! recompiling. [`load_profiles`] parses the file; [`creature_campaign`]
//! and [`item_campaign`] turn one profile into a runnable campaign.

use serde::{Deserialize, Serialize};

use crate::campaign::SpawnCampaign;
use crate::components::{ItemStack, Species};
use crate::config::SpawnConfig;
use crate::spawners::{CreatureSpawner, ItemDropSpawner};

/// Which stock spawner a profiled campaign uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnerChoice {
    Creature,
    ItemDrop,
}

/// A kind as it appears in a profile: either a species name or an item
/// stack object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindSpec {
    Species(Species),
    Item(ItemStack),
}

/// One roster entry. Weight defaults to one when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKind {
    pub kind: KindSpec,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

fn default_count() -> u32 {
    5
}

fn default_interval() -> u64 {
    60
}

/// A declarative campaign description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignProfile {
    pub name: String,
    pub spawner: SpawnerChoice,
    pub default_kind: KindSpec,
    #[serde(default)]
    pub kinds: Vec<WeightedKind>,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub continuous: bool,
    #[serde(default)]
    pub random_kinds: bool,
    #[serde(default)]
    pub aggro: bool,
    #[serde(default)]
    pub config: SpawnConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProfileSet {
    campaigns: Vec<CampaignProfile>,
}

/// Errors raised while loading or instantiating profiles.
#[derive(Debug)]
pub enum ProfileError {
    Json(serde_json::Error),
    MixedKinds {
        campaign: String,
        expected: &'static str,
    },
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Json(e)
    }
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::Json(e) => write!(f, "profile parse error: {}", e),
            ProfileError::MixedKinds { campaign, expected } => {
                write!(f, "campaign '{}' expects {} kinds only", campaign, expected)
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Parses a profile file into its campaign descriptions.
pub fn load_profiles(json: &str) -> Result<Vec<CampaignProfile>, ProfileError> {
    let set: ProfileSet = serde_json::from_str(json)?;
    Ok(set.campaigns)
}

fn expect_species(kind: &KindSpec, campaign: &str) -> Result<Species, ProfileError> {
    match kind {
        KindSpec::Species(species) => Ok(*species),
        KindSpec::Item(_) => Err(ProfileError::MixedKinds {
            campaign: campaign.to_string(),
            expected: "species",
        }),
    }
}

fn expect_item(kind: &KindSpec, campaign: &str) -> Result<ItemStack, ProfileError> {
    match kind {
        KindSpec::Item(stack) => Ok(*stack),
        KindSpec::Species(_) => Err(ProfileError::MixedKinds {
            campaign: campaign.to_string(),
            expected: "item",
        }),
    }
}

/// Builds a creature campaign from a profile. Fails if any kind in the
/// profile is an item.
pub fn creature_campaign(
    profile: &CampaignProfile,
) -> Result<SpawnCampaign<CreatureSpawner>, ProfileError> {
    let default_kind = expect_species(&profile.default_kind, &profile.name)?;
    let mut kinds = Vec::with_capacity(profile.kinds.len());
    for entry in &profile.kinds {
        kinds.push((expect_species(&entry.kind, &profile.name)?, entry.weight));
    }

    let mut campaign = SpawnCampaign::new(
        profile.name.clone(),
        default_kind,
        CreatureSpawner::new().with_aggro(profile.aggro),
    )
    .with_config(profile.config.clone())
    .with_spawn_count(profile.count)
    .with_interval_secs(profile.interval_secs)
    .with_group_spawning(profile.group)
    .with_continuous_spawning(profile.continuous);

    if !kinds.is_empty() {
        campaign = campaign.with_weighted_kinds(kinds);
    }
    // The profile's declared default and random flag win over what the
    // roster builders inferred.
    Ok(campaign
        .with_default_kind(default_kind)
        .with_random_kinds(profile.random_kinds))
}

/// Builds an item-drop campaign from a profile. Fails if any kind in the
/// profile is a species.
pub fn item_campaign(
    profile: &CampaignProfile,
) -> Result<SpawnCampaign<ItemDropSpawner>, ProfileError> {
    let default_kind = expect_item(&profile.default_kind, &profile.name)?;
    let mut kinds = Vec::with_capacity(profile.kinds.len());
    for entry in &profile.kinds {
        kinds.push((expect_item(&entry.kind, &profile.name)?, entry.weight));
    }

    let mut campaign = SpawnCampaign::new(profile.name.clone(), default_kind, ItemDropSpawner::new())
        .with_config(profile.config.clone())
        .with_spawn_count(profile.count)
        .with_interval_secs(profile.interval_secs)
        .with_group_spawning(profile.group)
        .with_continuous_spawning(profile.continuous);

    if !kinds.is_empty() {
        campaign = campaign.with_weighted_kinds(kinds);
    }
    Ok(campaign
        .with_default_kind(default_kind)
        .with_random_kinds(profile.random_kinds))
}
