//! Read-only platform and weapon catalogs.
//!
//! Both are loaded once at startup and shared by reference. A catalog that
//! cannot be read or parsed degrades to an empty one: assets then simply run
//! on domain defaults.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Domain, WeaponCategory};
use crate::error::CatalogError;

/// Performance and loadout data for one platform type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    pub name: String,
    /// Filled in from the catalog section the profile was listed under.
    #[serde(default)]
    pub domain: Domain,
    /// Knots.
    pub max_speed: f64,
    /// Feet.
    #[serde(default)]
    pub max_altitude: f64,
    /// Degrees per second.
    pub max_turn: f64,
    /// Feet per minute.
    #[serde(default)]
    pub max_climb: f64,
    /// Weapon catalog variant names, in preference order.
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub emitters: Vec<String>,
    #[serde(default)]
    pub threat_level: u8,
    #[serde(default)]
    pub imagery: Vec<String>,
    /// Rounds carried per category.
    #[serde(default)]
    pub loadout: BTreeMap<WeaponCategory, u32>,
}

/// Ballistic profile of one weapon variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponProfile {
    #[serde(rename = "type")]
    pub weapon_type: WeaponCategory,
    pub target_type: Domain,
    /// Nautical miles.
    pub max_range: f64,
    /// Knots.
    pub max_speed: f64,
    /// Knots per second.
    pub max_acceleration: f64,
}

/// On-disk layout of the platform catalog: profiles grouped by domain.
#[derive(Debug, Default, Deserialize)]
struct PlatformCatalogFile {
    #[serde(default)]
    air: Vec<PlatformProfile>,
    #[serde(default)]
    surface: Vec<PlatformProfile>,
    #[serde(default)]
    subsurface: Vec<PlatformProfile>,
}

/// All known platforms, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PlatformCatalog {
    profiles: HashMap<String, PlatformProfile>,
}

/// All known weapon variants, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponCatalog {
    variants: BTreeMap<String, WeaponProfile>,
}

/// Rate limits that drive an asset's ramps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceLimits {
    pub turn_rate_deg_s: f64,
    pub accel_kn_s: f64,
    pub climb_rate_ft_s: f64,
    pub depth_rate_ft_s: f64,
    pub max_speed_kn: Option<f64>,
    pub max_altitude_ft: Option<f64>,
}

impl PlatformCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: PlatformCatalogFile = serde_json::from_str(json)?;
        let mut profiles = HashMap::new();
        for (domain, list) in [
            (Domain::Air, file.air),
            (Domain::Surface, file.surface),
            (Domain::Subsurface, file.subsurface),
        ] {
            for mut profile in list {
                profile.domain = domain;
                profiles.insert(profile.name.clone(), profile);
            }
        }
        Ok(Self { profiles })
    }

    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from disk, falling back to an empty catalog on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => {
                tracing::info!(count = catalog.len(), "Loaded platform catalog");
                catalog
            }
            Err(e) => {
                tracing::warn!("{e}; continuing with an empty platform catalog");
                Self::default()
            }
        }
    }

    pub fn insert(&mut self, profile: PlatformProfile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn get(&self, name: &str) -> Option<&PlatformProfile> {
        self.profiles.get(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl WeaponCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from disk, falling back to an empty catalog on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => {
                tracing::info!(count = catalog.len(), "Loaded weapon catalog");
                catalog
            }
            Err(e) => {
                tracing::warn!("{e}; continuing with an empty weapon catalog");
                Self::default()
            }
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, profile: WeaponProfile) {
        self.variants.insert(name.into(), profile);
    }

    pub fn get(&self, variant: &str) -> Option<&WeaponProfile> {
        self.variants.get(variant)
    }

    /// First variant in `loadout` whose catalog type is `category`.
    pub fn resolve<'a>(
        &'a self,
        loadout: &'a [String],
        category: WeaponCategory,
    ) -> Option<(&'a str, &'a WeaponProfile)> {
        loadout.iter().find_map(|name| {
            self.variants
                .get(name)
                .filter(|p| p.weapon_type == category)
                .map(|p| (name.as_str(), p))
        })
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl PerformanceLimits {
    /// Limits for an asset: platform values where present, domain defaults otherwise.
    pub fn for_asset(domain: Domain, profile: Option<&PlatformProfile>) -> Self {
        let (turn, accel, climb) = match domain {
            Domain::Air => (AIR_TURN_RATE_DEG_S, AIR_ACCEL_KN_S, AIR_CLIMB_RATE_FT_S),
            Domain::Surface => (SURFACE_TURN_RATE_DEG_S, SURFACE_ACCEL_KN_S, 0.0),
            Domain::Subsurface => (SUBSURFACE_TURN_RATE_DEG_S, SUBSURFACE_ACCEL_KN_S, 0.0),
        };
        match profile {
            Some(p) => Self {
                turn_rate_deg_s: if p.max_turn > 0.0 { p.max_turn } else { turn },
                accel_kn_s: accel,
                climb_rate_ft_s: if p.max_climb > 0.0 {
                    p.max_climb / 60.0
                } else {
                    climb
                },
                depth_rate_ft_s: DEPTH_RATE_FT_S,
                max_speed_kn: (p.max_speed > 0.0).then_some(p.max_speed),
                max_altitude_ft: (p.max_altitude > 0.0).then_some(p.max_altitude),
            },
            None => Self {
                turn_rate_deg_s: turn,
                accel_kn_s: accel,
                climb_rate_ft_s: climb,
                depth_rate_ft_s: DEPTH_RATE_FT_S,
                max_speed_kn: None,
                max_altitude_ft: None,
            },
        }
    }
}
