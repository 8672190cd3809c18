//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Asset identity as shown on the tactical display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ownship,
    Friendly,
    Hostile,
    Neutral,
    Unknown,
    #[default]
    UnknownUnevaluated,
}

/// Operating domain of a platform.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    Air,
    Surface,
    Subsurface,
}

/// Weapon category, matched against the catalog `type` of a loadout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponCategory {
    /// Air-to-air missile.
    #[serde(rename = "AAM")]
    Aam,
    /// Anti-ship missile.
    #[serde(rename = "ASM")]
    Asm,
    /// Surface-to-air missile.
    #[serde(rename = "SAM")]
    Sam,
    #[serde(rename = "TORPEDO")]
    Torpedo,
}

/// Side a munition fights for, fixed at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affiliation {
    Friendly,
    Hostile,
}

/// Ownship systems the operator can switch on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    Radar,
    Iff,
    Esm,
    Datalink,
}

/// Which commanded value a set-target command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    Heading,
    Speed,
    Altitude,
    Depth,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

/// Display symbology family for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolFrame {
    Friend,
    Hostile,
    Neutral,
    Unknown,
    Pending,
}

impl Category {
    /// Symbology frame the rendering layer should draw.
    pub fn frame(self) -> SymbolFrame {
        match self {
            Category::Ownship | Category::Friendly => SymbolFrame::Friend,
            Category::Hostile => SymbolFrame::Hostile,
            Category::Neutral => SymbolFrame::Neutral,
            Category::Unknown => SymbolFrame::Unknown,
            Category::UnknownUnevaluated => SymbolFrame::Pending,
        }
    }

    /// Affiliation a munition inherits when this category fires it.
    pub fn launch_affiliation(self) -> Affiliation {
        match self {
            Category::Ownship | Category::Friendly => Affiliation::Friendly,
            _ => Affiliation::Hostile,
        }
    }
}

impl Domain {
    /// Whether altitude is meaningful for this domain.
    pub fn has_altitude(self) -> bool {
        self == Domain::Air
    }

    /// Whether depth is meaningful for this domain.
    pub fn has_depth(self) -> bool {
        self == Domain::Subsurface
    }
}
