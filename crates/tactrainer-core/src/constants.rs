//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Geometry ---

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Nautical miles per degree of latitude.
pub const NM_PER_DEGREE: f64 = 60.0;

/// Seconds per hour, for knots to NM/s.
pub const SECS_PER_HOUR: f64 = 3600.0;

// --- Kinematics ---

/// Heading deltas at or below this (degrees) snap to the commanded value.
pub const HEADING_SNAP_DEG: f64 = 1.0;

/// Speed deltas at or below this (knots) snap to the commanded value.
pub const SPEED_SNAP_KN: f64 = 1.0;

/// Altitude / depth deltas at or below this (feet) snap to the commanded value.
pub const ALTITUDE_SNAP_FT: f64 = 1.0;

/// Air domain defaults.
pub const AIR_TURN_RATE_DEG_S: f64 = 3.0;
pub const AIR_ACCEL_KN_S: f64 = 5.0;
pub const AIR_CLIMB_RATE_FT_S: f64 = 50.0;

/// Surface domain defaults.
pub const SURFACE_TURN_RATE_DEG_S: f64 = 1.0;
pub const SURFACE_ACCEL_KN_S: f64 = 1.0;

/// Subsurface domain defaults.
pub const SUBSURFACE_TURN_RATE_DEG_S: f64 = 1.0;
pub const SUBSURFACE_ACCEL_KN_S: f64 = 0.5;

/// Depth change rate for all subsurface platforms (ft/s).
pub const DEPTH_RATE_FT_S: f64 = 10.0;

/// Ownship hard caps.
pub const OWNSHIP_MAX_SPEED_KN: f64 = 220.0;
pub const OWNSHIP_MAX_ALTITUDE_FT: f64 = 27_000.0;

// --- Navigation ---

/// A waypoint is reached when the asset is closer than this (NM).
pub const WAYPOINT_ARRIVAL_NM: f64 = 0.5;

// --- Radar / IFF ---

/// Sweep advance per tick (degrees). 36 deg/s at 60 Hz.
pub const RADAR_SWEEP_DEG_PER_TICK: f64 = 0.6;

/// A target is painted when the sweep is within this many degrees of its bearing.
pub const RADAR_BEAM_HALF_WIDTH_DEG: f64 = 1.0;

/// Maximum instrumented radar range (NM).
pub const RADAR_MAX_RANGE_NM: f64 = 320.0;

/// Radar horizon coefficient: horizon_nm = k * (sqrt(h1_ft) + sqrt(h2_ft)).
pub const RADAR_HORIZON_COEFF: f64 = 1.23;

/// Subsurface assets deeper than this (feet) are invisible to radar and IFF.
pub const RADAR_MAX_DETECT_DEPTH_FT: f64 = 15.0;

/// Default age (seconds) after which radar and IFF returns are purged.
pub const DEFAULT_RETURN_DECAY_SECS: f64 = 11.0;

// --- Acoustic ---

/// Sonobuoy passive detection radius (NM).
pub const SONOBUOY_DETECTION_RANGE_NM: f64 = 4.0;

// --- Weapons ---

/// Speed of a freshly launched munition (knots).
pub const WEAPON_LAUNCH_SPEED_KN: f64 = 100.0;

/// Maximum munition turn rate (deg/s).
pub const WEAPON_MAX_TURN_RATE_DEG_S: f64 = 30.0;

/// Munition within this range of its target (NM) is an impact.
pub const WEAPON_IMPACT_RANGE_NM: f64 = 0.1;

// --- Datalink ---

/// Unit codes are exactly this many digits.
pub const UNIT_CODE_DIGITS: usize = 5;

// --- Persistence ---

/// Current scenario document version.
pub const SCENARIO_VERSION: u32 = 1;

// --- Simulation control ---

/// Allowed time scale range.
pub const MIN_TIME_SCALE: f64 = 0.0;
pub const MAX_TIME_SCALE: f64 = 4.0;
