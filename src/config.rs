use crate::astro_math::{Degrees, Hours, Site};
use crate::util::MountType;
use serde::{Deserialize, Serialize};

/* Config */
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub observation_location: ObservingLocation,
    pub mount_settings: MountSettings,
    pub limit_settings: LimitSettings,
    pub guide_settings: GuideSettings,
    pub control_settings: ControlSettings,
}

/* Location */
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct ObservingLocation {
    pub latitude: Degrees,
    pub longitude: Degrees,
    pub elevation: f64,
}

impl Default for ObservingLocation {
    fn default() -> Self {
        Self {
            latitude: 51.47,
            longitude: 0.0,
            elevation: 15.0,
        }
    }
}

impl ObservingLocation {
    pub fn to_site(&self) -> Site {
        Site::new(self.latitude, self.longitude, self.elevation)
    }
}

/* Mount */
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Microstepped steps for a full turn of the axis
    pub steps_per_rot: i64,
    /// Microstep exponent; the driver runs at 2^micro microsteps per step
    pub micro: u8,
    pub min_deg: Degrees,
    pub max_deg: Degrees,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct MountSettings {
    pub mount_type: MountType,
    pub axis1: AxisSettings,
    pub axis2: AxisSettings,
}

impl Default for MountSettings {
    fn default() -> Self {
        Self {
            mount_type: MountType::GermanEquatorial,
            axis1: AxisSettings {
                steps_per_rot: 1_728_000,
                micro: 4,
                min_deg: -270.,
                max_deg: 270.,
            },
            axis2: AxisSettings {
                steps_per_rot: 1_728_000,
                micro: 4,
                min_deg: -180.,
                max_deg: 180.,
            },
        }
    }
}

/* Limits */
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct LimitSettings {
    pub min_alt: Degrees,
    pub max_alt: Degrees,
    /// Hours of axis1 travel allowed either side of the pole position
    pub under_pole_limit_goto: Hours,
    /// Minutes of RA an east-side target may sit past the meridian
    pub minutes_past_meridian_goto_east: f64,
    /// Minutes of RA a west-side target may sit past the meridian
    pub minutes_past_meridian_goto_west: f64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            min_alt: -10.,
            max_alt: 91.,
            under_pole_limit_goto: 12.,
            minutes_past_meridian_goto_east: 60.,
            minutes_past_meridian_goto_west: 60.,
        }
    }
}

/* Guiding */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideSettings {
    /// Pulse guide offset, multiple of sidereal
    pub guiding_speed: f64,
    /// Manual move speeds, multiples of sidereal
    pub guide_rates: Vec<f64>,
    pub active_guide_rate: usize,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            guiding_speed: 0.5,
            guide_rates: vec![0.5, 4., 16., 64., 600.],
            active_guide_rate: 1,
        }
    }
}

/* Control channel */
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct ControlSettings {
    pub channel_capacity: usize,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            channel_capacity: 16,
        }
    }
}
