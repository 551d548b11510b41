use crate::config::LimitSettings;
use crate::mount::{Axes, EqMount};
use crate::util::*;

/// Goto checks use the configured limits; tracking checks get extra slack
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum CheckMode {
    Goto,
    Tracking,
}

/// Horizon window and the pole / meridian exclusion zones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min_alt: Degrees,
    pub max_alt: Degrees,
    under_pole_limit_goto: Hours,
    minutes_past_meridian_goto_east: f64,
    minutes_past_meridian_goto_west: f64,
}

impl Limits {
    pub fn new(settings: &LimitSettings) -> Self {
        Self {
            min_alt: settings.min_alt,
            max_alt: settings.max_alt,
            under_pole_limit_goto: settings.under_pole_limit_goto,
            minutes_past_meridian_goto_east: settings.minutes_past_meridian_goto_east,
            minutes_past_meridian_goto_west: settings.minutes_past_meridian_goto_west,
        }
    }

    /// Hours of axis1 travel allowed either side of the pole position
    pub fn under_pole_limit(&self, mode: CheckMode) -> Hours {
        match mode {
            CheckMode::Goto => self.under_pole_limit_goto,
            CheckMode::Tracking => self.under_pole_limit_goto + TRACKING_SLACK_MINUTES / 60.,
        }
    }

    // Meridian limits are stored in minutes of RA, four minutes to the degree

    pub fn degrees_past_meridian_east(&self, mode: CheckMode) -> Degrees {
        match mode {
            CheckMode::Goto => self.minutes_past_meridian_goto_east / 4.,
            CheckMode::Tracking => (self.minutes_past_meridian_goto_east + TRACKING_SLACK_MINUTES) / 4.,
        }
    }

    pub fn degrees_past_meridian_west(&self, mode: CheckMode) -> Degrees {
        match mode {
            CheckMode::Goto => self.minutes_past_meridian_goto_west / 4.,
            CheckMode::Tracking => (self.minutes_past_meridian_goto_west + TRACKING_SLACK_MINUTES) / 4.,
        }
    }

    pub fn is_valid_alt(&self, alt: Degrees) -> Result<(), GotoError> {
        if alt < self.min_alt {
            Err(GotoError::BelowHorizon)
        } else if self.max_alt < alt {
            Err(GotoError::AboveOverhead)
        } else {
            Ok(())
        }
    }
}

impl EqMount {
    /// Both axes inside their mechanical travel range
    pub fn within_limits(&self, axes: &Axes) -> bool {
        self.geometry.axis1.within_limits(axes.axis1) && self.geometry.axis2.within_limits(axes.axis2)
    }

    /// Axis1 (converted to steps) must sit strictly inside the under-pole window
    pub fn check_pole(&self, axis1: Degrees, mode: CheckMode) -> bool {
        let axis1 = self.geometry.axis1.to_steps(axis1) as f64;
        let limit = self.limits.under_pole_limit(mode) * 15. * self.geometry.axis1.steps_per_degree;
        -limit < axis1 && axis1 < limit
    }

    /// Hour angle of `axes` must not run past the meridian allowance of `pier_side`
    pub fn check_meridian(&self, axes: &Axes, mode: CheckMode, pier_side: PierSide) -> bool {
        let eq = self.axes_to_equ(axes);
        match pier_side {
            PierSide::West => eq.ha <= self.limits.degrees_past_meridian_west(mode),
            PierSide::East => -self.limits.degrees_past_meridian_east(mode) <= eq.ha,
            PierSide::NotValid => false,
        }
    }
}
