use std::sync::atomic::Ordering;
use std::sync::{MutexGuard, PoisonError};

use crate::control::ControlMessage;
use crate::mount::{CheckMode, EqMount, GuideState};
use crate::util::*;

/// Per-axis rates. Multiples of sidereal in `TrackingState`, steps per second
/// when returned by `get_tracking_speeds`.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Speeds {
    pub speed1: f64,
    pub speed2: f64,
}

/// Everything guide timers and the rate update share, behind one lock
#[derive(Debug)]
pub(in crate::mount) struct TrackingState {
    pub tracking: bool,
    /// Baseline axis1 rate that guide pulses return to
    pub tracking_speed: f64,
    pub speeds: Speeds,
    pub guiding: [GuideState; 2],
}

impl Default for TrackingState {
    fn default() -> Self {
        Self {
            tracking: false,
            tracking_speed: 1.,
            speeds: Speeds {
                speed1: 1.,
                speed2: 0.,
            },
            guiding: [GuideState::Idle; 2],
        }
    }
}

impl EqMount {
    pub(in crate::mount) fn tracking_state(&self) -> MutexGuard<'_, TrackingState> {
        self.tracking.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start_tracking(&self) -> Result<(), ChannelError> {
        self.channel.send(ControlMessage::StartTracking)?;
        self.tracking_state().tracking = true;
        tracing::info!("Tracking started");
        Ok(())
    }

    pub fn stop_tracking(&self) -> Result<(), ChannelError> {
        self.channel.send(ControlMessage::StopTracking)?;
        self.tracking_state().tracking = false;
        tracing::info!("Tracking stopped");
        Ok(())
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking_state().tracking
    }

    /// `speed` is a multiple of sidereal. Axis2 stops drifting.
    pub fn set_tracking_speed(&self, speed: f64) {
        let mut state = self.tracking_state();
        state.tracking_speed = speed;
        state.speeds = Speeds {
            speed1: speed,
            speed2: 0.,
        };
    }

    pub fn tracking_speed(&self) -> f64 {
        self.tracking_state().tracking_speed
    }

    /// Current per-axis rates as multiples of sidereal, guide offsets included
    pub fn tracking_multiples(&self) -> Speeds {
        self.tracking_state().speeds
    }

    /// Per-axis rates in steps per second, for the periodic motor rate update
    pub fn get_tracking_speeds(&self) -> Speeds {
        let speeds = self.tracking_multiples();
        Speeds {
            speed1: speeds.speed1 * self.geometry.axis1.steps_per_second / SIDEREAL_SECOND,
            speed2: speeds.speed2 * self.geometry.axis2.steps_per_second / SIDEREAL_SECOND,
        }
    }

    pub fn guide_rates(&self) -> &[f64] {
        &self.guide_rates
    }

    pub fn active_guide_rate(&self) -> usize {
        self.active_guide_rate.load(Ordering::Acquire)
    }

    /// Selects the manual move rate. Returns false for an unknown index.
    pub fn set_active_guide_rate(&self, index: usize) -> bool {
        if index >= self.guide_rates.len() {
            tracing::warn!("No guide rate {} (have {})", index, self.guide_rates.len());
            return false;
        }
        self.active_guide_rate.store(index, Ordering::Release);
        true
    }

    fn move_rate(&self) -> f64 {
        self.guide_rates
            .get(self.active_guide_rate())
            .copied()
            .unwrap_or(self.guiding_speed)
    }

    pub fn move_axis1(&self, dir: GuideDirection) -> Result<(), ChannelError> {
        self.move_axis1_at_rate(self.move_rate(), dir)
    }

    /// Runs axis1 east or west at `speed` times sidereal until stopped
    pub fn move_axis1_at_rate(&self, speed: f64, dir: GuideDirection) -> Result<(), ChannelError> {
        let home = self.home_def();
        let target = match dir {
            GuideDirection::West => home.west_def,
            GuideDirection::East => home.east_def,
            _ => {
                tracing::warn!("Axis1 can't move {}", dir);
                return Ok(());
            }
        };
        self.channel.send(ControlMessage::MoveAxis1 { target, speed })
    }

    pub fn stop_axis1(&self) -> Result<(), ChannelError> {
        self.channel.send(ControlMessage::StopAxis1)
    }

    pub fn move_axis2(&self, dir: GuideDirection) -> Result<(), ChannelError> {
        self.move_axis2_at_rate(self.move_rate(), dir)
    }

    /// Runs axis2 toward the pole (north) or away from it (south) at `speed` times sidereal
    pub fn move_axis2_at_rate(&self, speed: f64, dir: GuideDirection) -> Result<(), ChannelError> {
        if dir.axis() != Axis::Secondary {
            tracing::warn!("Axis2 can't move {}", dir);
            return Ok(());
        }
        let target = self.pole_dir(dir);
        self.channel.send(ControlMessage::MoveAxis2 { target, speed })
    }

    pub fn stop_axis2(&self) -> Result<(), ChannelError> {
        self.channel.send(ControlMessage::StopAxis2)
    }

    /// Axis2 position of the pole (0) or of the far side of the antipole
    /// when moving in `dir`. East and west count as away from the pole.
    pub fn pole_dir(&self, dir: GuideDirection) -> i64 {
        if self.site.in_north() == (dir == GuideDirection::North) {
            return 0;
        }
        let pos = self.motors.current_pos(Axis::Secondary);
        if (pos >= 0) == self.site.in_north() {
            self.geometry.axis2.steps_per_rot
        } else {
            -self.geometry.axis2.steps_per_rot
        }
    }

    /// 1 while declination increases, -1 while it decreases, 0 when axis2 is still
    pub fn dec_direction(&self) -> i8 {
        let pos = self.motors.current_pos(Axis::Secondary);
        let speed = self.motors.speed(Axis::Secondary);
        if speed == 0. {
            return 0;
        }
        match (pos < 0, speed < 0.) {
            (true, true) | (false, false) => -1,
            _ => 1,
        }
    }

    /// Checks the current position with the tracking thresholds.
    /// Tracking is stopped if it has run out of limits.
    pub fn check_tracking_limits(&self) -> bool {
        let axes = self.geometry.steps_to_axes(&self.current_steps());
        let within = self.within_limits(&axes)
            && (self.mount_type == MountType::Fork
                || self.check_meridian(&axes, CheckMode::Tracking, self.get_pier_side()))
            && self.check_pole(axes.axis1, CheckMode::Tracking);

        if !within && self.is_tracking() {
            tracing::error!("Tracking ran out of limits at {:?}", axes);
            if let Err(e) = self.stop_tracking() {
                tracing::error!("Could not stop tracking: {}", e);
            }
        }
        within
    }
}
