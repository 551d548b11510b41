use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::sleep;

use crate::mount::tracking::TrackingState;
use crate::mount::EqMount;
use crate::util::*;

/// Pulse state of one axis. A pulse runs to expiry; new pulses on a guiding axis are ignored.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum GuideState {
    Idle,
    Guiding(GuideDirection),
}

fn guiding_events(axis: Axis) -> [Event; 2] {
    match axis {
        Axis::Primary => [Event::GuidingE, Event::GuidingW],
        Axis::Secondary => [Event::GuidingN, Event::GuidingS],
    }
}

fn guiding_event(dir: GuideDirection) -> Event {
    match dir {
        GuideDirection::North => Event::GuidingN,
        GuideDirection::South => Event::GuidingS,
        GuideDirection::East => Event::GuidingE,
        GuideDirection::West => Event::GuidingW,
    }
}

/// Puts `axis` back on its baseline rate once the pulse timer fires
fn end_pulse(tracking: &Mutex<TrackingState>, events: &EventFlags, axis: Axis) {
    let mut state = tracking.lock().unwrap_or_else(PoisonError::into_inner);
    events.reset(&guiding_events(axis));
    state.guiding[axis.index()] = GuideState::Idle;
    match axis {
        Axis::Primary => state.speeds.speed1 = state.tracking_speed,
        Axis::Secondary => state.speeds.speed2 = 0.,
    }
    tracing::debug!("Guide pulse on {:?} ended", axis);
}

impl EqMount {
    /// Offsets the tracking rate of the axis for `dir` by the guiding speed for `duration`.
    /// Returns false, changing nothing, when not tracking or the axis is already guiding.
    ///
    /// The pulse timer runs on the current tokio runtime; called from outside one,
    /// the pulse is refused.
    pub fn start_guiding(&self, dir: GuideDirection, duration: Duration) -> bool {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Can't time a guide pulse: {}", e);
                return false;
            }
        };

        let axis = dir.axis();
        {
            let mut state = self.tracking_state();
            if !state.tracking || state.guiding[axis.index()] != GuideState::Idle {
                return false;
            }

            state.guiding[axis.index()] = GuideState::Guiding(dir);
            match dir {
                GuideDirection::West => state.speeds.speed1 = state.tracking_speed + self.guiding_speed,
                GuideDirection::East => state.speeds.speed1 = state.tracking_speed - self.guiding_speed,
                GuideDirection::North => state.speeds.speed2 = self.guiding_speed,
                GuideDirection::South => state.speeds.speed2 = -self.guiding_speed,
            }
            self.events.set(&[guiding_event(dir)]);
        }

        tracing::debug!("Guiding {} for {:?}", dir, duration);
        let tracking = Arc::clone(&self.tracking);
        let events = Arc::clone(&self.events);
        runtime.spawn(async move {
            sleep(duration).await;
            end_pulse(&tracking, &events, axis);
        });
        true
    }

    pub fn guide_state(&self, axis: Axis) -> GuideState {
        self.tracking_state().guiding[axis.index()]
    }

    pub fn is_guiding(&self) -> bool {
        self.tracking_state()
            .guiding
            .iter()
            .any(|g| *g != GuideState::Idle)
    }
}
