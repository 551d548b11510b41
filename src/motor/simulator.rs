use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

use super::{DecayMode, MotorController};
use crate::control::{ControlMessage, SlewReporter};
use crate::mount::{Geometry, HomeDef};
use crate::util::*;

#[derive(Debug, Default, Copy, Clone)]
struct SimAxis {
    pos: i64,
    target: i64,
    speed: f64,
}

/// In-memory stand-in for the stepper drivers
#[derive(Debug)]
pub struct SimulatedMotors {
    axes: [Mutex<SimAxis>; 2],
    micro: [u8; 2],
    steps_per_second: [f64; 2],
    decay_mode: Mutex<DecayMode>,
    tracking: AtomicBool,
}

impl SimulatedMotors {
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            axes: [
                Mutex::new(SimAxis::default()),
                Mutex::new(SimAxis::default()),
            ],
            micro: [geometry.axis1.micro, geometry.axis2.micro],
            steps_per_second: [
                geometry.axis1.steps_per_second,
                geometry.axis2.steps_per_second,
            ],
            decay_mode: Mutex::new(DecayMode::Tracking),
            tracking: AtomicBool::new(false),
        }
    }

    fn axis(&self, axis: Axis) -> MutexGuard<'_, SimAxis> {
        self.axes[axis.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn target_pos(&self, axis: Axis) -> i64 {
        self.axis(axis).target
    }

    pub fn decay_mode(&self) -> DecayMode {
        *self
            .decay_mode
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Acquire)
    }

    /// Runs `axis` toward `target` at `rate` times sidereal
    fn run_toward(&self, axis: Axis, target: i64, rate: f64) {
        let steps_per_second = self.steps_per_second[axis.index()];
        let mut a = self.axis(axis);
        let sign = (target - a.pos).signum() as f64;
        a.speed = sign * rate.abs() * steps_per_second / SIDEREAL_SECOND;
    }

    fn stop(&self, axis: Axis) {
        self.axis(axis).speed = 0.;
    }

    fn arrive(&self, axis: Axis) {
        let mut a = self.axis(axis);
        a.pos = a.target;
        a.speed = 0.;
    }
}

impl MotorController for SimulatedMotors {
    fn current_pos(&self, axis: Axis) -> i64 {
        self.axis(axis).pos
    }

    fn set_current_pos(&self, axis: Axis, steps: i64) {
        self.axis(axis).pos = steps;
    }

    fn set_target_pos(&self, axis: Axis, steps: i64) {
        self.axis(axis).target = steps;
    }

    fn speed(&self, axis: Axis) -> f64 {
        self.axis(axis).speed
    }

    fn micro(&self, axis: Axis) -> u8 {
        self.micro[axis.index()]
    }

    fn set_decay_mode(&self, mode: DecayMode) {
        *self
            .decay_mode
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = mode;
    }
}

/// Consumer of the control channel driving [`SimulatedMotors`].
/// Slews take a fixed time and land exactly on target.
pub struct MotorTask {
    rx: mpsc::Receiver<ControlMessage>,
    motors: Arc<SimulatedMotors>,
    reporter: SlewReporter,
    home: watch::Receiver<HomeDef>,
    slew_time: Duration,
}

impl MotorTask {
    pub fn new(
        rx: mpsc::Receiver<ControlMessage>,
        motors: Arc<SimulatedMotors>,
        reporter: SlewReporter,
        home: watch::Receiver<HomeDef>,
        slew_time: Duration,
    ) -> Self {
        Self {
            rx,
            motors,
            reporter,
            home,
            slew_time,
        }
    }

    /// Runs until every control channel sender is dropped
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            tracing::debug!("Motor task received {:?}", msg);
            match msg {
                ControlMessage::Goto { steps1, steps2 } => {
                    self.slew_to(steps1, steps2).await;
                    self.reporter.finish_goto();
                }
                ControlMessage::GotoHome => {
                    let home = self.home.borrow().home;
                    self.slew_to(home.steps1, home.steps2).await;
                    self.reporter.end();
                }
                ControlMessage::StartTracking => self.motors.tracking.store(true, Ordering::Release),
                ControlMessage::StopTracking => self.motors.tracking.store(false, Ordering::Release),
                ControlMessage::MoveAxis1 { target, speed } => {
                    self.motors.run_toward(Axis::Primary, target, speed)
                }
                ControlMessage::StopAxis1 => self.motors.stop(Axis::Primary),
                ControlMessage::MoveAxis2 { target, speed } => {
                    self.motors.run_toward(Axis::Secondary, target, speed)
                }
                ControlMessage::StopAxis2 => self.motors.stop(Axis::Secondary),
            }
        }
        tracing::info!("Control channel closed, motor task exiting");
    }

    async fn slew_to(&self, steps1: i64, steps2: i64) {
        self.reporter.begin();
        self.motors.set_decay_mode(DecayMode::Slewing);
        self.motors.set_target_pos(Axis::Primary, steps1);
        self.motors.set_target_pos(Axis::Secondary, steps2);
        if !self.slew_time.is_zero() {
            sleep(self.slew_time).await;
        }
        self.motors.arrive(Axis::Primary);
        self.motors.arrive(Axis::Secondary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MountSettings;
    use crate::control::{slew_status, ControlChannel, SlewMonitor};

    #[tokio::test(start_paused = true)]
    async fn test_goto_takes_slew_time() {
        let geometry = Geometry::new(&MountSettings::default());
        let motors = Arc::new(SimulatedMotors::new(&geometry));
        let (channel, rx) = ControlChannel::new(4);
        let (reporter, flag) = slew_status();
        let (_home_tx, home_rx) = watch::channel(HomeDef::default());
        let task = MotorTask::new(rx, motors.clone(), reporter, home_rx, Duration::from_secs(3));
        tokio::spawn(task.run());

        channel
            .send(ControlMessage::Goto {
                steps1: 500,
                steps2: -700,
            })
            .unwrap();
        sleep(Duration::from_secs(1)).await;
        assert!(flag.is_slewing());
        assert_eq!(motors.decay_mode(), DecayMode::Slewing);
        assert_eq!(motors.target_pos(Axis::Primary), 500);
        assert_eq!(motors.current_pos(Axis::Primary), 0);

        assert_eq!(flag.wait_goto_done(0).await, Ok(()));
        assert_eq!(motors.current_pos(Axis::Primary), 500);
        assert_eq!(motors.current_pos(Axis::Secondary), -700);
        assert_eq!(flag.state().gotos_done, 1);
    }

    #[tokio::test]
    async fn test_tracking_and_moves() {
        let geometry = Geometry::new(&MountSettings::default());
        let motors = Arc::new(SimulatedMotors::new(&geometry));
        let (channel, rx) = ControlChannel::new(8);
        let (reporter, _flag) = slew_status();
        let (_home_tx, home_rx) = watch::channel(HomeDef::default());
        let task = tokio::spawn(MotorTask::new(rx, motors.clone(), reporter, home_rx, Duration::ZERO).run());

        channel.send(ControlMessage::StartTracking).unwrap();
        channel
            .send(ControlMessage::MoveAxis1 {
                target: -1000,
                speed: 2.,
            })
            .unwrap();
        drop(channel);
        task.await.unwrap();

        assert!(motors.is_tracking());
        let expected = -2. * geometry.axis1.steps_per_second / SIDEREAL_SECOND;
        assert_eq!(motors.speed(Axis::Primary), expected);
        assert_eq!(motors.speed(Axis::Secondary), 0.);
    }
}
