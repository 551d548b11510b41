use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::control::{slew_status, ControlChannel, ControlMessage, SlewReporter};
use crate::motor::{MotorTask, SimulatedMotors};
use crate::mount::{EqMount, Geometry, MountIo};
use crate::store::{MemoryStore, PersistentStore};
use crate::util::*;

/// Latitude 45, 4800 steps per degree, 5 hour under-pole window,
/// 15 degrees past the meridian on the east, 30 on the west
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.observation_location.latitude = 45.;
    config.observation_location.longitude = 0.;
    config.mount_settings.mount_type = MountType::GermanEquatorial;
    for axis in [
        &mut config.mount_settings.axis1,
        &mut config.mount_settings.axis2,
    ] {
        axis.steps_per_rot = 1_728_000;
        axis.micro = 4;
    }
    config.mount_settings.axis1.min_deg = -200.;
    config.mount_settings.axis1.max_deg = 200.;
    config.mount_settings.axis2.min_deg = -180.;
    config.mount_settings.axis2.max_deg = 180.;
    config.limit_settings.min_alt = 0.;
    config.limit_settings.max_alt = 85.;
    config.limit_settings.under_pole_limit_goto = 5.;
    config.limit_settings.minutes_past_meridian_goto_east = 60.;
    config.limit_settings.minutes_past_meridian_goto_west = 120.;
    config.guide_settings.guiding_speed = 0.5;
    config
}

/// Mount wired to in-memory collaborators, with the motor task side left to the test
pub struct TestRig<S = MemoryStore> {
    pub mount: EqMount,
    pub rx: mpsc::Receiver<ControlMessage>,
    pub reporter: SlewReporter,
    pub motors: Arc<SimulatedMotors>,
    pub store: Arc<S>,
}

/// Mount whose control channel is served by a running [`MotorTask`]
pub struct RunningRig<S = MemoryStore> {
    pub mount: EqMount,
    pub motors: Arc<SimulatedMotors>,
    pub store: Arc<S>,
    pub task: JoinHandle<()>,
}

pub fn create_mount(config: Option<Config>) -> TestRig {
    create_mount_with_store(config, Arc::new(MemoryStore::new()))
}

pub fn create_mount_with_store<S: PersistentStore + 'static>(
    config: Option<Config>,
    store: Arc<S>,
) -> TestRig<S> {
    let config = config.unwrap_or_else(test_config);
    let (channel, rx) = ControlChannel::new(config.control_settings.channel_capacity);
    let (reporter, slew) = slew_status();
    let motors = Arc::new(SimulatedMotors::new(&Geometry::new(&config.mount_settings)));

    let mount = EqMount::new(&config, MountIo {
        channel,
        motors: motors.clone(),
        slew: Arc::new(slew),
        store: store.clone(),
    })
    .unwrap();

    TestRig {
        mount,
        rx,
        reporter,
        motors,
        store,
    }
}

impl<S> TestRig<S> {
    pub fn spawn_motor_task(self) -> RunningRig<S> {
        let task = MotorTask::new(
            self.rx,
            self.motors.clone(),
            self.reporter,
            self.mount.subscribe_home(),
            Duration::ZERO,
        );
        RunningRig {
            mount: self.mount,
            motors: self.motors,
            store: self.store,
            task: tokio::spawn(task.run()),
        }
    }
}
