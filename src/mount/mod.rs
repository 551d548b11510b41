pub use geometry::*;
pub use guide::GuideState;
pub use limits::{CheckMode, Limits};
pub use target::Target;
pub use tracking::Speeds;
pub use transform::EquatorialReference;

use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};

use tokio::sync::{watch, RwLock};

use crate::astro_math::Site;
use crate::config::Config;
use crate::control::{ControlChannel, SlewMonitor};
use crate::motor::MotorController;
use crate::store::{PersistentStore, StoreKey};
use crate::util::*;

mod geometry;
mod goto;
mod guide;
mod home;
mod limits;
mod pier_side;
mod target;
mod tracking;
mod transform;
#[cfg(test)]
pub(crate) mod test_util;

/// Collaborators the mount core talks to
pub struct MountIo {
    pub channel: ControlChannel,
    pub motors: Arc<dyn MotorController>,
    pub slew: Arc<dyn SlewMonitor>,
    pub store: Arc<dyn PersistentStore>,
}

/// Kinematic and motion-safety core of a two-axis equatorial mount
pub struct EqMount {
    pub(in crate::mount) mount_type: MountType,
    pub(in crate::mount) site: Site,
    pub(in crate::mount) geometry: Geometry,
    pub(in crate::mount) limits: Limits,

    pub(in crate::mount) guiding_speed: f64,
    pub(in crate::mount) guide_rates: Vec<f64>,
    pub(in crate::mount) active_guide_rate: AtomicUsize,

    // Rederived by init_home, watched by the motor task for GotoHome
    pub(in crate::mount) home: watch::Sender<HomeDef>,
    // Written by guide timers, read by the periodic rate update
    pub(in crate::mount) tracking: Arc<Mutex<tracking::TrackingState>>,
    pub(in crate::mount) events: Arc<EventFlags>,
    pub(in crate::mount) status: RwLock<target::MountStatus>,

    pub(in crate::mount) channel: ControlChannel,
    pub(in crate::mount) motors: Arc<dyn MotorController>,
    pub(in crate::mount) slew: Arc<dyn SlewMonitor>,
    pub(in crate::mount) store: Arc<dyn PersistentStore>,
}

impl EqMount {
    pub fn new(config: &Config, io: MountIo) -> Result<Self, StoreError> {
        let guide_settings = &config.guide_settings;
        let active_guide_rate = guide_settings
            .active_guide_rate
            .min(guide_settings.guide_rates.len().saturating_sub(1));

        let park_status = match ParkStatus::try_from(io.store.read_byte(StoreKey::ParkStatus)?) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Ignoring stored park status: {}", e);
                ParkStatus::Unparked
            }
        };

        let (home, _) = watch::channel(HomeDef::default());

        let mount = Self {
            mount_type: config.mount_settings.mount_type,
            site: config.observation_location.to_site(),
            geometry: Geometry::new(&config.mount_settings),
            limits: Limits::new(&config.limit_settings),
            guiding_speed: guide_settings.guiding_speed,
            guide_rates: guide_settings.guide_rates.clone(),
            active_guide_rate: AtomicUsize::new(active_guide_rate),
            home,
            tracking: Arc::new(Mutex::new(tracking::TrackingState::default())),
            events: Arc::new(EventFlags::new()),
            status: RwLock::new(target::MountStatus::new(park_status)),
            channel: io.channel,
            motors: io.motors,
            slew: io.slew,
            store: io.store,
        };

        mount.init_home()?;
        tracing::info!(
            "Mount ready: {:?} at latitude {}, park status {:?}",
            mount.mount_type,
            mount.site.latitude(),
            park_status
        );
        Ok(mount)
    }

    pub fn mount_type(&self) -> MountType {
        self.mount_type
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn events(&self) -> &EventFlags {
        &self.events
    }

    /// Current home definition; follows every `init_home`
    pub fn subscribe_home(&self) -> watch::Receiver<HomeDef> {
        self.home.subscribe()
    }

    pub fn home_def(&self) -> HomeDef {
        *self.home.borrow()
    }

    pub fn is_slewing(&self) -> bool {
        self.slew.is_slewing()
    }

    /// Messages lost to a full control channel
    pub fn dropped_commands(&self) -> u64 {
        self.channel.dropped()
    }

    /// Current motor positions
    pub fn current_steps(&self) -> Steps {
        Steps {
            steps1: self.motors.current_pos(Axis::Primary),
            steps2: self.motors.current_pos(Axis::Secondary),
        }
    }
}
