use crate::control::ControlMessage;
use crate::motor::DecayMode;
use crate::mount::{EqMount, HomeDef, Steps, Target};
use crate::store::StoreKey;
use crate::util::*;

/// Largest microstep exponent a saved home can be scaled by
const MAX_MICRO: u8 = 16;

impl EqMount {
    /// Rederives the home position, from the store if one was saved, and the
    /// axis1 direction sentinels for the hemisphere
    pub fn init_home(&self) -> Result<(), StoreError> {
        let home = if self.store.read_byte(StoreKey::HomeSaved)? != 0 {
            Steps {
                steps1: i64::from(self.store.read_long(StoreKey::HomePosAxis1)?)
                    * self.micro_factor(Axis::Primary)?,
                steps2: i64::from(self.store.read_long(StoreKey::HomePosAxis2)?)
                    * self.micro_factor(Axis::Secondary)?,
            }
        } else {
            match self.mount_type {
                MountType::GermanEquatorial => Steps::default(),
                MountType::Fork => Steps {
                    steps1: self.geometry.axis1.half_rot,
                    steps2: 0,
                },
            }
        };

        let steps_per_rot = self.geometry.axis1.steps_per_rot;
        let west_def = if self.site.in_north() {
            steps_per_rot
        } else {
            -steps_per_rot
        };
        let def = HomeDef {
            home,
            west_def,
            east_def: -west_def,
        };
        tracing::debug!("Home set to {:?}", def);
        self.home.send_replace(def);
        Ok(())
    }

    /// Forgets the saved home, back to the mount default
    pub fn unset_home(&self) -> Result<(), StoreError> {
        self.store.write_byte(StoreKey::HomeSaved, 0)?;
        self.init_home()
    }

    /// Saves the current position as home. Refused while parked or slewing.
    pub async fn set_home(&self) -> Result<(), HomeError> {
        if self.park_status().await != ParkStatus::Unparked {
            return Err(HomeError::Parked);
        }
        if self.is_slewing() {
            return Err(HomeError::Slewing);
        }

        let steps = self.current_steps();
        let home1 = self.unscaled(steps.steps1, Axis::Primary)?;
        let home2 = self.unscaled(steps.steps2, Axis::Secondary)?;

        let was_tracking = self.is_tracking();
        self.stop_tracking()?;
        let saved = self.save_home(home1, home2);
        // Tracking comes back whether or not the save worked
        let restored = if was_tracking {
            self.start_tracking()
        } else {
            Ok(())
        };

        saved?;
        restored?;
        tracing::info!("Home saved at {:?}", steps);
        Ok(())
    }

    fn save_home(&self, home1: i32, home2: i32) -> Result<(), StoreError> {
        self.store.write_long(StoreKey::HomePosAxis1, home1)?;
        self.store.write_long(StoreKey::HomePosAxis2, home2)?;
        self.store.write_byte(StoreKey::HomeSaved, 1)?;
        self.init_home()
    }

    /// Microsteps per full step on `axis`
    fn micro_factor(&self, axis: Axis) -> Result<i64, StoreError> {
        let micro = self.motors.micro(axis);
        if MAX_MICRO < micro {
            return Err(StoreError::InvalidValue(format!(
                "microstep exponent {} on {:?}",
                micro, axis
            )));
        }
        Ok(1 << micro)
    }

    /// Steps in full-step units, as kept in the store
    fn unscaled(&self, steps: i64, axis: Axis) -> Result<i32, StoreError> {
        let full_steps = steps / self.micro_factor(axis)?;
        i32::try_from(full_steps).map_err(|_| StoreError::InvalidValue(format!("home position {}", steps)))
    }

    /// Declares the mount to be at its home position.
    /// Refused while slewing; otherwise target, error and park state are reset.
    pub async fn sync_at_home(&self) -> Result<(), HomeError> {
        if self.is_slewing() {
            return Err(HomeError::Slewing);
        }

        {
            let mut status = self.status.write().await;
            status.target = Target::default();
            status.last_error = None;
            self.store
                .write_byte(StoreKey::ParkStatus, ParkStatus::Unparked.into())?;
            status.park_status = ParkStatus::Unparked;
        }

        let home = self.home_def().home;
        self.motors.set_current_pos(Axis::Primary, home.steps1);
        self.motors.set_current_pos(Axis::Secondary, home.steps2);
        self.motors.set_target_pos(Axis::Primary, home.steps1);
        self.motors.set_target_pos(Axis::Secondary, home.steps2);

        self.motors.set_decay_mode(DecayMode::Tracking);
        self.stop_tracking()?;
        self.events.set(&[Event::AtHome]);
        tracing::info!("Synced at home {:?}", home);
        Ok(())
    }

    /// Asks the motor task to drive home, then stops tracking
    pub fn go_home(&self) -> Result<(), ChannelError> {
        self.channel.send(ControlMessage::GotoHome)?;
        self.stop_tracking()
    }

    pub fn at_home(&self) -> bool {
        self.events.get(Event::AtHome)
    }
}
