use crate::astro_math;
use crate::astro_math::{EqCoords, HorCoords};
use crate::control::ControlMessage;
use crate::motor::DecayMode;
use crate::mount::{EqMount, EquatorialReference, Steps, Target};
use crate::util::*;

impl EqMount {
    /// Slews to `eq`, preferring the current pier side.
    /// Returns once the motor task reports the slew finished.
    pub async fn goto_equ(&self, eq: &EqCoords) -> GotoResult {
        let hor = astro_math::equ_to_hor(eq, &self.site);
        self.status.write().await.target = Target {
            ha: Some(eq.ha),
            dec: Some(eq.dec),
            alt: Some(hor.alt),
            az: Some(hor.az),
        };

        let result = self.goto_equ_checked(eq, &hor).await;
        if let Err(e) = result {
            tracing::warn!(
                "Goto to ha {:.4} dec {:.4} failed: {} (code {})",
                eq.ha,
                eq.dec,
                e,
                goto_code(&result)
            );
        }
        self.status.write().await.last_error = result.err();
        result
    }

    async fn goto_equ_checked(&self, eq: &EqCoords, hor: &HorCoords) -> GotoResult {
        if self.events.get(Event::Abort) {
            return Err(GotoError::Aborted);
        }

        self.limits.is_valid_alt(hor.alt)?;

        let (pier_side, axes) = self.resolve_target(eq).ok_or(GotoError::Limits)?;
        tracing::info!("Goto ha {:.4} dec {:.4} on pier side {}", eq.ha, eq.dec, pier_side);

        self.goto_steps(&self.geometry.axes_to_steps(&axes)).await
    }

    pub async fn goto_hor(&self, hor: &HorCoords) -> GotoResult {
        let eq = astro_math::hor_to_equ(hor, &self.site);
        self.goto_equ(&eq).await
    }

    /// Sends the goto and suspends until the motor task has completed it
    pub async fn goto_steps(&self, steps: &Steps) -> GotoResult {
        if self.events.get(Event::Abort) {
            return Err(GotoError::Aborted);
        }

        let gotos_done = self.slew.state().gotos_done;
        self.channel.send(ControlMessage::Goto {
            steps1: steps.steps1,
            steps2: steps.steps2,
        })?;
        self.events.reset(&[Event::AtHome]);

        if let Err(e) = self.slew.wait_goto_done(gotos_done).await {
            tracing::error!("Goto to {:?} never finished: {}", steps, e);
            return Err(e.into());
        }

        self.motors.set_decay_mode(DecayMode::Tracking);
        tracing::debug!("Goto to {:?} done", steps);
        Ok(())
    }

    /// Moves to the current position seen from the other pier side
    pub async fn flip(&self) -> GotoResult {
        if self.mount_type == MountType::Fork {
            return Err(GotoError::SameSide);
        }

        let (ha, dec) = self.get_equ(EquatorialReference::HourAngle);
        let other_side = self.get_pier_side().opposite();
        let axes = self
            .eq_to_axes(&EqCoords { ha, dec }, other_side)
            .ok_or(GotoError::SameSide)?;

        tracing::info!("Flipping to pier side {}", other_side);
        self.goto_steps(&self.geometry.axes_to_steps(&axes)).await
    }

    /// Declares the motors to be pointing at `eq` from `pier_side`.
    /// An invalid pier side means the current one.
    pub fn sync_equ(&self, eq: &EqCoords, pier_side: PierSide) {
        let pier_side = if pier_side.is_valid() {
            pier_side
        } else {
            self.get_pier_side()
        };
        let axes = self.eq_to_axes_unchecked(eq, pier_side);
        let steps = self.geometry.axes_to_steps(&axes);
        self.motors.set_current_pos(Axis::Primary, steps.steps1);
        self.motors.set_current_pos(Axis::Secondary, steps.steps2);
        tracing::info!("Synced to ha {:.4} dec {:.4} on pier side {}", eq.ha, eq.dec, pier_side);
    }

    pub fn sync_az_alt(&self, hor: &HorCoords, pier_side: PierSide) {
        let eq = astro_math::hor_to_equ(hor, &self.site);
        self.sync_equ(&eq, pier_side);
    }

    /// Gotos fail with `Aborted` until `clear_abort`
    pub fn abort_slew(&self) {
        tracing::info!("Abort requested");
        self.events.set(&[Event::Abort]);
    }

    pub fn clear_abort(&self) {
        self.events.reset(&[Event::Abort]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::MotorController;
    use crate::mount::test_util;
    use assert_float_eq::*;

    #[tokio::test]
    async fn test_below_horizon_sends_nothing() {
        let mut rig = test_util::create_mount(None);
        let result = rig.mount.goto_hor(&HorCoords { az: 180., alt: -10. }).await;
        assert_eq!(result, Err(GotoError::BelowHorizon));
        assert_eq!(goto_code(&result), 1);
        assert!(rig.rx.try_recv().is_err());
        assert_eq!(rig.mount.last_error().await, Some(GotoError::BelowHorizon));
        let target = rig.mount.get_target().await;
        assert_float_absolute_eq!(target.alt.unwrap(), -10., 1E-9);
    }

    #[tokio::test]
    async fn test_above_overhead() {
        let mut rig = test_util::create_mount(None);
        // Zenith at latitude 45
        let result = rig.mount.goto_equ(&EqCoords { ha: 0., dec: 45. }).await;
        assert_eq!(result, Err(GotoError::AboveOverhead));
        assert!(rig.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_limits_on_both_sides() {
        let mut rig = test_util::create_mount(None);
        let result = rig.mount.goto_equ(&EqCoords { ha: 0., dec: 30. }).await;
        assert_eq!(result, Err(GotoError::Limits));
        assert!(rig.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_abort_short_circuits() {
        let mut rig = test_util::create_mount(None);
        rig.mount.abort_slew();
        let result = rig.mount.goto_equ(&EqCoords { ha: 30., dec: 30. }).await;
        assert_eq!(result, Err(GotoError::Aborted));
        assert!(rig.rx.try_recv().is_err());

        rig.mount.clear_abort();
        assert!(!rig.mount.events().get(Event::Abort));
    }

    #[tokio::test]
    async fn test_goto_waits_for_motor_task() {
        let mut rig = test_util::create_mount(None);
        rig.mount.events().set(&[Event::AtHome]);
        let steps = Steps {
            steps1: 1000,
            steps2: -2000,
        };

        let rx = &mut rig.rx;
        let reporter = &rig.reporter;
        let (result, _) = tokio::join!(rig.mount.goto_steps(&steps), async {
            let msg = rx.recv().await.unwrap();
            assert_eq!(msg, ControlMessage::Goto {
                steps1: 1000,
                steps2: -2000
            });
            reporter.begin();
            reporter.finish_goto();
        });
        assert_eq!(result, Ok(()));
        assert!(!rig.mount.events().get(Event::AtHome));
        assert_eq!(rig.motors.decay_mode(), DecayMode::Tracking);
    }

    #[tokio::test]
    async fn test_goto_fails_when_motor_task_stops_mid_slew() {
        let mut rig = test_util::create_mount(None);
        rig.motors.set_decay_mode(DecayMode::Slewing);
        let steps = Steps {
            steps1: 1000,
            steps2: -2000,
        };

        let rx = &mut rig.rx;
        let reporter = rig.reporter;
        let (result, _) = tokio::join!(rig.mount.goto_steps(&steps), async move {
            rx.recv().await.unwrap();
            reporter.begin();
            drop(reporter);
        });
        assert_eq!(result, Err(GotoError::ChannelClosed));
        assert_eq!(rig.motors.current_pos(Axis::Primary), 0);
        assert_eq!(rig.motors.decay_mode(), DecayMode::Slewing);
    }

    #[tokio::test]
    async fn test_flip_fork() {
        let mut config = test_util::test_config();
        config.mount_settings.mount_type = MountType::Fork;
        let rig = test_util::create_mount(Some(config));
        assert_eq!(rig.mount.flip().await, Err(GotoError::SameSide));
    }

    #[tokio::test]
    async fn test_flip_unreachable() {
        let mut rig = test_util::create_mount(None);
        // East side at ha 60, which is past the pole limit from the west
        rig.mount.sync_equ(&EqCoords { ha: 60., dec: 20. }, PierSide::East);
        assert_eq!(rig.mount.get_pier_side(), PierSide::East);
        assert_eq!(rig.mount.flip().await, Err(GotoError::SameSide));
        assert!(rig.rx.try_recv().is_err());
    }

    #[test]
    fn test_sync_equ() {
        let rig = test_util::create_mount(None);
        rig.mount.sync_equ(&EqCoords { ha: 30., dec: 20. }, PierSide::East);
        assert_eq!(rig.motors.current_pos(Axis::Primary), -60 * 4800);
        assert_eq!(rig.motors.current_pos(Axis::Secondary), 70 * 4800);
        assert_eq!(rig.mount.get_pier_side(), PierSide::East);

        let (ha, dec) = rig.mount.get_equ(EquatorialReference::HourAngle);
        assert_float_absolute_eq!(ha, 30., 1E-9);
        assert_float_absolute_eq!(dec, 20., 1E-9);
    }

    #[test]
    fn test_sync_az_alt() {
        let rig = test_util::create_mount(None);
        let hor = HorCoords { az: 120., alt: 40. };
        rig.mount.sync_az_alt(&hor, PierSide::West);
        assert_eq!(rig.mount.get_pier_side(), PierSide::West);
        let back = rig.mount.get_hor_app();
        // One step is 1/4800 degree
        assert_float_absolute_eq!(back.az, hor.az, 1E-3);
        assert_float_absolute_eq!(back.alt, hor.alt, 1E-3);
    }
}
