pub use simulator::*;

use crate::util::Axis;

mod simulator;

/// Motor driver current profile
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum DecayMode {
    /// Higher current while slewing
    Slewing,
    /// Lower current while tracking or idle
    Tracking,
}

/// Stepper driver collaborator. Owns pulse generation and microstepping.
pub trait MotorController: Send + Sync {
    fn current_pos(&self, axis: Axis) -> i64;
    fn set_current_pos(&self, axis: Axis, steps: i64);
    fn set_target_pos(&self, axis: Axis, steps: i64);
    /// Signed axis speed, steps per second
    fn speed(&self, axis: Axis) -> f64;
    /// Microstep exponent currently configured on the driver
    fn micro(&self, axis: Axis) -> u8;
    fn set_decay_mode(&self, mode: DecayMode);
}
