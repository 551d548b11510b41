pub use channel::*;
pub use message::*;
pub use slew_monitor::*;

mod channel;
mod message;
mod slew_monitor;
