pub use enums::*;
pub use event_flags::*;
pub use result::*;

pub use crate::astro_math::{Degrees, Hours, Radians};
pub use crate::consts::*;

mod enums;
mod event_flags;
mod result;
