pub mod axis;
pub mod guide_direction;
pub mod mount_type;
pub mod park_status;
pub mod pier_side;

pub use axis::*;
pub use guide_direction::*;
pub use mount_type::*;
pub use park_status::*;
pub use pier_side::*;
