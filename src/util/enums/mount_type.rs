use serde::{Deserialize, Serialize};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum MountType {
    /// Flips across the meridian
    GermanEquatorial,
    /// Equatorial fork, no flip
    Fork,
}
