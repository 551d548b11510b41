use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Stored as a byte in the persistent store
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ParkStatus {
    Unparked = 0,
    Parked = 1,
    Parking = 2,
    Failed = 3,
}
