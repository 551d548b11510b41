use core::fmt::{Debug, Display, Formatter};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::io;

/// Goto failures, carried as small exit codes on the wire
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum GotoError {
    BelowHorizon = 1,
    SameSide = 3,
    Limits = 6,
    AboveOverhead = 8,
    ChannelFull = 9,
    Aborted = 10,
    ChannelClosed = 11,
}

pub type GotoResult = Result<(), GotoError>;

pub const ERRGOTO_NONE: u8 = 0;

/// Exit code of a goto; 0 on success
pub fn goto_code(result: &GotoResult) -> u8 {
    match result {
        Ok(()) => ERRGOTO_NONE,
        Err(e) => (*e).into(),
    }
}

impl Display for GotoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BelowHorizon => write!(f, "Target below horizon limit"),
            Self::SameSide => write!(f, "Target not reachable on the other pier side"),
            Self::Limits => write!(f, "Target outside mount limits on both pier sides"),
            Self::AboveOverhead => write!(f, "Target above overhead limit"),
            Self::ChannelFull => write!(f, "Control channel full"),
            Self::Aborted => write!(f, "Aborted"),
            Self::ChannelClosed => write!(f, "Control channel closed"),
        }
    }
}

impl std::error::Error for GotoError {}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ChannelError {
    /// Message dropped, the motor task is not keeping up
    Full,
    /// Motor task is gone
    Closed,
}

impl Display for ChannelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => Display::fmt("Control channel full", f),
            Self::Closed => Display::fmt("Control channel closed", f),
        }
    }
}

impl std::error::Error for ChannelError {}

impl From<ChannelError> for GotoError {
    fn from(e: ChannelError) -> Self {
        match e {
            ChannelError::Full => GotoError::ChannelFull,
            ChannelError::Closed => GotoError::ChannelClosed,
        }
    }
}

#[derive(Clone, Debug)]
pub enum StoreError {
    IOError(String),
    InvalidValue(String),
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::IOError(e.to_string())
    }
}

impl From<confy::ConfyError> for StoreError {
    fn from(e: confy::ConfyError) -> Self {
        Self::IOError(e.to_string())
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IOError(s) => Display::fmt(&s, f),
            Self::InvalidValue(s) => write!(f, "Invalid stored value: {}", s),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Clone, Debug)]
pub enum HomeError {
    Parked,
    Slewing,
    Store(StoreError),
    Channel(ChannelError),
}

impl From<ChannelError> for HomeError {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}

impl From<StoreError> for HomeError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl Display for HomeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parked => Display::fmt("Can't change home while parked", f),
            Self::Slewing => Display::fmt("Can't change home while slewing", f),
            Self::Store(e) => write!(f, "Home storage failed: {}", e),
            Self::Channel(e) => write!(f, "Home command not sent: {}", e),
        }
    }
}

impl std::error::Error for HomeError {}
