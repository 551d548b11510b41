use std::sync::atomic::{AtomicU32, Ordering};

/// Named status signals shared between components
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(u32)]
pub enum Event {
    AtHome = 1 << 0,
    GuidingN = 1 << 1,
    GuidingS = 1 << 2,
    GuidingE = 1 << 3,
    GuidingW = 1 << 4,
    Abort = 1 << 5,
}

impl Event {
    #[inline]
    fn bit(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Default)]
pub struct EventFlags(AtomicU32);

impl EventFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, events: &[Event]) {
        let mask = events.iter().fold(0, |m, e| m | e.bit());
        self.0.fetch_or(mask, Ordering::AcqRel);
    }

    pub fn reset(&self, events: &[Event]) {
        let mask = events.iter().fold(0, |m, e| m | e.bit());
        self.0.fetch_and(!mask, Ordering::AcqRel);
    }

    pub fn get(&self, event: Event) -> bool {
        self.0.load(Ordering::Acquire) & event.bit() != 0
    }

    pub fn any(&self, events: &[Event]) -> bool {
        events.iter().any(|e| self.get(*e))
    }
}
