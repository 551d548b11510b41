use crate::mount::EqMount;
use crate::util::*;

/// Last requested goto target
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Target {
    pub ha: Option<Degrees>,
    pub dec: Option<Degrees>,
    pub alt: Option<Degrees>,
    pub az: Option<Degrees>,
}

#[derive(Debug)]
pub(in crate::mount) struct MountStatus {
    pub park_status: ParkStatus,
    pub target: Target,
    pub last_error: Option<GotoError>,
}

impl MountStatus {
    pub fn new(park_status: ParkStatus) -> Self {
        Self {
            park_status,
            target: Target::default(),
            last_error: None,
        }
    }
}

impl EqMount {
    pub async fn get_target(&self) -> Target {
        self.status.read().await.target
    }

    /// Error of the last goto, None if it succeeded
    pub async fn last_error(&self) -> Option<GotoError> {
        self.status.read().await.last_error
    }

    pub async fn park_status(&self) -> ParkStatus {
        self.status.read().await.park_status
    }

    /// Records and persists the park status reported by the parking logic
    pub async fn set_park_status(&self, park_status: ParkStatus) -> Result<(), StoreError> {
        let mut status = self.status.write().await;
        self.store
            .write_byte(crate::store::StoreKey::ParkStatus, park_status.into())?;
        status.park_status = park_status;
        Ok(())
    }
}
