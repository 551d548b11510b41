#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum PierSide {
    East,
    West,
    NotValid,
}

impl PierSide {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::NotValid)
    }

    /// NotValid has no opposite and is returned unchanged
    pub fn opposite(self) -> Self {
        match self {
            PierSide::NotValid => self,
            PierSide::East => PierSide::West,
            PierSide::West => PierSide::East,
        }
    }
}

impl core::fmt::Display for PierSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PierSide::East => write!(f, "East"),
            PierSide::West => write!(f, "West"),
            PierSide::NotValid => write!(f, "NotValid"),
        }
    }
}
