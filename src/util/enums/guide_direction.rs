use super::Axis;
use std::fmt::Formatter;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum GuideDirection {
    North,
    South,
    East,
    West,
}

impl GuideDirection {
    pub fn axis(self) -> Axis {
        match self {
            GuideDirection::East | GuideDirection::West => Axis::Primary,
            GuideDirection::North | GuideDirection::South => Axis::Secondary,
        }
    }
}

impl core::fmt::Display for GuideDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GuideDirection::North => write!(f, "North"),
            GuideDirection::South => write!(f, "South"),
            GuideDirection::East => write!(f, "East"),
            GuideDirection::West => write!(f, "West"),
        }
    }
}

impl TryFrom<char> for GuideDirection {
    type Error = char;

    /// Accepts the single letter direction codes used by hand controllers
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'n' => Ok(GuideDirection::North),
            's' => Ok(GuideDirection::South),
            'e' => Ok(GuideDirection::East),
            'w' => Ok(GuideDirection::West),
            _ => Err(c),
        }
    }
}
