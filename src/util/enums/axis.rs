#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Axis {
    /// Hour angle analogue
    Primary,
    /// Declination analogue
    Secondary,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::Primary => 0,
            Axis::Secondary => 1,
        }
    }
}
