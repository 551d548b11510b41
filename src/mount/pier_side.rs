use crate::astro_math::EqCoords;
use crate::mount::{Axes, EqMount};
use crate::util::*;

impl EqMount {
    /// Axis2 on the negative side in the north (positive in the south) means flipped
    pub fn is_flipped(&self) -> bool {
        self.is_flipped_at(self.motors.current_pos(Axis::Secondary))
    }

    fn is_flipped_at(&self, steps2: i64) -> bool {
        (steps2 <= 0) == self.site.in_north()
    }

    /// Pier side for an axis2 position. Always derived, never stored.
    pub fn pier_side_at(&self, steps2: i64) -> PierSide {
        if self.is_flipped_at(steps2) {
            PierSide::West
        } else {
            PierSide::East
        }
    }

    pub fn get_pier_side(&self) -> PierSide {
        self.pier_side_at(self.motors.current_pos(Axis::Secondary))
    }

    /// Pier side `eq` will be reached from: the current one if possible, else the other
    pub fn get_target_pier_side(&self, eq: &EqCoords) -> Option<PierSide> {
        self.resolve_target(eq).map(|(pier_side, _)| pier_side)
    }

    pub(in crate::mount) fn resolve_target(&self, eq: &EqCoords) -> Option<(PierSide, Axes)> {
        let current = self.get_pier_side();
        [current, current.opposite()]
            .into_iter()
            .find_map(|pier_side| self.eq_to_axes(eq, pier_side).map(|axes| (pier_side, axes)))
    }
}
