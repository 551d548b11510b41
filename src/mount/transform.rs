use chrono::{DateTime, Utc};

use crate::astro_math;
use crate::astro_math::{EqCoords, HorCoords};
use crate::mount::{Axes, CheckMode, EqMount, Steps};
use crate::util::*;

/// What `get_equ` reports in its first coordinate
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EquatorialReference {
    HourAngle,
    /// Right ascension at the given time, degrees in [0, 360)
    RightAscension(DateTime<Utc>),
}

impl EqMount {
    /// Raw axes for `eq` seen from `pier_side`, no limit checks
    pub fn eq_to_axes_unchecked(&self, eq: &EqCoords, pier_side: PierSide) -> Axes {
        let ha = astro_math::ha_range(eq.ha);
        match self.mount_type {
            MountType::GermanEquatorial => {
                let hemisphere = self.site.hemisphere();
                // -1 when the mount is flipped
                let flip_sign = if (pier_side == PierSide::East) == self.site.in_north() {
                    1.
                } else {
                    -1.
                };
                Axes {
                    axis1: hemisphere * ha - flip_sign * 90.,
                    axis2: flip_sign * (90. - hemisphere * eq.dec),
                }
            }
            MountType::Fork => Axes {
                axis1: ha,
                axis2: 90. - eq.dec,
            },
        }
    }

    /// Axes for `eq` on `pier_side`, None if the position can't be reached from that side
    pub fn eq_to_axes(&self, eq: &EqCoords, pier_side: PierSide) -> Option<Axes> {
        let axes = self.eq_to_axes_unchecked(eq, pier_side);

        if !self.within_limits(&axes) {
            return None;
        }

        // A fork never flips, so there is no meridian ambiguity to check
        if self.mount_type == MountType::GermanEquatorial
            && !self.check_meridian(&axes, CheckMode::Goto, pier_side)
        {
            return None;
        }

        if !self.check_pole(axes.axis1, CheckMode::Goto) {
            return None;
        }

        Some(axes)
    }

    /// Inverse of `eq_to_axes`. The flip is read from the sign of axis2.
    pub fn axes_to_equ(&self, axes: &Axes) -> EqCoords {
        match self.mount_type {
            MountType::GermanEquatorial => {
                let hemisphere = self.site.hemisphere();
                let flip_sign = if axes.axis2 < 0. { -1. } else { 1. };
                EqCoords {
                    ha: hemisphere * (axes.axis1 + flip_sign * 90.),
                    dec: hemisphere * (90. - flip_sign * axes.axis2),
                }
            }
            MountType::Fork => EqCoords {
                ha: axes.axis1,
                dec: 90. - axes.axis2,
            },
        }
    }

    pub fn steps_to_equ(&self, steps: &Steps) -> EqCoords {
        self.axes_to_equ(&self.geometry.steps_to_axes(steps))
    }

    /// Equatorial position of the motors right now
    pub fn get_equ(&self, reference: EquatorialReference) -> (Degrees, Degrees) {
        let eq = self.steps_to_equ(&self.current_steps());
        match reference {
            EquatorialReference::HourAngle => (eq.ha, eq.dec),
            EquatorialReference::RightAscension(time) => {
                let lst = astro_math::calculate_local_sidereal_time(time, self.site.longitude());
                (astro_math::deg_range(astro_math::hours_to_deg(lst) - eq.ha), eq.dec)
            }
        }
    }

    /// Apparent horizon position of the motors right now
    pub fn get_hor_app(&self) -> HorCoords {
        let (ha, dec) = self.get_equ(EquatorialReference::HourAngle);
        astro_math::equ_to_hor(&EqCoords { ha, dec }, &self.site)
    }
}
