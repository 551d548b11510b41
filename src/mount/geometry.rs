use crate::config::{AxisSettings, MountSettings};
use crate::util::*;

/// Raw mechanical axis angles, degrees
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Axes {
    pub axis1: Degrees,
    pub axis2: Degrees,
}

#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct Steps {
    pub steps1: i64,
    pub steps2: i64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisGeometry {
    pub steps_per_rot: i64,
    pub half_rot: i64,
    pub steps_per_degree: f64,
    /// Steps per second at one turn per day
    pub steps_per_second: f64,
    pub micro: u8,
    min_deg: Degrees,
    max_deg: Degrees,
}

impl AxisGeometry {
    pub fn new(settings: &AxisSettings) -> Self {
        let steps_per_rot = settings.steps_per_rot;
        Self {
            steps_per_rot,
            half_rot: steps_per_rot / 2,
            steps_per_degree: steps_per_rot as f64 / 360.,
            steps_per_second: steps_per_rot as f64 / 86400.,
            micro: settings.micro,
            min_deg: settings.min_deg,
            max_deg: settings.max_deg,
        }
    }

    /// Mechanical travel range of the axis
    pub fn within_limits(&self, angle: Degrees) -> bool {
        (self.min_deg..=self.max_deg).contains(&angle)
    }

    /// Truncates toward zero
    #[inline]
    pub fn to_steps(&self, angle: Degrees) -> i64 {
        (angle * self.steps_per_degree) as i64
    }

    #[inline]
    pub fn to_degrees(&self, steps: i64) -> Degrees {
        steps as f64 / self.steps_per_degree
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geometry {
    pub axis1: AxisGeometry,
    pub axis2: AxisGeometry,
}

impl Geometry {
    pub fn new(settings: &MountSettings) -> Self {
        Self {
            axis1: AxisGeometry::new(&settings.axis1),
            axis2: AxisGeometry::new(&settings.axis2),
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisGeometry {
        match axis {
            Axis::Primary => &self.axis1,
            Axis::Secondary => &self.axis2,
        }
    }

    pub fn axes_to_steps(&self, axes: &Axes) -> Steps {
        Steps {
            steps1: self.axis1.to_steps(axes.axis1),
            steps2: self.axis2.to_steps(axes.axis2),
        }
    }

    pub fn steps_to_axes(&self, steps: &Steps) -> Axes {
        Axes {
            axis1: self.axis1.to_degrees(steps.steps1),
            axis2: self.axis2.to_degrees(steps.steps2),
        }
    }
}

/// Home position and axis1 direction sentinels, rederived by `init_home`
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct HomeDef {
    pub home: Steps,
    /// Axis1 target that runs the axis west
    pub west_def: i64,
    /// Axis1 target that runs the axis east
    pub east_def: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MountSettings;
    use assert_float_eq::*;

    fn geometry() -> Geometry {
        Geometry::new(&MountSettings::default())
    }

    #[test]
    fn test_axes_steps_round_trip() {
        let g = geometry();
        let resolution = 1. / g.axis1.steps_per_degree;
        for (a1, a2) in [(0., 0.), (12.3456, -77.777), (-179.99, 179.99), (0.0001, -0.0001)] {
            let axes = Axes {
                axis1: a1,
                axis2: a2,
            };
            let back = g.steps_to_axes(&g.axes_to_steps(&axes));
            assert_float_absolute_eq!(back.axis1, a1, resolution);
            assert_float_absolute_eq!(back.axis2, a2, resolution);
        }
    }

    #[test]
    fn test_truncates_toward_zero() {
        let g = geometry();
        let half_step = 0.5 / g.axis1.steps_per_degree;
        let steps = g.axes_to_steps(&Axes {
            axis1: 10. + half_step,
            axis2: -10. - half_step,
        });
        assert_eq!(steps.steps1, g.axis1.to_steps(10.));
        assert_eq!(steps.steps2, g.axis2.to_steps(-10.));
    }

    #[test]
    fn test_derived_constants() {
        let g = geometry();
        assert_eq!(g.axis1.steps_per_rot, 1_728_000);
        assert_eq!(g.axis1.half_rot, 864_000);
        assert_float_relative_eq!(g.axis1.steps_per_degree, 4800.);
        assert_float_relative_eq!(g.axis1.steps_per_second, 20.);
        assert!(g.axis2.within_limits(180.));
        assert!(!g.axis2.within_limits(180.01));
    }
}
