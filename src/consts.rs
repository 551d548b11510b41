/// Length of a sidereal second in SI seconds
pub const SIDEREAL_SECOND: f64 = 0.997_269_566_3;

/// Extra allowance, in minutes, applied to limit checks while tracking
pub const TRACKING_SLACK_MINUTES: f64 = 5.;
