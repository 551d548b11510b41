use chrono::{Datelike, Timelike};
use polynomials::poly;
use std::f64::consts::{PI, TAU};

pub type Hours = f64;
pub type Degrees = f64;
pub type Radians = f64;

/// Observing site, fixed for the session
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Site {
    latitude: Degrees,
    longitude: Degrees,
    elevation: f64,
    sin_lat: f64,
    cos_lat: f64,
}

impl Site {
    pub fn new(latitude: Degrees, longitude: Degrees, elevation: f64) -> Self {
        let lat = deg_to_rad(latitude);
        Self {
            latitude,
            longitude,
            elevation,
            sin_lat: lat.sin(),
            cos_lat: lat.cos(),
        }
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn sin_lat(&self) -> f64 {
        self.sin_lat
    }

    pub fn cos_lat(&self) -> f64 {
        self.cos_lat
    }

    #[inline]
    pub fn in_north(&self) -> bool {
        0. <= self.latitude
    }

    /// +1 in the northern hemisphere, -1 in the southern
    #[inline]
    pub fn hemisphere(&self) -> f64 {
        if self.in_north() {
            1.
        } else {
            -1.
        }
    }
}

/// Hour angle and declination, both in degrees
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct EqCoords {
    pub ha: Degrees,
    pub dec: Degrees,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct HorCoords {
    pub az: Degrees,
    pub alt: Degrees,
}

pub fn deg_to_rad(degrees: Degrees) -> Radians {
    PI * degrees / 180.
}

pub fn rad_to_deg(rad: Radians) -> Degrees {
    180. * rad / PI
}

pub fn rad_to_hours(rad: Radians) -> Hours {
    12. * rad / PI
}

pub fn deg_to_hours(deg: Degrees) -> Hours {
    deg / 15.
}

pub fn hours_to_deg(hours: Hours) -> Degrees {
    hours * 15.
}

// Convert hms to hours or dms to degrees
pub fn ms_to_dec(d: u32, minutes: u32, seconds: f64) -> f64 {
    (d as f64) + (minutes as f64) / 60. + seconds / 3600.
}

pub fn modulo(val: f64, base: f64) -> f64 {
    ((val % base) + base) % base
}

/// Reduces an angle to [0, 360)
pub fn deg_range(deg: Degrees) -> Degrees {
    modulo(deg, 360.)
}

/// Reduces an hour angle to [-180, 180)
pub fn ha_range(ha: Degrees) -> Degrees {
    modulo(ha + 180., 360.) - 180.
}

/// Calculates the Julian Date of a time
/// see https://scienceworld.wolfram.com/astronomy/JulianDate.html
fn calc_jd(time: chrono::DateTime<chrono::Utc>) -> f64 {
    let y = time.year() as f64;
    let m = time.month() as f64;
    let d = time.day() as f64;

    let mut jd = 367. * y;
    jd -= f64::floor(7. * (y + f64::floor((m + 9.) / 12.)) / 4.);
    jd -= f64::floor(3. * (f64::floor((y + (m - 9.) / 7.) / 100.) + 1.) / 4.);
    jd += f64::floor(275. * m / 9.);
    jd += d;
    jd += 1721028.5;
    jd + ms_to_dec(time.hour(), time.minute(), time.second() as f64) / 24.
}

// see https://thecynster.home.blog/2019/11/04/calculating-sidereal-time/
pub fn calculate_greenwich_sidereal_time(time: chrono::DateTime<chrono::Utc>) -> Hours {
    // Off by the difference in leap seconds from this total on the date given
    const LEAP_SECOND_TOTAL: u32 = 27;

    let jd_utc = calc_jd(time);

    let du = jd_utc - 2451545.0;
    let theta = rad_to_hours(modulo(
        TAU * (0.779_057_273_264f64 + 1.002_737_811_911_354_5f64 * du),
        TAU,
    ));

    let poly = poly![
        0.014506,
        4612.156534,
        1.3915817,
        -0.00000044,
        -0.000029956,
        -0.0000000368,
    ];
    let jd_tt = jd_utc + ((LEAP_SECOND_TOTAL as f64 + 32.184) / 3600.) / 24.;
    let t = (jd_tt - 2451545.0) / 36525.; // centuries

    let gmstp = deg_to_hours(modulo(poly.eval(t).unwrap_or_default() / 3600., 360.));

    modulo(theta + gmstp, 24.)
}

/// longitude in degrees
/// returns hours
pub fn calculate_local_sidereal_time(
    time: chrono::DateTime<chrono::Utc>,
    longitude: Degrees,
) -> Hours {
    let greenwich_sidereal_time = calculate_greenwich_sidereal_time(time);
    modulo(greenwich_sidereal_time + deg_to_hours(longitude), 24.)
}

/// Equatorial (hour angle) to horizon coordinates.
/// Azimuth is north-referenced, positive east.
pub fn equ_to_hor(eq: &EqCoords, site: &Site) -> HorCoords {
    let ha = deg_to_rad(eq.ha);
    let dec = deg_to_rad(eq.dec);
    let (sin_lat, cos_lat) = (site.sin_lat(), site.cos_lat());

    let sin_alt = dec.sin() * sin_lat + dec.cos() * cos_lat * ha.cos();
    let alt = sin_alt.clamp(-1., 1.).asin();

    let y = -dec.cos() * ha.sin();
    let x = dec.sin() * cos_lat - dec.cos() * sin_lat * ha.cos();

    HorCoords {
        az: deg_range(rad_to_deg(y.atan2(x))),
        alt: rad_to_deg(alt),
    }
}

/// Topocentric horizon to equatorial coordinates; hour angle in [-180, 180)
pub fn hor_to_equ(hor: &HorCoords, site: &Site) -> EqCoords {
    let az = deg_to_rad(hor.az);
    let alt = deg_to_rad(hor.alt);
    let (sin_lat, cos_lat) = (site.sin_lat(), site.cos_lat());

    let sin_dec = sin_lat * alt.sin() + cos_lat * alt.cos() * az.cos();
    let dec = sin_dec.clamp(-1., 1.).asin();

    let y = -az.sin() * alt.cos();
    let x = alt.sin() * cos_lat - alt.cos() * sin_lat * az.cos();

    EqCoords {
        ha: ha_range(rad_to_deg(y.atan2(x))),
        dec: rad_to_deg(dec),
    }
}
