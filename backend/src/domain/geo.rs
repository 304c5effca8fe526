//! Geographic primitives and great-circle distance.

use std::fmt;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Validation errors raised when constructing [`Coordinates`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    /// Latitude was non-finite or outside `[-90, 90]`.
    Latitude(f64),
    /// Longitude was non-finite or outside `[-180, 180]`.
    Longitude(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude(value) => write!(f, "latitude {value} must be within [-90, 90]"),
            Self::Longitude(value) => write!(f, "longitude {value} must be within [-180, 180]"),
        }
    }
}

impl std::error::Error for CoordinateError {}

/// A WGS84 point in decimal degrees.
///
/// ## Invariants
/// - `latitude` is finite and within `[-90, 90]`.
/// - `longitude` is finite and within `[-180, 180]`.
///
/// # Examples
/// ```
/// use donex::domain::Coordinates;
///
/// let mumbai = Coordinates::try_new(19.0760, 72.8777).unwrap();
/// assert_eq!(mumbai.distance_km(mumbai), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and construct a coordinate pair.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(self, other: Coordinates) -> f64 {
        haversine_km(self, other)
    }
}

/// Great-circle distance between two points using the haversine formula.
///
/// Deterministic and infallible; the result is symmetric and zero for
/// identical points.
///
/// # Examples
/// ```
/// use donex::domain::{haversine_km, Coordinates};
///
/// let mumbai = Coordinates::try_new(19.0760, 72.8777).unwrap();
/// let delhi = Coordinates::try_new(28.7041, 77.1025).unwrap();
/// let km = haversine_km(mumbai, delhi);
/// assert!((1150.0..1165.0).contains(&km));
/// ```
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` fractionally past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
