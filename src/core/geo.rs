use serde::{Deserialize, Serialize};

use crate::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::{Error, Result};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate without checking its range
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a LatLng only if both values pass [`validate_coordinates`]
    pub fn validated(lat: f64, lng: f64) -> Result<Self> {
        if validate_coordinates(Some(lat), Some(lng)) {
            Ok(Self::new(lat, lng))
        } else {
            Err(Error::InvalidCoordinates(format!("lat={}, lon={}", lat, lng)))
        }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        validate_coordinates(Some(self.lat), Some(self.lng))
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Decides whether a latitude/longitude candidate pair is usable.
///
/// Fails when either side is missing or NaN, or outside the inclusive
/// ranges `[-90, 90]` / `[-180, 180]`. Infinities fall outside the range.
pub fn validate_coordinates(lat: Option<f64>, lng: Option<f64>) -> bool {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return false;
    };
    if lat.is_nan() || lng.is_nan() {
        return false;
    }
    (MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng)
}

/// Parses the leading decimal number of a metadata value.
///
/// Leading whitespace is skipped and anything after the number is ignored,
/// so `"40.7128°"` and `"40.7128 N"` both read as `40.7128`. Returns `None`
/// when the text does not start with a number; `NaN` and `inf` are not numbers.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Arithmetic mean of the given points, `None` when there are none.
pub fn mean_center<I>(points: I) -> Option<LatLng>
where
    I: IntoIterator<Item = LatLng>,
{
    let (count, lat_sum, lng_sum) = points
        .into_iter()
        .fold((0usize, 0.0, 0.0), |(n, lat, lng), p| (n + 1, lat + p.lat, lng + p.lng));

    if count == 0 {
        return None;
    }
    Some(LatLng::new(lat_sum / count as f64, lng_sum / count as f64))
}
