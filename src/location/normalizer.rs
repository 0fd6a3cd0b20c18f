//! Reads a latitude/longitude candidate out of an asset's custom metadata.
//!
//! Matching rules differ per metadata shape:
//!
//! - keyed lists match a field only when its key equals the configured key
//!   exactly (case-sensitive)
//! - typed properties match case-insensitively on the property name; an
//!   exact match with a configured key beats the substring hints
//!   (`lat` for latitude, `lon`/`lng` for longitude) wherever it appears
//!
//! Within one tier the last matching entry wins. The returned pair has been
//! parsed but not range-checked.

use crate::catalog::model::{Asset, KeyedField, Metadata, TypedProperty};
use crate::constants::{LATITUDE_NAME_HINTS, LONGITUDE_NAME_HINTS};
use crate::core::config::MetadataKeyConfig;
use crate::core::geo::{parse_coordinate, LatLng};

/// Extract an unvalidated coordinate pair, or `None` if either axis is
/// missing or fails to parse.
pub fn extract_coordinates(asset: &Asset, keys: &MetadataKeyConfig) -> Option<LatLng> {
    let metadata = asset.metadata.as_ref().filter(|m| !m.is_empty())?;

    let (lat, lng) = match metadata {
        Metadata::Keyed(fields) => match_keyed(fields, keys),
        Metadata::Typed(entries) => match_typed(entries, keys),
    };

    let (Some(lat_raw), Some(lng_raw)) = (lat, lng) else {
        return None;
    };

    match (parse_coordinate(&lat_raw), parse_coordinate(&lng_raw)) {
        (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
        _ => {
            log::debug!(
                "asset {} ({}) has non-numeric coordinates: lat={:?}, lon={:?}",
                asset.id,
                asset.title,
                lat_raw,
                lng_raw
            );
            None
        }
    }
}

fn match_keyed(fields: &[KeyedField], keys: &MetadataKeyConfig) -> (Option<String>, Option<String>) {
    let mut lat = None;
    let mut lng = None;

    for field in fields {
        if field.key == keys.latitude() {
            lat = field.raw_value().or(lat);
        }
        if field.key == keys.longitude() {
            lng = field.raw_value().or(lng);
        }
    }

    (lat, lng)
}

/// Best value seen so far for one axis, split by how it matched.
#[derive(Default)]
struct AxisMatch {
    exact: Option<String>,
    hinted: Option<String>,
}

impl AxisMatch {
    fn resolve(self) -> Option<String> {
        self.exact.or(self.hinted)
    }
}

fn match_typed(
    entries: &[TypedProperty],
    keys: &MetadataKeyConfig,
) -> (Option<String>, Option<String>) {
    let lat_key = keys.latitude().to_lowercase();
    let lng_key = keys.longitude().to_lowercase();

    let mut lat = AxisMatch::default();
    let mut lng = AxisMatch::default();

    for entry in entries {
        let Some(name) = entry.normalized_name() else {
            continue;
        };
        let Some(value) = entry.raw_value() else {
            continue;
        };

        let is_lat_key = name == lat_key;
        let is_lng_key = name == lng_key;

        if is_lat_key || is_lng_key {
            if is_lat_key {
                lat.exact = Some(value.clone());
            }
            if is_lng_key {
                lng.exact = Some(value);
            }
            continue;
        }

        if contains_any(&name, LATITUDE_NAME_HINTS) {
            lat.hinted = Some(value.clone());
        }
        if contains_any(&name, LONGITUDE_NAME_HINTS) {
            lng.hinted = Some(value);
        }
    }

    (lat.resolve(), lng.resolve())
}

fn contains_any(name: &str, hints: &[&str]) -> bool {
    hints.iter().any(|hint| name.contains(hint))
}
