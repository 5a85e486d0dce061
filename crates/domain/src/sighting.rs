//! Personal sighting log types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::QueryParams;

/// Visibility of a logged sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    /// Visible to everyone, including the nearby map.
    #[default]
    Public,
    /// Visible only to the author.
    Private,
}

/// A sighting about to be logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSighting {
    /// The identified bird, or None when unidentified.
    pub bird_id: Option<i64>,
    /// Observation date as `YYYY-MM-DD`.
    pub discovered_date: String,
    /// Latitude of the observation point.
    pub latitude: f64,
    /// Longitude of the observation point.
    pub longitude: f64,
    /// User-given name for the place.
    pub location_alias: String,
    /// Reverse-geocoded address.
    pub address: String,
    /// Free-form note.
    pub note: String,
    /// Visibility; the backend defaults to public when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

impl NewSighting {
    /// Validates the parts the backend will reject anyway.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed date or an out-of-range
    /// coordinate.
    pub fn validate(&self) -> DomainResult<()> {
        validate_date(&self.discovered_date)?;
        validate_coordinates(self.latitude, self.longitude)
    }
}

/// One row in the "my sightings" grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingSummary {
    /// Backend identifier.
    pub sighting_id: i64,
    /// First image, if any.
    pub image_url: Option<String>,
    /// Identified bird name, if any.
    pub korean_name: Option<String>,
}

/// The bird attached to a sighting detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingBird {
    /// Backend identifier, or None when unidentified.
    pub bird_id: Option<i64>,
    /// Common name.
    pub korean_name: Option<String>,
    /// Scientific name.
    pub scientific_name: Option<String>,
}

/// The author attached to a sighting detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingAuthor {
    /// Backend identifier.
    pub user_id: i64,
    /// Display name.
    pub nickname: String,
}

/// A fully expanded sighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingDetail {
    /// Backend identifier.
    pub sighting_id: i64,
    /// First image, if any.
    pub image_url: Option<String>,
    /// Observation date as `YYYY-MM-DD`.
    pub discovered_date: String,
    /// Latitude of the observation point.
    pub latitude: f64,
    /// Longitude of the observation point.
    pub longitude: f64,
    /// User-given name for the place.
    pub location_alias: String,
    /// Reverse-geocoded address.
    pub address: String,
    /// Free-form note.
    pub note: String,
    /// Visibility.
    pub access_level: AccessLevel,
    /// Identified bird.
    pub bird: SightingBird,
    /// Author.
    pub user: SightingAuthor,
}

/// The editable view of a sighting, as served by the edit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingEdit {
    /// The identified bird, or None when unidentified.
    pub bird_id: Option<i64>,
    /// Observation date as `YYYY-MM-DD`.
    pub discovered_date: String,
    /// Longitude of the observation point.
    pub longitude: f64,
    /// Latitude of the observation point.
    pub latitude: f64,
    /// User-given name for the place.
    pub location_alias: String,
    /// Reverse-geocoded address.
    pub address: String,
    /// Free-form note.
    pub note: String,
    /// Visibility.
    pub access_level: AccessLevel,
    /// Attached image id, if any.
    pub image_id: Option<i64>,
    /// Attached image URL, if any.
    pub image_url: Option<String>,
}

/// Partial update of a sighting. Absent fields are left untouched.
///
/// `bird_id` uses a double Option: the outer level is field presence,
/// the inner level is the value, where `None` serializes as an
/// explicit null to clear the identification. The backend only honors
/// the field when `is_bird_id_updated` accompanies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct SightingPatch {
    /// Marker telling the backend to apply `bird_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bird_id_updated: Option<bool>,
    /// New bird identification; inner None clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bird_id: Option<Option<i64>>,
    /// New observation date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovered_date: Option<String>,
    /// New longitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// New latitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// New place name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_alias: Option<String>,
    /// New address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// New visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

impl SightingPatch {
    /// Sets or clears the bird identification.
    #[must_use]
    pub const fn with_bird(mut self, bird_id: Option<i64>) -> Self {
        self.is_bird_id_updated = Some(true);
        self.bird_id = Some(bird_id);
        self
    }
}

/// One sighting on the nearby map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySighting {
    /// Backend identifier.
    pub sighting_id: i64,
    /// First image, if any.
    pub image_url: Option<String>,
    /// Identified bird name, if any.
    pub korean_name: Option<String>,
    /// Free-form note.
    pub note: String,
    /// Latitude of the observation point.
    pub latitude: f64,
    /// Longitude of the observation point.
    pub longitude: f64,
    /// User-given name for the place.
    pub location_alias: String,
    /// Reverse-geocoded address.
    pub address: String,
}

/// Query for sightings around a map position.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    /// Map-center latitude.
    pub latitude: f64,
    /// Map-center longitude.
    pub longitude: f64,
    /// Search radius in meters.
    pub radius_meters: u32,
    /// Restrict to the caller's own sightings.
    pub is_mine_only: bool,
}

impl NearbyQuery {
    /// Creates a query around a point; all sightings, not just mine.
    #[must_use]
    pub const fn around(latitude: f64, longitude: f64, radius_meters: u32) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
            is_mine_only: false,
        }
    }

    /// Restricts the query to the caller's own sightings.
    #[must_use]
    pub const fn mine_only(mut self) -> Self {
        self.is_mine_only = true;
        self
    }

    /// Serializes the query into request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.append("latitude", self.latitude.to_string());
        params.append("longitude", self.longitude.to_string());
        params.append("radiusMeters", self.radius_meters.to_string());
        params.append("isMineOnly", self.is_mine_only.to_string());
        params
    }
}

/// A presigned upload slot for one sighting image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUpload {
    /// Storage URL accepting a single PUT.
    pub presigned_url: String,
    /// Object key to register once the upload succeeds.
    pub object_key: String,
}

/// A registered sighting image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingImage {
    /// Backend identifier.
    pub image_id: i64,
    /// Public URL of the stored image.
    pub url: String,
}

fn validate_date(date: &str) -> DomainResult<()> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err(DomainError::InvalidDate(date.to_string()))
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> DomainResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(DomainError::InvalidCoordinate(format!(
            "latitude {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(DomainError::InvalidCoordinate(format!(
            "longitude {longitude}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> NewSighting {
        NewSighting {
            bird_id: Some(42),
            discovered_date: "2025-06-14".to_string(),
            latitude: 37.5665,
            longitude: 126.9780,
            location_alias: "Han river park".to_string(),
            address: "Seoul".to_string(),
            note: "Pair at the waterline".to_string(),
            access_level: None,
        }
    }

    #[test]
    fn test_valid_sighting() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_malformed_date() {
        let mut sighting = sample();
        sighting.discovered_date = "14-06-2025".to_string();
        assert!(matches!(
            sighting.validate(),
            Err(DomainError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_out_of_range_latitude() {
        let mut sighting = sample();
        sighting.latitude = 123.0;
        assert!(matches!(
            sighting.validate(),
            Err(DomainError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = SightingPatch {
            note: Some("updated".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"note": "updated"}));
    }

    #[test]
    fn test_patch_clears_bird_with_null() {
        let patch = SightingPatch::default().with_bird(None);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"isBirdIdUpdated": true, "birdId": null})
        );
    }

    #[test]
    fn test_nearby_params() {
        let params = NearbyQuery::around(37.5, 127.0, 500).mine_only().to_params();
        let pairs = params.pairs();
        assert!(pairs.contains(&("radiusMeters".to_string(), "500".to_string())));
        assert!(pairs.contains(&("isMineOnly".to_string(), "true".to_string())));
    }
}
