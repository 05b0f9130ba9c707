//! Subsidiary and region types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use meridian_shared::types::SubsidiaryId;
use serde::{Deserialize, Serialize};

/// Geographic region a subsidiary reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// North and South America.
    #[serde(rename = "Americas")]
    Americas,
    /// Europe.
    #[serde(rename = "Europe")]
    Europe,
    /// Asia and Oceania.
    #[serde(rename = "Asia-Pacific")]
    AsiaPacific,
}

impl Region {
    /// All regions in legend order.
    pub const ALL: [Self; 3] = [Self::Americas, Self::Europe, Self::AsiaPacific];

    /// Display label, identical to the stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Americas => "Americas",
            Self::Europe => "Europe",
            Self::AsiaPacific => "Asia-Pacific",
        }
    }

    /// Marker colour on the world map.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Americas => "#3B82F6",
            Self::Europe => "#10B981",
            Self::AsiaPacific => "#F59E0B",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A corporate entity tracked by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsidiary {
    /// Unique identifier.
    pub id: SubsidiaryId,
    /// Display name.
    pub name: String,
    /// Short entity code (e.g. "HQ", "US").
    pub code: String,
    /// Country.
    pub country: String,
    /// City.
    pub city: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Reporting region.
    pub region: Region,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A subsidiary marker on the world map.
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    /// Subsidiary ID.
    pub id: SubsidiaryId,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// `[longitude, latitude]`, the order map projections expect.
    pub coordinates: [f64; 2],
    /// Reporting region.
    pub region: Region,
    /// Marker colour.
    pub color: &'static str,
}

impl From<&Subsidiary> for MapMarker {
    fn from(sub: &Subsidiary) -> Self {
        Self {
            id: sub.id,
            name: sub.name.clone(),
            city: sub.city.clone(),
            country: sub.country.clone(),
            coordinates: [sub.longitude, sub.latitude],
            region: sub.region,
            color: sub.region.color(),
        }
    }
}

/// One row of the map legend.
#[derive(Debug, Clone, Serialize)]
pub struct RegionLegendEntry {
    /// Region.
    pub region: Region,
    /// Marker colour.
    pub color: &'static str,
}

/// Builds map markers for every subsidiary, preserving input order.
#[must_use]
pub fn map_markers(subsidiaries: &[Subsidiary]) -> Vec<MapMarker> {
    subsidiaries.iter().map(MapMarker::from).collect()
}

/// Builds the region legend in display order.
#[must_use]
pub fn region_legend() -> Vec<RegionLegendEntry> {
    Region::ALL
        .into_iter()
        .map(|region| RegionLegendEntry {
            region,
            color: region.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsidiary(name: &str, region: Region) -> Subsidiary {
        Subsidiary {
            id: SubsidiaryId::new(),
            name: name.to_string(),
            code: "US".to_string(),
            country: "United States".to_string(),
            city: "Cerritos".to_string(),
            latitude: 33.86,
            longitude: -118.06,
            region,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_region_round_trip_labels() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>(), Ok(region));
        }
        assert!("Africa".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_serde_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&Region::AsiaPacific).unwrap(),
            "\"Asia-Pacific\""
        );
    }

    #[test]
    fn test_marker_swaps_to_lon_lat_and_colours_by_region() {
        let sub = subsidiary("Acme US", Region::Americas);
        let marker = MapMarker::from(&sub);
        assert_eq!(marker.coordinates[0].to_bits(), sub.longitude.to_bits());
        assert_eq!(marker.coordinates[1].to_bits(), sub.latitude.to_bits());
        assert_eq!(marker.color, "#3B82F6");
    }

    #[test]
    fn test_region_legend_order() {
        let legend = region_legend();
        let labels: Vec<_> = legend.iter().map(|e| e.region.as_str()).collect();
        assert_eq!(labels, ["Americas", "Europe", "Asia-Pacific"]);
        assert_eq!(legend[1].color, "#10B981");
    }

    #[test]
    fn test_map_markers_keep_order() {
        let markers = map_markers(&[
            subsidiary("B", Region::Europe),
            subsidiary("A", Region::AsiaPacific),
        ]);
        assert_eq!(markers[0].name, "B");
        assert_eq!(markers[1].color, "#F59E0B");
    }
}
