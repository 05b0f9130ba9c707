//! Subsidiaries and their placement on the world map.

pub mod types;

pub use types::{MapMarker, Region, RegionLegendEntry, Subsidiary, map_markers, region_legend};
