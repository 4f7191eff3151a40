//! Track definition input: the sector list plus opaque metadata.
//!
//! The JSON shape matches what the track API serves:
//!
//! ```json
//! {"id": 1, "name": "Oval", "sectors": [
//!     {"sector_order": 0, "length": 100.0, "curve_radius": null, "curve_direction": null},
//!     {"sector_order": 1, "length": 62.83, "curve_radius": 20.0, "curve_direction": "right"}
//! ]}
//! ```

use crate::types::Pose;
use serde::{Deserialize, Serialize};

/// Turn direction of a curved sector, in the math frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Heading increases along the curve ("right" on a y-down canvas).
    #[default]
    Cw,
    /// Heading decreases along the curve ("left").
    Ccw,
}

/// One sector as described by the track author.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorDescriptor {
    /// Explicit ordering key; sectors without one keep their list position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_order: Option<i64>,
    pub length: f64,
    /// `None` means a straight sector.
    #[serde(default)]
    pub curve_radius: Option<f64>,
    /// `"left"` or `"right"`; ignored for straights.
    #[serde(default)]
    pub curve_direction: Option<String>,
}

impl SectorDescriptor {
    pub fn straight(length: f64) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    pub fn left(length: f64, radius: f64) -> Self {
        Self::curve(length, radius, "left")
    }

    pub fn right(length: f64, radius: f64) -> Self {
        Self::curve(length, radius, "right")
    }

    fn curve(length: f64, radius: f64, direction: &str) -> Self {
        Self {
            sector_order: None,
            length,
            curve_radius: Some(radius),
            curve_direction: Some(direction.to_owned()),
        }
    }

    /// `"left"` turns counter-clockwise; anything else, including no value,
    /// turns clockwise.
    pub fn direction(&self) -> Direction {
        match self.curve_direction.as_deref() {
            Some("left") => Direction::Ccw,
            _ => Direction::Cw,
        }
    }
}

/// A complete track definition: metadata, start pose and sectors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackDefinition {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "start_position")]
    pub start_pose: Pose,
    pub sectors: Vec<SectorDescriptor>,
}

impl TrackDefinition {
    pub fn new(name: impl Into<String>, start_pose: Pose, sectors: Vec<SectorDescriptor>) -> Self {
        Self {
            id: None,
            name: name.into(),
            start_pose,
            sectors,
        }
    }

    /// Sectors in driving order: by `sector_order` where given, list position
    /// otherwise (stable).
    pub fn ordered_sectors(&self) -> Vec<SectorDescriptor> {
        let mut sectors = self.sectors.clone();
        if sectors.iter().any(|s| s.sector_order.is_some()) {
            sectors.sort_by_key(|s| s.sector_order.unwrap_or(i64::MAX));
        }
        sectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_mapping() {
        assert_eq!(SectorDescriptor::left(10.0, 5.0).direction(), Direction::Ccw);
        assert_eq!(SectorDescriptor::right(10.0, 5.0).direction(), Direction::Cw);
        assert_eq!(SectorDescriptor::straight(10.0).direction(), Direction::Cw);
        let odd = SectorDescriptor {
            curve_direction: Some("LEFT".into()),
            ..SectorDescriptor::straight(1.0)
        };
        assert_eq!(odd.direction(), Direction::Cw);
    }

    #[test]
    fn parses_api_shape_and_orders_sectors() {
        let json = r#"{
            "id": 7,
            "name": "Loop",
            "sectors": [
                {"sector_order": 1, "length": 20.0, "curve_radius": 10.0, "curve_direction": "left"},
                {"sector_order": 0, "length": 100.0, "curve_radius": null, "curve_direction": null}
            ]
        }"#;
        let def: TrackDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, Some(7));
        assert_eq!(def.name, "Loop");
        assert_eq!(def.start_pose, Pose::default());

        let ordered = def.ordered_sectors();
        assert_eq!(ordered[0].length, 100.0);
        assert_eq!(ordered[0].curve_radius, None);
        assert_eq!(ordered[1].direction(), Direction::Ccw);
    }

    #[test]
    fn unordered_sectors_keep_list_position() {
        let def = TrackDefinition::new(
            "plain",
            Pose::default(),
            vec![SectorDescriptor::straight(3.0), SectorDescriptor::straight(1.0)],
        );
        let lengths: Vec<f64> = def.ordered_sectors().iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![3.0, 1.0]);
    }
}
