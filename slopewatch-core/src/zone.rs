//! Geographic risk zones
//!
//! A zone is an open rectangle in degrees with a baseline impact label.
//! Lookup walks the table in priority order and stops at the first zone
//! containing the point; points outside every zone classify as `Moderate`.
//!
//! Overlapping zones are allowed. When two overlapping zones carry
//! different labels the table order decides, and `ambiguous_overlaps`
//! reports the pair so configuration can reject it.

use crate::impact::ImpactLabel;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Identity of the built-in zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    Himalayas,
    NortheastIndia,
    WesternGhats,
    DeccanPlateau,
}

impl ZoneId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneId::Himalayas => "himalayas",
            ZoneId::NortheastIndia => "northeast_india",
            ZoneId::WesternGhats => "western_ghats",
            ZoneId::DeccanPlateau => "deccan_plateau",
        }
    }
}

/// Rectangular bounds in degrees, exclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl ZoneBounds {
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat > self.south && lat < self.north && lng > self.west && lng < self.east
    }

    /// True when the open rectangles share any interior point
    pub fn intersects(&self, other: &ZoneBounds) -> bool {
        self.south < other.north
            && other.south < self.north
            && self.west < other.east
            && other.west < self.east
    }
}

/// A named zone with its baseline impact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ZoneId>,
    pub name: Cow<'static, str>,
    pub bounds: ZoneBounds,
    pub base_risk: ImpactLabel,
    pub description: Cow<'static, str>,
}

/// Zones used by the classifier, in priority order
pub static BUILTIN_ZONES: [ZoneDefinition; 3] = [
    ZoneDefinition {
        id: Some(ZoneId::Himalayas),
        name: Cow::Borrowed("Himalayan region"),
        bounds: ZoneBounds {
            north: 35.0,
            south: 25.0,
            east: 90.0,
            west: 70.0,
        },
        base_risk: ImpactLabel::VeryHigh,
        description: Cow::Borrowed("High seismic activity and steep slopes"),
    },
    ZoneDefinition {
        id: Some(ZoneId::NortheastIndia),
        name: Cow::Borrowed("Northeast India"),
        bounds: ZoneBounds {
            north: 30.0,
            south: 22.0,
            east: 98.0,
            west: 88.0,
        },
        base_risk: ImpactLabel::VeryHigh,
        description: Cow::Borrowed("High rainfall and unstable geology"),
    },
    ZoneDefinition {
        id: Some(ZoneId::WesternGhats),
        name: Cow::Borrowed("Western Ghats"),
        bounds: ZoneBounds {
            north: 20.0,
            south: 8.0,
            east: 78.0,
            west: 72.0,
        },
        base_risk: ImpactLabel::High,
        description: Cow::Borrowed("Monsoon-prone mountainous region"),
    },
];

/// Reference-only zones; never consulted by `classify_zone`
pub static REFERENCE_ZONES: [ZoneDefinition; 1] = [ZoneDefinition {
    id: Some(ZoneId::DeccanPlateau),
    name: Cow::Borrowed("Deccan Plateau"),
    bounds: ZoneBounds {
        north: 22.0,
        south: 10.0,
        east: 88.0,
        west: 72.0,
    },
    base_risk: ImpactLabel::Low,
    description: Cow::Borrowed("Generally stable with isolated risk areas"),
}];

/// Pair of overlapping zones whose labels disagree
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneOverlap {
    /// Index of the zone that wins by priority
    pub winner: usize,
    pub shadowed: usize,
}

/// Priority-ordered zone list
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTable {
    zones: Cow<'static, [ZoneDefinition]>,
}

impl Default for ZoneTable {
    fn default() -> Self {
        ZoneTable::builtin()
    }
}

impl ZoneTable {
    pub fn builtin() -> Self {
        ZoneTable {
            zones: Cow::Borrowed(&BUILTIN_ZONES),
        }
    }

    /// Table from custom definitions, kept in the given order
    pub fn new(zones: Vec<ZoneDefinition>) -> Self {
        ZoneTable {
            zones: Cow::Owned(zones),
        }
    }

    pub fn zones(&self) -> &[ZoneDefinition] {
        &self.zones
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.zones, Cow::Borrowed(_))
    }

    /// First zone in priority order containing the point
    pub fn locate(&self, lat: f64, lng: f64) -> Option<&ZoneDefinition> {
        self.zones.iter().find(|z| z.bounds.contains(lat, lng))
    }

    pub fn classify(&self, lat: f64, lng: f64) -> ImpactLabel {
        self.locate(lat, lng)
            .map(|z| z.base_risk)
            .unwrap_or(ImpactLabel::Moderate)
    }

    /// Overlapping zone pairs whose outcome depends on table order
    pub fn ambiguous_overlaps(&self) -> Vec<ZoneOverlap> {
        let mut overlaps = Vec::new();
        for (i, a) in self.zones.iter().enumerate() {
            for (j, b) in self.zones.iter().enumerate().skip(i + 1) {
                if a.base_risk != b.base_risk && a.bounds.intersects(&b.bounds) {
                    overlaps.push(ZoneOverlap {
                        winner: i,
                        shadowed: j,
                    });
                }
            }
        }
        overlaps
    }
}

/// Classify a coordinate against the built-in zones
pub fn classify_zone(lat: f64, lng: f64) -> ImpactLabel {
    ZoneTable::builtin().classify(lat, lng)
}
