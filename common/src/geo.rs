use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Sentinel used to seed bounding box accumulation.
const BOUNDS_SENTINEL: f64 = 9999.0;

/// A geographic position in degrees.
///
/// On the wire a position is a `[lng, lat]` pair, matching the order used by
/// the mesh node database.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(pos: LngLat) -> Self {
        [pos.lng, pos.lat]
    }
}

// Hash the bit patterns so snapshots can be fingerprinted.
impl Hash for LngLat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lng.to_bits().hash(state);
        self.lat.to_bits().hash(state);
    }
}

/// A geographic box in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Smallest box enclosing every point.
    ///
    /// Returns `None` for an empty input instead of the sentinel box.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut min_lng = BOUNDS_SENTINEL;
        let mut min_lat = BOUNDS_SENTINEL;
        let mut max_lng = -BOUNDS_SENTINEL;
        let mut max_lat = -BOUNDS_SENTINEL;
        let mut seen = false;

        for LngLat { lng, lat } in points {
            seen = true;
            if lng < min_lng {
                min_lng = lng;
            }
            if lng > max_lng {
                max_lng = lng;
            }
            if lat < min_lat {
                min_lat = lat;
            }
            if lat > max_lat {
                max_lat = lat;
            }
        }

        seen.then_some(Self {
            north: max_lat,
            south: min_lat,
            east: max_lng,
            west: min_lng,
        })
    }

    pub fn center(&self) -> LngLat {
        LngLat {
            lng: (self.east + self.west) / 2.0,
            lat: (self.north + self.south) / 2.0,
        }
    }
}
