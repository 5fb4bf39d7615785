//! Central Tokyo landmarks used across the integration tests.

#![allow(dead_code)]

use route_optimizer::model::{Coordinate, OptimizeRequest, Stop};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: &'static str,
    pub label: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(id: &'static str, label: &'static str, lat: f64, lng: f64) -> Self {
        Self { id, label, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn stop(&self) -> Stop {
        Stop::new(self.id, self.lat, self.lng).with_label(self.label)
    }
}

pub const TOKYO_STATION: Location = Location::new("tokyo-station", "Tokyo Station", 35.681236, 139.767125);

pub const LANDMARKS: &[Location] = &[
    Location::new("tokyo-tower", "Tokyo Tower", 35.65858, 139.745433),
    Location::new("sensoji", "Sensoji Temple", 35.714765, 139.796655),
    Location::new("skytree", "Tokyo Skytree", 35.710063, 139.8107),
];

pub const MORE_LANDMARKS: &[Location] = &[
    Location::new("meiji-jingu", "Meiji Jingu", 35.676398, 139.699326),
    Location::new("shibuya-crossing", "Shibuya Crossing", 35.659482, 139.700559),
    Location::new("ueno-park", "Ueno Park", 35.714739, 139.773982),
    Location::new("imperial-palace", "Imperial Palace", 35.685175, 139.752799),
    Location::new("roppongi-hills", "Roppongi Hills", 35.660464, 139.729249),
];

/// Request from Tokyo Station to the three classic landmarks.
pub fn landmark_request() -> OptimizeRequest {
    OptimizeRequest::new(
        TOKYO_STATION.coordinate(),
        LANDMARKS.iter().map(Location::stop).collect(),
    )
}

/// Request over every fixture landmark.
pub fn full_request() -> OptimizeRequest {
    OptimizeRequest::new(
        TOKYO_STATION.coordinate(),
        LANDMARKS
            .iter()
            .chain(MORE_LANDMARKS)
            .map(Location::stop)
            .collect(),
    )
}
