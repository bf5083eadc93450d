//! Location heuristics — urban density, coastal proximity, seasonal
//! vegetation, and the air-pollution zone drawn around a location.

use serde::{Deserialize, Serialize};

/// A named point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// The dashboard's starting location.
    pub fn chittagong() -> Self {
        Self::new("Chittagong, Bangladesh", 22.3569, 91.7832)
    }
}

/// A reference city used by the density heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceCity {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Urban density score (0–100).
    pub density: f64,
}

pub const MAJOR_CITIES: [ReferenceCity; 5] = [
    ReferenceCity {
        name: "Chittagong",
        latitude: 22.3569,
        longitude: 91.7832,
        density: 75.0,
    },
    ReferenceCity {
        name: "Dhaka",
        latitude: 23.8103,
        longitude: 90.4125,
        density: 95.0,
    },
    ReferenceCity {
        name: "Mumbai",
        latitude: 19.076,
        longitude: 72.8777,
        density: 85.0,
    },
    ReferenceCity {
        name: "Delhi",
        latitude: 28.6139,
        longitude: 77.209,
        density: 90.0,
    },
    ReferenceCity {
        name: "Bangalore",
        latitude: 12.9716,
        longitude: 77.5946,
        density: 75.0,
    },
];

/// Coastal cities (latitude, longitude) for the water-body check.
pub const COASTAL_CITIES: [(f64, f64); 3] = [
    (22.3569, 91.7832), // Chittagong
    (19.076, 72.8777),  // Mumbai
    (13.0827, 80.2707), // Chennai
];

/// Degrees of latitude/longitude within which a point counts as coastal.
const COASTAL_RADIUS_DEG: f64 = 0.5;

/// Density decays by this factor per degree of distance, floored at `MIN_DISTANCE_FACTOR`.
const DENSITY_FALLOFF_PER_DEG: f64 = 50.0;
const MIN_DISTANCE_FACTOR: f64 = 0.3;

/// Density above which a location is treated as urban.
pub const URBAN_DENSITY_THRESHOLD: u32 = 60;

/// Estimated urban density (0–100) from the nearest major city.
///
/// Distance is planar in degrees; past ~0.014° the estimate has already
/// fallen to the floor of 30% of the reference city's density.
pub fn urban_density(latitude: f64, longitude: f64) -> u32 {
    let nearest = MAJOR_CITIES
        .iter()
        .map(|c| {
            let d = ((latitude - c.latitude).powi(2) + (longitude - c.longitude).powi(2)).sqrt();
            (c, d)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest {
        Some((city, distance)) => {
            let factor = (1.0 - distance * DENSITY_FALLOFF_PER_DEG).max(MIN_DISTANCE_FACTOR);
            (city.density * factor).round() as u32
        }
        None => 45,
    }
}

pub fn is_urban(latitude: f64, longitude: f64) -> bool {
    urban_density(latitude, longitude) > URBAN_DENSITY_THRESHOLD
}

pub fn is_coastal(latitude: f64, longitude: f64) -> bool {
    COASTAL_CITIES.iter().any(|&(lat, lon)| {
        (latitude - lat).abs() < COASTAL_RADIUS_DEG && (longitude - lon).abs() < COASTAL_RADIUS_DEG
    })
}

/// Seasonal multiplier for vegetation, 0.6–1.0 over the year.
///
/// `month0` is zero-based (0 = January).
pub fn seasonal_vegetation_factor(month0: u32) -> f64 {
    ((month0 % 12) as f64 / 12.0 * std::f64::consts::TAU).sin() * 0.2 + 0.8
}

/// Severity of an air-pollution zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneLevel {
    Moderate,
    High,
}

/// A square air-pollution overlay centred on a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionZone {
    /// Corners as (latitude, longitude), clockwise from north-west.
    pub corners: [(f64, f64); 4],
    pub level: ZoneLevel,
    pub aqi: f32,
}

/// AQI above which a zone is drawn.
pub const ZONE_AQI_THRESHOLD: f32 = 60.0;
/// AQI above which the zone is rated high.
pub const ZONE_HIGH_AQI: f32 = 80.0;
/// Half-width of the zone square in degrees.
const ZONE_HALF_WIDTH_DEG: f64 = 0.01;

/// The pollution zone for a location, if its air is bad enough to draw one.
pub fn pollution_zone(location: &Location, aqi: f32) -> Option<PollutionZone> {
    if aqi.is_nan() || aqi <= ZONE_AQI_THRESHOLD {
        return None;
    }
    let (lat, lon) = (location.latitude, location.longitude);
    let h = ZONE_HALF_WIDTH_DEG;
    Some(PollutionZone {
        corners: [
            (lat + h, lon - h),
            (lat + h, lon + h),
            (lat - h, lon + h),
            (lat - h, lon - h),
        ],
        level: if aqi > ZONE_HIGH_AQI {
            ZoneLevel::High
        } else {
            ZoneLevel::Moderate
        },
        aqi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_at_city_centre() {
        assert_eq!(urban_density(23.8103, 90.4125), 95);
        assert_eq!(urban_density(22.3569, 91.7832), 75);
    }

    #[test]
    fn test_density_floors_far_from_cities() {
        // London: nearest reference city is far away, so 30% of its density.
        let d = urban_density(51.5074, -0.1278);
        assert!(d <= 29, "got {}", d);
        assert!(!is_urban(51.5074, -0.1278));
    }

    #[test]
    fn test_density_decays_with_distance() {
        let centre = urban_density(19.076, 72.8777);
        let near = urban_density(19.081, 72.8777);
        assert!(near < centre);
        assert!(is_urban(19.076, 72.8777));
    }

    #[test]
    fn test_coastal_check() {
        assert!(is_coastal(13.1, 80.3));
        assert!(is_coastal(22.0, 91.5));
        assert!(!is_coastal(28.6139, 77.209));
    }

    #[test]
    fn test_seasonal_factor_range() {
        for m in 0..12 {
            let f = seasonal_vegetation_factor(m);
            assert!(f > 0.6 - 1e-9 && f < 1.0 + 1e-9, "month {} -> {}", m, f);
        }
        assert!((seasonal_vegetation_factor(0) - 0.8).abs() < 1e-9);
        assert!((seasonal_vegetation_factor(3) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_zone_for_clean_air() {
        assert!(pollution_zone(&Location::chittagong(), 60.0).is_none());
    }

    #[test]
    fn test_no_zone_for_missing_aqi() {
        assert!(pollution_zone(&Location::chittagong(), f32::NAN).is_none());
    }

    #[test]
    fn test_zone_levels() {
        let loc = Location::chittagong();
        let moderate = pollution_zone(&loc, 70.0).unwrap();
        assert_eq!(moderate.level, ZoneLevel::Moderate);
        let high = pollution_zone(&loc, 95.0).unwrap();
        assert_eq!(high.level, ZoneLevel::High);
        assert!((high.corners[0].0 - (loc.latitude + 0.01)).abs() < 1e-9);
        assert!((high.corners[2].1 - (loc.longitude + 0.01)).abs() < 1e-9);
    }
}
