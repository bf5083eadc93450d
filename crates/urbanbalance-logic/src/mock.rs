//! Mock environmental data — plausible readings when no live source answers.
//!
//! Location heuristics set the baseline (urban vs rural, coastal water,
//! seasonal vegetation) and uniform jitter makes each refresh differ. The
//! generator is random by design; seed it for reproducible output.

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geography::{
    is_coastal, seasonal_vegetation_factor, urban_density, Location, URBAN_DENSITY_THRESHOLD,
};
use crate::reading::EnvironmentalReading;
use crate::sources::{DataSource, SourceError};

/// Generate a reading for a location.
///
/// `month0` is the zero-based calendar month for the vegetation term.
/// The result always lies within the documented reading bounds.
pub fn generate_reading(
    latitude: f64,
    longitude: f64,
    month0: u32,
    rng: &mut impl Rng,
) -> EnvironmentalReading {
    let urban = urban_density(latitude, longitude) > URBAN_DENSITY_THRESHOLD;

    let (air_quality_index, noise_level_db, carbon_footprint) = if urban {
        (
            rng.gen_range(40.0..80.0),
            rng.gen_range(60.0..80.0),
            rng.gen_range(250.0..400.0),
        )
    } else {
        (
            rng.gen_range(20.0..40.0),
            rng.gen_range(35.0..55.0),
            rng.gen_range(150.0..250.0),
        )
    };

    let green_cover_percent = vegetation_index(month0, rng);

    let water_quality_percent = if is_coastal(latitude, longitude) {
        rng.gen_range(40.0..70.0)
    } else {
        rng.gen_range(10.0..30.0)
    };

    EnvironmentalReading {
        air_quality_index,
        green_cover_percent,
        water_quality_percent,
        noise_level_db,
        carbon_footprint,
        temperature_c: rng.gen_range(25.0..40.0),
        humidity_percent: rng.gen_range(50.0..80.0),
        wind_speed_ms: rng.gen_range(2.0..7.0),
    }
    .within_documented_bounds()
}

/// Vegetation cover proxy (NDVI × 100) with seasonal variation.
fn vegetation_index(month0: u32, rng: &mut impl Rng) -> f32 {
    let base_ndvi: f64 = rng.gen_range(0.2..0.5);
    (base_ndvi * seasonal_vegetation_factor(month0) * 100.0).round() as f32
}

/// A [`DataSource`] backed by [`generate_reading`].
#[derive(Debug, Clone)]
pub struct MockDataSource<R = StdRng> {
    rng: R,
    /// Fixed month; `None` uses the current month.
    month0: Option<u32>,
}

impl MockDataSource<StdRng> {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible output for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for MockDataSource<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MockDataSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, month0: None }
    }

    /// Pin the seasonal term to a zero-based month.
    pub fn with_month0(mut self, month0: u32) -> Self {
        self.month0 = Some(month0 % 12);
        self
    }

    fn current_month0(&self) -> u32 {
        self.month0.unwrap_or_else(|| chrono::Utc::now().month0())
    }
}

impl<R: Rng> DataSource for MockDataSource<R> {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch(&mut self, location: &Location) -> Result<EnvironmentalReading, SourceError> {
        let month0 = self.current_month0();
        let reading =
            generate_reading(location.latitude, location.longitude, month0, &mut self.rng);
        log::debug!("mock reading for {}: {:?}", location.name, reading);
        Ok(reading)
    }
}
