//! Dashboard session state — location, current reading, and simulator levers.
//!
//! The current health score is never stored: it is recomputed from the
//! reading on every access, so it cannot drift from its inputs.
//!
//! Refreshes are fire-and-forget. Whichever reading completes last is the
//! one kept; there is no request ordering, so a slow stale response can
//! overwrite a newer one.

use serde::{Deserialize, Serialize};

use crate::geography::{pollution_zone, Location, PollutionZone};
use crate::health::{compute_health_score, HealthScore};
use crate::levers::{Lever, SimulationLevers};
use crate::reading::EnvironmentalReading;
use crate::simulator::{project, SimulationOutcome};
use crate::sources::{DataSource, FallbackSource, SourceError};
use crate::status::{reading_status, ReadingStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    location: Location,
    reading: EnvironmentalReading,
    levers: SimulationLevers,
    /// Banner text after a failed upstream fetch.
    advisory: Option<String>,
    /// Incremented each time a reading is accepted.
    revision: u64,
}

impl DashboardState {
    pub fn new(location: Location, reading: EnvironmentalReading) -> Self {
        Self {
            location,
            reading: reading.with_missing_as_zero(),
            levers: SimulationLevers::baseline(),
            advisory: None,
            revision: 0,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn reading(&self) -> &EnvironmentalReading {
        &self.reading
    }

    pub fn levers(&self) -> &SimulationLevers {
        &self.levers
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn current_score(&self) -> HealthScore {
        compute_health_score(&self.reading)
    }

    pub fn status(&self) -> ReadingStatus {
        reading_status(&self.reading)
    }

    pub fn pollution_zone(&self) -> Option<PollutionZone> {
        pollution_zone(&self.location, self.reading.air_quality_index)
    }

    /// Simulated reading, deltas and both scores under the current levers.
    pub fn projection(&self) -> SimulationOutcome {
        project(&self.reading, &self.levers)
    }

    pub fn projected_score(&self) -> HealthScore {
        self.projection().projected_score
    }

    pub fn set_lever(&mut self, lever: Lever, value: f32) {
        self.levers.set(lever, value);
    }

    pub fn set_levers(&mut self, levers: SimulationLevers) {
        self.levers = levers;
    }

    /// Restore the five default lever values. The reading is left as is.
    pub fn reset_levers(&mut self) {
        self.levers = SimulationLevers::baseline();
        log::info!("levers reset to baseline");
    }

    /// Overwrite the reading with its simulation under the current levers.
    ///
    /// One-way: the previous reading is gone.
    pub fn apply_simulation(&mut self) -> SimulationOutcome {
        let outcome = self.projection();
        self.reading = outcome.reading;
        self.revision += 1;
        log::info!(
            "applied simulation at {}: score {} -> {}",
            self.location.name,
            outcome.current_score.display(),
            outcome.projected_score.display()
        );
        outcome
    }

    /// Move to a new location. The reading stays until a refresh lands.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Accept a completed reading. The last one accepted wins.
    pub fn accept_reading(&mut self, reading: EnvironmentalReading) {
        self.reading = reading.with_missing_as_zero();
        self.revision += 1;
        log::info!(
            "reading #{} for {}: score {}",
            self.revision,
            self.location.name,
            self.current_score().display()
        );
    }

    /// Fetch from a single source. On failure the reading and advisory are
    /// left untouched and the error is returned.
    pub fn refresh(&mut self, source: &mut dyn DataSource) -> Result<(), SourceError> {
        let reading = source.fetch(&self.location)?;
        self.advisory = None;
        self.accept_reading(reading);
        Ok(())
    }

    /// Fetch through a fallback chain, raising the advisory banner when the
    /// primary failed. Recomputation is never blocked by the advisory.
    pub fn refresh_with_fallback<P: DataSource, F: DataSource>(
        &mut self,
        sources: &mut FallbackSource<P, F>,
    ) -> Result<(), SourceError> {
        let fetched = sources.fetch_reading(&self.location)?;
        self.advisory = fetched.advisory;
        self.accept_reading(fetched.reading);
        Ok(())
    }

    pub fn dismiss_advisory(&mut self) {
        self.advisory = None;
    }
}
