//! Policy levers for the what-if simulator.
//!
//! Each lever is an adoption percentage in [0, 100]. The baseline values
//! describe the city as it is today; the simulator only responds to the
//! distance of a lever from its baseline.

use serde::{Deserialize, Serialize};

/// Baseline lever values, in percent.
pub mod baseline {
    pub const GREEN_COVER_TARGET: f32 = 35.0;
    pub const SOLAR_ADOPTION: f32 = 20.0;
    pub const PUBLIC_TRANSPORT_USAGE: f32 = 40.0;
    pub const WASTE_RECYCLING_RATE: f32 = 30.0;
    pub const WATER_CONSERVATION_RATE: f32 = 45.0;
}

/// One of the five policy levers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    GreenCoverTarget,
    SolarAdoption,
    PublicTransportUsage,
    WasteRecyclingRate,
    WaterConservationRate,
}

impl Lever {
    pub const ALL: [Lever; 5] = [
        Lever::GreenCoverTarget,
        Lever::SolarAdoption,
        Lever::PublicTransportUsage,
        Lever::WasteRecyclingRate,
        Lever::WaterConservationRate,
    ];

    pub fn baseline(self) -> f32 {
        match self {
            Lever::GreenCoverTarget => baseline::GREEN_COVER_TARGET,
            Lever::SolarAdoption => baseline::SOLAR_ADOPTION,
            Lever::PublicTransportUsage => baseline::PUBLIC_TRANSPORT_USAGE,
            Lever::WasteRecyclingRate => baseline::WASTE_RECYCLING_RATE,
            Lever::WaterConservationRate => baseline::WATER_CONSERVATION_RATE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lever::GreenCoverTarget => "Green Cover Target",
            Lever::SolarAdoption => "Solar Adoption",
            Lever::PublicTransportUsage => "Public Transport Usage",
            Lever::WasteRecyclingRate => "Waste Recycling Rate",
            Lever::WaterConservationRate => "Water Conservation Rate",
        }
    }
}

/// The five lever positions driving a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationLevers {
    pub green_cover_target: f32,
    pub solar_adoption: f32,
    pub public_transport_usage: f32,
    pub waste_recycling_rate: f32,
    pub water_conservation_rate: f32,
}

impl Default for SimulationLevers {
    fn default() -> Self {
        Self::baseline()
    }
}

impl SimulationLevers {
    /// Levers at today's values. Produces zero deltas.
    pub fn baseline() -> Self {
        Self {
            green_cover_target: baseline::GREEN_COVER_TARGET,
            solar_adoption: baseline::SOLAR_ADOPTION,
            public_transport_usage: baseline::PUBLIC_TRANSPORT_USAGE,
            waste_recycling_rate: baseline::WASTE_RECYCLING_RATE,
            water_conservation_rate: baseline::WATER_CONSERVATION_RATE,
        }
    }

    /// The "after suggested actions" plan: every lever pushed to an
    /// ambitious but reachable level.
    pub fn suggested_plan() -> Self {
        Self {
            green_cover_target: 60.0,
            solar_adoption: 50.0,
            public_transport_usage: 65.0,
            waste_recycling_rate: 60.0,
            water_conservation_rate: 70.0,
        }
    }

    /// Every lever set to the same value.
    pub fn uniform(value: f32) -> Self {
        Self {
            green_cover_target: value,
            solar_adoption: value,
            public_transport_usage: value,
            waste_recycling_rate: value,
            water_conservation_rate: value,
        }
    }

    pub fn get(&self, lever: Lever) -> f32 {
        match lever {
            Lever::GreenCoverTarget => self.green_cover_target,
            Lever::SolarAdoption => self.solar_adoption,
            Lever::PublicTransportUsage => self.public_transport_usage,
            Lever::WasteRecyclingRate => self.waste_recycling_rate,
            Lever::WaterConservationRate => self.water_conservation_rate,
        }
    }

    pub fn set(&mut self, lever: Lever, value: f32) {
        match lever {
            Lever::GreenCoverTarget => self.green_cover_target = value,
            Lever::SolarAdoption => self.solar_adoption = value,
            Lever::PublicTransportUsage => self.public_transport_usage = value,
            Lever::WasteRecyclingRate => self.waste_recycling_rate = value,
            Lever::WaterConservationRate => self.water_conservation_rate = value,
        }
    }

    /// Lever value clamped to [0, 100]; non-finite values fall back to the
    /// lever's baseline.
    pub fn effective(&self, lever: Lever) -> f32 {
        let v = self.get(lever);
        if v.is_finite() {
            v.clamp(0.0, 100.0)
        } else {
            lever.baseline()
        }
    }

    /// Signed distance of a lever from its baseline, in percentage points.
    pub fn offset(&self, lever: Lever) -> f32 {
        self.effective(lever) - lever.baseline()
    }

    pub fn is_baseline(&self) -> bool {
        Lever::ALL.iter().all(|&l| self.offset(l) == 0.0)
    }
}

/// A recommended action and the lever it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedAction {
    pub title: &'static str,
    pub description: &'static str,
    pub lever: Lever,
}

/// Actions recommended alongside [`SimulationLevers::suggested_plan`].
pub fn suggested_actions() -> &'static [SuggestedAction] {
    &[
        SuggestedAction {
            title: "Plant More Trees",
            description: "Increase green cover to cool streets and filter air",
            lever: Lever::GreenCoverTarget,
        },
        SuggestedAction {
            title: "Adopt Rooftop Solar",
            description: "Reduce carbon footprint by 20-30%",
            lever: Lever::SolarAdoption,
        },
        SuggestedAction {
            title: "Improve Public Transport",
            description: "Reduce air pollution significantly",
            lever: Lever::PublicTransportUsage,
        },
        SuggestedAction {
            title: "Expand Recycling",
            description: "Cut landfill emissions and protect waterways",
            lever: Lever::WasteRecyclingRate,
        },
        SuggestedAction {
            title: "Conserve Water",
            description: "Keep rivers and reservoirs cleaner",
            lever: Lever::WaterConservationRate,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_baseline() {
        let l = SimulationLevers::default();
        assert_eq!(l.green_cover_target, 35.0);
        assert_eq!(l.solar_adoption, 20.0);
        assert_eq!(l.public_transport_usage, 40.0);
        assert_eq!(l.waste_recycling_rate, 30.0);
        assert_eq!(l.water_conservation_rate, 45.0);
        assert!(l.is_baseline());
    }

    #[test]
    fn test_effective_clamps_and_rejects_nan() {
        let mut l = SimulationLevers::baseline();
        l.set(Lever::SolarAdoption, 180.0);
        l.set(Lever::PublicTransportUsage, -20.0);
        l.set(Lever::WasteRecyclingRate, f32::NAN);
        assert_eq!(l.effective(Lever::SolarAdoption), 100.0);
        assert_eq!(l.effective(Lever::PublicTransportUsage), 0.0);
        assert_eq!(l.effective(Lever::WasteRecyclingRate), 30.0);
        assert_eq!(l.offset(Lever::WasteRecyclingRate), 0.0);
    }

    #[test]
    fn test_offset_from_baseline() {
        let mut l = SimulationLevers::baseline();
        l.set(Lever::GreenCoverTarget, 80.0);
        assert_eq!(l.offset(Lever::GreenCoverTarget), 45.0);
        assert!(!l.is_baseline());
    }

    #[test]
    fn test_suggested_plan_raises_every_lever() {
        let plan = SimulationLevers::suggested_plan();
        for lever in Lever::ALL {
            assert!(plan.offset(lever) > 0.0, "{:?} should rise", lever);
        }
    }

    #[test]
    fn test_every_lever_has_a_suggested_action() {
        for lever in Lever::ALL {
            assert!(suggested_actions().iter().any(|a| a.lever == lever));
        }
    }
}
