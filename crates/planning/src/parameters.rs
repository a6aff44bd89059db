//! Projection parameters and service-level presets.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockcast_core::{DomainError, DomainResult};

/// How daily consumption is drawn when demand has a non-zero spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DemandDraw {
    /// Normal draw with zero spread: every day consumes exactly the daily mean.
    #[default]
    Deterministic,
    /// Normal draw with spread = daily std. A fixed seed reproduces the run.
    Stochastic { seed: Option<u64> },
}

/// Standard service-level presets and their standard-normal quantiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceLevel {
    P90,
    P95,
    P98,
    P99,
}

impl ServiceLevel {
    pub const ALL: [ServiceLevel; 4] = [Self::P90, Self::P95, Self::P98, Self::P99];

    pub fn z(&self) -> f64 {
        match self {
            ServiceLevel::P90 => 1.28,
            ServiceLevel::P95 => 1.65,
            ServiceLevel::P98 => 2.05,
            ServiceLevel::P99 => 2.33,
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            ServiceLevel::P90 => 90,
            ServiceLevel::P95 => 95,
            ServiceLevel::P98 => 98,
            ServiceLevel::P99 => 99,
        }
    }
}

impl core::fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl FromStr for ServiceLevel {
    type Err = DomainError;

    /// Accepts `95` or `95%`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches('%');
        Self::ALL
            .into_iter()
            .find(|level| digits == level.percent().to_string())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown service level {s:?} (expected one of 90%, 95%, 98%, 99%)"
                ))
            })
    }
}

/// Validated knobs of a projection run.
///
/// Invalid values are rejected here, once; the simulator itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    simulation_days: u32,
    lead_time_days: u32,
    service_level_z: f64,
    demand_draw: DemandDraw,
}

impl ProjectionParameters {
    pub fn new(simulation_days: u32, lead_time_days: u32, service_level_z: f64) -> DomainResult<Self> {
        if simulation_days == 0 {
            return Err(DomainError::validation("simulation_days must be >= 1"));
        }
        if lead_time_days == 0 {
            return Err(DomainError::validation("lead_time_days must be >= 1"));
        }
        if !(service_level_z.is_finite() && service_level_z > 0.0) {
            return Err(DomainError::validation(
                "service_level_z must be a finite positive number",
            ));
        }
        Ok(Self {
            simulation_days,
            lead_time_days,
            service_level_z,
            demand_draw: DemandDraw::Deterministic,
        })
    }

    pub fn with_service_level(
        simulation_days: u32,
        lead_time_days: u32,
        level: ServiceLevel,
    ) -> DomainResult<Self> {
        Self::new(simulation_days, lead_time_days, level.z())
    }

    pub fn with_demand_draw(mut self, demand_draw: DemandDraw) -> Self {
        self.demand_draw = demand_draw;
        self
    }

    pub fn simulation_days(&self) -> u32 {
        self.simulation_days
    }

    pub fn lead_time_days(&self) -> u32 {
        self.lead_time_days
    }

    pub fn service_level_z(&self) -> f64 {
        self.service_level_z
    }

    pub fn demand_draw(&self) -> DemandDraw {
        self.demand_draw
    }
}
