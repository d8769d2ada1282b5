//! Nesting result representation.

use std::sync::Arc;

use crate::placement::{Part, PlacedPart};
use crate::solver::Strategy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Square millimeters per square meter.
pub const MM2_PER_M2: f64 = 1_000_000.0;

/// One candidate sheet layout, produced by one ordering strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingResult {
    /// Strategy that produced this layout.
    pub strategy: Strategy,

    /// Consumed sheet width (mm), clamped to the configured maximum.
    pub sheet_width: f64,

    /// Consumed sheet height (mm), clamped to the configured maximum.
    pub sheet_height: f64,

    /// Parts placed on the sheet.
    pub placed_parts: Vec<PlacedPart>,

    /// Parts that could not be placed.
    pub unplaced_parts: Vec<Arc<Part>>,

    /// `used_area / sheet_area`, in percent.
    pub efficiency: f64,

    /// Consumed sheet area (m²).
    pub sheet_area: f64,

    /// Sum of placed part areas (m²).
    pub used_area: f64,

    /// `sheet_area * metal_cost_per_m2`.
    pub metal_cost: f64,

    /// One pierce per placed outline plus one per hole.
    pub pierce_points: usize,
}

impl NestingResult {
    /// Creates an empty layout for a strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            sheet_width: 0.0,
            sheet_height: 0.0,
            placed_parts: Vec::new(),
            unplaced_parts: Vec::new(),
            efficiency: 0.0,
            sheet_area: 0.0,
            used_area: 0.0,
            metal_cost: 0.0,
            pierce_points: 0,
        }
    }

    /// Returns true if every part was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced_parts.is_empty()
    }

    /// Number of placed parts.
    pub fn placed_count(&self) -> usize {
        self.placed_parts.len()
    }

    /// Number of unplaced parts.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced_parts.len()
    }

    /// Total number of parts that went into this layout.
    pub fn total_parts(&self) -> usize {
        self.placed_count() + self.unplaced_count()
    }

    /// Returns efficiency as a percentage string.
    pub fn efficiency_percent(&self) -> String {
        format!("{:.1}%", self.efficiency)
    }
}

/// Summary statistics for a nesting result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingSummary {
    /// Strategy name.
    pub strategy: String,
    /// Parts placed.
    pub placed: usize,
    /// Parts left over.
    pub unplaced: usize,
    /// Efficiency in percent.
    pub efficiency: f64,
    /// Consumed sheet area (m²).
    pub sheet_area: f64,
    /// Metal cost.
    pub metal_cost: f64,
    /// Pierce count.
    pub pierce_points: usize,
}

impl From<&NestingResult> for NestingSummary {
    fn from(result: &NestingResult) -> Self {
        Self {
            strategy: result.strategy.name().to_string(),
            placed: result.placed_count(),
            unplaced: result.unplaced_count(),
            efficiency: result.efficiency,
            sheet_area: result.sheet_area,
            metal_cost: result.metal_cost,
            pierce_points: result.pierce_points,
        }
    }
}
