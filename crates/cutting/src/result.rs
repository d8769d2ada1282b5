//! Per-layout cutting summary.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use lasernest_core::{NestingResult, Strategy};

use crate::length::layout_cut_length_m;

/// The quantities an order is priced from, for one layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CuttingSummary {
    /// Strategy that produced the layout.
    pub strategy: Strategy,
    /// Total cut length of the placed parts (m).
    pub cut_length_m: f64,
    /// Pierces over the placed parts.
    pub pierce_points: usize,
    /// Consumed sheet area (m²).
    pub sheet_area_m2: f64,
    /// Metal cost of the consumed sheet.
    pub metal_cost: f64,
    /// Material efficiency in percent.
    pub efficiency: f64,
}

impl CuttingSummary {
    /// Summarizes one layout.
    pub fn from_result(result: &NestingResult) -> Self {
        Self {
            strategy: result.strategy,
            cut_length_m: layout_cut_length_m(result),
            pierce_points: result.pierce_points,
            sheet_area_m2: result.sheet_area,
            metal_cost: result.metal_cost,
            efficiency: result.efficiency,
        }
    }

    /// Summarizes ranked layouts, keeping their order.
    pub fn for_results(results: &[NestingResult]) -> Vec<Self> {
        results.iter().map(Self::from_result).collect()
    }
}

impl From<&NestingResult> for CuttingSummary {
    fn from(result: &NestingResult) -> Self {
        Self::from_result(result)
    }
}
