//! Solver trait, ordering strategies and nesting configuration.

use std::cmp::Ordering;

use crate::geom::RotationModel;
use crate::placement::Part;
use crate::result::NestingResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Part-ordering heuristic driving one packing attempt.
///
/// Every strategy orders parts by a key, largest first. Ties keep their
/// input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Outer contour area.
    AreaDesc,
    /// Bounding-box width.
    WidthDesc,
    /// Bounding-box height.
    HeightDesc,
    /// Bounding-box perimeter.
    PerimeterDesc,
}

impl Strategy {
    /// All strategies, in evaluation order.
    pub const ALL: [Strategy; 4] = [
        Strategy::AreaDesc,
        Strategy::WidthDesc,
        Strategy::HeightDesc,
        Strategy::PerimeterDesc,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AreaDesc => "area-desc",
            Self::WidthDesc => "width-desc",
            Self::HeightDesc => "height-desc",
            Self::PerimeterDesc => "perimeter-desc",
        }
    }

    /// The value parts are ordered by.
    pub fn sort_key(&self, part: &Part) -> f64 {
        match self {
            Self::AreaDesc => part.area,
            Self::WidthDesc => part.bounding_box.width,
            Self::HeightDesc => part.bounding_box.height,
            Self::PerimeterDesc => part.bounding_box.perimeter(),
        }
    }

    /// Descending comparator on [`sort_key`](Self::sort_key).
    pub fn compare(&self, a: &Part, b: &Part) -> Ordering {
        self.sort_key(b).total_cmp(&self.sort_key(a))
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stock sheet format in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetFormat {
    pub width: f64,
    pub height: f64,
}

impl SheetFormat {
    /// Standard 1250 x 2500 sheet.
    pub const STANDARD: SheetFormat = SheetFormat {
        width: 1250.0,
        height: 2500.0,
    };

    /// Large 1500 x 3000 sheet used for thick stock.
    pub const LARGE: SheetFormat = SheetFormat {
        width: 1500.0,
        height: 3000.0,
    };

    /// Material thickness (mm) above which the large format is used.
    pub const THICK_STOCK_THRESHOLD: f64 = 3.1;

    /// Picks the sheet format for a material thickness in millimeters.
    pub fn for_thickness(thickness: f64) -> Self {
        if thickness > Self::THICK_STOCK_THRESHOLD {
            Self::LARGE
        } else {
            Self::STANDARD
        }
    }
}

/// Configuration for one nesting run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NestingConfig {
    /// Minimum gap between two placed parts (mm).
    pub min_spacing: f64,

    /// Minimum gap between a part and the sheet edge (mm).
    pub edge_margin: f64,

    /// Sheet width (mm).
    pub max_sheet_width: f64,

    /// Sheet height (mm).
    pub max_sheet_height: f64,

    /// Rotation angles to try, in degrees, in evaluation order.
    pub rotation_angles: Vec<f64>,

    /// Metal price per square meter of consumed sheet.
    pub metal_cost_per_m2: f64,

    /// How rotated footprints are computed.
    pub rotation_model: RotationModel,
}

impl Default for NestingConfig {
    fn default() -> Self {
        Self {
            min_spacing: 10.0,
            edge_margin: 10.0,
            max_sheet_width: SheetFormat::STANDARD.width,
            max_sheet_height: SheetFormat::STANDARD.height,
            rotation_angles: (0..8).map(|i| f64::from(i * 45)).collect(),
            metal_cost_per_m2: 100.0,
            rotation_model: RotationModel::default(),
        }
    }
}

impl NestingConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the sheet format chosen by material thickness.
    pub fn for_thickness(thickness: f64) -> Self {
        Self::default().with_sheet_format(SheetFormat::for_thickness(thickness))
    }

    /// Sets the minimum spacing between parts.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Sets the margin from the sheet edges.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.edge_margin = margin;
        self
    }

    /// Sets the sheet dimensions.
    pub fn with_sheet_size(mut self, width: f64, height: f64) -> Self {
        self.max_sheet_width = width;
        self.max_sheet_height = height;
        self
    }

    /// Sets the sheet dimensions from a format.
    pub fn with_sheet_format(self, format: SheetFormat) -> Self {
        self.with_sheet_size(format.width, format.height)
    }

    /// Sets the allowed rotation angles in degrees.
    pub fn with_rotations_deg(mut self, angles: Vec<f64>) -> Self {
        self.rotation_angles = angles;
        self
    }

    /// Sets the metal price per square meter.
    pub fn with_metal_cost(mut self, cost_per_m2: f64) -> Self {
        self.metal_cost_per_m2 = cost_per_m2;
        self
    }

    /// Sets the rotated-footprint model.
    pub fn with_rotation_model(mut self, model: RotationModel) -> Self {
        self.rotation_model = model;
        self
    }

    /// Current sheet format.
    pub fn sheet_format(&self) -> SheetFormat {
        SheetFormat {
            width: self.max_sheet_width,
            height: self.max_sheet_height,
        }
    }

    /// Checks that the configuration can drive a packing run.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("min_spacing", self.min_spacing),
            ("edge_margin", self.edge_margin),
            ("metal_cost_per_m2", self.metal_cost_per_m2),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let positive = [
            ("max_sheet_width", self.max_sheet_width),
            ("max_sheet_height", self.max_sheet_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        if self.rotation_angles.is_empty() {
            return Err(Error::InvalidConfig("at least one rotation angle is required".into()));
        }
        if let Some(angle) = self.rotation_angles.iter().find(|a| !a.is_finite()) {
            return Err(Error::InvalidConfig(format!("rotation angle {angle} is not finite")));
        }

        Ok(())
    }
}

/// Trait for sheet nesting solvers.
pub trait Solver {
    /// Nests `parts` and returns the ranked candidate layouts.
    fn solve(&self, parts: &[Part]) -> Result<Vec<NestingResult>>;

    /// The configuration this solver runs with.
    fn config(&self) -> &NestingConfig;
}
