//! Critical-value lookup for correlation significance
//!
//! Two-tailed critical values at p = .10, .05, .02 and .01, indexed by
//! method and number of valid sample pairs. These are for on-screen
//! annotation; nothing in molnet gates computation on them.
//!
//! An entry of `-1.0` means no threshold is defined at that sample count,
//! either because the sample is too small to reach that level or because the
//! sample count lies outside the table.

use serde::{Deserialize, Serialize};

use crate::CorrelationMethod;

/// Sentinel for "no defined threshold"
pub const UNDEFINED: f64 = -1.0;

/// Two-tailed significance levels, in table column order
pub const SIGNIFICANCE_LEVELS: [f64; 4] = [0.10, 0.05, 0.02, 0.01];

const U: f64 = UNDEFINED;

/// Pearson r, first row is N = 3 (df = 1)
const PEARSON_FIRST_N: usize = 3;
const PEARSON: [[f64; 4]; 30] = [
    [0.988, 0.997, 0.9995, 0.9999],
    [0.900, 0.950, 0.980, 0.990],
    [0.805, 0.878, 0.934, 0.959],
    [0.729, 0.811, 0.882, 0.917],
    [0.669, 0.754, 0.833, 0.875],
    [0.622, 0.707, 0.789, 0.834],
    [0.582, 0.666, 0.750, 0.798],
    [0.549, 0.632, 0.716, 0.765],
    [0.521, 0.602, 0.685, 0.735],
    [0.497, 0.576, 0.658, 0.708],
    [0.476, 0.553, 0.634, 0.684],
    [0.458, 0.532, 0.612, 0.661],
    [0.441, 0.514, 0.592, 0.641],
    [0.426, 0.497, 0.574, 0.623],
    [0.412, 0.482, 0.558, 0.606],
    [0.400, 0.468, 0.542, 0.590],
    [0.389, 0.456, 0.528, 0.575],
    [0.378, 0.444, 0.516, 0.561],
    [0.369, 0.433, 0.503, 0.549],
    [0.360, 0.423, 0.492, 0.537],
    [0.352, 0.413, 0.482, 0.526],
    [0.344, 0.404, 0.472, 0.515],
    [0.337, 0.396, 0.462, 0.505],
    [0.330, 0.388, 0.453, 0.496],
    [0.323, 0.381, 0.445, 0.487],
    [0.317, 0.374, 0.437, 0.479],
    [0.311, 0.367, 0.430, 0.471],
    [0.306, 0.361, 0.423, 0.463],
    [0.301, 0.355, 0.416, 0.456],
    [0.296, 0.349, 0.409, 0.449],
];

/// Spearman rho, first row is N = 5
const SPEARMAN_FIRST_N: usize = 5;
const SPEARMAN: [[f64; 4]; 26] = [
    [0.900, U, U, U],
    [0.829, 0.886, 0.943, U],
    [0.714, 0.786, 0.893, 0.929],
    [0.643, 0.738, 0.833, 0.881],
    [0.600, 0.700, 0.783, 0.833],
    [0.564, 0.648, 0.745, 0.794],
    [0.536, 0.618, 0.709, 0.755],
    [0.503, 0.587, 0.678, 0.727],
    [0.484, 0.560, 0.648, 0.703],
    [0.464, 0.538, 0.626, 0.679],
    [0.446, 0.521, 0.604, 0.654],
    [0.429, 0.503, 0.582, 0.635],
    [0.414, 0.485, 0.566, 0.615],
    [0.401, 0.472, 0.550, 0.600],
    [0.391, 0.460, 0.535, 0.584],
    [0.380, 0.447, 0.520, 0.570],
    [0.370, 0.435, 0.508, 0.556],
    [0.361, 0.425, 0.496, 0.544],
    [0.353, 0.415, 0.486, 0.532],
    [0.344, 0.406, 0.476, 0.521],
    [0.337, 0.398, 0.466, 0.511],
    [0.331, 0.390, 0.457, 0.501],
    [0.324, 0.382, 0.448, 0.491],
    [0.317, 0.375, 0.440, 0.483],
    [0.312, 0.368, 0.433, 0.475],
    [0.306, 0.362, 0.425, 0.467],
];

/// Kendall tau, first row is N = 4
const KENDALL_FIRST_N: usize = 4;
const KENDALL: [[f64; 4]; 17] = [
    [1.000, U, U, U],
    [0.800, 1.000, 1.000, U],
    [0.733, 0.867, 0.867, 1.000],
    [0.619, 0.714, 0.810, 0.905],
    [0.571, 0.643, 0.714, 0.786],
    [0.500, 0.556, 0.667, 0.722],
    [0.467, 0.511, 0.600, 0.644],
    [0.418, 0.491, 0.564, 0.600],
    [0.394, 0.455, 0.545, 0.576],
    [0.359, 0.436, 0.513, 0.564],
    [0.363, 0.407, 0.473, 0.516],
    [0.333, 0.390, 0.467, 0.505],
    [0.317, 0.383, 0.433, 0.483],
    [0.309, 0.368, 0.426, 0.471],
    [0.294, 0.346, 0.412, 0.451],
    [0.287, 0.333, 0.392, 0.439],
    [0.274, 0.326, 0.379, 0.421],
];

/// Critical values for one (method, sample count) lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct CriticalValues {
    pub method: CorrelationMethod,
    pub sample_count: u32,
    /// Thresholds at p = .10, .05, .02, .01; `-1.0` where undefined
    pub values: Vec<f64>,
}

impl CriticalValues {
    /// Whether any threshold is defined at this sample count
    pub fn is_defined(&self) -> bool {
        self.values.iter().any(|&v| v != UNDEFINED)
    }

    /// Threshold at one of [`SIGNIFICANCE_LEVELS`], or `None`
    pub fn at(&self, level: f64) -> Option<f64> {
        let column = SIGNIFICANCE_LEVELS.iter().position(|&l| l == level)?;
        let value = self.values[column];
        (value != UNDEFINED).then_some(value)
    }

    /// Smallest tabulated p level at which `|value|` is significant
    pub fn significance(&self, value: f64) -> Option<f64> {
        let magnitude = value.abs();
        SIGNIFICANCE_LEVELS
            .iter()
            .zip(&self.values)
            .filter(|&(_, &critical)| critical != UNDEFINED && magnitude >= critical)
            .map(|(&level, _)| level)
            .last()
    }

    /// Whether `|value|` reaches the threshold at `level`
    pub fn is_significant(&self, value: f64, level: f64) -> bool {
        self.at(level).is_some_and(|critical| value.abs() >= critical)
    }
}

/// Look up two-tailed critical values for `method` at `sample_count`
///
/// Returns all-`-1.0` values when the table has no row for that count.
pub fn critical_values(method: CorrelationMethod, sample_count: usize) -> CriticalValues {
    let (table, first_n): (&[[f64; 4]], usize) = match method {
        CorrelationMethod::Pearson => (&PEARSON, PEARSON_FIRST_N),
        CorrelationMethod::Spearman => (&SPEARMAN, SPEARMAN_FIRST_N),
        CorrelationMethod::Kendall => (&KENDALL, KENDALL_FIRST_N),
    };

    let row = sample_count
        .checked_sub(first_n)
        .and_then(|offset| table.get(offset))
        .copied()
        .unwrap_or([UNDEFINED; 4]);

    CriticalValues {
        method,
        sample_count: sample_count as u32,
        values: row.to_vec(),
    }
}
