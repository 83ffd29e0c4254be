//! Column layout of the medical examination table.
//!
//! The input file has a fixed set of required columns; any other header
//! column (for example `id` or `sex`) is carried through as an identifier.

use std::cmp::Ordering;
use std::fmt;

use arrow::datatypes::DataType;

pub const AGE: &str = "age";
pub const HEIGHT: &str = "height";
pub const WEIGHT: &str = "weight";
pub const AP_HI: &str = "ap_hi";
pub const AP_LO: &str = "ap_lo";
pub const CHOLESTEROL: &str = "cholesterol";
pub const GLUC: &str = "gluc";
pub const SMOKE: &str = "smoke";
pub const ALCO: &str = "alco";
pub const ACTIVE: &str = "active";
pub const CARDIO: &str = "cardio";
pub const OVERWEIGHT: &str = "overweight";

/// Columns the input file must provide, with the type they are read as
pub static REQUIRED_COLUMNS: [(&str, DataType); 11] = [
    (AGE, DataType::Int64),
    (HEIGHT, DataType::Int64),
    (WEIGHT, DataType::Float64),
    (AP_HI, DataType::Int64),
    (AP_LO, DataType::Int64),
    (CHOLESTEROL, DataType::Int64),
    (GLUC, DataType::Int64),
    (SMOKE, DataType::Int64),
    (ALCO, DataType::Int64),
    (ACTIVE, DataType::Int64),
    (CARDIO, DataType::Int64),
];

/// Required type of `column`, or `None` for identifier columns
#[must_use]
pub fn required_type(column: &str) -> Option<&'static DataType> {
    REQUIRED_COLUMNS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, data_type)| data_type)
}

/// Binary risk indicator plotted in the categorical chart
///
/// Ordering follows the column name, which is the order bars are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Cholesterol,
    Gluc,
    Smoke,
    Alco,
    Active,
    Overweight,
}

impl Indicator {
    /// Indicators in unpivot order
    pub const ALL: [Self; 6] = [
        Self::Cholesterol,
        Self::Gluc,
        Self::Smoke,
        Self::Alco,
        Self::Active,
        Self::Overweight,
    ];

    /// Column holding this indicator
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Cholesterol => CHOLESTEROL,
            Self::Gluc => GLUC,
            Self::Smoke => SMOKE,
            Self::Alco => ALCO,
            Self::Active => ACTIVE,
            Self::Overweight => OVERWEIGHT,
        }
    }
}

impl Ord for Indicator {
    fn cmp(&self, other: &Self) -> Ordering {
        self.column().cmp(other.column())
    }
}

impl PartialOrd for Indicator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
