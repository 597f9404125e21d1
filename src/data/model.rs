use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – typed failures of the data layer
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("month must be in 1..=12, but is {0}")]
    InvalidMonth(i64),

    #[error("missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("null value in '{column}' at row {row}")]
    NullValue { column: &'static str, row: usize },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Observation – one row of the source table
// ---------------------------------------------------------------------------

/// A single monthly sea-ice extent measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub year: i32,
    /// Calendar month, always in `1..=12`.
    pub month: u8,
    /// Extent in millions of km². Sentinels such as `-9999` are kept as-is.
    pub extent: f64,
}

impl Observation {
    /// Build an observation, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: i64, extent: f64) -> Result<Self, DataError> {
        if !(1..=12).contains(&month) {
            return Err(DataError::InvalidMonth(month));
        }
        Ok(Self {
            year,
            month: month as u8,
            extent,
        })
    }

    /// Same record with a different extent.
    pub fn with_extent(self, extent: f64) -> Self {
        Self { extent, ..self }
    }
}

// ---------------------------------------------------------------------------
// IceDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An ordered sequence of observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IceDataset {
    pub observations: Vec<Observation>,
}

impl IceDataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        IceDataset { observations }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn years(&self) -> Vec<f64> {
        self.iter().map(|o| o.year as f64).collect()
    }

    pub fn extents(&self) -> Vec<f64> {
        self.iter().map(|o| o.extent).collect()
    }

    /// First and last year present, if any.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.iter().map(|o| o.year).min()?;
        let max = self.iter().map(|o| o.year).max()?;
        Some((min, max))
    }
}

impl FromIterator<Observation> for IceDataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        IceDataset::new(iter.into_iter().collect())
    }
}
