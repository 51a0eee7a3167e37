use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A precondition violation in the caller's input (non-positive length,
    /// zero quantity). Raised before any placement work begins.
    InvalidInput(String),
    /// An invariant that should be structurally impossible was violated,
    /// e.g. a layout whose placed total exceeds its stock length.
    InternalConsistency(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::InternalConsistency(msg) => write!(f, "internal consistency failure: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// One class of available raw stock: `qty` pieces of `length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSpec {
    pub length: f64,
    pub qty: u32,
}

impl StockSpec {
    pub fn new(length: f64, qty: u32) -> Self {
        Self { length, qty }
    }
}

/// Concrete stock pieces in input order, quantities already expanded.
pub type StockPool = Vec<f64>;

/// One cut requirement: `qty` pieces of `length`, all carrying the same
/// label/job/sequence metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandItem {
    pub length: f64,
    pub qty: u32,
    pub label: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub sequence: String,
}

impl DemandItem {
    pub fn new(length: f64, qty: u32, label: impl Into<String>) -> Self {
        Self {
            length,
            qty,
            label: label.into(),
            job: String::new(),
            sequence: String::new(),
        }
    }

    pub fn with_refs(mut self, job: impl Into<String>, sequence: impl Into<String>) -> Self {
        self.job = job.into();
        self.sequence = sequence.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCut {
    pub length: f64,
    pub label: String,
    pub job: String,
    pub sequence: String,
}

/// The cuts assigned to one stock piece. Created empty, grows only by
/// appending to `cuts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub stock_length: f64,
    pub cuts: Vec<PlacedCut>,
}

impl Layout {
    pub fn new(stock_length: f64) -> Self {
        Self {
            stock_length,
            cuts: Vec::new(),
        }
    }

    pub fn used(&self) -> f64 {
        self.cuts.iter().map(|c| c.length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }
}

/// One layout per pool entry, in pool order, empty layouts included.
/// `unplaced` counts demand units that fit on no stock piece.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub layouts: Vec<Layout>,
    pub unplaced: u32,
}

impl AllocationResult {
    pub fn placed_count(&self) -> u32 {
        self.layouts.iter().map(|l| l.cuts.len() as u32).sum()
    }

    /// Layouts with at least one cut assigned.
    pub fn used_count(&self) -> usize {
        self.layouts.iter().filter(|l| !l.is_empty()).count()
    }

    pub fn total_waste(&self) -> f64 {
        self.layouts
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.stock_length - l.used())
            .sum()
    }
}
