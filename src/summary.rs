use crate::types::{Error, Layout};
use serde::Serialize;

/// Relative tolerance for floating-point summation noise when checking that
/// a layout's placed total does not exceed its stock length.
const WASTE_EPSILON: f64 = 1e-9;

/// Identical cuts on one layout, grouped by (length, label, job, sequence)
/// in first-seen placement order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutGroup {
    pub length: f64,
    pub label: String,
    pub job: String,
    pub sequence: String,
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub stock_length: f64,
    pub groups: Vec<CutGroup>,
    pub waste: f64,
}

pub fn summarize(layout: &Layout) -> Result<LayoutSummary, Error> {
    let used = layout.used();
    let waste = layout.stock_length - used;
    if waste < -WASTE_EPSILON * layout.stock_length.abs() {
        // Negative waste means the allocator broke its capacity invariant;
        // surface it, never clamp.
        return Err(Error::InternalConsistency(format!(
            "placed total {used} exceeds stock length {}",
            layout.stock_length
        )));
    }

    let mut groups: Vec<CutGroup> = Vec::new();
    for c in &layout.cuts {
        match groups.iter_mut().find(|g| {
            g.length == c.length && g.label == c.label && g.job == c.job && g.sequence == c.sequence
        }) {
            Some(g) => g.qty += 1,
            None => groups.push(CutGroup {
                length: c.length,
                label: c.label.clone(),
                job: c.job.clone(),
                sequence: c.sequence.clone(),
                qty: 1,
            }),
        }
    }

    Ok(LayoutSummary {
        stock_length: layout.stock_length,
        groups,
        waste,
    })
}

/// Fraction of the stock piece consumed by placed cuts.
pub fn utilization(layout: &Layout) -> Result<f64, Error> {
    if layout.stock_length <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "utilization undefined for stock length {}",
            layout.stock_length
        )));
    }
    let summary = summarize(layout)?;
    Ok(1.0 - summary.waste / layout.stock_length)
}
