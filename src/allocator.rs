use crate::types::{AllocationResult, DemandItem, Error, Layout, PlacedCut, StockPool};

/// First-fit-decreasing placement of demand units onto a fixed stock pool.
pub struct Allocator {
    pool: StockPool,
    demands: Vec<DemandItem>,
}

impl Allocator {
    pub fn new(pool: StockPool, demands: Vec<DemandItem>) -> Self {
        Self { pool, demands }
    }

    pub fn allocate(&self) -> Result<AllocationResult, Error> {
        self.validate()?;

        let units = self.expand_demands();
        let mut layouts: Vec<Layout> = self.pool.iter().map(|&len| Layout::new(len)).collect();
        let mut unplaced = 0u32;

        for unit in units {
            // Scan layouts in pool order, same order every time. Exact fits
            // are admitted (nonnegative slack, not strict inequality).
            match layouts
                .iter()
                .position(|l| l.used() + unit.length <= l.stock_length)
            {
                Some(i) => layouts[i].cuts.push(unit),
                // The pool is fixed by the caller; a unit that fits nowhere
                // is counted, not queued or retried.
                None => unplaced += 1,
            }
        }

        Ok(AllocationResult { layouts, unplaced })
    }

    fn validate(&self) -> Result<(), Error> {
        for d in &self.demands {
            if !d.length.is_finite() || d.length <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "demand '{}' has non-positive length {}",
                    d.label, d.length
                )));
            }
            if d.qty == 0 {
                return Err(Error::InvalidInput(format!(
                    "demand '{}' has zero quantity",
                    d.label
                )));
            }
        }
        Ok(())
    }

    fn expand_demands(&self) -> Vec<PlacedCut> {
        let mut units = Vec::new();
        for d in &self.demands {
            for _ in 0..d.qty {
                units.push(PlacedCut {
                    length: d.length,
                    label: d.label.clone(),
                    job: d.job.clone(),
                    sequence: d.sequence.clone(),
                });
            }
        }
        // Longest first; the stable sort keeps input order among equal lengths
        units.sort_by(|a, b| b.length.total_cmp(&a.length));
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates a complete allocation:
    /// 1. No layout's placed total exceeds its stock length
    /// 2. Placed units plus unplaced units account for every demand unit
    fn assert_result_valid(res: &AllocationResult, total_demand: u32) {
        for (li, layout) in res.layouts.iter().enumerate() {
            let used = layout.used();
            assert!(
                used <= layout.stock_length + 1e-9 * layout.stock_length,
                "layout {li} overfilled: used {used} > stock {}",
                layout.stock_length
            );
        }
        assert_eq!(
            res.placed_count() + res.unplaced,
            total_demand,
            "conservation violated: {} placed + {} unplaced != {} demanded",
            res.placed_count(),
            res.unplaced,
            total_demand
        );
    }

    #[test]
    fn test_end_to_end_two_sticks() {
        let demands = vec![
            DemandItem::new(50.0, 1, "X"),
            DemandItem::new(40.0, 1, "Y"),
            DemandItem::new(30.0, 1, "Z"),
        ];
        let res = Allocator::new(vec![96.0, 96.0], demands).allocate().unwrap();
        assert_result_valid(&res, 3);
        assert_eq!(res.unplaced, 0);

        // First stick takes 50 then 40 (90 <= 96), second takes the 30
        let first: Vec<f64> = res.layouts[0].cuts.iter().map(|c| c.length).collect();
        assert_eq!(first, vec![50.0, 40.0]);
        let second: Vec<f64> = res.layouts[1].cuts.iter().map(|c| c.length).collect();
        assert_eq!(second, vec![30.0]);
        assert!((res.layouts[0].stock_length - res.layouts[0].used() - 6.0).abs() < 1e-9);
        assert!((res.layouts[1].stock_length - res.layouts[1].used() - 66.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_fit_admitted() {
        let demands = vec![DemandItem::new(48.0, 2, "Half")];
        let res = Allocator::new(vec![96.0], demands).allocate().unwrap();
        assert_result_valid(&res, 2);
        assert_eq!(res.unplaced, 0);
        assert_eq!(res.layouts[0].cuts.len(), 2);
    }

    #[test]
    fn test_equal_lengths_keep_input_order() {
        // Both want the single stick; "A" came first so "A" wins
        let demands = vec![DemandItem::new(10.0, 1, "A"), DemandItem::new(10.0, 1, "B")];
        let res = Allocator::new(vec![10.0], demands).allocate().unwrap();
        assert_result_valid(&res, 2);
        assert_eq!(res.unplaced, 1);
        assert_eq!(res.layouts[0].cuts[0].label, "A");
    }

    #[test]
    fn test_empty_pool_drops_everything() {
        let demands = vec![DemandItem::new(10.0, 3, "A")];
        let res = Allocator::new(vec![], demands).allocate().unwrap();
        assert_result_valid(&res, 3);
        assert!(res.layouts.is_empty());
        assert_eq!(res.unplaced, 3);
    }

    #[test]
    fn test_empty_demand() {
        let res = Allocator::new(vec![96.0], vec![]).allocate().unwrap();
        assert_result_valid(&res, 0);
        assert_eq!(res.layouts.len(), 1);
        assert!(res.layouts[0].is_empty());
        assert_eq!(res.used_count(), 0);
    }

    #[test]
    fn test_empty_layouts_kept_in_pool_order() {
        let demands = vec![DemandItem::new(90.0, 1, "Long")];
        let res = Allocator::new(vec![50.0, 96.0, 50.0], demands).allocate().unwrap();
        assert_result_valid(&res, 1);
        assert_eq!(res.layouts.len(), 3);
        assert!(res.layouts[0].is_empty());
        assert_eq!(res.layouts[1].cuts.len(), 1);
        assert!(res.layouts[2].is_empty());
        assert_eq!(res.used_count(), 1);
    }

    #[test]
    fn test_oversized_unit_counted_not_raised() {
        let demands = vec![DemandItem::new(200.0, 1, "TooLong"), DemandItem::new(50.0, 1, "Fits")];
        let res = Allocator::new(vec![96.0], demands).allocate().unwrap();
        assert_result_valid(&res, 2);
        assert_eq!(res.unplaced, 1);
        assert_eq!(res.layouts[0].cuts[0].label, "Fits");
    }

    #[test]
    fn test_non_positive_length_rejected_before_placement() {
        let demands = vec![DemandItem::new(50.0, 1, "Ok"), DemandItem::new(0.0, 1, "Bad")];
        assert!(matches!(
            Allocator::new(vec![96.0], demands).allocate(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let demands = vec![DemandItem::new(50.0, 0, "Bad")];
        assert!(matches!(
            Allocator::new(vec![96.0], demands).allocate(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nan_length_rejected() {
        let demands = vec![DemandItem::new(f64::NAN, 1, "Bad")];
        assert!(matches!(
            Allocator::new(vec![96.0], demands).allocate(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let demands = vec![
            DemandItem::new(30.0, 4, "A").with_refs("J1", "S1"),
            DemandItem::new(45.0, 3, "B").with_refs("J1", "S2"),
            DemandItem::new(30.0, 2, "C").with_refs("J2", "S1"),
            DemandItem::new(12.5, 5, "D"),
        ];
        let pool = vec![96.0, 96.0, 144.0, 96.0];
        let first = Allocator::new(pool.clone(), demands.clone()).allocate().unwrap();
        let second = Allocator::new(pool, demands).allocate().unwrap();
        assert_eq!(first, second);
    }

    /// 60 units across mixed lengths against a short pool; placement must
    /// respect capacity on every stick and account for every unit.
    #[test]
    fn test_large_batch_with_shortfall() {
        let demands = vec![
            DemandItem::new(70.0, 10, "Post").with_refs("J7", "S1"),
            DemandItem::new(35.5, 20, "Rail").with_refs("J7", "S2"),
            DemandItem::new(22.25, 18, "Picket").with_refs("J7", "S3"),
            DemandItem::new(8.0, 12, "Block"),
        ];
        let total: u32 = demands.iter().map(|d| d.qty).sum();
        assert_eq!(total, 60);

        let res = Allocator::new(vec![96.0; 12], demands).allocate().unwrap();
        assert_result_valid(&res, total);
        // 12 sticks of 96" is 1152" against 1695.5" demanded, so some units drop
        assert!(res.unplaced > 0);
        assert!(res.total_waste() >= 0.0);
    }

    #[test]
    fn test_longest_first_ordering() {
        // FFD places the 60 before the two 40s; a naive input-order pass
        // would strand the 60 entirely
        let demands = vec![DemandItem::new(40.0, 2, "Short"), DemandItem::new(60.0, 1, "Long")];
        let res = Allocator::new(vec![100.0, 100.0], demands).allocate().unwrap();
        assert_result_valid(&res, 3);
        assert_eq!(res.unplaced, 0);
        assert_eq!(res.layouts[0].cuts[0].label, "Long");
        assert_eq!(res.layouts[0].cuts[1].label, "Short");
        assert_eq!(res.layouts[1].cuts[0].label, "Short");
    }

    #[test]
    fn test_metadata_rides_along() {
        let demands = vec![DemandItem::new(24.0, 1, "Stile").with_refs("JOB-9", "A3")];
        let res = Allocator::new(vec![96.0], demands).allocate().unwrap();
        let cut = &res.layouts[0].cuts[0];
        assert_eq!(cut.label, "Stile");
        assert_eq!(cut.job, "JOB-9");
        assert_eq!(cut.sequence, "A3");
    }
}
