use crate::types::{Error, StockPool, StockSpec};

/// Expands stock specs into a concrete pool of individual piece lengths,
/// preserving spec order, then piece order within a spec. No placement
/// decisions happen here.
pub fn build_pool(specs: &[StockSpec]) -> Result<StockPool, Error> {
    let mut pool = Vec::new();
    for s in specs {
        if !s.length.is_finite() || s.length <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "stock length must be positive, got {}",
                s.length
            )));
        }
        for _ in 0..s.qty {
            pool.push(s.length);
        }
    }
    Ok(pool)
}

/// Divides a total linear inventory into as many whole sticks of
/// `stock_length` as fit, discarding the remainder. Models "I have N total
/// feet of stock, in C-foot sticks" without piece-by-piece entry.
pub fn build_pool_from_inventory(total_length: f64, stock_length: f64) -> Result<StockPool, Error> {
    if !stock_length.is_finite() || stock_length <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "stock length must be positive, got {stock_length}"
        )));
    }
    if !total_length.is_finite() || total_length < 0.0 {
        return Err(Error::InvalidInput(format!(
            "total inventory length must be non-negative, got {total_length}"
        )));
    }
    let max_pieces = (total_length / stock_length).floor() as u32;
    build_pool(&[StockSpec::new(stock_length, max_pieces)])
}
