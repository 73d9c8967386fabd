use anyhow::{ensure, Result};

/// Number of one-pixel columns in a full bar.
pub const BAR_LENGTH: i64 = 200;

/// A count out of a nonzero total.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Progress {
    count: i32,
    total: i32,
}

impl Progress {
    pub fn new(count: i32, total: i32) -> Result<Self> {
        ensure!(total != 0, "The total must not be zero.");

        Ok(Self { count, total })
    }

    pub const fn count(&self) -> i32 {
        self.count
    }

    pub const fn total(&self) -> i32 {
        self.total
    }

    /// `floor(count / total * BAR_LENGTH)`, computed on integers so ratios such as
    /// 29/100 land on 58 rather than one column short. Not clamped: counts above the
    /// total give more than `BAR_LENGTH` columns, negative ratios a negative count.
    pub const fn column_count(&self) -> i64 {
        let mut numerator = self.count as i64 * BAR_LENGTH;
        let mut denominator = self.total as i64;

        // div_euclid only floors for a positive divisor.
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        numerator.div_euclid(denominator)
    }
}
