use dgemm_core::ValueSource;

use crate::error::{Result, SourceError};

/// Cycling integral sequence: yields `(i % modulus) * scale` for i = 0, 1, 2, ...
///
/// With small integral values every product and partial sum is exact, so
/// results do not depend on accumulation order.
pub struct SequenceSource {
    modulus: u64,
    scale: f64,
    index: u64,
}

impl SequenceSource {
    /// # Errors
    /// Returns `ZeroModulus` if `modulus` is zero.
    pub fn new(modulus: u64, scale: f64) -> Result<Self> {
        if modulus == 0 {
            return Err(SourceError::ZeroModulus);
        }
        Ok(Self {
            modulus,
            scale,
            index: 0,
        })
    }
}

impl ValueSource for SequenceSource {
    fn name(&self) -> &str {
        "sequence"
    }

    fn next_value(&mut self) -> f64 {
        let v = (self.index % self.modulus) as f64 * self.scale;
        self.index = self.index.wrapping_add(1);
        v
    }
}
