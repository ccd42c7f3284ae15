use dgemm_core::ValueSource;

/// Yields the same value forever.
pub struct ConstantSource {
    value: f64,
}

impl ConstantSource {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl ValueSource for ConstantSource {
    fn name(&self) -> &str {
        "constant"
    }

    fn next_value(&mut self) -> f64 {
        self.value
    }
}
