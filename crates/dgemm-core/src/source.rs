/// A supplier of initial matrix values.
///
/// `Matrix::fill` draws one value per element in row-major order.
pub trait ValueSource {
    /// Returns the name of this source (e.g., "uniform", "constant").
    fn name(&self) -> &str;

    /// Produce the next value.
    fn next_value(&mut self) -> f64;
}
