use crate::Reflect;

/// A complex number, read and written as a pair of `f64`.
pub trait Complex: Reflect {
    /// Returns `(real, imaginary)`.
    fn parts(&self) -> (f64, f64);

    /// Sets both parts, narrowing them if the type stores `f32`.
    fn set_parts(&mut self, real: f64, imag: f64);
}
