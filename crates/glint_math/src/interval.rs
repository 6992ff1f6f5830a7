/// A closed range of scalars `[min, max]`.
///
/// Bounds accepted hit distances and the ground footprint, and clamps
/// color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric interval `[-half_extent, half_extent]`.
    pub const fn centered(half_extent: f32) -> Self {
        Self::new(-half_extent, half_extent)
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    ///
    /// NaN is never contained.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Interval for valid 8-bit channel values.
    pub const BYTE: Interval = Interval {
        min: 0.0,
        max: 255.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_centered() {
        let square = Interval::centered(10.0);
        assert_eq!(square.min, -10.0);
        assert_eq!(square.max, 10.0);
    }

    #[test]
    fn test_interval_contains_inclusive() {
        let square = Interval::centered(10.0);

        assert!(square.contains(-10.0));
        assert!(square.contains(10.0));
        assert!(square.contains(0.0));
        assert!(!square.contains(10.001));
        assert!(!square.contains(f32::NAN));
    }

    #[test]
    fn test_interval_surrounds_exclusive() {
        let ahead = Interval::new(0.0, f32::INFINITY);
        assert!(!ahead.surrounds(0.0));
        assert!(ahead.surrounds(1e-6));
        assert!(!ahead.surrounds(f32::INFINITY));
        assert!(!ahead.surrounds(f32::NAN));
    }

    #[test]
    fn test_interval_clamp() {
        assert_eq!(Interval::BYTE.clamp(-5.0), 0.0);
        assert_eq!(Interval::BYTE.clamp(127.5), 127.5);
        assert_eq!(Interval::BYTE.clamp(300.0), 255.0);
    }
}
