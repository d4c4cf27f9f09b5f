/// A range of `f64` values, used for ray parameters and color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The unit interval [0, 1], used for color channels.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Every ray parameter strictly in front of the origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f64::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(5.0));
        assert!(!interval.surrounds(-0.1));
    }

    #[test]
    fn test_interval_clamp() {
        assert_eq!(Interval::UNIT.clamp(-5.0), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.5), 0.5);
        assert_eq!(Interval::UNIT.clamp(15.0), 1.0);
    }

    #[test]
    fn test_forward_excludes_origin() {
        assert!(!Interval::FORWARD.surrounds(0.0));
        assert!(!Interval::FORWARD.surrounds(-1.0));
        assert!(Interval::FORWARD.surrounds(1e-6));
        assert!(Interval::FORWARD.surrounds(1e12));
    }
}
