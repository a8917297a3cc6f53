//! Exponential-smoothing integrator for camera motion.
//!
//! The choreographer never moves the camera directly: it retargets one of
//! these filters and lets the per-frame update glide the value in. That
//! indirection is what makes timeline cancellation visually seamless: a
//! superseded move simply leaves the integrator smoothing toward whatever
//! target is current.

use glam::Vec3;

/// Discrete-time low-pass filter converging a vector toward a moving
/// target.
///
/// `damping` controls the time constant: smaller values give slower, more
/// cinematic convergence. It may be retargeted mid-flight (the move
/// timeline ramps it toward a settle value).
#[derive(Debug, Clone)]
pub struct Integrator {
    p: Vec3,
    velocity: Vec3,
    /// Desired position; mutated externally by the choreographer.
    pub target: Vec3,
    /// Smoothing factor in (0, 1]. 1.0 snaps to the target in one step.
    pub damping: f32,
}

impl Integrator {
    /// Create an integrator at rest on `initial`.
    #[must_use]
    pub fn new(initial: Vec3, damping: f32) -> Self {
        Self {
            p: initial,
            velocity: Vec3::ZERO,
            target: initial,
            damping,
        }
    }

    /// Advance one step toward the target and return the new position.
    ///
    /// `dt_ms` is the frame delta in milliseconds and must be positive;
    /// velocity is reported in units per millisecond.
    pub fn update(&mut self, dt_ms: f32) -> Vec3 {
        let before = self.p;
        self.p = self.p * (1.0 - self.damping) + self.target * self.damping;
        self.velocity = (before - self.p) / dt_ms;
        self.p
    }

    /// Current smoothed position. Only [`update`](Self::update) mutates
    /// this.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.p
    }

    /// Instantaneous velocity from the last update, in units per
    /// millisecond.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_strictly_decreases() {
        let mut integrator = Integrator::new(Vec3::ZERO, 0.1);
        integrator.target = Vec3::new(100.0, -50.0, 25.0);

        let mut last = integrator.position().distance(integrator.target);
        for _ in 0..200 {
            let _ = integrator.update(16.0);
            let d = integrator.position().distance(integrator.target);
            assert!(d < last, "distance must strictly decrease");
            last = d;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn test_componentwise_monotone_approach() {
        let mut integrator = Integrator::new(Vec3::new(-10.0, 10.0, 0.0), 0.25);
        integrator.target = Vec3::new(10.0, -10.0, 0.0);

        let mut prev = integrator.position();
        for _ in 0..100 {
            let p = integrator.update(16.0);
            assert!(p.x >= prev.x);
            assert!(p.y <= prev.y);
            prev = p;
        }
    }

    #[test]
    fn test_velocity_decays_to_zero() {
        let mut integrator = Integrator::new(Vec3::ZERO, 0.2);
        integrator.target = Vec3::new(1000.0, 0.0, 0.0);

        let _ = integrator.update(16.0);
        let early = integrator.velocity().length();
        for _ in 0..500 {
            let _ = integrator.update(16.0);
        }
        let late = integrator.velocity().length();
        assert!(early > late);
        assert!(late < 1e-6);
    }

    #[test]
    fn test_full_damping_snaps() {
        let mut integrator = Integrator::new(Vec3::ZERO, 1.0);
        integrator.target = Vec3::new(5.0, 5.0, 5.0);
        let p = integrator.update(16.0);
        assert_eq!(p, integrator.target);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let mut integrator = Integrator::new(Vec3::ZERO, 0.1);
        integrator.target = Vec3::new(100.0, 0.0, 0.0);
        for _ in 0..10 {
            let _ = integrator.update(16.0);
        }
        integrator.target = Vec3::ZERO;
        for _ in 0..300 {
            let _ = integrator.update(16.0);
        }
        assert!(integrator.position().length() < 1e-3);
    }
}
