//! Hand-rolled point-mass dynamics for the non-engine sketches.

use raylib::prelude::*;

/// Downward gravitational acceleration in pixels per second squared.
pub const GRAVITY: f32 = 980.0;

/// Terminal speed cap in pixels per second.
pub const MAX_SPEED: f32 = 500.0;

/// Fraction of vertical speed kept after a ground bounce.
pub const RESTITUTION: f32 = 0.9;

/// A circular point mass.
#[derive(Clone, Copy, Debug)]
pub struct Ball {
    /// Center position in pixels.
    pub position: Vector2,
    /// Velocity in pixels per second.
    pub velocity: Vector2,
    /// Radius in pixels.
    pub radius: f32,
    /// A pinned ball never moves, whatever is applied to it.
    pub pinned: bool,
}

impl Ball {
    /// Create a free ball at rest.
    pub const fn new(position: Vector2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vector2 { x: 0.0, y: 0.0 },
            radius,
            pinned: false,
        }
    }

    /// Constant-velocity integration with reflection at all four window edges.
    pub fn step_bounce(&mut self, dt: f32, bounds: Vector2) {
        if self.pinned {
            return;
        }
        self.position += self.velocity * dt;

        if self.position.x - self.radius < 0.0 {
            self.position.x = self.radius;
            self.velocity.x = -self.velocity.x;
        } else if self.position.x + self.radius > bounds.x {
            self.position.x = bounds.x - self.radius;
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y - self.radius < 0.0 {
            self.position.y = self.radius;
            self.velocity.y = -self.velocity.y;
        } else if self.position.y + self.radius > bounds.y {
            self.position.y = bounds.y - self.radius;
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Gravity integration with a terminal-speed cap and a restitution bounce
    /// off the horizontal ground line at `ground_y`.
    pub fn step_fall(&mut self, dt: f32, ground_y: f32) {
        if self.pinned {
            return;
        }
        self.velocity.y = (self.velocity.y + GRAVITY * dt).min(MAX_SPEED);
        self.position += self.velocity * dt;

        if self.position.y + self.radius > ground_y {
            self.position.y = ground_y - self.radius;
            self.velocity.y = -self.velocity.y * RESTITUTION;
        }
    }

    /// Accumulate a force over `dt`, clamping the resulting speed.
    pub fn apply_force(&mut self, force: Vector2, dt: f32) {
        if self.pinned {
            return;
        }
        self.velocity += force * dt;
        let speed = self.velocity.length();
        if speed > MAX_SPEED {
            self.velocity = self.velocity * (MAX_SPEED / speed);
        }
    }

    /// Circular hit test for mouse picking.
    pub fn contains(&self, point: Vector2) -> bool {
        (point - self.position).length() <= self.radius
    }
}

/// Acceleration applied per held arrow key, in pixels per second squared.
pub const DRIVE_ACCEL: f32 = 600.0;

/// Multiplicative per-frame velocity damping for the driven square.
pub const FRICTION: f32 = 0.95;

/// An axis-aligned square driven around by forces.
#[derive(Clone, Copy, Debug)]
pub struct Square {
    /// Top-left corner in pixels.
    pub position: Vector2,
    /// Velocity in pixels per second.
    pub velocity: Vector2,
    /// Side length in pixels.
    pub size: f32,
}

impl Square {
    /// Create a square at rest.
    pub const fn new(position: Vector2, size: f32) -> Self {
        Self {
            position,
            velocity: Vector2 { x: 0.0, y: 0.0 },
            size,
        }
    }

    /// Treat `force` as an acceleration, integrate velocity then position.
    pub fn apply_force(&mut self, force: Vector2, dt: f32) {
        self.velocity += force * dt;
        self.position += self.velocity * dt;
    }

    /// Per-frame friction, run once per frame at the demo's fixed frame rate.
    pub fn damp(&mut self) {
        self.velocity = self.velocity * FRICTION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vector2 = Vector2 { x: 800.0, y: 600.0 };

    #[test]
    fn test_bounce_reflects_off_right_wall() {
        let mut ball = Ball::new(Vector2::new(790.0, 300.0), 20.0);
        ball.velocity = Vector2::new(100.0, 0.0);

        ball.step_bounce(0.1, BOUNDS);

        assert!(ball.velocity.x < 0.0);
        assert!((ball.position.x + ball.radius - BOUNDS.x).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bounce_reflects_off_top_edge() {
        let mut ball = Ball::new(Vector2::new(400.0, 15.0), 20.0);
        ball.velocity = Vector2::new(0.0, -100.0);

        ball.step_bounce(0.1, BOUNDS);

        assert!(ball.velocity.y > 0.0);
        assert!((ball.position.y - ball.radius).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bounce_keeps_speed_inside_bounds() {
        let mut ball = Ball::new(Vector2::new(400.0, 300.0), 20.0);
        ball.velocity = Vector2::new(100.0, 100.0);

        ball.step_bounce(0.01, BOUNDS);

        assert!((ball.velocity.x - 100.0).abs() < f32::EPSILON);
        assert!((ball.velocity.y - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fall_accelerates_downward() {
        let mut ball = Ball::new(Vector2::new(400.0, 100.0), 20.0);

        ball.step_fall(0.1, 580.0);

        assert!(ball.velocity.y > 0.0);
        assert!(ball.position.y > 100.0);
    }

    #[test]
    fn test_fall_respects_terminal_speed() {
        let mut ball = Ball::new(Vector2::new(400.0, 100.0), 20.0);
        ball.velocity.y = MAX_SPEED;

        ball.step_fall(0.1, 5000.0);

        assert!(ball.velocity.y <= MAX_SPEED);
    }

    #[test]
    fn test_fall_bounces_off_ground() {
        let ground_y = 580.0;
        let mut ball = Ball::new(Vector2::new(400.0, 575.0), 20.0);
        ball.velocity.y = 100.0;

        ball.step_fall(0.1, ground_y);

        assert!((ball.position.y - (ground_y - ball.radius)).abs() < f32::EPSILON);
        assert!(ball.velocity.y < 0.0);
    }

    #[test]
    fn test_apply_force_clamps_speed() {
        let mut ball = Ball::new(Vector2::new(0.0, 0.0), 20.0);

        ball.apply_force(Vector2::new(1_000_000.0, 0.0), 1.0);

        assert!((ball.velocity.length() - MAX_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_pinned_ball_never_moves() {
        let start = Vector2::new(300.0, 300.0);
        let mut ball = Ball::new(start, 20.0);
        ball.pinned = true;

        ball.step_fall(0.1, 580.0);
        ball.step_bounce(0.1, BOUNDS);
        ball.apply_force(Vector2::new(500.0, 500.0), 0.1);

        assert!((ball.position - start).length() < f32::EPSILON);
        assert!(ball.velocity.length() < f32::EPSILON);
    }

    #[test]
    fn test_contains_hit_and_miss() {
        let ball = Ball::new(Vector2::new(100.0, 100.0), 20.0);

        assert!(ball.contains(Vector2::new(110.0, 100.0)));
        assert!(!ball.contains(Vector2::new(150.0, 100.0)));
    }

    #[test]
    fn test_square_force_integration() {
        let mut square = Square::new(Vector2::new(375.0, 275.0), 50.0);

        square.apply_force(Vector2::new(DRIVE_ACCEL, 0.0), 0.1);

        assert!(square.velocity.x > 0.0);
        assert!(square.position.x > 375.0);
    }

    #[test]
    fn test_square_damping_slows_it_down() {
        let mut square = Square::new(Vector2::new(0.0, 0.0), 50.0);
        square.velocity = Vector2::new(100.0, -40.0);
        let before = square.velocity.length();

        square.damp();

        assert!(square.velocity.length() < before);
        assert!((square.velocity.x - 95.0).abs() < f32::EPSILON);
    }
}
