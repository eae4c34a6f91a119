//! A ball bouncing inside the canvas
//!
//! The oldest toy in the portfolio: one circle, constant gravity, damped
//! rebounds off all four walls.

use sketchbook_core::{InputEvent, Sketch, Vec2};
use sketchbook_math::Rect;
use sketchbook_physics::{Body2D, BodyKey, PhysicsConfig, PhysicsMaterial, PhysicsWorld};

/// Sideways impulse applied per directional key, units per second
const KICK_SPEED: f32 = 200.0;

/// The bouncing ball sketch
pub struct BouncingBall {
    world: PhysicsWorld,
    ball: BodyKey,
    bounds: Rect,
    /// Snapshot of the initial body, for reset
    initial: Body2D,
}

impl BouncingBall {
    /// Create a ball dropped from the upper third of the canvas
    pub fn new(bounds: Rect, radius: f32, mass: f32, gravity: Vec2) -> Self {
        let start = Vec2::new(bounds.center().x, bounds.min.y + bounds.height() / 3.0);
        let initial = Body2D::new(start, radius)
            .with_mass(mass)
            .with_material(PhysicsMaterial::CANVAS);

        let mut world =
            PhysicsWorld::with_config(PhysicsConfig::new(gravity)).with_bounds(bounds);
        let ball = world.add_body(initial.clone());

        Self {
            world,
            ball,
            bounds,
            initial,
        }
    }

    /// Current ball position
    pub fn position(&self) -> Vec2 {
        self.body().position
    }

    /// Current ball velocity
    pub fn velocity(&self) -> Vec2 {
        self.body().velocity
    }

    /// Canvas bounds the ball lives in
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn body(&self) -> &Body2D {
        self.world
            .get_body(self.ball)
            .expect("ball body is never removed")
    }
}

impl Sketch for BouncingBall {
    fn name(&self) -> &str {
        "bouncing-ball"
    }

    fn update(&mut self, dt: f32) {
        self.world.step(dt);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        let Some(body) = self.world.get_body_mut(self.ball) else {
            return;
        };
        match event {
            InputEvent::Direction(dir) => {
                let delta = dir.delta();
                let kick = Vec2::new(delta.x as f32, delta.y as f32) * KICK_SPEED;
                body.velocity += kick;
            }
            // Drag the ball somewhere and let it fall again
            InputEvent::Pointer(pos) => {
                body.position = self.bounds.clamp_point(*pos);
                body.velocity = Vec2::ZERO;
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        if let Some(body) = self.world.get_body_mut(self.ball) {
            *body = self.initial.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchbook_core::Direction;

    fn ball() -> BouncingBall {
        BouncingBall::new(
            Rect::from_size(400.0, 400.0),
            10.0,
            1.0,
            Vec2::new(0.0, 500.0),
        )
    }

    #[test]
    fn test_ball_falls() {
        let mut sketch = ball();
        let start_y = sketch.position().y;
        for _ in 0..30 {
            sketch.update(0.016);
        }
        assert!(sketch.position().y > start_y);
    }

    #[test]
    fn test_ball_stays_in_bounds() {
        let mut sketch = ball();
        sketch.handle_input(&InputEvent::Direction(Direction::Right));
        for _ in 0..2000 {
            sketch.update(0.016);
            let pos = sketch.position();
            assert!(pos.x >= 10.0 && pos.x <= 390.0);
            assert!(pos.y >= 10.0 && pos.y <= 390.0);
        }
    }

    #[test]
    fn test_kick_changes_velocity() {
        let mut sketch = ball();
        let before = sketch.velocity().x;
        sketch.handle_input(&InputEvent::Direction(Direction::Left));
        assert!(sketch.velocity().x < before);
    }

    #[test]
    fn test_pointer_places_ball() {
        let mut sketch = ball();
        sketch.handle_input(&InputEvent::Pointer(Vec2::new(50.0, 60.0)));
        assert_eq!(sketch.position(), Vec2::new(50.0, 60.0));
        assert_eq!(sketch.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut sketch = ball();
        let start = sketch.position();
        for _ in 0..60 {
            sketch.update(0.016);
        }
        sketch.reset();
        assert_eq!(sketch.position(), start);
        assert_eq!(sketch.velocity(), Vec2::ZERO);
    }
}
