//! Physics world and simulation step

use crate::body::{Body2D, BodyKey};
use crate::collision::{circle_vs_circle, Contact};
use crate::material::PhysicsMaterial;
use sketchbook_math::{Rect, Vec2};
use slotmap::SlotMap;

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration in units per second squared
    ///
    /// Canvas coordinates put +y downward, so downward gravity is positive.
    pub gravity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 500.0),
        }
    }
}

impl PhysicsConfig {
    /// Create a config with the given gravity vector
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

/// The physics world containing all bodies
pub struct PhysicsWorld {
    /// All bodies in the world (generational keys)
    bodies: SlotMap<BodyKey, Body2D>,
    /// Optional canvas bounds the bodies bounce inside
    bounds: Option<Rect>,
    /// Material of the bounds walls
    wall_material: PhysicsMaterial,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            bounds: None,
            wall_material: PhysicsMaterial::CANVAS,
            config,
        }
    }

    /// Confine bodies to the given bounds
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the material of the bounds walls
    pub fn with_wall_material(mut self, material: PhysicsMaterial) -> Self {
        self.wall_material = material;
        self
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: Body2D) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body2D> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Body2D> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body2D> {
        self.bodies.get_mut(key)
    }

    /// Number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Gravity application and Euler velocity/position integration
    /// 2. Bounds collision (clamp inside, reflect with restitution)
    /// 3. Body-body circle collision resolution
    pub fn step(&mut self, dt: f32) {
        // Phase 1: integrate
        for (_key, body) in &mut self.bodies {
            if body.is_static {
                continue;
            }
            if body.affected_by_gravity {
                body.velocity += self.config.gravity * dt;
            }
            body.position += body.velocity * dt;
        }

        // Phase 2: bounds
        if let Some(bounds) = self.bounds {
            let wall = self.wall_material;
            for (_key, body) in &mut self.bodies {
                if !body.is_static {
                    Self::resolve_bounds(body, bounds, &wall);
                }
            }
        }

        // Phase 3: body-body contacts
        self.resolve_body_collisions();
    }

    /// Clamp a body inside the bounds and reflect its velocity
    ///
    /// This is the `checkEdges` rule of the original ball sketch: snap the
    /// circle back inside and flip the offending velocity component scaled
    /// by the combined restitution.
    fn resolve_bounds(body: &mut Body2D, bounds: Rect, wall: &PhysicsMaterial) {
        let combined = body.material.combine(wall);
        let rebound = -combined.restitution;
        let min = bounds.min;
        let max = bounds.max();

        if body.position.x - body.radius < min.x {
            body.position.x = min.x + body.radius;
            body.velocity.x *= rebound;
        } else if body.position.x + body.radius > max.x {
            body.position.x = max.x - body.radius;
            body.velocity.x *= rebound;
        }

        if body.position.y - body.radius < min.y {
            body.position.y = min.y + body.radius;
            body.velocity.y *= rebound;
        } else if body.position.y + body.radius > max.y {
            body.position.y = max.y - body.radius;
            body.velocity.y *= rebound;
        }
    }

    /// Resolve collisions between every pair of bodies
    fn resolve_body_collisions(&mut self) {
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let (key_a, key_b) = (keys[i], keys[j]);

                let contact = {
                    let a = &self.bodies[key_a];
                    let b = &self.bodies[key_b];
                    if a.is_static && b.is_static {
                        continue;
                    }
                    circle_vs_circle(a.position, a.radius, b.position, b.radius)
                };

                if let Some(contact) = contact {
                    if contact.is_colliding() {
                        self.resolve_pair(key_a, key_b, &contact);
                    }
                }
            }
        }
    }

    /// Push two overlapping bodies apart and reflect approach velocity
    fn resolve_pair(&mut self, key_a: BodyKey, key_b: BodyKey, contact: &Contact) {
        let (is_static_a, is_static_b, mass_a, mass_b) = {
            let a = &self.bodies[key_a];
            let b = &self.bodies[key_b];
            (a.is_static, b.is_static, a.mass, b.mass)
        };

        // Split the positional correction by mass, statics never move
        let (correction_a, correction_b) = if is_static_a {
            (Vec2::ZERO, contact.normal * contact.penetration)
        } else if is_static_b {
            (-contact.normal * contact.penetration, Vec2::ZERO)
        } else {
            let total = mass_a + mass_b;
            (
                -contact.normal * (contact.penetration * mass_b / total),
                contact.normal * (contact.penetration * mass_a / total),
            )
        };

        let combined = self.bodies[key_a]
            .material
            .combine(&self.bodies[key_b].material);

        if !is_static_a {
            let body = &mut self.bodies[key_a];
            body.apply_correction(correction_a);
            // Moving into B means positive velocity along the normal
            let along = body.velocity.dot(contact.normal);
            if along > 0.0 {
                body.velocity -= contact.normal * (along * (1.0 + combined.restitution));
            }
        }

        if !is_static_b {
            let body = &mut self.bodies[key_b];
            body.apply_correction(correction_b);
            let along = body.velocity.dot(-contact.normal);
            if along > 0.0 {
                body.velocity -= -contact.normal * (along * (1.0 + combined.restitution));
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_in_box(gravity: Vec2, width: f32, height: f32) -> PhysicsWorld {
        PhysicsWorld::with_config(PhysicsConfig::new(gravity))
            .with_bounds(Rect::from_size(width, height))
    }

    #[test]
    fn test_add_and_get_body() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);

        let key = world.add_body(Body2D::new(Vec2::new(1.0, 2.0), 0.5));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.get_body(key).unwrap().position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(Body2D::new(Vec2::ZERO, 0.5));

        assert!(world.remove_body(key).is_some());
        assert!(world.get_body(key).is_none());

        // Reusing the slot must not resurrect the old key
        let new_key = world.add_body(Body2D::new(Vec2::X, 0.5));
        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_gravity_application() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec2::new(0.0, 10.0)));
        let key = world.add_body(Body2D::new(Vec2::ZERO, 0.5));

        world.step(0.1);

        let body = world.get_body(key).unwrap();
        assert!((body.velocity.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_integration() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec2::ZERO));
        let key = world.add_body(
            Body2D::new(Vec2::ZERO, 0.5).with_velocity(Vec2::new(10.0, 0.0)),
        );

        world.step(1.0);

        let body = world.get_body(key).unwrap();
        assert!((body.position.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(Body2D::new(Vec2::new(5.0, 5.0), 0.5).with_static(true));

        world.step(1.0);

        let body = world.get_body(key).unwrap();
        assert_eq!(body.position, Vec2::new(5.0, 5.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_wall_bounce_damps_velocity() {
        // Ball heading straight for the right wall
        let mut world = world_in_box(Vec2::ZERO, 100.0, 100.0);
        let key = world.add_body(
            Body2D::new(Vec2::new(95.0, 50.0), 5.0)
                .with_velocity(Vec2::new(100.0, 0.0))
                .with_material(PhysicsMaterial::CANVAS),
        );

        world.step(0.1);

        let body = world.get_body(key).unwrap();
        // Snapped back inside and reflected at 90% speed
        assert!((body.position.x - 95.0).abs() < 1e-3);
        assert!((body.velocity.x + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_body_stays_inside_bounds() {
        let mut world = world_in_box(Vec2::new(0.0, 500.0), 200.0, 200.0);
        let key = world.add_body(
            Body2D::new(Vec2::new(100.0, 20.0), 10.0).with_material(PhysicsMaterial::CANVAS),
        );

        for _ in 0..600 {
            world.step(0.016);
        }

        let body = world.get_body(key).unwrap();
        assert!(body.position.x >= 10.0 && body.position.x <= 190.0);
        assert!(body.position.y >= 10.0 && body.position.y <= 190.0);
    }

    #[test]
    fn test_two_circles_separate() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec2::ZERO));
        let key_a = world.add_body(Body2D::new(Vec2::new(0.0, 0.0), 1.0).with_gravity(false));
        let key_b = world.add_body(Body2D::new(Vec2::new(1.0, 0.0), 1.0).with_gravity(false));

        world.step(0.016);

        let a = world.get_body(key_a).unwrap();
        let b = world.get_body(key_b).unwrap();
        let distance = a.position.distance(b.position);
        assert!(distance >= 2.0 - 1e-3);
    }

    #[test]
    fn test_collision_against_static_only_moves_dynamic() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec2::ZERO));
        let anchor = world.add_body(Body2D::new(Vec2::ZERO, 1.0).with_static(true));
        let mover = world.add_body(
            Body2D::new(Vec2::new(1.5, 0.0), 1.0)
                .with_gravity(false)
                .with_velocity(Vec2::new(-5.0, 0.0)),
        );

        for _ in 0..20 {
            world.step(0.016);
        }

        assert_eq!(world.get_body(anchor).unwrap().position, Vec2::ZERO);
        let mover = world.get_body(mover).unwrap();
        assert!(mover.position.x >= 2.0 - 0.1);
    }

    #[test]
    fn test_heavier_body_moves_less() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(Vec2::ZERO));
        let heavy = world.add_body(
            Body2D::new(Vec2::new(0.0, 0.0), 1.0)
                .with_gravity(false)
                .with_mass(10.0),
        );
        let light = world.add_body(
            Body2D::new(Vec2::new(1.0, 0.0), 1.0)
                .with_gravity(false)
                .with_mass(1.0),
        );

        world.step(0.016);

        let heavy_moved = world.get_body(heavy).unwrap().position.length();
        let light_moved = (world.get_body(light).unwrap().position - Vec2::X).length();
        assert!(heavy_moved < light_moved);
    }
}
