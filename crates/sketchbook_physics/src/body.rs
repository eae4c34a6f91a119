//! Circular rigid bodies

use crate::material::PhysicsMaterial;
use sketchbook_math::Vec2;
use slotmap::new_key_type;

new_key_type! {
    /// Key to a body in the physics world
    ///
    /// Uses generational indexing so a key to a removed body returns None
    /// instead of aliasing whatever body later reuses the slot.
    pub struct BodyKey;
}

/// A circular 2D body with position, velocity, and material
#[derive(Clone, Debug)]
pub struct Body2D {
    /// Position of the circle center (canvas coordinates, y down)
    pub position: Vec2,
    /// Velocity in units per second
    pub velocity: Vec2,
    /// Mass used for force and push calculations
    pub mass: f32,
    /// Collision radius
    pub radius: f32,
    /// Surface material
    pub material: PhysicsMaterial,
    /// Whether gravity acts on this body
    pub affected_by_gravity: bool,
    /// Static bodies never move
    pub is_static: bool,
}

impl Body2D {
    /// Create a dynamic circle at the given position
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mass: 1.0,
            radius,
            material: PhysicsMaterial::default(),
            affected_by_gravity: true,
            is_static: false,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the surface material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set whether gravity acts on this body
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// Make the body static (it also stops responding to gravity)
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        if is_static {
            self.affected_by_gravity = false;
        }
        self
    }

    /// Accelerate the body by applying a force for `dt` seconds
    ///
    /// Explicit Euler: a = F/m folded straight into velocity. Position
    /// integration happens in the world step.
    pub fn apply_force(&mut self, force: Vec2, dt: f32) {
        if self.is_static {
            return;
        }
        self.velocity += force * (dt / self.mass);
    }

    /// Apply a positional correction (from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec2) {
        self.position += correction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body() {
        let body = Body2D::new(Vec2::new(1.0, 2.0), 0.5);
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.mass, 1.0);
        assert!(body.affected_by_gravity);
        assert!(!body.is_static);
    }

    #[test]
    fn test_builder_methods() {
        let body = Body2D::new(Vec2::ZERO, 1.0)
            .with_velocity(Vec2::new(3.0, 0.0))
            .with_mass(5.0)
            .with_material(PhysicsMaterial::RUBBER)
            .with_gravity(false);

        assert_eq!(body.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(body.mass, 5.0);
        assert_eq!(body.material, PhysicsMaterial::RUBBER);
        assert!(!body.affected_by_gravity);
    }

    #[test]
    fn test_with_static_disables_gravity() {
        let body = Body2D::new(Vec2::ZERO, 1.0).with_gravity(true).with_static(true);
        assert!(body.is_static);
        assert!(!body.affected_by_gravity);
    }

    #[test]
    fn test_apply_force_scales_by_mass() {
        let mut body = Body2D::new(Vec2::ZERO, 1.0).with_mass(2.0);
        body.apply_force(Vec2::new(10.0, 0.0), 1.0);
        assert_eq!(body.velocity, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_apply_force_ignored_when_static() {
        let mut body = Body2D::new(Vec2::ZERO, 1.0).with_static(true);
        body.apply_force(Vec2::new(10.0, 0.0), 1.0);
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}
