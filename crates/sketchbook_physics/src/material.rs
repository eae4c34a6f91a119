//! Surface material properties

use serde::{Deserialize, Serialize};

/// Surface properties controlling collision response
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Tangential velocity loss on contact, 0.0 = frictionless
    pub friction: f32,
    /// Bounciness, 0.0 = no bounce, 1.0 = perfectly elastic
    pub restitution: f32,
}

impl PhysicsMaterial {
    /// Material of the canvas walls in the original ball sketch:
    /// frictionless with a 0.9 velocity rebound
    pub const CANVAS: Self = Self {
        friction: 0.0,
        restitution: 0.9,
    };

    /// High-friction, lively surface
    pub const RUBBER: Self = Self {
        friction: 0.9,
        restitution: 0.8,
    };

    /// Nearly frictionless, dead surface
    pub const ICE: Self = Self {
        friction: 0.05,
        restitution: 0.1,
    };

    /// Create a material with the given friction and restitution
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Combine two touching materials into one effective material
    ///
    /// Restitution takes the livelier of the two, friction the geometric
    /// mean, so one slick surface keeps a contact slippery.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.max(other.restitution),
        }
    }
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.0,
            restitution: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        let m = PhysicsMaterial::new(1.5, -0.2);
        assert_eq!(m.friction, 1.0);
        assert_eq!(m.restitution, 0.0);
    }

    #[test]
    fn test_combine_restitution_takes_max() {
        let dead = PhysicsMaterial::new(0.0, 0.0);
        let lively = PhysicsMaterial::new(0.0, 0.9);
        assert_eq!(dead.combine(&lively).restitution, 0.9);
    }

    #[test]
    fn test_combine_friction_geometric_mean() {
        let a = PhysicsMaterial::new(0.5, 0.0);
        let b = PhysicsMaterial::new(0.05, 0.0);
        let combined = a.combine(&b);
        assert!((combined.friction - (0.5f32 * 0.05).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_combine_is_commutative() {
        let a = PhysicsMaterial::RUBBER;
        let b = PhysicsMaterial::ICE;
        assert_eq!(a.combine(&b), b.combine(&a));
    }
}
