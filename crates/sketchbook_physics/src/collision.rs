//! Contact generation

use sketchbook_math::Vec2;

/// A detected contact between two shapes
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Contact normal pointing from shape A toward shape B
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(normal: Vec2, penetration: f32) -> Self {
        Self {
            normal,
            penetration,
        }
    }

    /// Whether the shapes actually overlap
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Circle vs circle contact, normal pointing from A toward B
///
/// Returns None for separated circles and for exactly coincident centers
/// (no meaningful normal exists there).
pub fn circle_vs_circle(
    a_center: Vec2,
    a_radius: f32,
    b_center: Vec2,
    b_radius: f32,
) -> Option<Contact> {
    let delta = b_center - a_center;
    let dist_sq = delta.length_squared();
    let min_dist = a_radius + b_radius;

    if dist_sq < min_dist * min_dist && dist_sq > 1e-8 {
        let dist = dist_sq.sqrt();
        Some(Contact::new(delta * (1.0 / dist), min_dist - dist))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separated_circles() {
        let contact = circle_vs_circle(Vec2::ZERO, 1.0, Vec2::new(3.0, 0.0), 1.0);
        assert!(contact.is_none());
    }

    #[test]
    fn test_overlapping_circles() {
        let contact = circle_vs_circle(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 1.0).unwrap();
        assert!(contact.is_colliding());
        assert!((contact.penetration - 0.5).abs() < 1e-6);
        assert!((contact.normal.x - 1.0).abs() < 1e-6);
        assert!(contact.normal.y.abs() < 1e-6);
    }

    #[test]
    fn test_coincident_centers() {
        let contact = circle_vs_circle(Vec2::ZERO, 1.0, Vec2::ZERO, 1.0);
        assert!(contact.is_none());
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        let contact = circle_vs_circle(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0);
        assert!(contact.is_none());
    }
}
