//! Euler-integrated 2D point physics
//!
//! Just enough dynamics for the physics toys: circular bodies under gravity,
//! damped bounces off the canvas bounds, and pairwise circle contacts.
//! Integration is explicit Euler, matching the per-frame arithmetic the
//! original sketches did by hand.

mod body;
mod collision;
mod material;
mod world;

pub use body::{Body2D, BodyKey};
pub use collision::{circle_vs_circle, Contact};
pub use material::PhysicsMaterial;
pub use world::{PhysicsConfig, PhysicsWorld};
