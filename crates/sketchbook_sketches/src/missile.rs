//! Missile guidance toy
//!
//! A missile with a motor thrust curve chases a target under pursuit
//! guidance: each tick the velocity vector is rotated toward the target by
//! a gain times the heading error.

use sketchbook_core::{InputEvent, Sketch, SketchStatus, Vec2};
use sketchbook_math::point_segment_distance;

/// The original animation advanced its time counter once per frame at about
/// 60 fps; the thrust curve below is written in those ticks
const TICKS_PER_SECOND: f32 = 60.0;

/// Distance at which the missile counts as having hit the target
const KILL_RADIUS: f32 = 5.0;

/// Fold an angle into (-pi, pi]
fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// A guided missile
#[derive(Clone, Debug)]
pub struct Missile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Motor burn duration in ticks
    pub burn_time: f32,
    /// Flight time in ticks after which the missile destroys itself
    pub self_destruct_time: f32,
    /// Guidance gain applied to the heading error
    pub gain: f32,
}

impl Missile {
    /// Create a missile with the given launch state
    pub fn new(pos: Vec2, vel: Vec2, burn_time: f32, self_destruct_time: f32, gain: f32) -> Self {
        Self {
            pos,
            vel,
            burn_time,
            self_destruct_time,
            gain,
        }
    }

    /// Motor thrust at the given time in ticks
    ///
    /// A gaussian burn centered at tick 300 riding on a tanh ramp, so the
    /// motor comes up smoothly, peaks, and tails off to a sustainer level.
    pub fn thrust(&self, time: f32) -> f32 {
        0.8 * (-(0.01 * time - 3.0).powi(2)).exp() + 0.2 * (0.01 * time - 3.0).tanh() + 0.2
    }

    /// Rotate the velocity toward the target by gain times the heading error
    pub fn steer_to(&mut self, target: Vec2) {
        let to_target = target - self.pos;
        if to_target.length_squared() == 0.0 || self.vel.length_squared() == 0.0 {
            return;
        }
        let error = normalize_angle(to_target.heading() - self.vel.heading());
        self.vel = self.vel.rotated(self.gain * error);
    }

    /// Advance the missile by `ticks`, growing speed while the motor burns
    pub fn advance(&mut self, time: f32, ticks: f32) {
        let speed = self.vel.length();
        let new_speed = if time <= self.burn_time {
            speed + self.thrust(time) * ticks
        } else {
            speed
        };
        self.vel = self.vel.with_magnitude(new_speed);
        self.pos += self.vel * ticks;
    }
}

/// Terminal state of a flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightOutcome {
    /// Still chasing
    InFlight,
    /// Came within the kill radius of the target
    Hit,
    /// Flew past its self-destruct time
    SelfDestructed,
}

/// The missile guidance sketch
pub struct MissileSketch {
    missile: Missile,
    initial: Missile,
    target: Vec2,
    /// Elapsed flight time in ticks
    time: f32,
    outcome: FlightOutcome,
}

impl MissileSketch {
    /// Launch a missile at a stationary target
    pub fn new(missile: Missile, target: Vec2) -> Self {
        Self {
            initial: missile.clone(),
            missile,
            target,
            time: 0.0,
            outcome: FlightOutcome::InFlight,
        }
    }

    /// Where the missile currently is
    pub fn missile(&self) -> &Missile {
        &self.missile
    }

    /// The target position
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// How the flight ended, if it has
    pub fn outcome(&self) -> FlightOutcome {
        self.outcome
    }
}

impl Sketch for MissileSketch {
    fn name(&self) -> &str {
        "missile-guidance"
    }

    fn update(&mut self, dt: f32) {
        if self.outcome != FlightOutcome::InFlight {
            return;
        }

        let ticks = dt * TICKS_PER_SECOND;
        let previous_pos = self.missile.pos;
        self.missile.steer_to(self.target);
        self.missile.advance(self.time, ticks);
        self.time += ticks;

        // Check the whole travelled segment so a fast missile can't step
        // straight over the target between frames
        let miss_distance =
            point_segment_distance(self.target, previous_pos, self.missile.pos);
        if miss_distance < KILL_RADIUS {
            log::info!("missile hit target after {:.0} ticks", self.time);
            self.outcome = FlightOutcome::Hit;
        } else if self.time > self.missile.self_destruct_time {
            log::info!("missile self-destructed after {:.0} ticks", self.time);
            self.outcome = FlightOutcome::SelfDestructed;
        }
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::Pointer(pos) = event {
            self.target = *pos;
        }
    }

    fn status(&self) -> SketchStatus {
        if self.outcome == FlightOutcome::InFlight {
            SketchStatus::Running
        } else {
            SketchStatus::Finished
        }
    }

    fn reset(&mut self) {
        self.missile = self.initial.clone();
        self.time = 0.0;
        self.outcome = FlightOutcome::InFlight;
    }
}
