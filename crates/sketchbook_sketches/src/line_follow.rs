//! Line-following robot simulator
//!
//! A polyline track, analog and digital light sensors, and a two-sensor
//! differential robot steering bang-bang to keep the line between its
//! sensors.

use sketchbook_core::{Sketch, Vec2};
use sketchbook_math::point_segment_distance;

/// A line on the floor, as a polyline
#[derive(Clone, Debug)]
pub struct LinePath {
    points: Vec<Vec2>,
}

impl LinePath {
    /// Create a path through the given points (at least two)
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// A straight segment
    pub fn straight(from: Vec2, to: Vec2) -> Self {
        Self::new(vec![from, to])
    }

    /// Distance from a point to the nearest part of the line
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.points
            .windows(2)
            .map(|pair| point_segment_distance(point, pair[0], pair[1]))
            .fold(f32::INFINITY, f32::min)
    }
}

/// Analog light sensor reading darkness under it
///
/// Reads 1.0 directly over the line, falling off linearly to 0.0 at the
/// sensor radius.
#[derive(Clone, Debug)]
pub struct AnalogLightSensor {
    radius: f32,
    last_reading: f32,
}

impl AnalogLightSensor {
    /// Create a sensor with the given sensing radius
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            last_reading: 0.0,
        }
    }

    /// Sample the track at a world position
    pub fn read(&mut self, position: Vec2, path: &LinePath) -> f32 {
        let distance = path.distance_to(position);
        self.last_reading = if distance >= self.radius {
            0.0
        } else {
            1.0 - distance / self.radius
        };
        self.last_reading
    }

    /// The most recent reading without resampling
    pub fn last_reading(&self) -> f32 {
        self.last_reading
    }
}

/// Digital light sensor: thresholds the analog value with hysteresis
#[derive(Clone, Debug)]
pub struct DigitalLightSensor {
    analog: AnalogLightSensor,
    threshold_up: f32,
    threshold_down: f32,
    state: bool,
}

impl DigitalLightSensor {
    /// Create a sensor with switch-on and switch-off thresholds
    ///
    /// Swapped thresholds are normalized so the switch-off level is never
    /// above the switch-on level.
    pub fn new(radius: f32, threshold_up: f32, threshold_down: f32) -> Self {
        let up = threshold_up.clamp(0.0, 1.0);
        let down = threshold_down.clamp(0.0, 1.0);
        let (down, up) = if down > up { (up, down) } else { (down, up) };
        Self {
            analog: AnalogLightSensor::new(radius),
            threshold_up: up,
            threshold_down: down,
            state: false,
        }
    }

    /// Sample the track; true means "on the line"
    ///
    /// Between the two thresholds the previous state holds.
    pub fn read(&mut self, position: Vec2, path: &LinePath) -> bool {
        let value = self.analog.read(position, path);
        if value > self.threshold_up {
            self.state = true;
        } else if value < self.threshold_down {
            self.state = false;
        }
        self.state
    }

    /// The most recent digital state
    pub fn is_on_line(&self) -> bool {
        self.state
    }
}

/// Two-sensor bang-bang line follower
pub struct LineFollower {
    path: LinePath,
    pub pos: Vec2,
    /// Heading in radians
    pub heading: f32,
    initial_pos: Vec2,
    initial_heading: f32,
    /// Forward speed, units per second
    speed: f32,
    /// How far ahead of the axle the sensors sit
    sensor_reach: f32,
    /// Lateral distance between the two sensors
    sensor_spacing: f32,
    /// Steering rate, radians per second
    turn_rate: f32,
    left: DigitalLightSensor,
    right: DigitalLightSensor,
}

impl LineFollower {
    /// Create a follower on a track
    pub fn new(path: LinePath, pos: Vec2, heading: f32) -> Self {
        Self {
            path,
            pos,
            heading,
            initial_pos: pos,
            initial_heading: heading,
            speed: 40.0,
            sensor_reach: 8.0,
            sensor_spacing: 10.0,
            turn_rate: 2.5,
            left: DigitalLightSensor::new(6.0, 0.6, 0.4),
            right: DigitalLightSensor::new(6.0, 0.6, 0.4),
        }
    }

    fn forward(&self) -> Vec2 {
        Vec2::new(self.heading.cos(), self.heading.sin())
    }

    /// World positions of the (left, right) sensors
    pub fn sensor_positions(&self) -> (Vec2, Vec2) {
        let forward = self.forward();
        let side = forward.perp() * (self.sensor_spacing / 2.0);
        let ahead = self.pos + forward * self.sensor_reach;
        (ahead + side, ahead - side)
    }

    /// Lateral distance from the robot to the track
    pub fn track_error(&self) -> f32 {
        self.path.distance_to(self.pos)
    }
}

impl Sketch for LineFollower {
    fn name(&self) -> &str {
        "line-follower"
    }

    fn update(&mut self, dt: f32) {
        let (left_pos, right_pos) = self.sensor_positions();
        let left_on = self.left.read(left_pos, &self.path);
        let right_on = self.right.read(right_pos, &self.path);

        // Steer toward whichever sensor sees the line; straight when the
        // sensors agree
        if left_on && !right_on {
            self.heading += self.turn_rate * dt;
        } else if right_on && !left_on {
            self.heading -= self.turn_rate * dt;
        }

        self.pos += self.forward() * (self.speed * dt);
    }

    fn reset(&mut self) {
        self.pos = self.initial_pos;
        self.heading = self.initial_heading;
    }
}
