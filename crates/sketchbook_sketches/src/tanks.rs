//! Tanks artillery game
//!
//! Turn-based artillery duel on a noise-generated terrain: aim, pick a
//! power, fire, and let gravity and wind argue about the rest. Projectiles
//! come in plain, ground-burst, and air-burst varieties.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sketchbook_core::{Direction, InputEvent, Sketch, SketchStatus, Vec2};
use sketchbook_math::{lerp, map_range};
use slotmap::{new_key_type, SlotMap};

/// Minimum seconds between shots from the same tank
const REFIRE_GUARD: f32 = 0.75;

/// Fraction of firing speed converted to launch velocity, units per second
const LAUNCH_SPEED_SCALE: f32 = 6.0;

/// Score points per point of damage dealt
const SCORE_PER_DAMAGE: i32 = 10;

new_key_type! {
    /// Key to a live projectile
    pub struct ProjectileKey;
}

// --- Terrain ---

/// Heightfield terrain built from smoothed value noise
pub struct Terrain {
    /// Ground height (canvas y, larger = lower) per x column
    heights: Vec<f32>,
}

impl Terrain {
    /// Generate terrain across `width` columns with heights in
    /// [min_height, max_height], smoothed over `lattice` columns
    pub fn generate(
        width: usize,
        min_height: f32,
        max_height: f32,
        lattice: usize,
        rng: &mut SmallRng,
    ) -> Self {
        let lattice = lattice.max(2);
        let knots: Vec<f32> = (0..=width / lattice + 1)
            .map(|_| rng.gen_range(min_height..max_height))
            .collect();

        // Cosine-interpolated value noise between lattice knots
        let heights = (0..width)
            .map(|x| {
                let cell = x / lattice;
                let t = (x % lattice) as f32 / lattice as f32;
                let eased = 0.5 - 0.5 * (t * std::f32::consts::PI).cos();
                lerp(knots[cell], knots[cell + 1], eased)
            })
            .collect();

        Self { heights }
    }

    /// Terrain width in columns
    pub fn width(&self) -> usize {
        self.heights.len()
    }

    /// Ground height at an x position (clamped to the field)
    pub fn height_at(&self, x: f32) -> f32 {
        let index = (x.max(0.0) as usize).min(self.heights.len() - 1);
        self.heights[index]
    }

    /// Whether a point lies underground
    pub fn is_below_ground(&self, point: Vec2) -> bool {
        point.y >= self.height_at(point.x)
    }
}

// --- Weapons ---

/// Static parameters of one projectile type
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileParams {
    /// Maximum damage at the explosion center
    pub damage: f32,
    /// Radius of the projectile body
    pub projectile_radius: f32,
    /// Radius of the explosion
    pub explosion_radius: f32,
    /// How many small missiles the burst splits into (0 = none)
    pub duplication_factor: u32,
    /// Split at the top of the arc instead of on impact
    pub explode_at_apogee: bool,
}

/// The weapon catalogue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    SmallMissile,
    MediumMissile,
    LargeMissile,
    SmallGroundBurst,
    MediumGroundBurst,
    LargeGroundBurst,
    SmallAirBurst,
    MediumAirBurst,
    LargeAirBurst,
}

impl WeaponKind {
    /// Parameter table for every weapon
    pub fn params(self) -> ProjectileParams {
        let p = |damage, projectile_radius, explosion_radius, duplication_factor, apogee| {
            ProjectileParams {
                damage,
                projectile_radius,
                explosion_radius,
                duplication_factor,
                explode_at_apogee: apogee,
            }
        };
        match self {
            WeaponKind::SmallMissile => p(25.0, 2.0, 15.0, 0, false),
            WeaponKind::MediumMissile => p(50.0, 4.0, 20.0, 0, false),
            WeaponKind::LargeMissile => p(75.0, 5.0, 30.0, 0, false),
            WeaponKind::SmallGroundBurst => p(25.0, 2.0, 15.0, 5, false),
            WeaponKind::MediumGroundBurst => p(25.0, 4.0, 20.0, 7, false),
            WeaponKind::LargeGroundBurst => p(25.0, 5.0, 30.0, 9, false),
            WeaponKind::SmallAirBurst => p(25.0, 2.0, 15.0, 5, true),
            WeaponKind::MediumAirBurst => p(25.0, 4.0, 20.0, 7, true),
            WeaponKind::LargeAirBurst => p(25.0, 5.0, 30.0, 9, true),
        }
    }
}

/// A projectile in flight
#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub params: ProjectileParams,
    /// Index of the tank that fired it, for scoring
    pub owner: usize,
}

impl Projectile {
    /// At the apogee the vertical velocity flips from rising to falling
    /// (canvas y grows downward)
    fn passed_apogee(&self, previous_vy: f32) -> bool {
        previous_vy < 0.0 && self.vel.y >= 0.0
    }
}

// --- Tanks ---

/// One player's tank
#[derive(Clone, Debug)]
pub struct Tank {
    pub pos: Vec2,
    pub width: f32,
    /// Gun elevation in degrees, 0 = right, 180 = left
    gun_angle: f32,
    /// Shot power, capped by remaining health
    firing_speed: f32,
    pub health: f32,
    pub score: i32,
    pub selected_weapon: WeaponKind,
}

impl Tank {
    /// Create a tank resting on the terrain at column x
    pub fn new(x: f32, terrain: &Terrain) -> Self {
        Self {
            pos: Vec2::new(x, terrain.height_at(x)),
            width: 30.0,
            gun_angle: 45.0,
            firing_speed: 100.0,
            health: 100.0,
            score: 0,
            selected_weapon: WeaponKind::SmallMissile,
        }
    }

    /// Whether the tank is still in the game
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Current gun elevation in degrees
    pub fn gun_angle(&self) -> f32 {
        self.gun_angle
    }

    /// Current shot power
    pub fn firing_speed(&self) -> f32 {
        self.firing_speed
    }

    /// Raise the gun one degree (toward 180)
    pub fn raise_gun(&mut self) {
        self.gun_angle = (self.gun_angle + 1.0).min(180.0);
    }

    /// Lower the gun one degree (toward 0)
    pub fn lower_gun(&mut self) {
        self.gun_angle = (self.gun_angle - 1.0).max(0.0);
    }

    /// Increase shot power; a damaged tank cannot exceed its health
    pub fn increase_power(&mut self) {
        self.firing_speed = (self.firing_speed + 1.0).min(100.0).min(self.health);
    }

    /// Decrease shot power
    pub fn decrease_power(&mut self) {
        self.firing_speed = (self.firing_speed - 1.0).max(1.0);
    }

    /// Drive one step left, staying on the field and on the ground
    pub fn move_left(&mut self, terrain: &Terrain) {
        self.pos.x = (self.pos.x - self.width / 30.0).max(0.0);
        self.pos.y = terrain.height_at(self.pos.x);
    }

    /// Drive one step right, staying on the field and on the ground
    pub fn move_right(&mut self, terrain: &Terrain) {
        self.pos.x = (self.pos.x + self.width / 30.0).min(terrain.width() as f32 - 1.0);
        self.pos.y = terrain.height_at(self.pos.x);
    }

    /// Apply explosion damage
    pub fn add_damage(&mut self, damage: f32) {
        self.health = (self.health - damage.floor()).max(0.0);
        self.firing_speed = self.firing_speed.min(self.health.max(1.0));
        log::info!("tank health now {}", self.health);
    }

    /// Muzzle position for spawning projectiles
    pub fn muzzle(&self) -> Vec2 {
        let angle = self.gun_angle.to_radians();
        // Gun angles measure up from the horizon; canvas y points down
        self.pos + Vec2::new(angle.cos(), -angle.sin()) * (self.width * 0.75)
    }

    /// Launch velocity for the current angle and power
    pub fn launch_velocity(&self) -> Vec2 {
        let angle = self.gun_angle.to_radians();
        Vec2::new(angle.cos(), -angle.sin()) * (self.firing_speed * LAUNCH_SPEED_SCALE)
    }
}

// --- Game ---

/// Phase of the current turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// The current player is aiming
    Aiming,
    /// Projectiles are in the air
    InFlight,
    /// One or zero tanks left standing
    GameOver,
}

/// The artillery game
pub struct TankGame {
    terrain: Terrain,
    /// Acceleration on projectiles, units per second squared
    gravity: Vec2,
    /// Wind acceleration, randomized every turn
    wind: Vec2,
    tanks: Vec<Tank>,
    projectiles: SlotMap<ProjectileKey, Projectile>,
    phase: TurnPhase,
    current_player: usize,
    elapsed: f32,
    last_fired: f32,
    rng: SmallRng,
}

impl TankGame {
    /// Create a game for `players` tanks on a fresh terrain
    pub fn new(players: usize, field_width: usize, field_height: f32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let terrain = Terrain::generate(
            field_width,
            field_height * 0.4,
            field_height * 0.8,
            field_width / 8,
            &mut rng,
        );

        // Spread the tanks evenly across the field
        let players = players.max(2);
        let tanks = (0..players)
            .map(|i| {
                let x = map_range(
                    i as f32 + 0.5,
                    0.0,
                    players as f32,
                    0.0,
                    field_width as f32,
                );
                Tank::new(x, &terrain)
            })
            .collect();

        let wind = Self::fresh_wind(&mut rng);
        Self {
            terrain,
            gravity: Vec2::new(0.0, 300.0),
            wind,
            tanks,
            projectiles: SlotMap::with_key(),
            phase: TurnPhase::Aiming,
            current_player: 0,
            elapsed: 0.0,
            last_fired: f32::MIN,
            rng,
        }
    }

    /// Sane wind values sit well inside +-0.1 of the launch scale
    fn fresh_wind(rng: &mut SmallRng) -> Vec2 {
        Vec2::new(rng.gen_range(-60.0..60.0), 0.0)
    }

    /// The current turn phase
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Index of the player whose turn it is
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// All tanks
    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    /// The playing field
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Wind acceleration this turn
    pub fn wind(&self) -> Vec2 {
        self.wind
    }

    /// Number of projectiles in the air
    pub fn live_projectiles(&self) -> usize {
        self.projectiles.len()
    }

    /// Fire the current player's weapon
    ///
    /// Ignored while a shot is still resolving or inside the refire guard.
    pub fn fire(&mut self) {
        if self.phase != TurnPhase::Aiming {
            return;
        }
        if self.elapsed - self.last_fired < REFIRE_GUARD {
            log::debug!("refire guard blocked shot");
            return;
        }
        let tank = &self.tanks[self.current_player];
        let projectile = Projectile {
            pos: tank.muzzle(),
            vel: tank.launch_velocity(),
            params: tank.selected_weapon.params(),
            owner: self.current_player,
        };
        log::info!(
            "player {} fires {:?} at {:.0} degrees, power {:.0}",
            self.current_player,
            tank.selected_weapon,
            tank.gun_angle(),
            tank.firing_speed()
        );
        self.projectiles.insert(projectile);
        self.last_fired = self.elapsed;
        self.phase = TurnPhase::InFlight;
    }

    /// Resolve an explosion: damage every tank in range, score the owner
    fn explode(&mut self, at: Vec2, params: &ProjectileParams, owner: usize) {
        let mut score_delta = 0;
        for (index, tank) in self.tanks.iter_mut().enumerate() {
            if !tank.is_alive() {
                continue;
            }
            let distance = at.distance(tank.pos);
            let reach = params.explosion_radius + tank.width / 2.0;
            if distance < reach {
                // Damage falls off linearly from the center, never
                // exceeding the weapon's maximum
                let falloff = map_range(distance, 0.0, reach, params.damage, 0.0);
                let damage = falloff.min(params.damage);
                tank.add_damage(damage);

                let points = damage.round() as i32 * SCORE_PER_DAMAGE;
                if index == owner {
                    log::info!("player {} hit themselves, -{} points", owner, points);
                    score_delta -= points;
                } else {
                    log::info!("player {} scored {} points", owner, points);
                    score_delta += points;
                }
            }
        }
        self.tanks[owner].score += score_delta;
    }

    /// Split a burst weapon into small missiles spread radially upward
    fn spawn_burst(&mut self, at: Vec2, count: u32, owner: usize) {
        let spread = std::f32::consts::PI / (count + 1) as f32;
        for i in 1..=count {
            let angle = spread * i as f32;
            let vel = Vec2::new(angle.cos(), -angle.sin()) * 150.0;
            self.projectiles.insert(Projectile {
                pos: at + Vec2::new(0.0, -2.0),
                vel,
                params: WeaponKind::SmallMissile.params(),
                owner,
            });
        }
    }

    /// Advance to the next living player's turn
    fn next_turn(&mut self) {
        let alive = self.tanks.iter().filter(|t| t.is_alive()).count();
        if alive <= 1 {
            log::info!("game over");
            self.phase = TurnPhase::GameOver;
            return;
        }
        loop {
            self.current_player = (self.current_player + 1) % self.tanks.len();
            if self.tanks[self.current_player].is_alive() {
                break;
            }
        }
        self.wind = Self::fresh_wind(&mut self.rng);
        self.phase = TurnPhase::Aiming;
        log::info!(
            "player {}'s turn, wind {:.1}",
            self.current_player,
            self.wind.x
        );
    }

    /// Step the projectiles and resolve impacts
    fn step_projectiles(&mut self, dt: f32) {
        let keys: Vec<ProjectileKey> = self.projectiles.keys().collect();
        let accel = self.gravity + self.wind;

        for key in keys {
            let Some(projectile) = self.projectiles.get_mut(key) else {
                continue;
            };
            let previous_vy = projectile.vel.y;
            projectile.vel += accel * dt;
            projectile.pos += projectile.vel * dt;

            let off_field = projectile.pos.x < 0.0
                || projectile.pos.x >= self.terrain.width() as f32;
            if off_field {
                self.projectiles.remove(key);
                continue;
            }

            let projectile = self.projectiles[key].clone();
            let burst_in_air = projectile.params.explode_at_apogee
                && projectile.passed_apogee(previous_vy);
            // The projectile body touches down when its underside does
            let underside =
                projectile.pos + Vec2::new(0.0, projectile.params.projectile_radius);
            let hit_ground = self.terrain.is_below_ground(underside);

            if burst_in_air || hit_ground {
                self.projectiles.remove(key);
                self.explode(projectile.pos, &projectile.params, projectile.owner);
                if projectile.params.duplication_factor > 0 {
                    self.spawn_burst(
                        projectile.pos,
                        projectile.params.duplication_factor,
                        projectile.owner,
                    );
                }
            }
        }
    }
}

impl Sketch for TankGame {
    fn name(&self) -> &str {
        "tanks"
    }

    fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        match self.phase {
            TurnPhase::Aiming | TurnPhase::GameOver => {}
            TurnPhase::InFlight => {
                self.step_projectiles(dt);
                if self.projectiles.is_empty() {
                    self.next_turn();
                }
            }
        }
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if self.phase != TurnPhase::Aiming {
            return;
        }
        if matches!(event, InputEvent::Fire) {
            self.fire();
            return;
        }
        let terrain = &self.terrain;
        let tank = &mut self.tanks[self.current_player];
        match event {
            InputEvent::Direction(Direction::Up) => tank.raise_gun(),
            InputEvent::Direction(Direction::Down) => tank.lower_gun(),
            InputEvent::Direction(Direction::Left) => tank.move_left(terrain),
            InputEvent::Direction(Direction::Right) => tank.move_right(terrain),
            InputEvent::PowerUp => tank.increase_power(),
            InputEvent::PowerDown => tank.decrease_power(),
            InputEvent::Fire | InputEvent::Pointer(_) => {}
        }
    }

    fn status(&self) -> SketchStatus {
        if self.phase == TurnPhase::GameOver {
            SketchStatus::Finished
        } else {
            SketchStatus::Running
        }
    }

    fn reset(&mut self) {
        let players = self.tanks.len();
        let width = self.terrain.width();
        let seed = self.rng.gen();
        *self = TankGame::new(players, width, 400.0, seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> TankGame {
        TankGame::new(2, 800, 400.0, 7)
    }

    #[test]
    fn test_terrain_heights_in_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        let terrain = Terrain::generate(400, 100.0, 300.0, 50, &mut rng);
        assert_eq!(terrain.width(), 400);
        for x in 0..400 {
            let h = terrain.height_at(x as f32);
            assert!((100.0..=300.0).contains(&h));
        }
    }

    #[test]
    fn test_terrain_is_smooth() {
        let mut rng = SmallRng::seed_from_u64(3);
        let terrain = Terrain::generate(400, 100.0, 300.0, 50, &mut rng);
        for x in 1..400 {
            let step = (terrain.height_at(x as f32) - terrain.height_at(x as f32 - 1.0)).abs();
            // Adjacent columns never jump more than the knot range allows
            assert!(step < 20.0);
        }
    }

    #[test]
    fn test_gun_angle_clamps() {
        let mut game = game();
        let tank = &mut game.tanks[0];
        for _ in 0..200 {
            tank.raise_gun();
        }
        assert_eq!(tank.gun_angle(), 180.0);
        for _ in 0..400 {
            tank.lower_gun();
        }
        assert_eq!(tank.gun_angle(), 0.0);
    }

    #[test]
    fn test_power_capped_by_health() {
        let mut game = game();
        let tank = &mut game.tanks[0];
        tank.add_damage(40.0);
        assert_eq!(tank.health, 60.0);

        for _ in 0..100 {
            tank.increase_power();
        }
        assert!(tank.firing_speed() <= 60.0);
    }

    #[test]
    fn test_movement_stays_on_field() {
        let mut game = game();
        for _ in 0..5000 {
            game.tanks[0].move_left(&game.terrain);
        }
        assert_eq!(game.tanks[0].pos.x, 0.0);
        // The tank follows the ground
        assert_eq!(game.tanks[0].pos.y, game.terrain.height_at(0.0));
    }

    #[test]
    fn test_fire_enters_flight_phase() {
        let mut game = game();
        game.elapsed = 10.0;
        game.fire();
        assert_eq!(game.phase(), TurnPhase::InFlight);
        assert_eq!(game.live_projectiles(), 1);
    }

    #[test]
    fn test_refire_guard() {
        let mut game = game();
        game.elapsed = 10.0;
        game.fire();
        // Force back to aiming without clearing the guard
        game.phase = TurnPhase::Aiming;
        game.elapsed = 10.5;
        game.fire();
        assert_eq!(game.live_projectiles(), 1);

        game.elapsed = 11.0;
        game.fire();
        assert_eq!(game.live_projectiles(), 2);
    }

    #[test]
    fn test_projectile_lands_and_turn_passes() {
        let mut game = game();
        game.elapsed = 10.0;
        game.fire();

        for _ in 0..5000 {
            game.update(0.016);
            if game.phase() != TurnPhase::InFlight {
                break;
            }
        }
        assert_eq!(game.live_projectiles(), 0);
        assert_eq!(game.phase(), TurnPhase::Aiming);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_explosion_damage_falls_off() {
        let mut game = game();
        let params = WeaponKind::LargeMissile.params();
        let tank_pos = game.tanks[1].pos;

        game.explode(tank_pos, &params, 0);
        let close_health = game.tanks[1].health;
        assert!(close_health < 100.0);

        // A miss well outside the blast radius does nothing
        let mut game2 = game;
        game2.tanks[1].health = 100.0;
        let far = tank_pos + Vec2::new(params.explosion_radius + 100.0, 0.0);
        game2.explode(far, &params, 0);
        assert_eq!(game2.tanks[1].health, 100.0);
    }

    #[test]
    fn test_self_hit_costs_points() {
        let mut game = game();
        let own_pos = game.tanks[0].pos;
        game.explode(own_pos, &WeaponKind::SmallMissile.params(), 0);
        assert!(game.tanks[0].score < 0);
    }

    #[test]
    fn test_burst_spawns_duplicates() {
        let mut game = game();
        game.spawn_burst(Vec2::new(400.0, 100.0), 5, 0);
        assert_eq!(game.live_projectiles(), 5);
    }

    #[test]
    fn test_dead_tank_ends_game() {
        let mut game = game();
        game.tanks[1].health = 0.0;
        game.phase = TurnPhase::InFlight;
        game.update(0.016);
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert_eq!(game.status(), SketchStatus::Finished);
    }

    #[test]
    fn test_weapon_table() {
        assert_eq!(WeaponKind::LargeMissile.params().damage, 75.0);
        assert_eq!(WeaponKind::MediumGroundBurst.params().duplication_factor, 7);
        assert!(WeaponKind::SmallAirBurst.params().explode_at_apogee);
        assert!(!WeaponKind::SmallGroundBurst.params().explode_at_apogee);
    }
}
