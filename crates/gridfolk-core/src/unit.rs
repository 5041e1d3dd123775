//! The unit itself: commands, queries and the per-tick update engine.
//!
//! All state changes happen synchronously inside `advance_time` or inside
//! the command that caused them. Within one tick exactly one subsystem runs
//! (movement, work countdown, rest accrual, attack countdown, or the idle
//! default-behavior pick), chosen by the current activity; the forced-rest
//! clock is updated unconditionally afterwards.
//!
//! The world bounds and the random source are collaborators, passed in by
//! the caller rather than owned here, so a driver can share one world and
//! one seeded generator across every unit it ticks.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activity::{Activity, Moving};
use crate::attributes::Attributes;
use crate::combat::{self, AttackOutcome};
use crate::constants::{ATTACK_DURATION, FORCED_REST_AFTER, MAX_TICK, SPRINT_DRAIN_INTERVAL};
use crate::error::UnitError;
use crate::kinematics::{self, StepResult};
use crate::math::{self, Cube, Vec3};
use crate::regen;
use crate::world::World;

/// A single autonomous unit on the grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    name: String,
    attributes: Attributes,
    position: Vec3,
    orientation: f32,
    hit_points: f32,
    stamina: f32,
    activity: Activity,
    default_behavior: bool,
    /// Seconds since the unit last rested, capped at the forcing threshold.
    /// Reset by a voluntary rest or a naturally completed one, not by the
    /// forced rest itself.
    time_without_rest: f32,
}

impl Unit {
    /// Create a unit at the center of the given cube, with full pools,
    /// orientation 0 and no activity. Attribute inputs are clamped by
    /// [`Attributes::new`]; the name and the spawn cube are validated.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        cube: Cube,
        strength: u32,
        agility: u32,
        toughness: u32,
        weight: u32,
        default_behavior: bool,
        world: &World,
    ) -> Result<Self, UnitError> {
        let name = name.into();
        if !Self::is_valid_name(&name) {
            return Err(UnitError::InvalidName { name });
        }
        if !world.contains(cube) {
            return Err(UnitError::OutOfBounds { cube });
        }
        let attributes = Attributes::new(strength, agility, toughness, weight);
        Ok(Self {
            name,
            attributes,
            position: cube.center(),
            orientation: 0.0,
            hit_points: attributes.max_hit_points() as f32,
            stamina: attributes.max_stamina() as f32,
            activity: Activity::Idle,
            default_behavior,
            time_without_rest: 0.0,
        })
    }

    /// A valid name is at least two characters, starts with an uppercase
    /// letter and contains only letters, spaces and single or double quotes.
    pub fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {}
            _ => return false,
        }
        let mut rest_len = 0;
        for c in chars {
            if !(c.is_alphabetic() || c == ' ' || c == '\'' || c == '"') {
                return false;
            }
            rest_len += 1;
        }
        rest_len >= 1
    }

    // ── Tick driver ─────────────────────────────────────────────────────

    /// Advance the unit's state by `dt` seconds. `dt` must lie in
    /// (0, 0.2]; anything else is rejected without touching any state.
    pub fn advance_time(
        &mut self,
        dt: f32,
        world: &World,
        rng: &mut impl Rng,
    ) -> Result<(), UnitError> {
        if !(dt > 0.0 && dt <= MAX_TICK) {
            return Err(UnitError::InvalidTimeStep { dt });
        }

        match self.activity {
            Activity::Idle => {
                if self.default_behavior {
                    self.pick_default_activity(world, rng);
                }
            }
            Activity::Moving(_) => self.tick_movement(dt, world),
            Activity::Working { .. } => self.tick_working(dt),
            Activity::Resting { .. } => self.tick_resting(dt),
            Activity::Attacking { .. } => self.tick_attacking(dt),
        }

        self.tick_forced_rest(dt);
        Ok(())
    }

    fn tick_movement(&mut self, dt: f32, world: &World) {
        let Activity::Moving(leg) = self.activity else {
            return;
        };
        let speed = kinematics::leg_speed(&self.attributes, leg.vertical_factor, leg.sprinting);
        match kinematics::step(self.position, leg.target, speed, dt) {
            StepResult::Moving {
                position,
                orientation,
            } => {
                self.position = position;
                self.orientation = orientation;
            }
            StepResult::Arrived => {
                self.position = leg.target;
                self.arrive(world);
            }
        }

        // charge the sprint time spent this tick
        if let Activity::Moving(leg) = &mut self.activity {
            if leg.sprinting {
                leg.sprint_debt += dt;
                while leg.sprint_debt >= SPRINT_DRAIN_INTERVAL {
                    leg.sprint_debt -= SPRINT_DRAIN_INTERVAL;
                    self.stamina = (self.stamina - 1.0).max(0.0);
                    if self.stamina == 0.0 {
                        leg.sprinting = false;
                        leg.sprint_debt = 0.0;
                        log::debug!("{} is exhausted, sprint stopped", self.name);
                        break;
                    }
                }
            }
        }
    }

    /// The current leg is done. Either issue the next greedy single-cube
    /// step toward the pending destination, or stop.
    fn arrive(&mut self, world: &World) {
        let Activity::Moving(leg) = self.activity else {
            return;
        };
        match leg.destination {
            Some(destination) if self.cube() != destination => {
                let (dx, dy, dz) = self.cube().step_toward(destination);
                let next = self.cube().offset(dx, dy, dz);
                if world.contains(next) {
                    self.activity = Activity::Moving(Moving {
                        target: next.center(),
                        vertical_factor: kinematics::vertical_factor(self.cube(), next),
                        ..leg
                    });
                } else {
                    // destination no longer reachable; give up the route
                    self.activity = Activity::Idle;
                }
            }
            _ => self.activity = Activity::Idle,
        }
    }

    fn tick_working(&mut self, dt: f32) {
        if let Activity::Working { remaining } = &mut self.activity {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.activity = Activity::Idle;
            }
        }
    }

    fn tick_attacking(&mut self, dt: f32) {
        if let Activity::Attacking { remaining } = &mut self.activity {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.activity = Activity::Idle;
            }
        }
    }

    fn tick_resting(&mut self, dt: f32) {
        let Activity::Resting {
            mut lock_remaining,
            mut accumulator,
        } = self.activity
        else {
            return;
        };
        lock_remaining = (lock_remaining - dt).max(0.0);
        accumulator += dt;

        let toughness = self.attributes.toughness();
        let hp_max = self.attributes.max_hit_points();
        let stamina_max = self.attributes.max_stamina();

        let (rest, hit_points) = regen::drain(
            accumulator,
            self.hit_points,
            hp_max,
            regen::hit_point_interval(toughness),
        );
        accumulator = rest;
        self.hit_points = hit_points;

        // stamina waits until hit points are back at cap
        if self.hit_points >= hp_max as f32 {
            let (rest, stamina) = regen::drain(
                accumulator,
                self.stamina,
                stamina_max,
                regen::stamina_interval(toughness),
            );
            accumulator = rest;
            self.stamina = stamina;
        }

        if self.hit_points >= hp_max as f32 && self.stamina >= stamina_max as f32 {
            log::trace!("{} finished resting", self.name);
            self.activity = Activity::Idle;
            self.time_without_rest = 0.0;
        } else {
            self.activity = Activity::Resting {
                lock_remaining,
                accumulator,
            };
        }
    }

    fn tick_forced_rest(&mut self, dt: f32) {
        if self.activity.is_resting() {
            return;
        }
        self.time_without_rest = (self.time_without_rest + dt).min(FORCED_REST_AFTER);
        if self.time_without_rest >= FORCED_REST_AFTER {
            log::debug!(
                "{} has gone {}s without rest, forcing rest",
                self.name,
                FORCED_REST_AFTER
            );
            self.start_resting();
        }
    }

    /// Uniform pick among resting, working and walking to a random cube.
    fn pick_default_activity(&mut self, world: &World, rng: &mut impl Rng) {
        match rng.gen_range(0..3) {
            0 => self.rest(),
            1 => {
                let destination = world.random_cube(rng);
                // in-world by construction, cannot fail
                let _ = self.move_to(destination, world);
            }
            _ => self.work(),
        }
    }

    // ── Movement commands ───────────────────────────────────────────────

    /// Head for the center of a neighboring cube. Each delta must be -1, 0
    /// or 1 and the destination must lie inside the world. Ignored while
    /// attacking or under the minimum-rest lock; cancels work and unlocked
    /// rest. Sprint state survives a retarget mid-move.
    pub fn move_to_adjacent(
        &mut self,
        dx: i32,
        dy: i32,
        dz: i32,
        world: &World,
    ) -> Result<(), UnitError> {
        if [dx, dy, dz].iter().any(|d| !(-1..=1).contains(d)) {
            return Err(UnitError::InvalidStep { dx, dy, dz });
        }
        let next = self.cube().offset(dx, dy, dz);
        if !world.contains(next) {
            return Err(UnitError::OutOfBounds { cube: next });
        }
        if self.activity.is_attacking() || self.activity.is_rest_locked() {
            return Ok(());
        }
        let (destination, sprinting, sprint_debt) = match self.activity {
            Activity::Moving(leg) => (leg.destination, leg.sprinting, leg.sprint_debt),
            _ => (None, false, 0.0),
        };
        self.activity = Activity::Moving(Moving {
            target: next.center(),
            destination,
            vertical_factor: kinematics::vertical_factor(self.cube(), next),
            sprinting,
            sprint_debt,
        });
        Ok(())
    }

    /// Walk to the given cube, one greedy single-cube leg at a time. The
    /// step direction is recomputed each time a leg completes. Ignored
    /// while attacking or under the minimum-rest lock; cancels work and
    /// unlocked rest.
    pub fn move_to(&mut self, destination: Cube, world: &World) -> Result<(), UnitError> {
        if !world.contains(destination) {
            return Err(UnitError::OutOfBounds { cube: destination });
        }
        if self.activity.is_attacking() || self.activity.is_rest_locked() {
            return Ok(());
        }
        let (dx, dy, dz) = self.cube().step_toward(destination);
        self.move_to_adjacent(dx, dy, dz, world)?;
        if let Activity::Moving(leg) = &mut self.activity {
            leg.destination = Some(destination);
        }
        Ok(())
    }

    /// Double the movement speed at the cost of stamina. Only takes effect
    /// while moving with stamina left.
    pub fn start_sprinting(&mut self) {
        if self.stamina <= 0.0 {
            return;
        }
        if let Activity::Moving(leg) = &mut self.activity {
            leg.sprinting = true;
        }
    }

    pub fn stop_sprinting(&mut self) {
        if let Activity::Moving(leg) = &mut self.activity {
            leg.sprinting = false;
        }
    }

    // ── Work and rest commands ──────────────────────────────────────────

    /// Start a work task lasting `500 / strength` seconds. Allowed from
    /// idle and from rest once the minimum-rest lock has elapsed; ignored
    /// otherwise.
    pub fn work(&mut self) {
        let allowed = match self.activity {
            Activity::Idle => true,
            Activity::Resting { lock_remaining, .. } => lock_remaining <= 0.0,
            _ => false,
        };
        if allowed {
            self.activity = Activity::Working {
                remaining: 500.0 / self.attributes.strength() as f32,
            };
        }
    }

    /// Start resting. Ignored while attacking. Arms the minimum-rest lock
    /// (re-arms it if already resting) and resets the forced-rest clock.
    pub fn rest(&mut self) {
        match &mut self.activity {
            Activity::Attacking { .. } => return,
            Activity::Resting { lock_remaining, .. } => {
                *lock_remaining = regen::min_rest_lock(self.attributes.toughness());
            }
            _ => self.start_resting(),
        }
        self.time_without_rest = 0.0;
    }

    fn start_resting(&mut self) {
        self.activity = Activity::Resting {
            lock_remaining: regen::min_rest_lock(self.attributes.toughness()),
            accumulator: 0.0,
        };
    }

    // ── Combat ──────────────────────────────────────────────────────────

    /// Attack an adjacent unit. Both parties turn to face each other, the
    /// outcome resolves immediately, and the attacker is tied up for one
    /// second. Rejected when the defender is more than one cube away on
    /// any axis; ignored while a previous attack is still winding down.
    pub fn attack(
        &mut self,
        defender: &mut Unit,
        world: &World,
        rng: &mut impl Rng,
    ) -> Result<(), UnitError> {
        if !self.cube().is_adjacent_to(defender.cube()) {
            return Err(UnitError::NotAdjacent {
                attacker: self.cube(),
                defender: defender.cube(),
            });
        }
        if self.activity.is_attacking() {
            return Ok(());
        }

        let to_defender = defender.position - self.position;
        self.set_orientation(to_defender.y.atan2(to_defender.x));
        defender.set_orientation((-to_defender.y).atan2(-to_defender.x));

        self.activity = Activity::Attacking {
            remaining: ATTACK_DURATION,
        };

        match combat::resolve(&self.attributes, &defender.attributes, rng) {
            AttackOutcome::Dodged => {
                let refuge = world.random_cube(rng);
                log::trace!("{} dodged {}", defender.name, self.name);
                defender.teleport_to(refuge);
            }
            AttackOutcome::Blocked => {
                log::trace!("{} blocked {}", defender.name, self.name);
            }
            AttackOutcome::Hit { damage } => {
                log::trace!("{} hit {} for {}", self.name, defender.name, damage);
                defender.hit_points = (defender.hit_points - damage).max(0.0);
            }
        }
        Ok(())
    }

    /// Relocate to the center of the given cube. A pending route is kept:
    /// the current leg collapses onto the new position, and the arrival
    /// logic re-plans from there on the next tick.
    fn teleport_to(&mut self, cube: Cube) {
        self.position = cube.center();
        if let Activity::Moving(leg) = &mut self.activity {
            leg.target = self.position;
            leg.vertical_factor = 1.0;
        }
    }

    // ── Default behavior toggles ────────────────────────────────────────

    pub fn is_default_behavior_enabled(&self) -> bool {
        self.default_behavior
    }

    pub fn set_default_behavior_enabled(&mut self, enabled: bool) {
        self.default_behavior = enabled;
    }

    pub fn start_default_behavior(&mut self) {
        self.default_behavior = true;
    }

    pub fn stop_default_behavior(&mut self) {
        self.default_behavior = false;
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the unit; the new name must pass [`Unit::is_valid_name`].
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), UnitError> {
        let name = name.into();
        if !Self::is_valid_name(&name) {
            return Err(UnitError::InvalidName { name });
        }
        self.name = name;
        Ok(())
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The cube the unit currently occupies.
    pub fn cube(&self) -> Cube {
        Cube::from_position(self.position)
    }

    /// Facing angle in radians, always in [0, 2*pi).
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: f32) {
        self.orientation = math::normalize_angle(orientation);
    }

    /// Speed in cubes per second: zero unless moving, scaled by the
    /// vertical factor of the current leg and doubled while sprinting.
    pub fn current_speed(&self) -> f32 {
        match self.activity {
            Activity::Moving(leg) => {
                kinematics::leg_speed(&self.attributes, leg.vertical_factor, leg.sprinting)
            }
            _ => 0.0,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.activity.is_moving()
    }

    pub fn is_sprinting(&self) -> bool {
        self.activity.is_sprinting()
    }

    pub fn is_working(&self) -> bool {
        self.activity.is_working()
    }

    pub fn is_resting(&self) -> bool {
        self.activity.is_resting()
    }

    pub fn is_attacking(&self) -> bool {
        self.activity.is_attacking()
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn hit_points(&self) -> f32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.attributes.max_hit_points()
    }

    /// Overwrite the hit point pool, clamped into [0, max]. Reaching zero
    /// is a signal for the embedding application; the unit itself keeps
    /// ticking.
    pub fn set_hit_points(&mut self, hit_points: f32) {
        self.hit_points = hit_points.clamp(0.0, self.max_hit_points() as f32);
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> u32 {
        self.attributes.max_stamina()
    }

    /// Overwrite the stamina pool, clamped into [0, max].
    pub fn set_stamina(&mut self, stamina: f32) {
        self.stamina = stamina.clamp(0.0, self.max_stamina() as f32);
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn strength(&self) -> u32 {
        self.attributes.strength()
    }

    pub fn agility(&self) -> u32 {
        self.attributes.agility()
    }

    pub fn toughness(&self) -> u32 {
        self.attributes.toughness()
    }

    pub fn weight(&self) -> u32 {
        self.attributes.weight()
    }

    pub fn set_strength(&mut self, strength: u32) {
        self.attributes.set_strength(strength);
    }

    pub fn set_agility(&mut self, agility: u32) {
        self.attributes.set_agility(agility);
    }

    pub fn set_toughness(&mut self, toughness: u32) {
        self.attributes.set_toughness(toughness);
    }

    pub fn set_weight(&mut self, weight: u32) {
        self.attributes.set_weight(weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world() -> World {
        World::default()
    }

    fn unit_at(cube: Cube) -> Unit {
        Unit::new("Test", cube, 50, 50, 50, 50, false, &world()).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_new_unit_defaults() {
        let unit = unit_at(Cube::new(10, 10, 10));
        assert_eq!(unit.position(), Vec3::new(10.5, 10.5, 10.5));
        assert_eq!(unit.orientation(), 0.0);
        assert_eq!(unit.hit_points(), 50.0);
        assert_eq!(unit.stamina(), 50.0);
        assert!(!unit.is_moving());
        assert!(!unit.is_resting());
        assert_eq!(unit.current_speed(), 0.0);
    }

    #[test]
    fn test_new_rejects_bad_name_and_cube() {
        let world = world();
        assert!(matches!(
            Unit::new("x", Cube::new(0, 0, 0), 50, 50, 50, 50, false, &world),
            Err(UnitError::InvalidName { .. })
        ));
        assert!(matches!(
            Unit::new("Test", Cube::new(50, 0, 0), 50, 50, 50, 50, false, &world),
            Err(UnitError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_name_validation() {
        assert!(Unit::is_valid_name("Ab"));
        assert!(Unit::is_valid_name("John O'Hara"));
        assert!(Unit::is_valid_name("D\"arc"));
        assert!(!Unit::is_valid_name(""));
        assert!(!Unit::is_valid_name("A"));
        assert!(!Unit::is_valid_name("john"));
        assert!(!Unit::is_valid_name("Jo3"));
        assert!(!Unit::is_valid_name("Jo-hn"));
    }

    #[test]
    fn test_invalid_dt_leaves_state_unchanged() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        unit.move_to(Cube::new(9, 5, 5), &world()).unwrap();
        let before = unit.clone();
        let mut rng = rng();
        assert!(matches!(
            unit.advance_time(0.5, &world(), &mut rng),
            Err(UnitError::InvalidTimeStep { .. })
        ));
        assert!(matches!(
            unit.advance_time(0.0, &world(), &mut rng),
            Err(UnitError::InvalidTimeStep { .. })
        ));
        assert!(matches!(
            unit.advance_time(-0.1, &world(), &mut rng),
            Err(UnitError::InvalidTimeStep { .. })
        ));
        assert_eq!(unit, before);
    }

    #[test]
    fn test_move_to_adjacent_walks_one_cube() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        let mut rng = rng();
        unit.move_to_adjacent(1, 0, 0, &world()).unwrap();
        assert!(unit.is_moving());
        assert!((unit.current_speed() - 1.5).abs() < 1e-6);

        // 1.0 cube at 1.5 cubes/s: done within 0.7s
        for _ in 0..4 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
        }
        assert_eq!(unit.cube(), Cube::new(6, 5, 5));
        assert_eq!(unit.position(), Cube::new(6, 5, 5).center());
        assert!(!unit.is_moving());
        // facing +x
        assert!(unit.orientation().abs() < 1e-5);
    }

    #[test]
    fn test_move_to_adjacent_rejects_out_of_world() {
        let mut unit = unit_at(Cube::new(0, 0, 0));
        let err = unit.move_to_adjacent(-1, 0, 0, &world());
        assert!(matches!(err, Err(UnitError::OutOfBounds { .. })));
        assert!(!unit.is_moving());

        let err = unit.move_to_adjacent(2, 0, 0, &world());
        assert!(matches!(err, Err(UnitError::InvalidStep { .. })));
    }

    #[test]
    fn test_arrival_is_idempotent() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        let mut rng = rng();
        unit.move_to_adjacent(0, 1, 0, &world()).unwrap();
        for _ in 0..10 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
        }
        let arrived = unit.position();
        for _ in 0..10 {
            unit.advance_time(0.1, &world(), &mut rng).unwrap();
        }
        assert_eq!(unit.position(), arrived);
        assert!(!unit.is_moving());
    }

    #[test]
    fn test_move_to_crosses_multiple_cubes() {
        let mut unit = unit_at(Cube::new(0, 0, 0));
        let mut rng = rng();
        unit.move_to(Cube::new(3, 0, 0), &world()).unwrap();
        for _ in 0..100 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
            if !unit.is_moving() {
                break;
            }
        }
        assert_eq!(unit.cube(), Cube::new(3, 0, 0));
        assert!(!unit.is_moving());
    }

    #[test]
    fn test_vertical_legs_change_speed() {
        let mut rng = rng();
        let mut unit = unit_at(Cube::new(5, 5, 5));
        unit.move_to_adjacent(0, 0, 1, &world()).unwrap();
        assert!((unit.current_speed() - 1.8).abs() < 1e-6);

        // the factor holds for the whole leg, even past the cube boundary
        unit.advance_time(0.2, &world(), &mut rng).unwrap();
        unit.advance_time(0.2, &world(), &mut rng).unwrap();
        assert_eq!(unit.cube(), Cube::new(5, 5, 6));
        assert!(unit.is_moving());
        assert!((unit.current_speed() - 1.8).abs() < 1e-6);

        let mut unit = unit_at(Cube::new(5, 5, 5));
        unit.move_to_adjacent(0, 0, -1, &world()).unwrap();
        assert!((unit.current_speed() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_sprint_drains_stamina_and_stops_empty() {
        let mut unit = unit_at(Cube::new(0, 0, 0));
        let mut rng = rng();
        unit.set_stamina(3.0);
        unit.move_to(Cube::new(49, 0, 0), &world()).unwrap();
        unit.start_sprinting();
        assert!(unit.is_sprinting());

        // 0.2s of sprint = 2 points
        unit.advance_time(0.2, &world(), &mut rng).unwrap();
        assert_eq!(unit.stamina(), 1.0);
        assert!(unit.is_sprinting());

        unit.advance_time(0.2, &world(), &mut rng).unwrap();
        assert_eq!(unit.stamina(), 0.0);
        assert!(!unit.is_sprinting());
        assert!(unit.is_moving());

        // cannot restart with an empty pool
        unit.start_sprinting();
        assert!(!unit.is_sprinting());
    }

    #[test]
    fn test_work_runs_down_and_finishes() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        let mut rng = rng();
        unit.work();
        assert!(unit.is_working());
        // 500 / 50 = 10 seconds
        for _ in 0..49 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
            assert!(unit.is_working());
        }
        unit.advance_time(0.2, &world(), &mut rng).unwrap();
        assert!(!unit.is_working());
    }

    #[test]
    fn test_work_gated_while_moving_and_attacking() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        unit.move_to_adjacent(1, 0, 0, &world()).unwrap();
        unit.work();
        assert!(unit.is_moving());
        assert!(!unit.is_working());

        let mut attacker = unit_at(Cube::new(5, 5, 5));
        let mut defender = unit_at(Cube::new(6, 5, 5));
        let mut rng = rng();
        attacker.attack(&mut defender, &world(), &mut rng).unwrap();
        attacker.work();
        assert!(attacker.is_attacking());
        assert!(!attacker.is_working());
    }

    #[test]
    fn test_rest_recovers_hit_points_then_stamina() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        let mut rng = rng();
        unit.set_hit_points(48.0);
        unit.set_stamina(49.0);
        unit.rest();
        assert!(unit.is_resting());

        // toughness 50: one hit point per 0.8s, one stamina point per 0.4s.
        // After 1.0s: one hit point granted, stamina untouched.
        for _ in 0..5 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
        }
        assert_eq!(unit.hit_points(), 49.0);
        assert_eq!(unit.stamina(), 49.0);

        // hit points full at 1.6s; the 0.4s stamina interval then starts
        // filling from the leftover accumulator
        for _ in 0..10 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
            if !unit.is_resting() {
                break;
            }
        }
        assert_eq!(unit.hit_points(), 50.0);
        assert_eq!(unit.stamina(), 50.0);
        assert!(!unit.is_resting());
    }

    #[test]
    fn test_min_rest_lock_blocks_interruption() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        let mut rng = rng();
        unit.set_hit_points(10.0);
        unit.rest();
        // lock for toughness 50 is 0.8s
        assert!(unit.activity().is_rest_locked());

        unit.work();
        assert!(unit.is_resting());
        unit.move_to(Cube::new(9, 5, 5), &world()).unwrap();
        assert!(unit.is_resting());

        // 0.6s in: still locked
        for _ in 0..3 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
        }
        assert!(unit.activity().is_rest_locked());

        // 1.0s in: lock has run out, work is allowed again
        for _ in 0..2 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
        }
        assert!(!unit.activity().is_rest_locked());
        unit.work();
        assert!(unit.is_working());
    }

    #[test]
    fn test_forced_rest_after_three_minutes() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        let mut rng = rng();
        // 180s at 0.2s per tick is 900 ticks, give or take float drift
        let mut ticks = 0;
        while !unit.is_resting() {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
            ticks += 1;
            assert!(ticks <= 905, "forced rest never kicked in");
        }
        assert!((895..=905).contains(&ticks), "forced after {} ticks", ticks);

        // pools are full, so the rest completes on the next tick and the
        // clock starts over
        unit.advance_time(0.2, &world(), &mut rng).unwrap();
        assert!(!unit.is_resting());
        for _ in 0..890 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
            assert!(!unit.is_resting());
        }
    }

    #[test]
    fn test_voluntary_rest_resets_forced_rest_clock() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        let mut rng = rng();
        for _ in 0..500 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
        }
        unit.rest();
        // rest with full pools ends immediately on the next tick
        unit.advance_time(0.2, &world(), &mut rng).unwrap();
        assert!(!unit.is_resting());
        // the 100s accumulated before the rest are gone
        for _ in 0..890 {
            unit.advance_time(0.2, &world(), &mut rng).unwrap();
            assert!(!unit.is_resting());
        }
    }

    #[test]
    fn test_attack_requires_adjacency() {
        let mut attacker = unit_at(Cube::new(5, 5, 5));
        let mut defender = unit_at(Cube::new(8, 5, 5));
        let mut rng = rng();
        let before = (attacker.clone(), defender.clone());
        assert!(matches!(
            attacker.attack(&mut defender, &world(), &mut rng),
            Err(UnitError::NotAdjacent { .. })
        ));
        assert_eq!(attacker, before.0);
        assert_eq!(defender, before.1);
    }

    #[test]
    fn test_attack_faces_and_ties_up_attacker() {
        let mut attacker = unit_at(Cube::new(5, 5, 5));
        let mut defender = unit_at(Cube::new(6, 5, 5));
        let mut rng = rng();
        attacker.move_to(Cube::new(9, 5, 5), &world()).unwrap();
        attacker.attack(&mut defender, &world(), &mut rng).unwrap();

        assert!(attacker.is_attacking());
        assert!(!attacker.is_moving());
        // attacker looks along +x, defender along -x
        assert!(attacker.orientation().abs() < 1e-5);
        assert!((defender.orientation() - std::f32::consts::PI).abs() < 1e-5);

        // the window runs out after one second
        for _ in 0..5 {
            assert!(attacker.is_attacking());
            attacker.advance_time(0.2, &world(), &mut rng).unwrap();
        }
        assert!(!attacker.is_attacking());
    }

    #[test]
    fn test_movement_ignored_during_attack_window() {
        let mut attacker = unit_at(Cube::new(5, 5, 5));
        let mut defender = unit_at(Cube::new(6, 5, 5));
        let mut rng = rng();
        attacker.attack(&mut defender, &world(), &mut rng).unwrap();

        attacker.move_to(Cube::new(9, 5, 5), &world()).unwrap();
        assert!(attacker.is_attacking());
        assert!(!attacker.is_moving());
    }

    #[test]
    fn test_dodged_attack_relocates_defender_unharmed() {
        let mut attacker = unit_at(Cube::new(5, 5, 5));
        attacker.set_agility(40);
        let mut defender = unit_at(Cube::new(6, 5, 5));
        defender.set_agility(200);
        // dodge probability 0.20 * 200 / 40 = 1.0
        let mut rng = rng();
        attacker.attack(&mut defender, &world(), &mut rng).unwrap();
        assert_eq!(defender.hit_points(), 50.0);
        assert!(world().contains(defender.cube()));
        assert_eq!(defender.position(), defender.cube().center());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        // 20 damage per landed hit against 3 hit points; fresh pair per
        // swing so a stray dodge teleport cannot break adjacency
        let mut rng = rng();
        let mut landed = false;
        for _ in 0..100 {
            let mut attacker = unit_at(Cube::new(5, 5, 5));
            attacker.set_strength(200);
            attacker.set_agility(200);
            let mut defender = unit_at(Cube::new(6, 5, 5));
            defender.set_agility(1);
            defender.set_strength(1);
            defender.set_hit_points(3.0);

            attacker.attack(&mut defender, &world(), &mut rng).unwrap();
            assert!(defender.hit_points() >= 0.0);
            if defender.hit_points() < 3.0 {
                assert_eq!(defender.hit_points(), 0.0);
                landed = true;
            }
        }
        assert!(landed, "no attack landed in 100 swings");
    }

    #[test]
    fn test_default_behavior_picks_an_activity() {
        let world = world();
        let mut rng = rng();
        let mut unit = Unit::new("Idler", Cube::new(25, 25, 25), 50, 50, 50, 50, true, &world)
            .unwrap();
        unit.advance_time(0.2, &world, &mut rng).unwrap();
        assert!(unit.is_moving() || unit.is_working() || unit.is_resting());
    }

    #[test]
    fn test_pools_stay_in_range_under_churn() {
        let world = world();
        let mut rng = rng();
        let mut unit = Unit::new("Churn", Cube::new(25, 25, 25), 60, 40, 75, 80, true, &world)
            .unwrap();
        for _ in 0..5_000 {
            unit.advance_time(0.17, &world, &mut rng).unwrap();
            assert!(unit.hit_points() >= 0.0);
            assert!(unit.hit_points() <= unit.max_hit_points() as f32);
            assert!(unit.stamina() >= 0.0);
            assert!(unit.stamina() <= unit.max_stamina() as f32);
            assert!(world.contains(unit.cube()));
            let o = unit.orientation();
            assert!((0.0..std::f32::consts::TAU).contains(&o));
        }
    }

    #[test]
    fn test_orientation_setter_normalizes() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        unit.set_orientation(-std::f32::consts::FRAC_PI_2);
        assert!((unit.orientation() - 3.0 * std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        unit.set_orientation(7.0);
        assert!((unit.orientation() - (7.0 - std::f32::consts::TAU)).abs() < 1e-5);
    }

    #[test]
    fn test_weight_change_moves_caps_not_pools() {
        let mut unit = unit_at(Cube::new(5, 5, 5));
        assert_eq!(unit.max_hit_points(), 50);
        unit.set_weight(100);
        assert_eq!(unit.max_hit_points(), 100);
        // current pools are untouched by the cap change
        assert_eq!(unit.hit_points(), 50.0);
        unit.set_weight(50);
        assert_eq!(unit.max_hit_points(), 50);
    }
}