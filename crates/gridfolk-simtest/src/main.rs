//! Gridfolk Headless Simulation Harness
//!
//! Drives units through scripted scenarios against the public API and
//! checks the observable outcomes. Runs entirely in-process — no rendering,
//! no networking, fixed seeds throughout.
//!
//! Usage:
//!   cargo run -p gridfolk-simtest
//!   cargo run -p gridfolk-simtest -- --verbose
//!   cargo run -p gridfolk-simtest -- --json

use gridfolk_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

const TICK: f32 = 0.2;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct Summary {
    total: usize,
    passed: usize,
    failed: usize,
    results: Vec<TestResult>,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Gridfolk Simulation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Movement and arrival
    results.extend(validate_movement(json));

    // 2. Sprint economy
    results.extend(validate_sprinting(json));

    // 3. Work cycle
    results.extend(validate_work(json));

    // 4. Rest, recovery ordering, forced rest
    results.extend(validate_rest(json));

    // 5. Combat outcome convergence
    results.extend(validate_combat(json));

    // 6. Long-run invariants under default behavior
    results.extend(validate_invariants(json));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if json {
        let summary = Summary {
            total,
            passed,
            failed,
            results,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).expect("summary serializes")
        );
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn section(json: bool, title: &str) {
    if !json {
        println!("--- {} ---", title);
    }
}

// ── 1. Movement ─────────────────────────────────────────────────────────

fn validate_movement(json: bool) -> Vec<TestResult> {
    section(json, "Movement");
    let mut results = Vec::new();
    let world = World::default();
    let mut rng = ChaCha8Rng::seed_from_u64(101);

    // Long walk across three cubes
    let mut unit = Unit::new("Walker", Cube::new(0, 0, 0), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    unit.move_to(Cube::new(3, 0, 0), &world).expect("in world");
    let mut ticks = 0;
    while unit.is_moving() && ticks < 200 {
        unit.advance_time(TICK, &world, &mut rng).expect("valid tick");
        ticks += 1;
    }
    results.push(check(
        "walk_reaches_destination",
        unit.cube() == Cube::new(3, 0, 0) && !unit.is_moving(),
        format!("arrived at {:?} after {} ticks", unit.cube(), ticks),
    ));
    // 3 cubes at 1.5 cubes/s is 2.0s; leg snapping rounds up to whole ticks
    results.push(check(
        "walk_duration_plausible",
        (10..=15).contains(&ticks),
        format!("{} ticks for 3 cubes", ticks),
    ));

    // Vertical legs change speed
    let mut climber = Unit::new("Climber", Cube::new(5, 5, 5), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    climber.move_to_adjacent(0, 0, 1, &world).expect("in world");
    let up = climber.current_speed();
    let mut sinker = Unit::new("Sinker", Cube::new(5, 5, 5), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    sinker.move_to_adjacent(0, 0, -1, &world).expect("in world");
    let down = sinker.current_speed();
    results.push(check(
        "vertical_speed_factors",
        (up - 1.8).abs() < 1e-5 && (down - 0.75).abs() < 1e-5,
        format!("up {} down {}", up, down),
    ));

    // Out-of-world step is rejected without a state change
    let mut cornered = Unit::new("Cornered", Cube::new(0, 0, 0), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    let rejected = cornered.move_to_adjacent(-1, 0, 0, &world).is_err();
    results.push(check(
        "world_edge_rejected",
        rejected && !cornered.is_moving(),
        "step off the edge rejected, unit still idle".into(),
    ));

    // Oversized tick is rejected without a state change
    let before = cornered.clone();
    let rejected = cornered.advance_time(0.5, &world, &mut rng).is_err();
    results.push(check(
        "oversized_tick_rejected",
        rejected && cornered == before,
        "dt = 0.5 rejected, state untouched".into(),
    ));

    results
}

// ── 2. Sprinting ────────────────────────────────────────────────────────

fn validate_sprinting(json: bool) -> Vec<TestResult> {
    section(json, "Sprinting");
    let mut results = Vec::new();
    let world = World::default();
    let mut rng = ChaCha8Rng::seed_from_u64(102);

    let mut runner = Unit::new("Runner", Cube::new(0, 25, 0), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    runner.move_to(Cube::new(49, 25, 0), &world).expect("in world");
    runner.start_sprinting();

    let walk_speed = 1.5;
    results.push(check(
        "sprint_doubles_speed",
        (runner.current_speed() - 2.0 * walk_speed).abs() < 1e-5,
        format!("sprint speed {}", runner.current_speed()),
    ));

    // 2 seconds of sprint: 20 stamina points
    for _ in 0..10 {
        runner.advance_time(TICK, &world, &mut rng).expect("valid tick");
    }
    results.push(check(
        "sprint_drain_rate",
        runner.stamina() == 30.0,
        format!("stamina {} after 2s of sprint", runner.stamina()),
    ));

    // run the pool dry: sprint stops by itself, walk continues
    let mut ticks = 0;
    while runner.is_sprinting() && ticks < 100 {
        runner.advance_time(TICK, &world, &mut rng).expect("valid tick");
        ticks += 1;
    }
    results.push(check(
        "sprint_stops_when_exhausted",
        runner.stamina() == 0.0 && !runner.is_sprinting() && runner.is_moving(),
        format!("stamina {} after {} more ticks", runner.stamina(), ticks),
    ));

    results
}

// ── 3. Work ─────────────────────────────────────────────────────────────

fn validate_work(json: bool) -> Vec<TestResult> {
    section(json, "Work");
    let mut results = Vec::new();
    let world = World::default();
    let mut rng = ChaCha8Rng::seed_from_u64(103);

    // 500 / strength seconds: strength 100 works for 5s
    let mut worker = Unit::new("Worker", Cube::new(5, 5, 5), 100, 50, 50, 80, false, &world)
        .expect("valid unit");
    worker.work();
    let mut ticks = 0;
    while worker.is_working() && ticks < 100 {
        worker.advance_time(TICK, &world, &mut rng).expect("valid tick");
        ticks += 1;
    }
    results.push(check(
        "work_duration_scales_with_strength",
        (24..=26).contains(&ticks),
        format!("strength 100 worked for {} ticks", ticks),
    ));

    // work is ignored while moving
    let mut mover = Unit::new("Mover", Cube::new(5, 5, 5), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    mover.move_to_adjacent(1, 0, 0, &world).expect("in world");
    mover.work();
    results.push(check(
        "work_gated_while_moving",
        mover.is_moving() && !mover.is_working(),
        "work command ignored mid-move".into(),
    ));

    results
}

// ── 4. Rest ─────────────────────────────────────────────────────────────

fn validate_rest(json: bool) -> Vec<TestResult> {
    section(json, "Rest");
    let mut results = Vec::new();
    let world = World::default();
    let mut rng = ChaCha8Rng::seed_from_u64(104);

    // drained pools refill hit-points-first, in the exact interval budget
    let mut sleeper = Unit::new("Sleeper", Cube::new(5, 5, 5), 50, 50, 100, 50, false, &world)
        .expect("valid unit");
    sleeper.set_hit_points(0.0);
    sleeper.set_stamina(0.0);
    sleeper.rest();

    let mut ordering_held = true;
    let mut ticks = 0;
    while sleeper.is_resting() && ticks < 400 {
        sleeper.advance_time(TICK, &world, &mut rng).expect("valid tick");
        ticks += 1;
        if sleeper.hit_points() < sleeper.max_hit_points() as f32 && sleeper.stamina() > 0.0 {
            ordering_held = false;
        }
    }
    let elapsed = ticks as f32 * TICK;
    results.push(check(
        "rest_hit_points_first",
        ordering_held,
        "no stamina before hit points were full".into(),
    ));
    results.push(check(
        "rest_exact_budget",
        (59.5..=60.5).contains(&elapsed) && sleeper.stamina() == 100.0,
        format!("full refill in {:.1}s (expected ~60s)", elapsed),
    ));

    // forced rest: 180s without rest pulls the unit out of its routine
    let mut restless = Unit::new("Restless", Cube::new(5, 5, 5), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    let mut ticks = 0;
    while !restless.is_resting() && ticks < 910 {
        restless.advance_time(TICK, &world, &mut rng).expect("valid tick");
        ticks += 1;
    }
    results.push(check(
        "forced_rest_at_three_minutes",
        (895..=905).contains(&ticks),
        format!("rest forced after {} ticks", ticks),
    ));

    results
}

// ── 5. Combat ───────────────────────────────────────────────────────────

fn validate_combat(json: bool) -> Vec<TestResult> {
    section(json, "Combat");
    let mut results = Vec::new();
    let world = World::default();
    let mut rng = ChaCha8Rng::seed_from_u64(105);

    let trials = 1000;
    let mut dodged = 0usize;
    let mut blocked = 0usize;
    let mut hits = 0usize;
    let mut damage_ok = true;
    let mut relocation_ok = true;

    for _ in 0..trials {
        let mut attacker = Unit::new("Att", Cube::new(5, 5, 5), 50, 50, 50, 50, false, &world)
            .expect("valid unit");
        let mut defender = Unit::new("Def", Cube::new(6, 5, 5), 50, 50, 50, 50, false, &world)
            .expect("valid unit");
        let spawn = defender.position();

        attacker
            .attack(&mut defender, &world, &mut rng)
            .expect("adjacent attack");

        if defender.hit_points() < 50.0 {
            hits += 1;
            if defender.hit_points() != 45.0 {
                damage_ok = false;
            }
        } else if defender.position() != spawn {
            dodged += 1;
            if !world.contains(defender.cube()) {
                relocation_ok = false;
            }
        } else {
            blocked += 1;
        }
    }

    let dodge_rate = dodged as f32 / trials as f32;
    let block_rate = blocked as f32 / trials as f32;
    let hit_rate = hits as f32 / trials as f32;

    // even match: dodge 0.20, block 0.80 * 0.25 = 0.20, hit 0.60
    results.push(check(
        "dodge_rate_converges",
        (dodge_rate - 0.20).abs() < 0.05,
        format!("dodge rate {:.3} (expected 0.20)", dodge_rate),
    ));
    results.push(check(
        "block_rate_converges",
        (block_rate - 0.20).abs() < 0.05,
        format!("block rate {:.3} (expected 0.20)", block_rate),
    ));
    results.push(check(
        "hit_rate_converges",
        (hit_rate - 0.60).abs() < 0.05,
        format!("hit rate {:.3} (expected 0.60)", hit_rate),
    ));
    results.push(check(
        "hit_damage_is_strength_tenth",
        damage_ok,
        "every landed hit removed exactly 5.0 hit points".into(),
    ));
    results.push(check(
        "dodge_relocation_in_world",
        relocation_ok,
        "every dodge landed inside the world".into(),
    ));

    // non-adjacent attack is rejected
    let mut far = Unit::new("Far", Cube::new(0, 0, 0), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    let mut away = Unit::new("Away", Cube::new(9, 0, 0), 50, 50, 50, 50, false, &world)
        .expect("valid unit");
    results.push(check(
        "distant_attack_rejected",
        far.attack(&mut away, &world, &mut rng).is_err() && !far.is_attacking(),
        "attack across 9 cubes rejected".into(),
    ));

    results
}

// ── 6. Long-run invariants ──────────────────────────────────────────────

fn validate_invariants(json: bool) -> Vec<TestResult> {
    section(json, "Invariants");
    let mut results = Vec::new();
    let world = World::default();
    let mut rng = ChaCha8Rng::seed_from_u64(106);

    let mut unit = Unit::new("Drifter", Cube::new(25, 25, 25), 60, 40, 75, 80, true, &world)
        .expect("valid unit");

    let mut pools_ok = true;
    let mut bounds_ok = true;
    let mut orientation_ok = true;
    let ticks = 20_000;
    for _ in 0..ticks {
        unit.advance_time(TICK, &world, &mut rng).expect("valid tick");
        if unit.hit_points() < 0.0
            || unit.hit_points() > unit.max_hit_points() as f32
            || unit.stamina() < 0.0
            || unit.stamina() > unit.max_stamina() as f32
        {
            pools_ok = false;
        }
        if !world.contains(unit.cube()) {
            bounds_ok = false;
        }
        if !(0.0..std::f32::consts::TAU).contains(&unit.orientation()) {
            orientation_ok = false;
        }
    }

    results.push(check(
        "pools_stay_in_range",
        pools_ok,
        format!("{} default-behavior ticks", ticks),
    ));
    results.push(check(
        "position_stays_in_world",
        bounds_ok,
        "unit never left the world".into(),
    ));
    results.push(check(
        "orientation_stays_normalized",
        orientation_ok,
        "orientation always in [0, 2*pi)".into(),
    ));

    results
}
