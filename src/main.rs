//! Grindline headless demo
//!
//! Runs the autopilot over a level and prints what happened.
//!
//! Usage: `grindline [level.json] [tuning.json]`

use grindline::consts::SIM_DT;
use grindline::sim::{Autopilot, GameEvent, Level, Tee, World};
use grindline::{ScoreTally, Tuning};

/// Simulated run length (seconds)
const RUN_SECONDS: f64 = 20.0;
/// Rendered frame rate the demo pretends to run at
const FRAME_DT: f64 = 1.0 / 60.0;

fn load_level(path: Option<&str>) -> Level {
    let Some(path) = path else {
        return Level::demo();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Level::from_json(&json) {
            Ok(level) => level,
            Err(err) => {
                log::warn!("Could not parse {}: {}, using demo level", path, err);
                Level::demo()
            }
        },
        Err(err) => {
            log::warn!("Could not read {}: {}, using demo level", path, err);
            Level::demo()
        }
    }
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Tuning::from_json_or_default(&json),
        Err(err) => {
            log::warn!("Could not read {}: {}, using default tuning", path, err);
            Tuning::default()
        }
    }
}

fn log_events(events: &[GameEvent], time: f64) {
    for event in events {
        match event {
            GameEvent::Trick { name, points } => log::info!("[{:6.2}s] {} +{}", time, name, points),
            GameEvent::TrickFailed { name } => log::info!("[{:6.2}s] bailed {}", time, name),
            GameEvent::CoinCollected { points, at } => {
                log::info!("[{:6.2}s] coin +{} at ({:.0}, {:.0})", time, points, at.x, at.y)
            }
            GameEvent::HardLanding { impact_speed, .. } => {
                log::info!("[{:6.2}s] hard landing ({:.0} px/s)", time, impact_speed)
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Grindline (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let level = load_level(args.first().map(String::as_str));
    let tuning = load_tuning(args.get(1).map(String::as_str));

    let mut world = World::new(level, tuning);
    let mut pilot = Autopilot::new(0x5eed);
    let mut tally = ScoreTally::new();
    let mut frame_events: Vec<GameEvent> = Vec::new();

    let frames = (RUN_SECONDS / FRAME_DT).round() as u32;
    for _ in 0..frames {
        // The autopilot decides once per frame, like a player reading the screen
        let input = pilot.next_input(&world.player, &world.level.terrain, FRAME_DT);
        frame_events.clear();
        let mut sink = Tee(&mut tally, &mut frame_events);
        world.advance(FRAME_DT, &input, &mut sink);
        log_events(&frame_events, world.elapsed());
    }

    let player = &world.player;
    println!(
        "\n=== Run summary ({:.1}s, {} ticks at {:.0} Hz) ===",
        world.elapsed(),
        world.ticks,
        1.0 / SIM_DT
    );
    println!("Score:          {}", tally.score);
    println!("Coins:          {} / {}", tally.coins, world.level.coins.len());
    println!("Tricks landed:  {}", tally.tricks_landed);
    println!("Tricks failed:  {}", tally.tricks_failed);
    println!("Hard landings:  {}", tally.hard_landings);
    if let Some(best) = tally.best_trick() {
        println!("Best trick:     {} ({})", best.name, best.points);
    }
    println!(
        "Final state:    {} at ({:.0}, {:.0}), {:.0} px/s",
        player.state.as_str(),
        player.position.x,
        player.position.y,
        player.speed()
    );
}
