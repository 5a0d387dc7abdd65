//! Sketchbook entry point
//!
//! Headless driver: prints a Fibonacci report and plays scripted rounds of
//! the two game simulations, logging how they end. Run with
//! `RUST_LOG=info` to follow along.

use sketchbook_sim::numeric::{FibonacciRequest, evaluate};
use sketchbook_sim::runner::{RunPhase, RunnerInput, RunnerState};
use sketchbook_sim::settings::Settings;
use sketchbook_sim::sim::{GameState, MatchState, TickInput, tick};

/// Give up on a scripted match after this many ticks
const MAX_DEMO_TICKS: u64 = 200_000;

fn main() {
    env_logger::init();
    log::info!("Sketchbook (native) starting...");

    let mut args = std::env::args().skip(1);
    let n_arg = args.next().unwrap_or_else(|| "20".to_string());
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    println!("\nFibonacci palindrome finder");
    match FibonacciRequest::parse(&n_arg).and_then(evaluate) {
        Ok(report) => println!("{report}"),
        Err(e) => println!("{e}"),
    }

    let seed = 0x5EED_u64;
    println!("\nArtillery duel (seed {seed})");
    play_artillery(seed, settings.clone());

    println!("\nEndless runner (seed {seed})");
    play_runner(seed, settings);
}

/// Both players fire at fixed aims, nudging power each turn
fn play_artillery(seed: u64, settings: Settings) {
    let mut state = GameState::with_settings(seed, settings);
    let mut turns = 0u32;

    while state.state != MatchState::GameOver && state.time_ticks < MAX_DEMO_TICKS {
        let input = match state.state.active_player() {
            Some(_) => {
                turns += 1;
                TickInput {
                    power_delta: if turns % 2 == 0 { 2.0 } else { -1.0 },
                    fire: true,
                    ..Default::default()
                }
            }
            None => TickInput::default(),
        };
        tick(&mut state, &input);
    }

    let snap = state.snapshot();
    println!(
        "State: {:?} after {} ticks, outcome {:?}",
        snap.state, snap.tick, snap.outcome
    );
    for tank in &snap.tanks {
        println!(
            "  {:?}: HP {:.0} | Shots {} | Combo {}/3",
            tank.player, tank.health, tank.shots_left, tank.consecutive_hits
        );
    }
}

/// Jump on a fixed rhythm until the dino trips
fn play_runner(seed: u64, settings: Settings) {
    let mut state = RunnerState::with_settings(seed, settings);
    sketchbook_sim::runner::tick(&mut state, &RunnerInput { action: true });

    while state.phase == RunPhase::Playing && state.time_ticks < MAX_DEMO_TICKS {
        let input = RunnerInput {
            action: state.time_ticks % 50 == 0,
        };
        sketchbook_sim::runner::tick(&mut state, &input);
    }

    println!(
        "Final Score: {} ({} ticks, {} obstacles on screen)",
        state.display_score(),
        state.time_ticks,
        state.obstacles.len()
    );
}
