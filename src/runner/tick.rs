//! Fixed-step runner tick
//!
//! Spawn timing is counted in ticks rather than wall-clock milliseconds so
//! a run replays identically from its seed and inputs.

use super::consts::*;
use super::state::{RunPhase, RunnerState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct RunnerInput {
    /// Jump while playing; start or restart otherwise
    pub action: bool,
}

/// Advance the run by one tick
pub fn tick(state: &mut RunnerState, input: &RunnerInput) {
    match state.phase {
        RunPhase::Start | RunPhase::GameOver => {
            if input.action {
                state.reset_run();
                state.phase = RunPhase::Playing;
                log::info!("Run started");
            }
        }
        RunPhase::Playing => {
            if input.action {
                state.dino.jump();
            }
            step_playing(state);
        }
    }
}

fn step_playing(state: &mut RunnerState) {
    state.time_ticks += 1;
    state.dino.update();

    // Spawn
    state.spawn_timer += 1;
    if state.spawn_timer > state.next_spawn_ticks {
        state.spawn_obstacle();
        state.schedule_next_spawn();
    }

    // Scroll, collide, cull
    let speed = state.speed;
    let mut crashed = false;
    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
        if obstacle.collides_with(&state.dino) {
            crashed = true;
        }
    }
    state.obstacles.retain(|o| !o.is_offscreen());

    // Difficulty and day/night
    state.score += SCORE_PER_TICK * state.speed_ratio();
    state.speed += state.settings.runner_speed_increase;
    // Day/night follows the already-raised speed
    state.time_of_day = (state.time_of_day + DAY_CYCLE_PER_TICK * state.speed_ratio()) % 1.0;

    if crashed {
        state.phase = RunPhase::GameOver;
        log::info!(
            "Run over after {} ticks, score {}",
            state.time_ticks,
            state.display_score()
        );
    }
}
