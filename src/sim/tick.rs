//! Fixed-step match tick and turn state machine
//!
//! Player actions are only honoured for the player whose turn it is.
//! While a shot is airborne the tick delegates to the ballistics step and
//! hands the turn over once the flight ends.

use super::ballistics::{FlightOutcome, step_projectile};
use super::state::{GameState, MatchState, PlayerId, Projectile};

/// Input commands for a single tick, applied to the active player
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Degrees to add to the barrel angle
    pub aim_delta: f32,
    /// Power to add
    pub power_delta: f32,
    /// Fire the current shot
    pub fire: bool,
    /// Throw the match away and start a new one
    pub reset: bool,
}

/// Nudge a player's aim; ignored unless it is their turn
pub fn adjust_aim(state: &mut GameState, player: PlayerId, delta: f32) -> bool {
    if state.state.active_player() != Some(player) {
        return false;
    }
    state.tank_mut(player).adjust_aim(delta);
    true
}

/// Nudge a player's power; ignored unless it is their turn
pub fn adjust_power(state: &mut GameState, player: PlayerId, delta: f32) -> bool {
    if state.state.active_player() != Some(player) {
        return false;
    }
    state.tank_mut(player).adjust_power(delta);
    true
}

/// Launch the active player's shot
///
/// Refused when it is not `player`'s turn or they are out of shots. The
/// current weather is frozen into the projectile for its whole flight.
pub fn fire(state: &mut GameState, player: PlayerId) -> bool {
    if state.state.active_player() != Some(player) {
        return false;
    }
    let environment = state.environment;
    let tank = state.tank_mut(player);
    if tank.shots_left == 0 {
        return false;
    }

    tank.shots_left -= 1;
    let big_shot = tank.big_shot_ready();
    if big_shot {
        tank.consecutive_hits = 0;
    }

    let projectile = Projectile::launch(tank, environment, big_shot);
    log::info!(
        "{:?} fires (angle {:.0}, power {:.0}, big {}), {} shots left",
        player,
        tank.angle,
        tank.power,
        big_shot,
        tank.shots_left
    );

    state.projectile = Some(projectile);
    state.state = MatchState::ProjectileAirborne;
    true
}

/// Replace the whole match with a fresh one
pub fn request_reset(state: &mut GameState) {
    let seed = state.next_match_seed();
    let settings = state.settings.clone();
    log::info!("Match reset requested");
    *state = GameState::with_settings(seed, settings);
}

/// Advance the match by one fixed timestep
///
/// Returns the flight outcome when a shot was in the air this tick.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<FlightOutcome> {
    if input.reset {
        request_reset(state);
        return None;
    }

    if state.state == MatchState::GameOver {
        return None;
    }

    state.time_ticks += 1;

    if let Some(player) = state.state.active_player() {
        if input.aim_delta != 0.0 {
            adjust_aim(state, player, input.aim_delta);
        }
        if input.power_delta != 0.0 {
            adjust_power(state, player, input.power_delta);
        }
        if input.fire {
            fire(state, player);
        }
        return None;
    }

    // ProjectileAirborne
    let Some(mut projectile) = state.projectile.take() else {
        // Nothing in the air; hand the turn back to player one
        log::warn!("Airborne state without a projectile");
        state.state = MatchState::Player1Turn;
        return None;
    };

    let outcome = step_projectile(
        &mut projectile,
        &mut state.terrain,
        &mut state.tank1,
        &mut state.tank2,
    );

    if outcome.is_terminal() {
        end_flight(state, projectile.owner);
    } else {
        state.projectile = Some(projectile);
    }
    Some(outcome)
}

/// Flight is over: finish the match or pass the turn
fn end_flight(state: &mut GameState, owner: PlayerId) {
    state.projectile = None;

    let t1 = &state.tank1;
    let t2 = &state.tank2;
    if !t1.is_alive() || !t2.is_alive() || (t1.shots_left == 0 && t2.shots_left == 0) {
        state.state = MatchState::GameOver;
        log::info!(
            "Game over after {} ticks: {:?} (health {:.0} vs {:.0})",
            state.time_ticks,
            state.outcome(),
            state.tank1.health,
            state.tank2.health
        );
        return;
    }

    let next = owner.opponent();
    state.state = next.turn();
    state.reroll_environment();
    state.drop_tanks_to_ground();
    log::info!(
        "{:?} to play: wind {}, gravity {:.1}G",
        next,
        state.environment.wind_strength(),
        state.environment.gravity_g()
    );
}
