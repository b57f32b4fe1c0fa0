//! Per-frame simulation tick
//!
//! Order matters: the player is integrated first so both pools test against a
//! fresh bounding box, and a fatal result stops everything after it.

use super::collision::{FatalCause, Scorer, TickOutcome};
use super::player::PlayerStep;
use super::state::GameState;
use crate::error::{Result, RunnerError};

/// Advance a running game by `dt` seconds
///
/// A fatal collision ends the run before returning. Errors mean the state is no
/// longer trustworthy; the caller is expected to end the run.
pub fn tick(state: &mut GameState, dt: f32) -> Result<TickOutcome> {
    if !state.session.is_running() {
        return Ok(TickOutcome::Continue);
    }

    state.clock.advance(dt);
    state.time_ticks += 1;

    let outcome = advance_world(state, dt)?;
    if let TickOutcome::Fatal(cause) = outcome {
        state.end_run(cause);
    }
    Ok(outcome)
}

fn advance_world(state: &mut GameState, dt: f32) -> Result<TickOutcome> {
    let step = state.player.integrate(dt, &state.tuning);
    if !state.player.is_finite() {
        return Err(RunnerError::NonFinite("player"));
    }
    if step == PlayerStep::GroundBreach {
        log::info!("Hit the ground at x={:.2}", state.player.pos.x);
        return Ok(TickOutcome::Fatal(FatalCause::Ground));
    }

    let mut scorer = Scorer::new(&mut state.session.score, &mut state.events);

    let outcome = state.obstacles.tick(
        dt,
        state.clock.elapsed,
        &state.player,
        &state.tuning,
        &mut state.rng,
        &mut scorer,
    );
    if outcome.is_fatal() {
        return Ok(outcome);
    }
    if state.obstacles.pairs.iter().any(|p| !p.z.is_finite()) {
        return Err(RunnerError::NonFinite("obstacle"));
    }

    state.collectibles.tick(
        dt,
        &state.player,
        &state.tuning,
        &mut state.rng,
        &mut scorer,
    );

    Ok(TickOutcome::Continue)
}
