/// Game-logic transitions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle) and returns a brand-new
/// `GameSession`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, GameSession, GameStatus, Player, Projectile, Target};
use crate::error::GameError;
use crate::input::Controls;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening layout: player at its fixed start, target at a random
/// height heading in a random direction, no projectiles.
pub fn init_session(config: GameConfig, rng: &mut impl Rng) -> Result<GameSession, GameError> {
    config.validate()?;

    let (px, py) = config.player_start;
    let mut player = Player::new(px, py, config.sprite_size, config.player_move_speed);
    let field = config.field();
    player.clamp_to_bounds(&field);

    let target = Target::spawn(&config, rng);
    log::info!(
        "session start: target at y={} moving {:?}, first flip in {} ticks",
        target.body.y,
        target.direction,
        target.direction_change_interval
    );

    Ok(GameSession {
        config,
        field,
        player,
        target,
        projectiles: Vec::new(),
        status: GameStatus::Playing,
        quit_requested: false,
        tick: 0,
    })
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply one frame's held controls to the player.  Once the target is
/// struck only the quit control has any effect.
pub fn handle_input(state: &GameSession, controls: &Controls) -> GameSession {
    let mut next = state.clone();

    if controls.quit {
        next.quit_requested = true;
    }
    if next.status == GameStatus::Won {
        return next;
    }

    let step = next.player.move_speed;
    if controls.up {
        next.player.body.y = next.player.body.y.saturating_sub(step);
    }
    if controls.down {
        next.player.body.y = next.player.body.y.saturating_add(step);
    }

    if next.player.press_fire(controls.fire) {
        next = player_shoot(&next);
    }
    next
}

/// Spawn a projectile at the player's top-left corner, heading for x = 0.
pub fn player_shoot(state: &GameSession) -> GameSession {
    let body = state.player.body;
    let projectile = Projectile::new(body.x, body.y, body.size, state.config.projectile_speed);
    log::debug!("shot fired from ({}, {})", body.x, body.y);

    let mut projectiles = state.projectiles.clone();
    projectiles.push(projectile);
    GameSession {
        projectiles,
        ..state.clone()
    }
}

// ── Per-frame update (nearly pure — RNG is injected) ────────────────────────

/// Move every active entity one frame, then resolve strikes and misses.
/// A no-op once the target has been struck.
pub fn update(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    if state.status == GameStatus::Won {
        return state.clone();
    }

    let mut next = state.clone();
    let field = next.field;

    next.player.update(&field, rng);
    next.target.update(&field, rng);
    for projectile in next.projectiles.iter_mut() {
        projectile.update(&field, rng);
    }

    // Strikes are resolved against this frame's projectile positions, before
    // any projectile is retired at the boundary.
    if next.target.check_strike(&next.projectiles) {
        log::info!(
            "target struck on tick {} after {} missed shots",
            next.tick,
            next.player.missed_shots
        );
        next.status = GameStatus::Won;
        return next;
    }

    let before = next.projectiles.len();
    next.projectiles.retain(|p| !p.has_exited(&field));
    let missed = (before - next.projectiles.len()) as u32;
    if missed > 0 {
        next.player.missed_shots += missed;
        log::debug!("{} shot(s) missed, total {}", missed, next.player.missed_shots);
    }
    next
}

/// One full frame: input, then update, then advance the tick counter.
pub fn tick(state: &GameSession, controls: &Controls, rng: &mut impl Rng) -> GameSession {
    let mut next = update(&handle_input(state, controls), rng);
    next.tick += 1;
    next
}
