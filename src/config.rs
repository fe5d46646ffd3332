/// Gameplay tunables.
///
/// There is no config file or CLI: `GameConfig::default()` is the only
/// layout the binary plays.  Tests build their own configs to pin motion
/// down (e.g. a target that never moves).

use crate::entities::Field;
use crate::error::GameError;

// ── Reference layout ─────────────────────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 640;
pub const FIELD_HEIGHT: i32 = 480;
pub const SPRITE_SIZE: i32 = 64;
pub const FPS: u32 = 60;

pub const PLAYER_MOVE_SPEED: i32 = 10;
pub const TARGET_MOVE_SPEED: i32 = 10;
/// Projectiles travel ten times faster than the target.
pub const PROJECTILE_SPEED: i32 = 10 * TARGET_MOVE_SPEED;

/// Seconds between random target direction flips.
pub const DIRECTION_INTERVAL_MIN_SECS: f32 = 0.25;
pub const DIRECTION_INTERVAL_MAX_SECS: f32 = 1.0;

/// Target sprite is centred on x = 50.
pub const TARGET_START_X: i32 = 50 - SPRITE_SIZE / 2;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub sprite_size: i32,
    pub fps: u32,
    pub player_move_speed: i32,
    pub target_move_speed: i32,
    /// Magnitude only; projectiles always travel toward x = 0.
    pub projectile_speed: i32,
    pub interval_min_secs: f32,
    pub interval_max_secs: f32,
    pub player_start: (i32, i32),
    pub target_start_x: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            sprite_size: SPRITE_SIZE,
            fps: FPS,
            player_move_speed: PLAYER_MOVE_SPEED,
            target_move_speed: TARGET_MOVE_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            interval_min_secs: DIRECTION_INTERVAL_MIN_SECS,
            interval_max_secs: DIRECTION_INTERVAL_MAX_SECS,
            player_start: (
                FIELD_WIDTH - SPRITE_SIZE,
                (FIELD_HEIGHT - SPRITE_SIZE) / 2,
            ),
            target_start_x: TARGET_START_X,
        }
    }
}

impl GameConfig {
    /// Bounds every sprite's top-left corner must stay within.
    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
            sprite_size: self.sprite_size,
        }
    }

    /// Direction-change interval range converted to whole ticks.
    pub fn interval_range_ticks(&self) -> (u32, u32) {
        let to_ticks = |secs: f32| ((self.fps as f32 * secs).round() as u32).max(1);
        (to_ticks(self.interval_min_secs), to_ticks(self.interval_max_secs))
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.sprite_size <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "sprite size must be positive, got {}",
                self.sprite_size
            )));
        }
        if self.sprite_size > self.field_width || self.sprite_size > self.field_height {
            return Err(GameError::InvalidConfig(format!(
                "sprite size {} does not fit a {}x{} field",
                self.sprite_size, self.field_width, self.field_height
            )));
        }
        if self.fps == 0 {
            return Err(GameError::InvalidConfig("frame rate must be non-zero".into()));
        }
        if self.projectile_speed <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "projectile speed must be positive, got {}",
                self.projectile_speed
            )));
        }
        if self.player_move_speed < 0 || self.target_move_speed < 0 {
            return Err(GameError::InvalidConfig("move speeds cannot be negative".into()));
        }
        if self.player_move_speed > self.field_height || self.target_move_speed > self.field_height {
            return Err(GameError::InvalidConfig(format!(
                "move speeds ({}, {}) exceed the field height {}",
                self.player_move_speed, self.target_move_speed, self.field_height
            )));
        }
        if self.projectile_speed > self.field_width {
            return Err(GameError::InvalidConfig(format!(
                "projectile speed {} exceeds the field width {}",
                self.projectile_speed, self.field_width
            )));
        }
        if !(self.interval_min_secs > 0.0 && self.interval_min_secs <= self.interval_max_secs) {
            return Err(GameError::InvalidConfig(format!(
                "direction interval range [{}, {}] is empty",
                self.interval_min_secs, self.interval_max_secs
            )));
        }
        Ok(())
    }
}
