/// Game entity types and their per-frame motion.
///
/// Every sprite shares a `Body` (top-left corner plus a square size) and
/// implements `Entity`, whose `update` applies the sprite's own motion and
/// then clamps the body back inside the `Field`.

use rand::Rng;

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in logical field units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// The play field, expressed as the range a sprite's top-left corner may
/// occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    pub sprite_size: i32,
}

impl Field {
    pub fn left(&self) -> i32 {
        0
    }

    pub fn top(&self) -> i32 {
        0
    }

    pub fn right(&self) -> i32 {
        self.width - self.sprite_size
    }

    pub fn bottom(&self) -> i32 {
        self.height - self.sprite_size
    }

    /// True when `rect` lies entirely inside the field.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0 && rect.y >= 0 && rect.x + rect.w <= self.width && rect.y + rect.h <= self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl Body {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.size,
            h: self.size,
        }
    }

    /// Each axis is clamped on its own, so a body outside two edges at once
    /// is corrected on both in a single pass.
    pub fn clamp_to(&mut self, field: &Field) {
        self.x = self.x.clamp(field.left(), field.right());
        self.y = self.y.clamp(field.top(), field.bottom());
    }
}

// ── Shared entity contract ────────────────────────────────────────────────────

pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn rect(&self) -> Rect {
        self.body().rect()
    }

    fn clamp_to_bounds(&mut self, field: &Field) {
        self.body_mut().clamp_to(field);
    }

    /// Advance one frame.  The base behaviour only clamps.
    fn update(&mut self, field: &Field, _rng: &mut impl Rng) {
        self.clamp_to_bounds(field);
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// One-shot-per-press fire debounce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireState {
    /// Fire key is up; the next press shoots.
    Ready,
    /// A shot was fired and the key has not been released since.
    Cooldown,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub move_speed: i32,
    pub fire_state: FireState,
    /// Projectiles that left the field without striking the target.
    pub missed_shots: u32,
}

impl Player {
    pub fn new(x: i32, y: i32, size: i32, move_speed: i32) -> Self {
        Player {
            body: Body { x, y, size },
            move_speed,
            fire_state: FireState::Ready,
            missed_shots: 0,
        }
    }

    /// Advance the fire state machine.  Returns `true` on the frame a shot
    /// should be spawned.
    pub fn press_fire(&mut self, held: bool) -> bool {
        match (self.fire_state, held) {
            (FireState::Ready, true) => {
                self.fire_state = FireState::Cooldown;
                true
            }
            (FireState::Cooldown, false) => {
                self.fire_state = FireState::Ready;
                false
            }
            _ => false,
        }
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Body,
    /// Horizontal step per frame, always toward the leading boundary.
    pub speed: i32,
}

impl Projectile {
    pub fn new(x: i32, y: i32, size: i32, speed: i32) -> Self {
        Projectile {
            body: Body { x, y, size },
            speed,
        }
    }

    /// At or past the leading boundary.  A step that overshoots still
    /// counts, so no projectile can linger at the edge.
    pub fn has_exited(&self, field: &Field) -> bool {
        self.body.x <= field.left()
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, field: &Field, _rng: &mut impl Rng) {
        self.body.x = self.body.x.saturating_sub(self.speed);
        self.clamp_to_bounds(field);
    }
}

// ── Target ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward the top boundary (y decreasing).
    Rising,
    /// Toward the bottom boundary (y increasing).
    Falling,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Rising => Direction::Falling,
            Direction::Falling => Direction::Rising,
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Direction::Rising => -1,
            Direction::Falling => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Target {
    pub body: Body,
    pub move_speed: i32,
    pub direction: Direction,
    /// Terminal once set.
    pub struck: bool,
    /// Ticks between random direction flips; redrawn on every flip.
    pub direction_change_interval: u32,
    /// Ticks left before the next random flip.
    pub ticks_until_flip: u32,
    /// Inclusive tick range new intervals are drawn from.
    pub interval_range: (u32, u32),
}

impl Target {
    /// Random vertical position and direction, as at session start.
    pub fn spawn(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let field = config.field();
        let y = rng.gen_range(field.top()..=field.bottom());
        let direction = if rng.gen_bool(0.5) {
            Direction::Rising
        } else {
            Direction::Falling
        };
        let interval_range = config.interval_range_ticks();
        let interval = draw_interval(interval_range, rng);
        Target {
            body: Body {
                x: config.target_start_x,
                y,
                size: config.sprite_size,
            },
            move_speed: config.target_move_speed,
            direction,
            struck: false,
            direction_change_interval: interval,
            ticks_until_flip: interval,
            interval_range,
        }
    }

    /// Mark the target struck if any projectile overlaps it.  Never resets.
    pub fn check_strike(&mut self, projectiles: &[Projectile]) -> bool {
        if !self.struck {
            let rect = self.rect();
            self.struck = projectiles.iter().any(|p| p.rect().overlaps(&rect));
        }
        self.struck
    }
}

impl Entity for Target {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, field: &Field, rng: &mut impl Rng) {
        if self.struck {
            return;
        }

        let step = self.direction.sign().saturating_mul(self.move_speed);
        self.body.y = self.body.y.saturating_add(step);
        self.clamp_to_bounds(field);

        // Bounce off the top and bottom edges
        let bounced = if self.body.y <= field.top() {
            self.direction = Direction::Falling;
            true
        } else if self.body.y >= field.bottom() {
            self.direction = Direction::Rising;
            true
        } else {
            false
        };

        // A due flip on a bounce frame only restarts the countdown, so the
        // target never turns back into the wall it just hit.
        self.ticks_until_flip = self.ticks_until_flip.saturating_sub(1);
        if self.ticks_until_flip == 0 {
            if !bounced {
                self.direction = self.direction.flipped();
            }
            self.direction_change_interval = draw_interval(self.interval_range, rng);
            self.ticks_until_flip = self.direction_change_interval;
            log::trace!(
                "target heading {:?}, next flip in {} ticks",
                self.direction,
                self.direction_change_interval
            );
        }
    }
}

fn draw_interval((min, max): (u32, u32), rng: &mut impl Rng) -> u32 {
    rng.gen_range(min..=max.max(min))
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    /// The target was struck; only the win message is shown from here on.
    Won,
}

/// What a sprite on screen represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Target,
    Projectile,
}

/// The whole session.  Cloneable so the `compute` transitions can return a
/// fresh copy without touching the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub field: Field,
    pub player: Player,
    pub target: Target,
    /// Live projectiles, oldest first.
    pub projectiles: Vec<Projectile>,
    pub status: GameStatus,
    /// Set by the quit control; the loop exits before the next frame.
    pub quit_requested: bool,
    /// Frames simulated so far.
    pub tick: u64,
}

impl GameSession {
    /// Active sprites in draw order: player, target (until struck), then
    /// projectiles.
    pub fn sprites(&self) -> Vec<(SpriteKind, Rect)> {
        let mut sprites = vec![(SpriteKind::Player, self.player.rect())];
        if !self.target.struck {
            sprites.push((SpriteKind::Target, self.target.rect()));
        }
        sprites.extend(
            self.projectiles
                .iter()
                .map(|p| (SpriteKind::Projectile, p.rect())),
        );
        sprites
    }
}
