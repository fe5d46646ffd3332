use balloon_shooter::config::GameConfig;
use balloon_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn field() -> Field {
    GameConfig::default().field()
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A target parked mid-field with a fixed, long flip interval.
fn make_target(y: i32, direction: Direction) -> Target {
    Target {
        body: Body { x: 18, y, size: 64 },
        move_speed: 10,
        direction,
        struck: false,
        direction_change_interval: 1000,
        ticks_until_flip: 1000,
        interval_range: (15, 60),
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_is_strict() {
    let a = Rect { x: 0, y: 0, w: 64, h: 64 };
    let touching = Rect { x: 64, y: 0, w: 64, h: 64 };
    let inside = Rect { x: 63, y: 63, w: 64, h: 64 };
    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&inside));
    assert!(inside.overlaps(&a));
    assert!(a.overlaps(&a));
}

#[test]
fn field_bounds_follow_sprite_size() {
    let f = field();
    assert_eq!(f.left(), 0);
    assert_eq!(f.top(), 0);
    assert_eq!(f.right(), 576);
    assert_eq!(f.bottom(), 416);
}

#[test]
fn clamp_corrects_both_axes_in_one_pass() {
    // Past the right edge and above the top at the same time
    let mut body = Body { x: 700, y: -30, size: 64 };
    body.clamp_to(&field());
    assert_eq!((body.x, body.y), (576, 0));

    let mut body = Body { x: -5, y: 999, size: 64 };
    body.clamp_to(&field());
    assert_eq!((body.x, body.y), (0, 416));
}

#[test]
fn clamp_leaves_inside_body_alone() {
    let mut body = Body { x: 100, y: 200, size: 64 };
    body.clamp_to(&field());
    assert_eq!((body.x, body.y), (100, 200));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn fire_state_machine_one_shot_per_press() {
    let mut p = Player::new(576, 208, 64, 10);
    assert_eq!(p.fire_state, FireState::Ready);

    assert!(p.press_fire(true));
    assert_eq!(p.fire_state, FireState::Cooldown);

    // Holding does nothing
    for _ in 0..10 {
        assert!(!p.press_fire(true));
    }

    assert!(!p.press_fire(false));
    assert_eq!(p.fire_state, FireState::Ready);
    assert!(p.press_fire(true));
}

#[test]
fn released_ready_player_stays_ready() {
    let mut p = Player::new(576, 208, 64, 10);
    assert!(!p.press_fire(false));
    assert_eq!(p.fire_state, FireState::Ready);
}

#[test]
fn player_update_only_clamps() {
    let mut p = Player::new(576, -20, 64, 10);
    p.update(&field(), &mut seeded_rng());
    assert_eq!((p.body.x, p.body.y), (576, 0));
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_moves_toward_leading_edge() {
    let mut b = Projectile::new(576, 100, 64, 100);
    b.update(&field(), &mut seeded_rng());
    assert_eq!(b.body.x, 476);
    assert_eq!(b.body.y, 100);
    assert!(!b.has_exited(&field()));
}

#[test]
fn projectile_overshooting_edge_is_clamped_and_exited() {
    let mut b = Projectile::new(76, 100, 64, 100);
    b.update(&field(), &mut seeded_rng());
    assert_eq!(b.body.x, 0);
    assert!(b.has_exited(&field()));
}

// ── Target ────────────────────────────────────────────────────────────────────

#[test]
fn direction_flip_and_sign() {
    assert_eq!(Direction::Rising.flipped(), Direction::Falling);
    assert_eq!(Direction::Falling.flipped(), Direction::Rising);
    assert_eq!(Direction::Rising.sign(), -1);
    assert_eq!(Direction::Falling.sign(), 1);
}

#[test]
fn target_moves_by_speed_in_direction() {
    let mut rng = seeded_rng();
    let mut t = make_target(200, Direction::Rising);
    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 190);

    let mut t = make_target(200, Direction::Falling);
    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 210);
}

#[test]
fn target_bounces_off_top() {
    let mut rng = seeded_rng();
    let mut t = make_target(5, Direction::Rising);
    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 0);
    assert_eq!(t.direction, Direction::Falling);

    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 10);
}

#[test]
fn target_bounces_off_bottom() {
    let mut rng = seeded_rng();
    let mut t = make_target(410, Direction::Falling);
    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 416);
    assert_eq!(t.direction, Direction::Rising);

    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 406);
}

#[test]
fn due_flip_on_top_bounce_keeps_falling() {
    let mut rng = seeded_rng();
    let mut t = make_target(5, Direction::Rising);
    t.direction_change_interval = 1;
    t.ticks_until_flip = 1;

    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 0);
    assert_eq!(t.direction, Direction::Falling);
    // The countdown still restarted with a fresh interval
    assert!((15..=60).contains(&t.direction_change_interval));
    assert_eq!(t.ticks_until_flip, t.direction_change_interval);

    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 10);
}

#[test]
fn due_flip_on_bottom_bounce_keeps_rising() {
    let mut rng = seeded_rng();
    let mut t = make_target(410, Direction::Falling);
    t.ticks_until_flip = 1;

    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 416);
    assert_eq!(t.direction, Direction::Rising);

    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 406);
}

#[test]
fn huge_speed_saturates_instead_of_overflowing() {
    let mut rng = seeded_rng();
    let mut t = make_target(200, Direction::Falling);
    t.move_speed = i32::MAX;
    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, 416);

    let mut b = Projectile::new(10, 100, 64, i32::MAX);
    b.update(&field(), &mut rng);
    assert_eq!(b.body.x, 0);
}

#[test]
fn target_flips_after_exactly_interval_ticks() {
    let mut rng = seeded_rng();
    let mut t = make_target(200, Direction::Rising);
    t.direction_change_interval = 5;
    t.ticks_until_flip = 5;

    for _ in 0..4 {
        t.update(&field(), &mut rng);
        assert_eq!(t.direction, Direction::Rising);
    }
    t.update(&field(), &mut rng);
    assert_eq!(t.direction, Direction::Falling);

    // A fresh interval is drawn immediately, inside the configured range
    assert!((15..=60).contains(&t.direction_change_interval));
    assert_eq!(t.ticks_until_flip, t.direction_change_interval);
}

#[test]
fn flips_are_spaced_by_the_stored_interval() {
    let mut rng = seeded_rng();
    let mut t = make_target(200, Direction::Rising);
    t.move_speed = 0;
    t.interval_range = (3, 7);
    t.direction_change_interval = 4;
    t.ticks_until_flip = 4;

    let mut last_flip = 0u32;
    let mut expected_gap = t.direction_change_interval;
    let mut dir = t.direction;
    for frame in 1..=200u32 {
        t.update(&field(), &mut rng);
        if t.direction != dir {
            assert_eq!(frame - last_flip, expected_gap);
            assert!((3..=7).contains(&t.direction_change_interval));
            last_flip = frame;
            expected_gap = t.direction_change_interval;
            dir = t.direction;
        }
    }
    assert!(last_flip > 0);
}

#[test]
fn strike_is_sticky_and_freezes_target() {
    let mut rng = seeded_rng();
    let mut t = make_target(200, Direction::Rising);
    let hit = vec![Projectile::new(18, 200, 64, 100)];
    assert!(t.check_strike(&hit));
    assert!(t.struck);

    assert!(t.check_strike(&[]));
    let y = t.body.y;
    t.update(&field(), &mut rng);
    assert_eq!(t.body.y, y);
}

#[test]
fn no_strike_without_overlap() {
    let mut t = make_target(200, Direction::Rising);
    let far = vec![Projectile::new(300, 200, 64, 100), Projectile::new(18, 300, 64, 100)];
    assert!(!t.check_strike(&far));
    assert!(!t.struck);
}

#[test]
fn spawn_uses_config_layout() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    for _ in 0..50 {
        let t = Target::spawn(&config, &mut rng);
        assert_eq!(t.body.x, 18);
        assert!((0..=416).contains(&t.body.y));
        assert!(!t.struck);
        assert!((15..=60).contains(&t.direction_change_interval));
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn status_enum_eq() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::Won);
}
