use std::rc::Rc;

use dodge_survival::animation::{AnimatedSprite, AnimationSet, Frame};
use dodge_survival::compute::{difficulty_at, init_player, move_player, spawn_enemy};
use dodge_survival::config::GameConfig;
use dodge_survival::entities::{Direction, EnemyAnim, Rect};

use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn axis() -> impl Strategy<Value = i32> {
    -1..=1i32
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Idle),
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn rect() -> impl Strategy<Value = Rect> {
    (-100.0f32..900.0, -100.0f32..700.0, 1.0f32..200.0, 1.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(Vec2::new(x, y), Vec2::new(w, h)))
}

/// Sequences of different lengths so switches exercise the clamp.
fn uneven_set() -> Rc<AnimationSet<Direction>> {
    let size = Vec2::new(64.0, 64.0);
    let frames = |n: usize| -> Vec<Frame> {
        (0..n).map(|i| Frame::new(size, vec![i.to_string()])).collect()
    };
    Rc::new(
        AnimationSet::new(size)
            .with_sequence(Direction::Idle, frames(1))
            .with_sequence(Direction::Up, frames(2))
            .with_sequence(Direction::Down, frames(3))
            .with_sequence(Direction::Left, frames(4)),
    )
}

proptest! {
    #[test]
    fn player_always_stays_on_screen(moves in prop::collection::vec((axis(), axis()), 0..400)) {
        let c = GameConfig::default();
        let mut p = init_player(&c, Rc::new(AnimationSet::new(c.player_size)));
        for (i, (dx, dy)) in moves.into_iter().enumerate() {
            p = move_player(&p, dx, dy, i as u64 * 16, &c);
            prop_assert!(p.pos.x >= 0.0 && p.pos.x <= c.width - c.player_size.x);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y <= c.height - c.player_size.y);
        }
    }

    #[test]
    fn frame_index_always_valid(
        ops in prop::collection::vec((direction(), 0u64..400), 1..200),
    ) {
        let mut sprite = AnimatedSprite::new(uneven_set(), Direction::Left, 0);
        let mut now = 0u64;
        for (key, dt) in ops {
            sprite.set_active(key);
            prop_assert!(sprite.frame_index() < sprite.sequence_len());
            now += dt;
            sprite.advance(now, 150);
            prop_assert!(sprite.frame_index() < sprite.sequence_len());
            let _ = sprite.current_frame();
        }
    }

    #[test]
    fn spawn_velocity_has_requested_speed(seed in any::<u64>(), speed in 0.1f32..20.0) {
        let c = GameConfig::default();
        let set = Rc::new(AnimationSet::<EnemyAnim>::new(c.enemy_size));
        let mut rng = StdRng::seed_from_u64(seed);
        let e = spawn_enemy(&c, speed, &set, 0, &mut rng);
        prop_assert!((e.velocity.length() - speed).abs() < 1e-3 * speed.max(1.0));
    }

    #[test]
    fn difficulty_never_eases(t in 0u64..10_000) {
        let c = GameConfig::default();
        let now = difficulty_at(t, &c);
        let later = difficulty_at(t + 5, &c);
        prop_assert!(later.enemy_speed >= now.enemy_speed);
        prop_assert!(later.spawn_interval <= now.spawn_interval);
        prop_assert!(now.spawn_interval >= c.min_spawn_interval);
    }

    #[test]
    fn collision_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        let overlap_x = a.x < b.right() && b.x < a.right();
        let overlap_y = a.y < b.bottom() && b.y < a.bottom();
        prop_assert_eq!(a.intersects(&b), overlap_x && overlap_y);
    }
}
