//! Property-based tests for the carousel components
//!
//! Index arithmetic must hold for every length, and no input sequence may
//! leave a component with stacked timers or an out-of-range index.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use royal_site::core::autoplay::Autoplay;
use royal_site::core::cyclic::{nearest_index, signed_distance, wrap, wrapped_distance};
use royal_site::core::rail::RailMotion;
use royal_site::prelude::*;

// ===== Strategy definitions =====

fn len_strategy() -> impl Strategy<Value = usize> {
    1usize..=12usize
}

fn nav_key_strategy() -> impl Strategy<Value = NavKey> {
    prop_oneof![Just(NavKey::ArrowLeft), Just(NavKey::ArrowRight), Just(NavKey::Other)]
}

/// Slider input, including pointer sequences in any order
fn slider_event_strategy() -> impl Strategy<Value = SliderEvent> {
    prop_oneof![
        (-120.0f64..120.0, -120.0f64..120.0)
            .prop_map(|(dx, dy)| SliderEvent::Wheel(WheelDelta::new(dx, dy))),
        nav_key_strategy().prop_map(SliderEvent::Key),
        (0i32..3, 0.0f64..1200.0)
            .prop_map(|(pointer_id, x)| SliderEvent::PointerDown { pointer_id, x }),
        (0.0f64..1200.0).prop_map(|x| SliderEvent::PointerMove { x }),
        Just(SliderEvent::PointerUp),
        Just(SliderEvent::PointerCancel),
        (0usize..10).prop_map(SliderEvent::CardClick),
        (0usize..10).prop_map(SliderEvent::BulletClick),
        Just(SliderEvent::PrevButton),
        Just(SliderEvent::NextButton),
        Just(SliderEvent::Resize),
    ]
}

/// Rail navigation that always ends on an integer target
fn rail_nav_strategy() -> impl Strategy<Value = RailEvent> {
    prop_oneof![
        nav_key_strategy().prop_map(RailEvent::Key),
        Just(RailEvent::PrevButton),
        Just(RailEvent::NextButton),
        (0usize..5).prop_map(RailEvent::CardClick),
    ]
}

/// Positions whose fractional part is exact in binary
fn exact_position_strategy() -> impl Strategy<Value = f64> {
    (-500i64..500, 0u8..4).prop_map(|(whole, quarter)| whole as f64 + f64::from(quarter) * 0.25)
}

// ===== Property tests for cyclic arithmetic =====

proptest! {
    /// Wrapping lands in range and stays congruent to the input
    #[test]
    fn prop_wrap_in_range(index in -10_000i64..10_000, len in len_strategy()) {
        let wrapped = wrap(index, len);
        prop_assert!(wrapped < len);
        prop_assert_eq!((wrapped as i64 - index).rem_euclid(len as i64), 0);
    }

    /// Wrapping an already wrapped index changes nothing
    #[test]
    fn prop_wrap_idempotent(index in -10_000i64..10_000, len in len_strategy()) {
        let once = wrap(index, len);
        prop_assert_eq!(wrap(once as i64, len), once);
    }

    /// Signed distance never exceeds half the ring and leads back to the index
    #[test]
    fn prop_signed_distance_bounded(
        index in -100i64..100,
        active in -100i64..100,
        len in len_strategy(),
    ) {
        let d = signed_distance(index, active, len);
        prop_assert!(2 * d.abs() <= len as i64);
        prop_assert_eq!(wrap(active + d, len), wrap(index, len));
    }

    /// Swapping the indices negates the distance
    #[test]
    fn prop_signed_distance_antisymmetric(
        index in -100i64..100,
        active in -100i64..100,
        len in len_strategy(),
    ) {
        prop_assert_eq!(signed_distance(index, active, len), -signed_distance(active, index, len));
    }

    /// Real distance of a card stays within half the ring
    #[test]
    fn prop_wrapped_distance_bounded(
        card in 0usize..12,
        position in exact_position_strategy(),
        len in len_strategy(),
    ) {
        let card = card % len;
        let d = wrapped_distance(card, position, len);
        prop_assert!(d.abs() <= len as f64 / 2.0);
    }

    /// Shifting by whole laps never changes the nearest card
    #[test]
    fn prop_nearest_index_lap_invariant(
        position in exact_position_strategy(),
        laps in -50i64..50,
        len in len_strategy(),
    ) {
        let shifted = position + (laps * len as i64) as f64;
        prop_assert_eq!(nearest_index(shifted, len), nearest_index(position, len));
    }

    /// Re-basing keeps the visible card and the distance still to travel
    #[test]
    fn prop_normalize_preserves_view(
        current in exact_position_strategy(),
        offset in -3i64..3,
        len in len_strategy(),
    ) {
        let mut motion = RailMotion {
            current,
            target: current.round() + offset as f64,
            velocity: 0.0,
        };
        let before = motion;
        motion.normalize(len, 1.0);
        prop_assert_eq!(motion.nearest_index(len), before.nearest_index(len));
        prop_assert_eq!(motion.target - motion.current, before.target - before.current);
    }
}

// ===== Property tests for autoplay =====

proptest! {
    /// Starting, restarting and stopping in any order never stacks intervals
    #[test]
    fn prop_autoplay_single_interval(
        ops in prop::collection::vec((0u8..3, any::<bool>()), 1..30),
    ) {
        let mut sched = ManualScheduler::new();
        let mut autoplay = Autoplay::new(4200);
        for (op, blocked) in ops {
            match op {
                0 => autoplay.start(&mut sched, blocked),
                1 => autoplay.restart(&mut sched, blocked),
                _ => autoplay.stop(&mut sched),
            }
            let expected = usize::from(autoplay.is_running());
            prop_assert_eq!(sched.active_of_kind(TimerKind::Interval), expected);
        }
    }
}

// ===== Property tests for the components =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any input sequence keeps the slider in range with at most one of each timer
    #[test]
    fn prop_slider_never_stacks_timers(
        len in len_strategy(),
        steps in prop::collection::vec((slider_event_strategy(), 0u64..600), 1..40),
    ) {
        let mut sched = ManualScheduler::new();
        let mut slider = NewsSlider::new(len, SliderSettings::default()).unwrap();
        slider.mount(&mut sched);

        for (event, pause) in steps {
            slider.handle(event, &mut sched);
            sched.run_for(pause, |s, id| {
                slider.handle_timer(id, s);
            });
            prop_assert!(slider.active() < len);
            prop_assert!(sched.active_of_kind(TimerKind::Interval) <= 1);
            prop_assert!(sched.active_of_kind(TimerKind::Frame) <= 1);
            prop_assert!(sched.active_of_kind(TimerKind::Timeout) <= 1);
        }

        let layout = slider.layout(Viewport::default());
        prop_assert_eq!(layout.slides.iter().filter(|s| s.active).count(), 1);
        prop_assert_eq!(layout.active, slider.active());
    }

    /// After any navigation the rail comes to rest on its target card
    #[test]
    fn prop_rail_settles_on_target(
        steps in prop::collection::vec((rail_nav_strategy(), 0u64..400), 1..20),
    ) {
        let mut sched = ManualScheduler::new();
        let viewport = Viewport::default();
        let mut rail = FocusRail::builtin(RailSettings::default().with_autoplay(false)).unwrap();
        rail.start(viewport, &mut sched);

        for (event, pause) in steps {
            rail.handle(event, &mut sched);
            sched.run_for(pause, |s, id| {
                rail.handle_timer(id, viewport, s);
            });
            prop_assert_eq!(rail.motion().target.fract(), 0.0);
        }
        sched.run_for(10_000, |s, id| {
            rail.handle_timer(id, viewport, s);
        });

        let motion = *rail.motion();
        prop_assert!(motion.is_settled());
        prop_assert_eq!(rail.active_index(), Some(wrap(motion.target as i64, rail.len())));
        prop_assert_eq!(sched.active_of_kind(TimerKind::Frame), 1);
    }
}
