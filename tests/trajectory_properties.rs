//! Property tests for hazard patrols.

use glam::Vec2;
use level_mover::Trajectory;
use proptest::prelude::*;

fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

fn rectangle_loop() -> impl Strategy<Value = Vec<Vec2>> {
    (-60i32..60, -60i32..60, 1i32..24, 1i32..24).prop_map(|(x, y, w, h)| {
        let (x, y) = ((x * 5) as f32, (y * 5) as f32);
        let (w, h) = ((w * 5) as f32, (h * 5) as f32);
        vec![
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ]
    })
}

fn free_waypoints() -> impl Strategy<Value = Vec<Vec2>> {
    prop::collection::vec((-400i32..400, -400i32..400), 2..7).prop_map(|points| {
        points
            .into_iter()
            .map(|(x, y)| Vec2::new(x as f32, y as f32))
            .collect()
    })
}

proptest! {
    /// One full path length of travel closes the loop exactly.
    #[test]
    fn prop_loop_closes_after_path_length(waypoints in rectangle_loop()) {
        let mut trajectory = Trajectory::new(waypoints, 5.0).expect("trajectory");
        let ticks = (trajectory.path_length() / trajectory.speed()).round() as usize;
        let start = trajectory.start();

        let mut position = start;
        for _ in 0..ticks {
            position = trajectory.advance(position);
        }

        prop_assert_eq!(position, start);
        prop_assert_eq!(trajectory.current_index(), 0);
        prop_assert_eq!(trajectory.next_index(), 1);
    }

    /// The hazard never leaves its active segment and keeps coming back to
    /// the first waypoint, whatever the spacing.
    #[test]
    fn prop_stays_on_segment(waypoints in free_waypoints(), speed in 1u8..20) {
        let speed = speed as f32;
        let mut trajectory = Trajectory::new(waypoints.clone(), speed).expect("trajectory");
        let start = trajectory.start();

        let lap: usize = (0..waypoints.len())
            .map(|i| {
                let length = waypoints[i].distance(waypoints[(i + 1) % waypoints.len()]);
                (length / speed).ceil() as usize + 1
            })
            .sum();

        let mut position = start;
        let mut laps = 0;
        for _ in 0..lap * 2 {
            position = trajectory.advance(position);
            let a = waypoints[trajectory.current_index()];
            let b = waypoints[trajectory.next_index()];
            prop_assert!(distance_to_segment(position, a, b) < 1e-2);

            if trajectory.current_index() == 0 && position == start {
                laps += 1;
            }
        }
        prop_assert!(laps >= 1);
    }

    #[test]
    fn prop_translation_preserves_motion(
        waypoints in rectangle_loop(),
        dx in -10i32..10,
        dy in -10i32..10,
        ticks in 0usize..40,
    ) {
        let delta = Vec2::new((dx * 60) as f32, (dy * 60) as f32);
        let mut plain = Trajectory::new(waypoints.clone(), 5.0).expect("trajectory");
        let mut shifted = Trajectory::new(waypoints, 5.0).expect("trajectory");
        shifted.translate(delta);

        let mut a = plain.start();
        let mut b = shifted.start();
        for _ in 0..ticks {
            a = plain.advance(a);
            b = shifted.advance(b);
        }

        prop_assert_eq!(b - a, delta);
        prop_assert_eq!(plain.current_index(), shifted.current_index());
    }
}

#[test]
fn test_two_point_patrol_reverses() {
    let mut trajectory =
        Trajectory::new(vec![Vec2::ZERO, Vec2::new(20.0, 0.0)], 5.0).expect("trajectory");
    let mut position = trajectory.start();
    let mut xs = Vec::new();
    for _ in 0..8 {
        position = trajectory.advance(position);
        xs.push(position.x);
    }
    assert_eq!(xs, vec![5.0, 10.0, 15.0, 20.0, 15.0, 10.0, 5.0, 0.0]);
}
