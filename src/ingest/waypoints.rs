//! Trajectory files: one `x, y` waypoint per line, in level pixels.

use crate::{LevelMoverError, LevelMoverResult, Trajectory};
use glam::Vec2;
use std::fs;
use std::io;
use std::path::Path;

/// Parses trajectory text into a trajectory moving at `speed` pixels per
/// tick. Blank lines are skipped; at least one waypoint is required.
///
/// # Examples
///
/// ```
/// use level_mover::parse_trajectory;
///
/// let t = parse_trajectory("60, 0\n\n120.5, 0\n", 5.0).unwrap();
/// assert_eq!(t.waypoints().len(), 2);
/// assert!(parse_trajectory("", 5.0).is_err());
/// ```
pub fn parse_trajectory(text: &str, speed: f32) -> LevelMoverResult<Trajectory> {
    let mut waypoints = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        waypoints.push(parse_point(line).ok_or_else(|| {
            LevelMoverError::InvalidTrajectory(format!(
                "line {}: expected 'x, y', got '{}'",
                number + 1,
                line
            ))
        })?);
    }

    if waypoints.is_empty() {
        return Err(LevelMoverError::InvalidTrajectory(
            "no waypoints".to_string(),
        ));
    }

    Trajectory::new(waypoints, speed)
}

/// Reads and parses a trajectory file.
pub fn load_trajectory(path: impl AsRef<Path>, speed: f32) -> LevelMoverResult<Trajectory> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(LevelMoverError::TrajectoryNotFound(path.to_path_buf()));
        }
        Err(error) => return Err(error.into()),
    };
    parse_trajectory(&text, speed)
}

fn parse_point(line: &str) -> Option<Vec2> {
    let (x, y) = line.split_once(',')?;
    let x: f32 = x.trim().parse().ok()?;
    let y: f32 = y.trim().parse().ok()?;
    (x.is_finite() && y.is_finite()).then_some(Vec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let t = parse_trajectory("0, 0\n 60 ,0 \n60,60", 5.0).unwrap();
        assert_eq!(
            t.waypoints(),
            &[Vec2::ZERO, Vec2::new(60.0, 0.0), Vec2::new(60.0, 60.0)]
        );
        assert_eq!(t.speed(), 5.0);
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let err = parse_trajectory("0, 0\n60 0\n", 5.0).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(parse_trajectory("0, nan", 5.0).is_err());
    }

    #[test]
    fn test_single_point_is_stationary() {
        let t = parse_trajectory("30, 30", 5.0).unwrap();
        assert!(t.is_stationary());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_trajectory(dir.path().join("missing.txt"), 5.0),
            Err(LevelMoverError::TrajectoryNotFound(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, "0, 0\n120, 0\n").unwrap();
        let t = load_trajectory(&path, 5.0).unwrap();
        assert_eq!(t.path_length(), 240.0);
    }
}
