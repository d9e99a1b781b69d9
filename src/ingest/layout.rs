//! Level text: one row of single-character tile codes per line.

use crate::{ClassId, LevelMoverError, LevelMoverResult};
use log::warn;
use std::fs;
use std::io;
use std::path::Path;

/// Meaning of one level glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCode {
    /// `#`, `Z` or `C`
    Wall(char),
    /// `.` or `1` to `4`
    Floor(char),
    /// `P`
    ActorStart,
    /// `r`, `b`, `g`, `y`
    Key(ClassId),
    /// `R`, `B`, `G`, `Y`
    Door(ClassId),
    /// `*`
    Collectible,
    /// `W`
    Liquid,
    /// `S`
    Pushable,
    /// `O`
    Portal,
    /// `M`
    Hazard,
}

impl TileCode {
    /// Glyphs that leave their cell empty.
    pub const IGNORED: [char; 2] = ['[', '>'];

    /// Decodes a glyph. Ignored cells and unknown glyphs yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::{ClassId, TileCode};
    ///
    /// assert_eq!(TileCode::from_glyph('Z'), Some(TileCode::Wall('Z')));
    /// assert_eq!(TileCode::from_glyph('g'), Some(TileCode::Key(ClassId(2))));
    /// assert_eq!(TileCode::from_glyph('>'), None);
    /// ```
    pub fn from_glyph(glyph: char) -> Option<Self> {
        let code = match glyph {
            '#' | 'Z' | 'C' => TileCode::Wall(glyph),
            '.' | '1' | '2' | '3' | '4' => TileCode::Floor(glyph),
            'P' => TileCode::ActorStart,
            '*' => TileCode::Collectible,
            'W' => TileCode::Liquid,
            'S' => TileCode::Pushable,
            'O' => TileCode::Portal,
            'M' => TileCode::Hazard,
            other => {
                if let Some(class) = ClassId::from_key_glyph(other) {
                    TileCode::Key(class)
                } else {
                    TileCode::Door(ClassId::from_door_glyph(other)?)
                }
            }
        };
        Some(code)
    }

    pub fn glyph(self) -> char {
        match self {
            TileCode::Wall(glyph) | TileCode::Floor(glyph) => glyph,
            TileCode::ActorStart => 'P',
            TileCode::Key(class) => class.key_glyph(),
            TileCode::Door(class) => class.door_glyph(),
            TileCode::Collectible => '*',
            TileCode::Liquid => 'W',
            TileCode::Pushable => 'S',
            TileCode::Portal => 'O',
            TileCode::Hazard => 'M',
        }
    }
}

/// A decoded cell at grid column `col`, row `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCell {
    pub col: i32,
    pub row: i32,
    pub code: TileCode,
}

/// A parsed level, cells in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelLayout {
    cells: Vec<LayoutCell>,
    width: usize,
    height: usize,
    actor_start: Option<(i32, i32)>,
}

impl LevelLayout {
    /// Parses level text. Surrounding whitespace on each line is ignored.
    pub fn parse(text: &str) -> LevelMoverResult<Self> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    /// Parses level rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::LevelLayout;
    ///
    /// let layout = LevelLayout::from_rows(&["#P#", "#*O"]).unwrap();
    /// assert_eq!(layout.actor_start(), Some((1, 0)));
    /// assert_eq!(layout.width(), 3);
    /// assert!(LevelLayout::from_rows(&["P?"]).is_err());
    /// ```
    pub fn from_rows(rows: &[&str]) -> LevelMoverResult<Self> {
        let mut layout = Self::default();

        for (row, line) in rows.iter().enumerate() {
            let line = line.trim();
            layout.width = layout.width.max(line.chars().count());
            layout.height = row + 1;

            for (col, glyph) in line.chars().enumerate() {
                if TileCode::IGNORED.contains(&glyph) {
                    continue;
                }
                let code = TileCode::from_glyph(glyph).ok_or_else(|| {
                    LevelMoverError::InvalidLevel(format!(
                        "unknown tile '{glyph}' at row {}, column {}",
                        row + 1,
                        col + 1
                    ))
                })?;

                let (col, row) = (col as i32, row as i32);
                if code == TileCode::ActorStart {
                    if let Some((first_col, first_row)) = layout.actor_start {
                        return Err(LevelMoverError::InvalidLevel(format!(
                            "second actor start at row {}, column {} (first at row {}, column {})",
                            row + 1,
                            col + 1,
                            first_row + 1,
                            first_col + 1
                        )));
                    }
                    layout.actor_start = Some((col, row));
                }
                layout.cells.push(LayoutCell { col, row, code });
            }
        }

        Ok(layout)
    }

    /// Reads and parses a level file.
    pub fn load(path: impl AsRef<Path>) -> LevelMoverResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                Err(LevelMoverError::LevelNotFound(path.to_path_buf()))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Like [`LevelLayout::load`], but a missing file yields an empty layout.
    pub fn load_or_empty(path: impl AsRef<Path>) -> LevelMoverResult<Self> {
        match Self::load(path) {
            Err(LevelMoverError::LevelNotFound(path)) => {
                warn!("Level not found: {}", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn cells(&self) -> &[LayoutCell] {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Column and row of the `P` cell.
    pub fn actor_start(&self) -> Option<(i32, i32)> {
        self.actor_start
    }

    pub fn count(&self, predicate: impl Fn(TileCode) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(cell.code)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_cells_and_trimming() {
        let layout = LevelLayout::parse("  [P>  \n .. ").unwrap();
        assert_eq!(layout.actor_start(), Some((1, 0)));
        assert_eq!(layout.cells().len(), 3);
        assert_eq!(layout.height(), 2);
    }

    #[test]
    fn test_unknown_glyph_names_position() {
        let err = LevelLayout::from_rows(&["P.", ".x"]).unwrap_err();
        assert!(err.to_string().contains("row 2, column 2"));
    }

    #[test]
    fn test_duplicate_actor_start() {
        assert!(matches!(
            LevelLayout::from_rows(&["P.P"]),
            Err(LevelMoverError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(matches!(
            LevelLayout::load(&path),
            Err(LevelMoverError::LevelNotFound(_))
        ));
        let empty = LevelLayout::load_or_empty(&path).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.actor_start(), None);
    }

    #[test]
    fn test_counts() {
        let layout = LevelLayout::from_rows(&["P**M", "MrRO"]).unwrap();
        assert_eq!(layout.count(|c| c == TileCode::Collectible), 2);
        assert_eq!(layout.count(|c| c == TileCode::Hazard), 2);
        assert_eq!(layout.count(|c| matches!(c, TileCode::Door(_))), 1);
    }
}
