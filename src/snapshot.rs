//! Parsers for the environment's text responses.
//!
//! Each parser consumes lines from an iterator so callers can feed a whole
//! response buffer or individual lines as they arrive.

use std::str::{FromStr, SplitWhitespace};

use serde::Serialize;

use crate::config::WorldConfig;
use crate::error::SnapshotError;
use crate::grid::{Color, Coord, ToroidalGrid};

/// Number of fields on the world description line.
pub const WORLD_FIELDS: usize = 19;

/// One of the agent's workers as reported by the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerRecord {
    /// Worker identifier used in commands.
    pub id: u32,
    /// Current cell.
    pub position: Coord,
    /// Stored markers as `(color, count)` pairs.
    pub storage: Vec<(Color, u32)>,
}

/// A worker of another team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnemyRecord {
    /// The team's color.
    pub color: Color,
    /// Current cell.
    pub position: Coord,
}

/// Changes reported for the turn that just ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnDelta {
    /// Cells whose markers were removed.
    pub cleared: Vec<Coord>,
    /// Markers placed, with their colors.
    pub placed: Vec<(Coord, Color)>,
    /// Seeds of harvests that were scored.
    pub scored: Vec<Coord>,
}

/// Turns remaining in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeToEnd {
    /// Turns left in the current game.
    pub turns: u32,
    /// Second counter reported alongside; not interpreted.
    pub extra: u32,
}

/// Everything needed to start playing: world, map and rosters.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// World constants.
    pub world: WorldConfig,
    /// The map with marker expiries.
    pub grid: ToroidalGrid,
    /// The agent's workers.
    pub workers: Vec<WorkerRecord>,
    /// Other teams' workers.
    pub enemies: Vec<EnemyRecord>,
}

/// Whitespace-separated fields of one line.
struct Fields<'a> {
    section: &'static str,
    tokens: SplitWhitespace<'a>,
    taken: usize,
}

impl<'a> Fields<'a> {
    fn new(section: &'static str, line: &'a str) -> Self {
        Self {
            section,
            tokens: line.split_whitespace(),
            taken: 0,
        }
    }

    fn token(&mut self) -> Result<&'a str, SnapshotError> {
        let token = self.tokens.next().ok_or(SnapshotError::FieldCount {
            section: self.section,
            expected: self.taken + 1,
            actual: self.taken,
        })?;
        self.taken += 1;
        Ok(token)
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, SnapshotError> {
        let token = self.token()?;
        token.parse().map_err(|_| SnapshotError::InvalidField {
            section: self.section,
            field,
            value: token.to_owned(),
        })
    }

    fn flag(&mut self, field: &'static str) -> Result<bool, SnapshotError> {
        Ok(self.parse::<i64>(field)? == 1)
    }

    fn color(&mut self, field: &'static str) -> Result<Color, SnapshotError> {
        let token = self.token()?;
        let mut chars = token.chars();
        match (chars.next().and_then(Color::from_char), chars.next()) {
            (Some(color), None) => Ok(color),
            _ => Err(SnapshotError::InvalidField {
                section: self.section,
                field,
                value: token.to_owned(),
            }),
        }
    }

    fn coord(&mut self, size: u16) -> Result<Coord, SnapshotError> {
        let x: i64 = self.parse("x")?;
        let y: i64 = self.parse("y")?;
        let out_of_bounds = SnapshotError::OutOfBounds {
            section: self.section,
            x,
            y,
        };
        match (u16::try_from(x), u16::try_from(y)) {
            (Ok(cx), Ok(cy)) if cx < size && cy < size => Ok(Coord::new(cx, cy)),
            _ => Err(out_of_bounds),
        }
    }

    fn count(&mut self, field: &'static str) -> Result<usize, SnapshotError> {
        self.parse(field)
    }
}

fn next_line<'a, I>(lines: &mut I, what: &'static str) -> Result<&'a str, SnapshotError>
where
    I: Iterator<Item = &'a str>,
{
    lines.next().ok_or(SnapshotError::MissingLine(what))
}

/// Parse the world description line `A B C D E F G H Z W T Sw Sh Ss N M I L K`.
///
/// # Errors
///
/// Returns an error on a short line or a malformed field.
pub fn parse_world(line: &str) -> Result<WorldConfig, SnapshotError> {
    let actual = line.split_whitespace().count();
    if actual < WORLD_FIELDS {
        return Err(SnapshotError::FieldCount {
            section: "world",
            expected: WORLD_FIELDS,
            actual,
        });
    }

    let mut fields = Fields::new("world", line);
    let size = fields.parse("size")?;
    let hills_traversable = fields.flag("hill traversal")?;
    let color = fields.color("color")?;
    let mut scoring_parameters: Vec<f64> = vec![fields.parse("D")?, fields.parse("E")?];
    let marker_lifetime = fields.parse("marker lifetime")?;
    let storage_capacity = fields.parse("storage capacity")?;
    let harvest_removes_internal = fields.flag("internal removal")?;
    for field in ["Z", "W", "T", "Sw", "Sh", "Ss", "N", "M", "I"] {
        scoring_parameters.push(fields.parse(field)?);
    }
    let command_limit = fields.parse("command limit")?;
    scoring_parameters.push(fields.parse("K")?);

    Ok(WorldConfig {
        size,
        hills_traversable,
        color,
        marker_lifetime,
        storage_capacity,
        harvest_removes_internal,
        command_limit,
        scoring_parameters,
    })
}

/// Parse a map block: a size line, `size` rows of cells, then `size` rows of expiries.
///
/// An expiry token that is negative or not an integer means "no countdown".
///
/// # Errors
///
/// Returns an error if lines are missing or the rows do not form the grid.
pub fn parse_map<'a, I>(lines: &mut I, size: u16) -> Result<ToroidalGrid, SnapshotError>
where
    I: Iterator<Item = &'a str>,
{
    next_line(lines, "map size")?;
    let rows = (0..size)
        .map(|_| next_line(lines, "map row"))
        .collect::<Result<Vec<_>, _>>()?;
    let mut grid = ToroidalGrid::from_rows(&rows)?;

    for y in 0..size {
        let mut tokens = next_line(lines, "expiry row")?.split_whitespace();
        for x in 0..size {
            let expiry = tokens
                .next()
                .and_then(|token| token.parse::<i64>().ok())
                .and_then(|turns| u32::try_from(turns).ok());
            grid.set_expiry(Coord::new(x, y), expiry);
        }
    }

    Ok(grid)
}

/// Parse the worker roster: a count line, then `id x y n (color count)*n` per worker.
///
/// # Errors
///
/// Returns an error if lines are missing or a field is malformed or out of bounds.
pub fn parse_workers<'a, I>(lines: &mut I, size: u16) -> Result<Vec<WorkerRecord>, SnapshotError>
where
    I: Iterator<Item = &'a str>,
{
    let count = Fields::new("workers", next_line(lines, "worker count")?).count("count")?;
    let mut workers = Vec::new();
    for _ in 0..count {
        let mut fields = Fields::new("worker", next_line(lines, "worker")?);
        let id = fields.parse("id")?;
        let position = fields.coord(size)?;
        let stored = fields.count("storage entries")?;
        let storage = (0..stored)
            .map(|_| Ok((fields.color("stored color")?, fields.parse::<u32>("stored count")?)))
            .collect::<Result<_, SnapshotError>>()?;
        workers.push(WorkerRecord {
            id,
            position,
            storage,
        });
    }
    Ok(workers)
}

/// Parse the enemy roster: a count line, then `color x y` per worker.
///
/// # Errors
///
/// Returns an error if lines are missing or a field is malformed or out of bounds.
pub fn parse_enemies<'a, I>(lines: &mut I, size: u16) -> Result<Vec<EnemyRecord>, SnapshotError>
where
    I: Iterator<Item = &'a str>,
{
    let count = Fields::new("enemies", next_line(lines, "enemy count")?).count("count")?;
    (0..count)
        .map(|_| {
            let mut fields = Fields::new("enemy", next_line(lines, "enemy")?);
            Ok(EnemyRecord {
                color: fields.color("color")?,
                position: fields.coord(size)?,
            })
        })
        .collect()
}

/// Parse the three history lines: cleared cells, placed markers, scored seeds.
///
/// # Errors
///
/// Returns an error if lines are missing or a field is malformed or out of bounds.
pub fn parse_history<'a, I>(lines: &mut I, size: u16) -> Result<TurnDelta, SnapshotError>
where
    I: Iterator<Item = &'a str>,
{
    let mut cleared_fields = Fields::new("cleared", next_line(lines, "cleared cells")?);
    let cleared = (0..cleared_fields.count("count")?)
        .map(|_| cleared_fields.coord(size))
        .collect::<Result<_, _>>()?;

    let mut placed_fields = Fields::new("placed", next_line(lines, "placed markers")?);
    let placed = (0..placed_fields.count("count")?)
        .map(|_| {
            let at = placed_fields.coord(size)?;
            Ok((at, placed_fields.color("color")?))
        })
        .collect::<Result<_, SnapshotError>>()?;

    let mut scored_fields = Fields::new("scored", next_line(lines, "scored seeds")?);
    let scored = (0..scored_fields.count("count")?)
        .map(|_| scored_fields.coord(size))
        .collect::<Result<_, _>>()?;

    Ok(TurnDelta {
        cleared,
        placed,
        scored,
    })
}

/// Parse the `U V` time-to-end line.
///
/// # Errors
///
/// Returns an error on a short line or a malformed field.
pub fn parse_time_to_end(line: &str) -> Result<TimeToEnd, SnapshotError> {
    let mut fields = Fields::new("time to end", line);
    Ok(TimeToEnd {
        turns: fields.parse("turns")?,
        extra: fields.parse("extra")?,
    })
}

/// Parse a full snapshot: world line, map block, worker roster, enemy roster.
///
/// # Errors
///
/// Returns the first error of the section parsers.
pub fn parse_snapshot(text: &str) -> Result<Snapshot, SnapshotError> {
    let mut lines = text.lines();
    let world = parse_world(next_line(&mut lines, "world")?)?;
    let grid = parse_map(&mut lines, world.size)?;
    let workers = parse_workers(&mut lines, world.size)?;
    let enemies = parse_enemies(&mut lines, world.size)?;
    Ok(Snapshot {
        world,
        grid,
        workers,
        enemies,
    })
}
