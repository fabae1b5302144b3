//! Room templates: the archetype → layout-variant table.

use std::collections::HashMap;
use std::fmt;

use labyrinth_core::error::GameError;
use serde::Deserialize;

/// Side length of a room in tiles. Local coordinates run `0..ROOM_SIZE`.
pub const ROOM_SIZE: usize = 11;

/// The five canonical room shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Archetype {
    /// One opening.
    #[serde(rename = "dead-end")]
    DeadEnd,
    /// Two opposite openings.
    #[serde(rename = "straight")]
    Straight,
    /// Two adjacent openings.
    #[serde(rename = "corner")]
    Corner,
    /// Three openings.
    #[serde(rename = "3-way-junction")]
    ThreeWayJunction,
    /// Four openings.
    #[serde(rename = "4-way-junction")]
    FourWayJunction,
}

impl Archetype {
    /// Every archetype, in resource-file order.
    pub const ALL: [Archetype; 5] = [
        Archetype::DeadEnd,
        Archetype::Straight,
        Archetype::Corner,
        Archetype::ThreeWayJunction,
        Archetype::FourWayJunction,
    ];

    /// The key used for this archetype in `room_templates.json`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Archetype::DeadEnd => "dead-end",
            Archetype::Straight => "straight",
            Archetype::Corner => "corner",
            Archetype::ThreeWayJunction => "3-way-junction",
            Archetype::FourWayJunction => "4-way-junction",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One cell of a template layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateSymbol {
    Wall,
    Space,
    UnlockedDoor,
    LockedDoor,
}

impl TemplateSymbol {
    /// Parses one layout character.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Wall),
            ' ' => Some(Self::Space),
            '/' => Some(Self::UnlockedDoor),
            '|' => Some(Self::LockedDoor),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Space => ' ',
            Self::UnlockedDoor => '/',
            Self::LockedDoor => '|',
        }
    }
}

/// A fixed-size room layout, stored row by row (`rows[y][x]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTemplate {
    rows: [[TemplateSymbol; ROOM_SIZE]; ROOM_SIZE],
}

impl RoomTemplate {
    /// Parses a layout given as `ROOM_SIZE` strings of `ROOM_SIZE` symbols.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the layout has the wrong shape
    /// or contains a character outside the template alphabet.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, GameError> {
        if lines.len() != ROOM_SIZE {
            return Err(GameError::Configuration(format!(
                "room template must have {ROOM_SIZE} rows, found {}",
                lines.len()
            )));
        }

        let mut rows = [[TemplateSymbol::Wall; ROOM_SIZE]; ROOM_SIZE];
        for (y, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != ROOM_SIZE {
                return Err(GameError::Configuration(format!(
                    "room template row {y} must have {ROOM_SIZE} columns, found {}",
                    symbols.len()
                )));
            }
            for (x, c) in symbols.into_iter().enumerate() {
                rows[y][x] = TemplateSymbol::from_char(c).ok_or_else(|| {
                    GameError::Configuration(format!(
                        "unknown room template symbol {c:?} at ({x}, {y})"
                    ))
                })?;
            }
        }
        Ok(Self { rows })
    }

    /// Symbol at local `(x, y)`.
    #[must_use]
    pub fn symbol(&self, x: usize, y: usize) -> TemplateSymbol {
        self.rows[y][x]
    }

    #[must_use]
    pub fn rows(&self) -> &[[TemplateSymbol; ROOM_SIZE]; ROOM_SIZE] {
        &self.rows
    }

    /// The layout turned one quarter clockwise (reverse rows, then transpose).
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        let mut rows = [[TemplateSymbol::Wall; ROOM_SIZE]; ROOM_SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[ROOM_SIZE - 1 - x][y];
            }
        }
        Self { rows }
    }

    /// The layout turned `quarter_turns` quarters clockwise.
    #[must_use]
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        (0..quarter_turns % 4).fold(self.clone(), |template, _| template.rotated_cw())
    }
}

#[derive(Debug, Deserialize)]
struct RawVariant {
    layout: Vec<String>,
}

/// Template variants for every archetype.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    variants: HashMap<Archetype, Vec<RoomTemplate>>,
}

impl TemplateCatalog {
    /// Builds a catalog, requiring at least one variant per archetype.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if an archetype has no variants.
    pub fn new(variants: HashMap<Archetype, Vec<RoomTemplate>>) -> Result<Self, GameError> {
        for archetype in Archetype::ALL {
            if variants.get(&archetype).is_none_or(Vec::is_empty) {
                return Err(GameError::Configuration(format!(
                    "no room template variants for {archetype}"
                )));
            }
        }
        Ok(Self { variants })
    }

    /// Parses `room_templates.json`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the JSON is malformed, a layout
    /// is invalid, or an archetype is missing.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let raw: HashMap<Archetype, Vec<RawVariant>> = serde_json::from_str(json)
            .map_err(|e| GameError::Configuration(format!("room templates: {e}")))?;

        let mut variants = HashMap::new();
        for (archetype, raw_variants) in raw {
            let parsed = raw_variants
                .iter()
                .enumerate()
                .map(|(index, variant)| {
                    RoomTemplate::parse(&variant.layout).map_err(|e| {
                        GameError::Configuration(format!("{archetype} variant {index}: {e}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            variants.insert(archetype, parsed);
        }
        Self::new(variants)
    }

    /// All variants for `archetype`.
    #[must_use]
    pub fn variants(&self, archetype: Archetype) -> &[RoomTemplate] {
        self.variants.get(&archetype).map_or(&[], Vec::as_slice)
    }
}
