//! Glyph table: how tiles and entities are drawn.

use labyrinth_core::error::GameError;
use labyrinth_core::screen::display_width;
use serde::Deserialize;

use super::templates::TemplateSymbol;

/// Display glyphs for every tile and entity kind.
///
/// All glyphs occupy the same number of terminal cells so a room renders
/// as an aligned grid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GlyphTable {
    #[serde(rename = "Wall")]
    pub wall: String,
    #[serde(rename = "Space")]
    pub space: String,
    /// `[unlocked, locked]`.
    #[serde(rename = "Door")]
    pub door: [String; 2],
    #[serde(rename = "NPC")]
    pub npc: String,
    /// Default player glyph before a character is chosen.
    #[serde(rename = "Player")]
    pub player: String,
}

impl GlyphTable {
    /// Parses and validates `glyphs.json`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the JSON is malformed or the
    /// glyphs do not share one display width.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let table: Self = serde_json::from_str(json)
            .map_err(|e| GameError::Configuration(format!("glyph table: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Checks that every glyph is non-empty and equally wide.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` describing the first offending glyph.
    pub fn validate(&self) -> Result<(), GameError> {
        let width = self.cell_width();
        if width == 0 {
            return Err(GameError::Configuration(
                "glyph table: Wall glyph must not be empty".to_owned(),
            ));
        }
        let named = [
            ("Space", &self.space),
            ("Door[0]", &self.door[0]),
            ("Door[1]", &self.door[1]),
            ("NPC", &self.npc),
            ("Player", &self.player),
        ];
        for (name, glyph) in named {
            if display_width(glyph) != width {
                return Err(GameError::Configuration(format!(
                    "glyph table: {name} glyph {glyph:?} must be {width} cells wide"
                )));
            }
        }
        Ok(())
    }

    /// Width of one room cell in terminal columns.
    #[must_use]
    pub fn cell_width(&self) -> u16 {
        display_width(&self.wall)
    }

    /// Glyph for a static tile.
    #[must_use]
    pub fn tile(&self, symbol: TemplateSymbol) -> &str {
        match symbol {
            TemplateSymbol::Wall => &self.wall,
            TemplateSymbol::Space => &self.space,
            TemplateSymbol::UnlockedDoor => &self.door[0],
            TemplateSymbol::LockedDoor => &self.door[1],
        }
    }
}
