//! Resource loading.
//!
//! The three tables ship embedded in the binary. A resource directory may
//! override any of them file by file; files that are absent fall back to
//! the embedded copy.

use std::fs;
use std::path::Path;

use labyrinth_core::error::GameError;
use tracing::info;

use crate::domain::glyphs::GlyphTable;
use crate::domain::questions::{QuizRecord, parse_questions};
use crate::domain::templates::TemplateCatalog;

pub const ROOM_TEMPLATES_FILE: &str = "room_templates.json";
pub const GLYPHS_FILE: &str = "glyphs.json";
pub const QUESTIONS_FILE: &str = "questions.json";

const EMBEDDED_ROOM_TEMPLATES: &str = include_str!("../../resources/room_templates.json");
const EMBEDDED_GLYPHS: &str = include_str!("../../resources/glyphs.json");
const EMBEDDED_QUESTIONS: &str = include_str!("../../resources/questions.json");

/// Every read-only table the game needs, validated.
#[derive(Debug, Clone)]
pub struct ResourceTables {
    pub templates: TemplateCatalog,
    pub glyphs: GlyphTable,
    pub questions: Vec<QuizRecord>,
}

impl ResourceTables {
    /// Parses the embedded tables.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if an embedded table is invalid.
    pub fn embedded() -> Result<Self, GameError> {
        Self::from_sources(EMBEDDED_ROOM_TEMPLATES, EMBEDDED_GLYPHS, EMBEDDED_QUESTIONS)
    }

    /// Loads tables, preferring files in `dir` over the embedded copies.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if an override file cannot be read
    /// or any table fails validation.
    pub fn load(dir: Option<&Path>) -> Result<Self, GameError> {
        let Some(dir) = dir else {
            info!("using embedded resource tables");
            return Self::embedded();
        };

        let templates = read_or_embedded(dir, ROOM_TEMPLATES_FILE, EMBEDDED_ROOM_TEMPLATES)?;
        let glyphs = read_or_embedded(dir, GLYPHS_FILE, EMBEDDED_GLYPHS)?;
        let questions = read_or_embedded(dir, QUESTIONS_FILE, EMBEDDED_QUESTIONS)?;
        Self::from_sources(&templates, &glyphs, &questions)
    }

    /// Parses tables from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` naming the first invalid table.
    pub fn from_sources(
        room_templates: &str,
        glyphs: &str,
        questions: &str,
    ) -> Result<Self, GameError> {
        let tables = Self {
            templates: TemplateCatalog::from_json(room_templates)?,
            glyphs: GlyphTable::from_json(glyphs)?,
            questions: parse_questions(questions)?,
        };
        info!(
            questions = tables.questions.len(),
            cell_width = tables.glyphs.cell_width(),
            "resource tables loaded"
        );
        Ok(tables)
    }
}

fn read_or_embedded(dir: &Path, name: &str, embedded: &str) -> Result<String, GameError> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(embedded.to_owned());
    }
    info!(path = %path.display(), "loading resource override");
    fs::read_to_string(&path)
        .map_err(|e| GameError::Configuration(format!("cannot read {}: {e}", path.display())))
}
