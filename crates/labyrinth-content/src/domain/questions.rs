//! Quiz records and the question pool.

use std::collections::HashSet;

use labyrinth_core::error::GameError;
use labyrinth_core::rng::DeterministicRng;
use serde::Deserialize;

/// Records whose id starts with this prefix are only asked on request.
pub const SPECIAL_PREFIX: &str = "special-";

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizRecord {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    /// Index into `choices` of the right answer.
    pub correct: usize,
}

impl QuizRecord {
    #[must_use]
    pub fn is_index_correct(&self, index: usize) -> bool {
        index == self.correct
    }
}

/// Parses and validates `questions.json`.
///
/// # Errors
///
/// Returns `GameError::Configuration` if the JSON is malformed, the list is
/// empty, an id repeats, a record has no choices, or `correct` is out of
/// range.
pub fn parse_questions(json: &str) -> Result<Vec<QuizRecord>, GameError> {
    let records: Vec<QuizRecord> = serde_json::from_str(json)
        .map_err(|e| GameError::Configuration(format!("questions: {e}")))?;
    if records.is_empty() {
        return Err(GameError::Configuration(
            "questions: at least one question is required".to_owned(),
        ));
    }

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            return Err(GameError::Configuration(format!(
                "questions: duplicate id {:?}",
                record.id
            )));
        }
        if record.choices.is_empty() {
            return Err(GameError::Configuration(format!(
                "questions: {:?} has no choices",
                record.id
            )));
        }
        if record.correct >= record.choices.len() {
            return Err(GameError::Configuration(format!(
                "questions: {:?} marks choice {} correct but has {} choices",
                record.id,
                record.correct,
                record.choices.len()
            )));
        }
    }
    Ok(records)
}

/// Question pool that avoids repeats until every candidate was asked.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    unseen: Vec<QuizRecord>,
    seen: Vec<QuizRecord>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(records: Vec<QuizRecord>) -> Self {
        Self {
            unseen: records,
            seen: Vec::new(),
        }
    }

    /// Picks a question and moves it to the seen pile.
    ///
    /// With a `prefix`, only records whose id starts with it qualify;
    /// without one, `special-` records are excluded. Once no unseen record
    /// qualifies, the seen pile is recycled.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if no record matches at all.
    pub fn pick(
        &mut self,
        prefix: Option<&str>,
        rng: &mut dyn DeterministicRng,
    ) -> Result<QuizRecord, GameError> {
        if !self.unseen.iter().any(|q| Self::qualifies(q, prefix)) {
            self.unseen.append(&mut self.seen);
        }

        let candidates: Vec<usize> = self
            .unseen
            .iter()
            .enumerate()
            .filter(|(_, q)| Self::qualifies(q, prefix))
            .map(|(index, _)| index)
            .collect();

        let chosen = rng
            .pick_index(candidates.len())
            .map(|i| candidates[i])
            .ok_or_else(|| {
                GameError::Configuration(match prefix {
                    Some(prefix) => format!("no question id starts with {prefix:?}"),
                    None => "no regular questions available".to_owned(),
                })
            })?;

        let record = self.unseen.remove(chosen);
        self.seen.push(record.clone());
        Ok(record)
    }

    /// Number of records not asked since the last recycle.
    #[must_use]
    pub fn unseen_len(&self) -> usize {
        self.unseen.len()
    }

    fn qualifies(record: &QuizRecord, prefix: Option<&str>) -> bool {
        match prefix {
            Some(prefix) => record.id.starts_with(prefix),
            None => !record.id.starts_with(SPECIAL_PREFIX),
        }
    }
}
