use log::debug;

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::config::*;

/// The form under which answer labels are compared: trimmed, lower case,
/// with every run of whitespace replaced by a single space.
pub fn normalize_label(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<String>>()
        .join(" ")
}

impl Question {
    /// The score carried by a raw answer, if it matches one of the options.
    pub fn score(&self, raw: &str) -> Option<i32> {
        let needle = normalize_label(raw);
        self.options
            .iter()
            .find(|o| normalize_label(&o.label) == needle)
            .map(|o| o.score)
    }
}

/// Scores the cells of `row` that belong to `questionnaire`.
///
/// `columns` holds 0-based cell positions. The first cell of the range answers
/// question 1, the next one question 2, and so on. Cells missing at the end of
/// a short row count as empty answers.
pub fn normalize(
    row: &[CellValue],
    questionnaire: &Questionnaire,
    columns: RangeInclusive<usize>,
) -> Result<CompletedQuestionnaire, ScoringError> {
    let width = columns.clone().count();
    if width != questionnaire.questions.len() {
        return Err(ScoringError::ColumnCountMismatch {
            questionnaire: questionnaire.id.clone(),
            columns: width,
            questions: questionnaire.questions.len(),
        });
    }

    let mut responses: BTreeMap<u32, i32> = BTreeMap::new();
    for (pos, col) in columns.enumerate() {
        let question_index = (pos + 1) as u32;
        let question =
            questionnaire
                .question(question_index)
                .ok_or_else(|| ScoringError::MissingResponse {
                    questionnaire: questionnaire.id.clone(),
                    question: question_index,
                })?;
        let value = row.get(col).map(|c| c.as_text()).unwrap_or_default();
        let score = question
            .score(&value)
            .ok_or_else(|| ScoringError::UnknownOption {
                questionnaire: questionnaire.id.clone(),
                question: question_index,
                value: value.clone(),
                row: None,
            })?;
        responses.insert(question_index, score);
    }
    debug!(
        "normalize: questionnaire {:?}: {:?}",
        questionnaire.id, responses
    );

    Ok(CompletedQuestionnaire {
        questionnaire_id: questionnaire.id.clone(),
        questionnaire_name: questionnaire.name.clone(),
        responses,
    })
}
