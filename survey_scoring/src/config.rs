// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// A single cell, as read from or written to a sheet.
#[derive(PartialEq, Debug, Clone, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// True for empty cells and for text made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// The textual content of the cell. Whole numbers are rendered without
    /// a fractional part so that `3.0` reads as `3`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// A rectangular block of cells, row major.
pub type Grid = Vec<Vec<CellValue>>;

// ********* Questionnaire definitions ***********

/// One accepted answer for a question and the score it carries.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnswerOption {
    pub label: String,
    pub score: i32,
}

/// A question before its scoring key is attached.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BaseQuestion {
    pub index: u32,
    pub title: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    /// 1-based position of the question in the questionnaire.
    pub index: u32,
    /// May be empty: scoring never looks at it.
    pub title: String,
    /// Every label that may legally appear in the answer column.
    pub options: Vec<AnswerOption>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Scale {
    pub name: String,
    /// Indices of the summed questions, in declaration order.
    pub questions: Vec<u32>,
}

impl Scale {
    pub fn new(name: &str, questions: &[u32]) -> Scale {
        Scale {
            name: name.to_string(),
            questions: questions.to_vec(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Questionnaire {
    /// Lookup key in the catalog.
    pub id: String,
    /// Display name, printed in the header cell of the report block.
    pub name: String,
    /// Position of this questionnaire's block on a company sheet.
    pub index: u32,
    pub questions: Vec<Question>,
    pub scales: Vec<Scale>,
}

// ********* Responses ***********

/// The scores of one participant for one questionnaire.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CompletedQuestionnaire {
    pub questionnaire_id: String,
    pub questionnaire_name: String,
    pub responses: BTreeMap<u32, i32>,
}

/// Everything known about one row of the response sheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParticipantResponse {
    pub company: String,
    pub questionnaires: Vec<CompletedQuestionnaire>,
}

impl ParticipantResponse {
    pub fn questionnaire(&self, questionnaire_id: &str) -> Option<&CompletedQuestionnaire> {
        self.questionnaires
            .iter()
            .find(|cq| cq.questionnaire_id == questionnaire_id)
    }
}

// ********* Errors ***********

/// Inconsistencies in a questionnaire definition, detected when the catalog is built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CatalogError {
    DuplicateQuestionnaire { id: String },
    DuplicateQuestion { questionnaire: String, question: u32 },
    InvalidQuestionIndex { questionnaire: String },
    UnknownScaleQuestion {
        questionnaire: String,
        scale: String,
        question: u32,
    },
    KeyWidthMismatch {
        questionnaire: String,
        question: u32,
        expected: usize,
        found: usize,
    },
    EmptyOptionLabels { questionnaire: String },
}

impl Error for CatalogError {}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateQuestionnaire { id } => {
                write!(f, "questionnaire {:?} is defined more than once", id)
            }
            CatalogError::DuplicateQuestion {
                questionnaire,
                question,
            } => write!(
                f,
                "questionnaire {:?}: question {} is defined more than once",
                questionnaire, question
            ),
            CatalogError::InvalidQuestionIndex { questionnaire } => write!(
                f,
                "questionnaire {:?}: question indices must start at 1",
                questionnaire
            ),
            CatalogError::UnknownScaleQuestion {
                questionnaire,
                scale,
                question,
            } => write!(
                f,
                "questionnaire {:?}: scale {:?} refers to unknown question {}",
                questionnaire, scale, question
            ),
            CatalogError::KeyWidthMismatch {
                questionnaire,
                question,
                expected,
                found,
            } => write!(
                f,
                "questionnaire {:?}: the key of question {} has {} entries, expected {}",
                questionnaire, question, found, expected
            ),
            CatalogError::EmptyOptionLabels { questionnaire } => {
                write!(f, "questionnaire {:?}: no option labels", questionnaire)
            }
        }
    }
}

/// Errors that prevent a scoring run from completing.
#[derive(PartialEq, Debug, Clone)]
pub enum ScoringError {
    /// The sheet holding the raw responses does not exist.
    MissingSource { sheet: String },
    /// An answer has no score in its question's option set.
    UnknownOption {
        questionnaire: String,
        question: u32,
        value: String,
        /// 1-based sheet row, when known.
        row: Option<usize>,
    },
    /// An average was requested over zero participants.
    EmptyGroup { company: String },
    ColumnCountMismatch {
        questionnaire: String,
        columns: usize,
        questions: usize,
    },
    MissingResponse { questionnaire: String, question: u32 },
    UnknownQuestionnaire { id: String },
    /// Two questionnaires of the layout would write their blocks at the same place.
    OverlappingBlocks {
        first: String,
        second: String,
        ordinal: u32,
    },
    /// A handle that does not belong to the workbook.
    UnknownSheet { handle: usize },
    /// Rows and columns start at 1.
    InvalidPosition { row: usize, col: usize },
    Catalog(CatalogError),
}

impl ScoringError {
    /// Attaches the sheet row to errors raised while scoring that row.
    pub fn at_row(self, row_number: usize) -> ScoringError {
        match self {
            ScoringError::UnknownOption {
                questionnaire,
                question,
                value,
                row: None,
            } => ScoringError::UnknownOption {
                questionnaire,
                question,
                value,
                row: Some(row_number),
            },
            e => e,
        }
    }
}

impl From<CatalogError> for ScoringError {
    fn from(e: CatalogError) -> Self {
        ScoringError::Catalog(e)
    }
}

impl Error for ScoringError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScoringError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::MissingSource { sheet } => {
                write!(f, "the response sheet {:?} does not exist", sheet)
            }
            ScoringError::UnknownOption {
                questionnaire,
                question,
                value,
                row,
            } => {
                write!(
                    f,
                    "questionnaire {:?}, question {}: unknown answer {:?}",
                    questionnaire, question, value
                )?;
                if let Some(r) = row {
                    write!(f, " (row {})", r)?;
                }
                Ok(())
            }
            ScoringError::EmptyGroup { company } => {
                write!(f, "company {:?} has no participants to average", company)
            }
            ScoringError::ColumnCountMismatch {
                questionnaire,
                columns,
                questions,
            } => write!(
                f,
                "questionnaire {:?} has {} questions but {} answer columns were given",
                questionnaire, questions, columns
            ),
            ScoringError::MissingResponse {
                questionnaire,
                question,
            } => write!(
                f,
                "questionnaire {:?}: no response recorded for question {}",
                questionnaire, question
            ),
            ScoringError::UnknownQuestionnaire { id } => {
                write!(f, "no questionnaire {:?} in the catalog", id)
            }
            ScoringError::OverlappingBlocks {
                first,
                second,
                ordinal,
            } => write!(
                f,
                "questionnaires {:?} and {:?} both use block position {}: set a distinct ordinal for one of them",
                first, second, ordinal
            ),
            ScoringError::UnknownSheet { handle } => {
                write!(f, "no sheet with handle {} in the workbook", handle)
            }
            ScoringError::InvalidPosition { row, col } => {
                write!(f, "invalid cell position row {}, column {}", row, col)
            }
            ScoringError::Catalog(e) => write!(f, "invalid catalog: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("  \t").is_blank());
        assert!(!CellValue::from("Acme").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(3.0).as_text(), "3");
        assert_eq!(CellValue::Number(-2.0).as_text(), "-2");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
    }

    #[test]
    fn row_is_attached_once() {
        let e = ScoringError::UnknownOption {
            questionnaire: "q".to_string(),
            question: 3,
            value: "x".to_string(),
            row: None,
        };
        let e = e.at_row(7).at_row(9);
        assert!(matches!(e, ScoringError::UnknownOption { row: Some(7), .. }));
        assert!(e.to_string().ends_with("(row 7)"));
    }
}
