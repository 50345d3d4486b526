use log::debug;

use std::collections::HashSet;

pub use crate::config::*;
use crate::instruments;

/// An ordered list of answer labels, from the weakest to the strongest agreement.
///
/// The forward map scores the labels 1..=n, the reversed map n..=1.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LikertScale {
    labels: Vec<String>,
}

impl LikertScale {
    pub fn new(labels: &[&str]) -> LikertScale {
        LikertScale {
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_labels(labels: Vec<String>) -> LikertScale {
        LikertScale { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn forward(&self) -> Vec<AnswerOption> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| AnswerOption {
                label: label.clone(),
                score: (idx + 1) as i32,
            })
            .collect()
    }

    pub fn reversed(&self) -> Vec<AnswerOption> {
        let n = self.labels.len();
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| AnswerOption {
                label: label.clone(),
                score: (n - idx) as i32,
            })
            .collect()
    }
}

/// How the options of one question are derived.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringRule<'a> {
    /// The shared forward map of the scale.
    Forward(&'a LikertScale),
    /// The shared reversed map of the scale.
    Reversed(&'a LikertScale),
    /// A key of its own: `labels[i]` scores `key[i]`.
    Keyed { labels: &'a [String], key: &'a [i32] },
}

/// Attaches the options resolved from `rule` to a question.
pub fn resolve_options(base: &BaseQuestion, rule: &ScoringRule) -> Question {
    let options = match rule {
        ScoringRule::Forward(scale) => scale.forward(),
        ScoringRule::Reversed(scale) => scale.reversed(),
        ScoringRule::Keyed { labels, key } => labels
            .iter()
            .zip(key.iter())
            .map(|(label, score)| AnswerOption {
                label: label.clone(),
                score: *score,
            })
            .collect(),
    };
    Question {
        index: base.index,
        title: base.title.clone(),
        options,
    }
}

/// Numbers the titles from 1. An empty title list is expanded to `count` blank titles.
pub fn base_questions(titles: &[String], count: usize) -> Vec<BaseQuestion> {
    if titles.is_empty() {
        (1..=count)
            .map(|index| BaseQuestion {
                index: index as u32,
                title: String::new(),
            })
            .collect()
    } else {
        titles
            .iter()
            .enumerate()
            .map(|(idx, title)| BaseQuestion {
                index: (idx + 1) as u32,
                title: title.clone(),
            })
            .collect()
    }
}

/// The identity of a questionnaire, independent of its scoring scheme.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionnaireHeader {
    pub id: String,
    pub name: String,
    pub index: u32,
}

/// Builds a Likert questionnaire. Questions listed in `reversed` use the reversed map.
pub fn likert_questionnaire(
    header: QuestionnaireHeader,
    questions: &[BaseQuestion],
    scale: &LikertScale,
    reversed: &[u32],
    scales: Vec<Scale>,
) -> Result<Questionnaire, CatalogError> {
    if scale.labels().is_empty() {
        return Err(CatalogError::EmptyOptionLabels {
            questionnaire: header.id,
        });
    }
    let reversed: HashSet<u32> = reversed.iter().cloned().collect();
    let questions: Vec<Question> = questions
        .iter()
        .map(|q| {
            let rule = if reversed.contains(&q.index) {
                ScoringRule::Reversed(scale)
            } else {
                ScoringRule::Forward(scale)
            };
            resolve_options(q, &rule)
        })
        .collect();
    Questionnaire::new(header, questions, scales)
}

/// Builds a forced-choice questionnaire: question `i` is scored with `keys[i - 1]`.
pub fn forced_choice_questionnaire(
    header: QuestionnaireHeader,
    questions: &[BaseQuestion],
    labels: &[String],
    keys: &[Vec<i32>],
    scales: Vec<Scale>,
) -> Result<Questionnaire, CatalogError> {
    if labels.is_empty() {
        return Err(CatalogError::EmptyOptionLabels {
            questionnaire: header.id,
        });
    }
    let mut res: Vec<Question> = Vec::new();
    for q in questions.iter() {
        let key = keys
            .get((q.index as usize).wrapping_sub(1))
            .map(|k| k.as_slice())
            .unwrap_or(&[]);
        if key.len() != labels.len() {
            return Err(CatalogError::KeyWidthMismatch {
                questionnaire: header.id,
                question: q.index,
                expected: labels.len(),
                found: key.len(),
            });
        }
        res.push(resolve_options(q, &ScoringRule::Keyed { labels, key }));
    }
    Questionnaire::new(header, res, scales)
}

impl Questionnaire {
    /// Assembles a questionnaire and checks that every scale refers to existing questions.
    pub fn new(
        header: QuestionnaireHeader,
        questions: Vec<Question>,
        scales: Vec<Scale>,
    ) -> Result<Questionnaire, CatalogError> {
        let mut seen: HashSet<u32> = HashSet::new();
        for q in questions.iter() {
            if q.index == 0 {
                return Err(CatalogError::InvalidQuestionIndex {
                    questionnaire: header.id,
                });
            }
            if !seen.insert(q.index) {
                return Err(CatalogError::DuplicateQuestion {
                    questionnaire: header.id,
                    question: q.index,
                });
            }
        }
        for scale in scales.iter() {
            if let Some(missing) = scale.questions.iter().find(|i| !seen.contains(*i)) {
                return Err(CatalogError::UnknownScaleQuestion {
                    questionnaire: header.id,
                    scale: scale.name.clone(),
                    question: *missing,
                });
            }
        }
        let mut questions = questions;
        questions.sort_by_key(|q| q.index);
        debug!(
            "Questionnaire {:?}: {} questions, {} scales",
            header.id,
            questions.len(),
            scales.len()
        );
        Ok(Questionnaire {
            id: header.id,
            name: header.name,
            index: header.index,
            questions,
            scales,
        })
    }

    pub fn question(&self, index: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.index == index)
    }
}

/// All the questionnaires known to a run.
///
/// Built once, then only read.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Catalog {
    questionnaires: Vec<Questionnaire>,
}

impl Catalog {
    pub fn new(questionnaires: Vec<Questionnaire>) -> Result<Catalog, CatalogError> {
        let mut ids: HashSet<&str> = HashSet::new();
        for q in questionnaires.iter() {
            if !ids.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateQuestionnaire { id: q.id.clone() });
            }
        }
        Ok(Catalog { questionnaires })
    }

    /// The instruments shipped with the library.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Catalog::new(vec![
            instruments::team_questionnaire()?,
            instruments::personnel_questionnaire()?,
        ])
    }

    /// A new catalog holding the questionnaires of both catalogs.
    pub fn merge(&self, other: Vec<Questionnaire>) -> Result<Catalog, CatalogError> {
        let mut all = self.questionnaires.clone();
        all.extend(other);
        Catalog::new(all)
    }

    pub fn get_questionnaire(&self, id: &str) -> Result<&Questionnaire, ScoringError> {
        self.questionnaires
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| ScoringError::UnknownQuestionnaire { id: id.to_string() })
    }

    pub fn questionnaires(&self) -> &[Questionnaire] {
        &self.questionnaires
    }
}
