use log::{debug, info, warn};

use crate::config::*;

/// Scale totals for the participants of one company, in catalog scale order.
#[derive(PartialEq, Debug, Clone)]
pub struct ScaleAggregate {
    pub scale_names: Vec<String>,
    /// One entry per participant, each holding one sum per scale.
    pub per_participant: Vec<Vec<i64>>,
    /// The mean of each scale over the participants.
    pub average: Vec<f64>,
}

impl ScaleAggregate {
    pub fn participant_count(&self) -> usize {
        self.per_participant.len()
    }

    pub fn participant_sum(&self, participant: usize, scale_name: &str) -> Option<i64> {
        let pos = self.scale_names.iter().position(|n| n == scale_name)?;
        self.per_participant.get(participant).map(|sums| sums[pos])
    }

    pub fn average_of(&self, scale_name: &str) -> Option<f64> {
        let pos = self.scale_names.iter().position(|n| n == scale_name)?;
        self.average.get(pos).cloned()
    }
}

/// The sum of the responses listed by the scale.
pub fn scale_sum(
    scale: &Scale,
    completed: &CompletedQuestionnaire,
) -> Result<i64, ScoringError> {
    let mut total: i64 = 0;
    for idx in scale.questions.iter() {
        let score = completed
            .responses
            .get(idx)
            .ok_or_else(|| ScoringError::MissingResponse {
                questionnaire: completed.questionnaire_id.clone(),
                question: *idx,
            })?;
        total += *score as i64;
    }
    Ok(total)
}

/// Scale sums for every participant, and their average.
///
/// `company` only names the group in the error raised when it is empty.
pub fn aggregate(
    company: &str,
    completed: &[&CompletedQuestionnaire],
    questionnaire: &Questionnaire,
) -> Result<ScaleAggregate, ScoringError> {
    if completed.is_empty() {
        return Err(ScoringError::EmptyGroup {
            company: company.to_string(),
        });
    }

    let mut per_participant: Vec<Vec<i64>> = Vec::new();
    for cq in completed.iter() {
        let sums = questionnaire
            .scales
            .iter()
            .map(|scale| scale_sum(scale, cq))
            .collect::<Result<Vec<i64>, ScoringError>>()?;
        per_participant.push(sums);
    }

    let count = per_participant.len() as f64;
    let average: Vec<f64> = (0..questionnaire.scales.len())
        .map(|pos| {
            let total: i64 = per_participant.iter().map(|sums| sums[pos]).sum();
            total as f64 / count
        })
        .collect();
    debug!(
        "aggregate: {:?} / {:?}: averages {:?}",
        company, questionnaire.id, average
    );

    Ok(ScaleAggregate {
        scale_names: questionnaire.scales.iter().map(|s| s.name.clone()).collect(),
        per_participant,
        average,
    })
}

/// The participants of one company, in input order.
#[derive(Debug, Clone)]
pub struct CompanyGroup<'a> {
    pub company: String,
    pub participants: Vec<&'a ParticipantResponse>,
}

impl<'a> CompanyGroup<'a> {
    /// The completed questionnaires of all the participants for one questionnaire.
    pub fn completed(
        &self,
        questionnaire: &Questionnaire,
    ) -> Result<Vec<&'a CompletedQuestionnaire>, ScoringError> {
        self.participants
            .iter()
            .map(|p| {
                p.questionnaire(&questionnaire.id)
                    .ok_or_else(|| ScoringError::UnknownQuestionnaire {
                        id: questionnaire.id.clone(),
                    })
            })
            .collect()
    }
}

/// Groups the participants by exact company name, in order of first appearance.
/// Participants with a blank company are left out.
pub fn group_by_company(responses: &[ParticipantResponse]) -> Vec<CompanyGroup<'_>> {
    let mut groups: Vec<CompanyGroup> = Vec::new();
    let mut skipped = 0;
    for pr in responses.iter() {
        if pr.company.trim().is_empty() {
            skipped += 1;
            continue;
        }
        match groups.iter().position(|g| g.company == pr.company) {
            Some(pos) => groups[pos].participants.push(pr),
            None => groups.push(CompanyGroup {
                company: pr.company.clone(),
                participants: vec![pr],
            }),
        }
    }
    if skipped > 0 {
        warn!(
            "group_by_company: {} participant(s) without a company were left out",
            skipped
        );
    }
    info!("group_by_company: {} companies", groups.len());
    groups
}
