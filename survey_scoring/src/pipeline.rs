use log::{debug, info};

use std::ops::RangeInclusive;

use crate::aggregate::*;
use crate::catalog::Catalog;
use crate::config::*;
use crate::normalize::normalize;
use crate::report::{block_start_row, build_report};
use crate::sheet::Workbook;

/// Name of the sheet where form tools store the responses.
pub const DEFAULT_RESPONSES_SHEET: &str = "Form Responses 1";

/// Where a questionnaire's answers sit in a response row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionnaireColumns {
    pub questionnaire_id: String,
    /// 0-based cell positions of the answers, first question first.
    pub columns: RangeInclusive<usize>,
    /// Overrides the block position defined by the questionnaire.
    pub ordinal: Option<u32>,
}

/// The shape of the response sheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyLayout {
    pub responses_sheet: String,
    /// 1-based row of the first response, below the header.
    pub first_data_row: usize,
    /// 0-based position of the cell whose emptiness ends the data.
    pub lead_column: usize,
    /// 0-based position of the company name.
    pub company_column: usize,
    pub questionnaires: Vec<QuestionnaireColumns>,
}

impl SurveyLayout {
    /// The layout of the form spreadsheets: timestamp in A, company in B,
    /// then the answers of each questionnaire one after the other.
    pub fn packed(catalog: &Catalog, questionnaire_ids: &[String]) -> Result<SurveyLayout, ScoringError> {
        let mut start = 2;
        let mut questionnaires: Vec<QuestionnaireColumns> = Vec::new();
        for id in questionnaire_ids.iter() {
            let q = catalog.get_questionnaire(id)?;
            let end = start + q.questions.len() - 1;
            questionnaires.push(QuestionnaireColumns {
                questionnaire_id: id.clone(),
                columns: start..=end,
                ordinal: None,
            });
            start = end + 1;
        }
        Ok(SurveyLayout {
            responses_sheet: DEFAULT_RESPONSES_SHEET.to_string(),
            first_data_row: 2,
            lead_column: 0,
            company_column: 1,
            questionnaires,
        })
    }
}

/// A questionnaire block, as written on a company sheet.
#[derive(PartialEq, Debug, Clone)]
pub struct QuestionnaireBlock {
    pub questionnaire_id: String,
    pub questionnaire_name: String,
    pub start_row: usize,
    pub aggregate: ScaleAggregate,
    pub grid: Grid,
}

#[derive(PartialEq, Debug, Clone)]
pub struct CompanyReport {
    pub company: String,
    pub blocks: Vec<QuestionnaireBlock>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RunSummary {
    pub participant_count: usize,
    pub companies: Vec<CompanyReport>,
}

/// Reads and scores the response rows, stopping at the first row whose lead cell is blank.
pub fn read_participant_responses<W: Workbook>(
    book: &W,
    catalog: &Catalog,
    layout: &SurveyLayout,
) -> Result<Vec<ParticipantResponse>, ScoringError> {
    let questionnaires = layout
        .questionnaires
        .iter()
        .map(|qc| catalog.get_questionnaire(&qc.questionnaire_id))
        .collect::<Result<Vec<_>, ScoringError>>()?;

    let mut res: Vec<ParticipantResponse> = Vec::new();
    let mut row_number = layout.first_data_row;
    loop {
        let row = book.read_row(&layout.responses_sheet, row_number)?;
        // A lead cell holding only whitespace counts as empty.
        let present = row
            .get(layout.lead_column)
            .map(|c| !c.is_blank())
            .unwrap_or(false);
        if !present {
            break;
        }
        debug!("read_participant_responses: row {}: {:?}", row_number, row);

        let company = row
            .get(layout.company_column)
            .map(|c| c.as_text())
            .unwrap_or_default();
        let mut completed: Vec<CompletedQuestionnaire> = Vec::new();
        for (q, qc) in questionnaires.iter().zip(layout.questionnaires.iter()) {
            let cq = normalize(&row, q, qc.columns.clone()).map_err(|e| e.at_row(row_number))?;
            completed.push(cq);
        }
        res.push(ParticipantResponse {
            company,
            questionnaires: completed,
        });
        row_number += 1;
    }
    info!(
        "read_participant_responses: {} participants in {:?}",
        res.len(),
        layout.responses_sheet
    );
    Ok(res)
}

fn block_ordinal(questionnaire: &Questionnaire, qc: &QuestionnaireColumns) -> u32 {
    qc.ordinal.unwrap_or(questionnaire.index)
}

/// Every company gets the same number of rows per block, so two blocks
/// overlap exactly when they share an ordinal.
fn check_block_positions(catalog: &Catalog, layout: &SurveyLayout) -> Result<(), ScoringError> {
    let mut taken: Vec<(u32, &str)> = Vec::new();
    for qc in layout.questionnaires.iter() {
        let q = catalog.get_questionnaire(&qc.questionnaire_id)?;
        let ordinal = block_ordinal(q, qc);
        if let Some((_, first)) = taken.iter().find(|(o, _)| *o == ordinal) {
            return Err(ScoringError::OverlappingBlocks {
                first: first.to_string(),
                second: qc.questionnaire_id.clone(),
                ordinal,
            });
        }
        taken.push((ordinal, qc.questionnaire_id.as_str()));
    }
    Ok(())
}

/// Runs the whole scoring: reads the responses, then rewrites one sheet per company.
///
/// Nothing is written when the responses cannot be read or scored.
pub fn process_responses<W: Workbook>(
    book: &mut W,
    catalog: &Catalog,
    layout: &SurveyLayout,
) -> Result<RunSummary, ScoringError> {
    if !book.sheet_names().contains(&layout.responses_sheet) {
        return Err(ScoringError::MissingSource {
            sheet: layout.responses_sheet.clone(),
        });
    }
    check_block_positions(catalog, layout)?;
    let responses = read_participant_responses(book, catalog, layout)?;
    let groups = group_by_company(&responses);

    // Everything is computed before the first write.
    let mut companies: Vec<CompanyReport> = Vec::new();
    for group in groups.iter() {
        let mut blocks: Vec<QuestionnaireBlock> = Vec::new();
        for qc in layout.questionnaires.iter() {
            let q = catalog.get_questionnaire(&qc.questionnaire_id)?;
            let completed = group.completed(q)?;
            let agg = aggregate(&group.company, &completed, q)?;
            let grid = build_report(&group.company, q, &agg);
            let ordinal = block_ordinal(q, qc);
            blocks.push(QuestionnaireBlock {
                questionnaire_id: q.id.clone(),
                questionnaire_name: q.name.clone(),
                start_row: block_start_row(ordinal, agg.participant_count()),
                aggregate: agg,
                grid,
            });
        }
        companies.push(CompanyReport {
            company: group.company.clone(),
            blocks,
        });
    }

    for report in companies.iter() {
        let handle = book.get_or_create_sheet(&report.company);
        book.clear_sheet(handle);
        for block in report.blocks.iter() {
            debug!(
                "process_responses: {:?}: writing {:?} at row {}",
                report.company, block.questionnaire_id, block.start_row
            );
            book.write_grid(handle, block.start_row, 1, &block.grid)?;
        }
    }
    info!("process_responses: wrote {} company sheets", companies.len());

    Ok(RunSummary {
        participant_count: responses.len(),
        companies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;
    use crate::instruments::*;
    use crate::sheet::*;

    const TOP: &str = "Да, совершенно верно";
    const BOTTOM: &str = "Нет, это совсем не так";

    fn team_row(company: &str, answer: impl Fn(u32) -> String) -> Vec<CellValue> {
        let mut row: Vec<CellValue> = vec!["2024-05-01 10:00".into(), company.into()];
        for idx in 1..=TEAM_QUESTION_COUNT as u32 {
            row.push(CellValue::Text(answer(idx)));
        }
        row
    }

    fn best_answers(q: &Questionnaire) -> impl Fn(u32) -> String + '_ {
        move |idx| {
            let question = q.question(idx).unwrap();
            if question.options[0].score == 5 {
                BOTTOM.to_string()
            } else {
                TOP.to_string()
            }
        }
    }

    fn header_row() -> Vec<CellValue> {
        vec!["Timestamp".into(), "Company".into()]
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn team_layout(catalog: &Catalog) -> SurveyLayout {
        SurveyLayout::packed(catalog, &["team".to_string()]).unwrap()
    }

    #[test]
    fn top_answers_give_maximal_scores() {
        init_logger();
        let catalog = Catalog::builtin().unwrap();
        let team = catalog.get_questionnaire("team").unwrap();
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![
                header_row(),
                team_row("Acme", best_answers(team)),
                team_row("Acme", best_answers(team)),
            ],
        );
        let summary = process_responses(&mut wb, &catalog, &team_layout(&catalog)).unwrap();
        assert_eq!(summary.participant_count, 2);
        assert_eq!(summary.companies.len(), 1);

        let block = &summary.companies[0].blocks[0];
        for (pos, scale) in team.scales.iter().enumerate() {
            let expected = 5 * scale.questions.len() as i64;
            assert_eq!(block.aggregate.per_participant[0][pos], expected);
            assert_eq!(block.aggregate.per_participant[1][pos], expected);
            assert_eq!(block.aggregate.average[pos], expected as f64);
        }

        let sheet = wb.sheet("Acme").unwrap();
        assert_eq!(sheet.rows().len(), 4);
        assert_eq!(sheet.cell(1, 1), CellValue::from("Опросник"));
        assert_eq!(sheet.cell(1, 2), CellValue::from("Руководитель.Видение"));
        assert_eq!(sheet.cell(2, 1), CellValue::from("Acme 1"));
        assert_eq!(sheet.cell(3, 1), CellValue::from("Acme 2"));
        assert_eq!(sheet.cell(4, 1), CellValue::from("Acme AVG"));
        assert_eq!(sheet.cell(4, 2), CellValue::Number(20.0));
        assert_eq!(sheet.width(), 12);
    }

    #[test]
    fn casing_and_spacing_do_not_change_scores() {
        let catalog = Catalog::builtin().unwrap();
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![
                header_row(),
                team_row("Acme", |_| "Скорее да, чем нет".to_string()),
                team_row("Beta", |_| "  скорее   ДА,  чем нет".to_string()),
            ],
        );
        let summary = process_responses(&mut wb, &catalog, &team_layout(&catalog)).unwrap();
        let acme = &summary.companies[0].blocks[0].aggregate;
        let beta = &summary.companies[1].blocks[0].aggregate;
        assert_eq!(acme.per_participant, beta.per_participant);
    }

    #[test]
    fn blank_lead_cell_ends_the_data() {
        let catalog = Catalog::builtin().unwrap();
        let mut after = team_row("Late", |_| "garbage".to_string());
        after[0] = CellValue::from("2024-05-02");
        let mut blank = team_row("Ghost", |_| TOP.to_string());
        blank[0] = CellValue::Empty;
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![
                header_row(),
                team_row("Acme", |_| TOP.to_string()),
                blank,
                after,
            ],
        );
        let summary = process_responses(&mut wb, &catalog, &team_layout(&catalog)).unwrap();
        assert_eq!(summary.participant_count, 1);
        assert!(wb.sheet("Late").is_none());
        assert!(wb.sheet("Ghost").is_none());
    }

    #[test]
    fn whitespace_lead_cell_ends_the_data() {
        let catalog = Catalog::builtin().unwrap();
        let mut spaces = team_row("Ghost", |_| TOP.to_string());
        spaces[0] = CellValue::from("  \t");
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![header_row(), team_row("Acme", |_| TOP.to_string()), spaces],
        );
        let summary = process_responses(&mut wb, &catalog, &team_layout(&catalog)).unwrap();
        assert_eq!(summary.participant_count, 1);
        assert!(wb.sheet("Ghost").is_none());
    }

    #[test]
    fn blank_company_gets_no_sheet() {
        init_logger();
        let catalog = Catalog::builtin().unwrap();
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![
                header_row(),
                team_row("", |_| BOTTOM.to_string()),
                team_row("Acme", |_| TOP.to_string()),
            ],
        );
        let summary = process_responses(&mut wb, &catalog, &team_layout(&catalog)).unwrap();
        assert_eq!(summary.participant_count, 2);
        assert_eq!(summary.companies.len(), 1);
        assert_eq!(summary.companies[0].blocks[0].aggregate.participant_count(), 1);
        assert_eq!(wb.sheet_names().len(), 2);
    }

    #[test]
    fn missing_source_writes_nothing() {
        let catalog = Catalog::builtin().unwrap();
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet("Other", vec![]);
        let before = wb.clone();
        assert_eq!(
            process_responses(&mut wb, &catalog, &team_layout(&catalog)),
            Err(ScoringError::MissingSource {
                sheet: DEFAULT_RESPONSES_SHEET.to_string()
            })
        );
        assert_eq!(wb, before);
    }

    #[test]
    fn unknown_answer_aborts_before_writing() {
        init_logger();
        let catalog = Catalog::builtin().unwrap();
        let mut bad = team_row("Beta", |_| TOP.to_string());
        bad[5] = CellValue::from("Maybe");
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![header_row(), team_row("Acme", |_| TOP.to_string()), bad],
        );
        let before = wb.clone();
        let res = process_responses(&mut wb, &catalog, &team_layout(&catalog));
        assert_eq!(
            res,
            Err(ScoringError::UnknownOption {
                questionnaire: "team".to_string(),
                question: 4,
                value: "Maybe".to_string(),
                row: Some(3),
            })
        );
        assert_eq!(wb, before);
    }

    #[test]
    fn rerun_leaves_no_residue() {
        let catalog = Catalog::builtin().unwrap();
        let layout = team_layout(&catalog);
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![header_row(), team_row("Acme", |_| TOP.to_string())],
        );
        // Left over from an earlier run with more participants.
        wb.add_sheet("Acme", vec![vec!["stale".into(); 20]; 30]);

        process_responses(&mut wb, &catalog, &layout).unwrap();
        let first = wb.clone();
        process_responses(&mut wb, &catalog, &layout).unwrap();
        assert_eq!(wb, first);

        let sheet = wb.sheet("Acme").unwrap();
        assert_eq!(sheet.rows().len(), 3);
        assert_eq!(sheet.width(), 12);
        assert!(sheet
            .rows()
            .iter()
            .flatten()
            .all(|c| *c != CellValue::from("stale")));
    }

    #[test]
    fn blocks_are_stacked_by_ordinal() {
        let labels: Vec<String> = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let fc = forced_choice_questionnaire(
            QuestionnaireHeader {
                id: "fc".to_string(),
                name: "Forced".to_string(),
                index: 1,
            },
            &base_questions(&[], 2),
            &labels,
            &[vec![0, 1, 2], vec![2, 0, 1]],
            vec![Scale::new("F1", &[1]), Scale::new("F2", &[2, 1])],
        )
        .unwrap();
        let catalog = Catalog::builtin().unwrap().merge(vec![fc]).unwrap();
        let layout = SurveyLayout::packed(&catalog, &["team".to_string(), "fc".to_string()]).unwrap();
        assert_eq!(layout.questionnaires[1].columns, 46..=47);

        let mut row1 = team_row("Acme", |_| TOP.to_string());
        row1.extend(vec![CellValue::from("C"), CellValue::from("a")]);
        let mut row2 = team_row("Acme", |_| TOP.to_string());
        row2.extend(vec![CellValue::from("b"), CellValue::from("B")]);
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(DEFAULT_RESPONSES_SHEET, vec![header_row(), row1, row2]);

        let summary = process_responses(&mut wb, &catalog, &layout).unwrap();
        let blocks = &summary.companies[0].blocks;
        assert_eq!(blocks[0].start_row, 1);
        assert_eq!(blocks[1].start_row, 6);
        assert_eq!(blocks[1].aggregate.per_participant, vec![vec![2, 4], vec![1, 1]]);

        let sheet = wb.sheet("Acme").unwrap();
        assert_eq!(sheet.cell(5, 1), CellValue::Empty);
        assert_eq!(sheet.cell(6, 1), CellValue::from("Forced"));
        assert_eq!(sheet.cell(6, 3), CellValue::from("F2"));
        assert_eq!(sheet.cell(9, 1), CellValue::from("Acme AVG"));
        assert_eq!(sheet.cell(9, 3), CellValue::Number(2.5));
    }

    fn both_builtins_row(company: &str) -> Vec<CellValue> {
        let mut row = team_row(company, |_| TOP.to_string());
        row.extend((0..PERSONNEL_QUESTION_COUNT).map(|_| CellValue::from(TOP)));
        row
    }

    #[test]
    fn colliding_blocks_are_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let layout =
            SurveyLayout::packed(&catalog, &["team".to_string(), "personnel".to_string()]).unwrap();
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![header_row(), both_builtins_row("Acme")],
        );
        let before = wb.clone();
        assert_eq!(
            process_responses(&mut wb, &catalog, &layout),
            Err(ScoringError::OverlappingBlocks {
                first: "team".to_string(),
                second: "personnel".to_string(),
                ordinal: 0,
            })
        );
        assert_eq!(wb, before);
    }

    #[test]
    fn distinct_ordinals_keep_both_builtins() {
        let catalog = Catalog::builtin().unwrap();
        let mut layout =
            SurveyLayout::packed(&catalog, &["team".to_string(), "personnel".to_string()]).unwrap();
        layout.questionnaires[1].ordinal = Some(1);
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(
            DEFAULT_RESPONSES_SHEET,
            vec![header_row(), both_builtins_row("Acme")],
        );
        let summary = process_responses(&mut wb, &catalog, &layout).unwrap();
        let blocks = &summary.companies[0].blocks;
        assert_eq!(blocks[0].start_row, 1);
        assert_eq!(blocks[1].start_row, 5);

        let sheet = wb.sheet("Acme").unwrap();
        assert_eq!(sheet.cell(1, 2), CellValue::from("Руководитель.Видение"));
        assert_eq!(sheet.cell(3, 1), CellValue::from("Acme AVG"));
        assert_eq!(sheet.cell(5, 3), CellValue::from("Руководитель.Результативность"));
        assert_eq!(sheet.cell(7, 1), CellValue::from("Acme AVG"));
    }
}
