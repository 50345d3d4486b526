/*!
Scoring of survey instruments: Likert questionnaires with reversed items and
forced-choice questionnaires with a scoring key per question.

The library reads the raw answers of each participant from a [`sheet::Workbook`],
converts every answer into a score, sums the scores of each scale and writes
one sheet per company with a row per participant and an average row.

```
use survey_scoring::*;

let catalog = Catalog::builtin()?;
let layout = SurveyLayout::packed(&catalog, &["team".to_string()])?;

let mut book = MemoryWorkbook::new();
let mut row: Vec<CellValue> = vec!["2024-05-01".into(), "Acme".into()];
row.extend((0..44).map(|_| CellValue::from("Затрудняюсь ответить")));
book.add_sheet(DEFAULT_RESPONSES_SHEET, vec![vec!["Timestamp".into()], row]);

let summary = process_responses(&mut book, &catalog, &layout)?;
assert_eq!(summary.companies[0].blocks[0].aggregate.average[0], 12.0);
# Ok::<(), ScoringError>(())
```

See the [manual] for the definition of questionnaires.
*/
pub mod aggregate;
pub mod catalog;
mod config;
pub mod instruments;
pub mod manual;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod sheet;

pub use crate::aggregate::{aggregate, group_by_company, scale_sum, CompanyGroup, ScaleAggregate};
pub use crate::catalog::{
    base_questions, forced_choice_questionnaire, likert_questionnaire, resolve_options, Catalog,
    LikertScale, QuestionnaireHeader, ScoringRule,
};
pub use crate::config::*;
pub use crate::normalize::{normalize, normalize_label};
pub use crate::pipeline::{
    process_responses, read_participant_responses, CompanyReport, QuestionnaireBlock,
    QuestionnaireColumns, RunSummary, SurveyLayout, DEFAULT_RESPONSES_SHEET,
};
pub use crate::report::{block_start_row, build_report};
pub use crate::sheet::{MemoryWorkbook, Sheet, SheetHandle, Workbook};
