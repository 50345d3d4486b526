use crate::aggregate::ScaleAggregate;
use crate::config::*;

/// The 1-based sheet row where the block of a questionnaire starts.
///
/// Blocks are stacked by ordinal. Each block takes `participants + 2` rows and
/// is followed by one blank row.
pub fn block_start_row(ordinal: u32, participant_count: usize) -> usize {
    1 + (participant_count + 3) * ordinal as usize
}

/// Lays out the scores of one company for one questionnaire.
///
/// ```text
/// | <questionnaire name> | scale 1 | scale 2 | ...
/// | <company> 1          | sum     | sum     | ...
/// | <company> 2          | sum     | sum     | ...
/// | <company> AVG        | avg     | avg     | ...
/// ```
pub fn build_report(company: &str, questionnaire: &Questionnaire, agg: &ScaleAggregate) -> Grid {
    let mut rows: Grid = Vec::with_capacity(agg.participant_count() + 2);

    let header_cell = if questionnaire.name.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(questionnaire.name.clone())
    };
    let mut header = vec![header_cell];
    header.extend(
        questionnaire
            .scales
            .iter()
            .map(|s| CellValue::Text(s.name.clone())),
    );
    rows.push(header);

    for (idx, sums) in agg.per_participant.iter().enumerate() {
        let mut row = vec![CellValue::Text(format!("{} {}", company, idx + 1))];
        row.extend(sums.iter().map(|s| CellValue::from(*s)));
        rows.push(row);
    }

    let mut avg_row = vec![CellValue::Text(format!("{} AVG", company))];
    avg_row.extend(agg.average.iter().map(|a| CellValue::Number(*a)));
    rows.push(avg_row);

    rows
}
