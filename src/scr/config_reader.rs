use crate::scr::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use survey_scoring::instruments::AGREEMENT_LABELS;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "outputFormat")]
    pub output_format: Option<String>,
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "firstDataRowIndex")]
    _first_data_row_index: Option<JSValue>,
    #[serde(rename = "leadColumnIndex")]
    _lead_column_index: Option<JSValue>,
    #[serde(rename = "companyColumnIndex")]
    _company_column_index: Option<JSValue>,
}

impl ResponseSource {
    /// 1-based. Defaults to the row below the header.
    pub fn first_data_row_index(&self) -> ScrResult<usize> {
        match self._first_data_row_index {
            Some(_) => read_js_int(&self._first_data_row_index),
            None => Ok(2),
        }
    }

    /// 0-based. Defaults to column A.
    pub fn lead_column_index(&self) -> ScrResult<usize> {
        match self._lead_column_index {
            Some(_) => Ok(read_js_int(&self._lead_column_index)? - 1),
            None => Ok(0),
        }
    }

    /// 0-based. Defaults to column B.
    pub fn company_column_index(&self) -> ScrResult<usize> {
        match self._company_column_index {
            Some(_) => Ok(read_js_int(&self._company_column_index)? - 1),
            None => Ok(1),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireSource {
    pub id: String,
    #[serde(rename = "firstAnswerColumnIndex")]
    _first_answer_column_index: Option<JSValue>,
    #[serde(rename = "lastAnswerColumnIndex")]
    _last_answer_column_index: Option<JSValue>,
    pub ordinal: Option<u32>,
}

impl QuestionnaireSource {
    /// A questionnaire whose answers follow those of the previous one.
    pub fn packed(id: String) -> QuestionnaireSource {
        QuestionnaireSource {
            id,
            _first_answer_column_index: None,
            _last_answer_column_index: None,
            ordinal: None,
        }
    }

    /// 0-based, if given.
    pub fn first_answer_column_index(&self) -> ScrResult<Option<usize>> {
        if self._first_answer_column_index.is_some() {
            read_js_int(&self._first_answer_column_index).map(|x| Some(x - 1))
        } else {
            Ok(None)
        }
    }

    /// 0-based, if given.
    pub fn last_answer_column_index(&self) -> ScrResult<Option<usize>> {
        if self._last_answer_column_index.is_some() {
            read_js_int(&self._last_answer_column_index).map(|x| Some(x - 1))
        } else {
            Ok(None)
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "responseSource")]
    pub response_source: ResponseSource,
    #[serde(rename = "catalogFiles", default)]
    pub catalog_files: Vec<String>,
    pub questionnaires: Vec<QuestionnaireSource>,
}

impl SurveyConfig {
    /// The config used when only an input file is given on the command line.
    pub fn for_input(path: &str) -> SurveyConfig {
        let provider = if path.to_lowercase().ends_with(".csv") {
            "csv"
        } else {
            "xlsx"
        };
        SurveyConfig {
            output_settings: OutputSettings::default(),
            response_source: ResponseSource {
                provider: provider.to_string(),
                file_path: path.to_string(),
                worksheet_name: None,
                _first_data_row_index: None,
                _lead_column_index: None,
                _company_column_index: None,
            },
            catalog_files: Vec::new(),
            questionnaires: vec![QuestionnaireSource::packed("team".to_string())],
        }
    }

    /// Makes the relative paths of the config relative to `root`.
    pub fn resolve_paths(&mut self, root: &Path) {
        self.response_source.file_path = io_common::resolve_path(root, &self.response_source.file_path);
        self.catalog_files = self
            .catalog_files
            .iter()
            .map(|p| io_common::resolve_path(root, p))
            .collect();
        let settings = &mut self.output_settings;
        settings.output_path = settings
            .output_path
            .as_ref()
            .map(|p| io_common::resolve_path(root, p));
        settings.summary_path = match settings.summary_path.as_deref() {
            Some("stdout") => Some("stdout".to_string()),
            Some(p) => Some(io_common::resolve_path(root, p)),
            None => None,
        };
    }
}

pub fn read_config(path: &str) -> ScrResult<SurveyConfig> {
    let config_str = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);
    Ok(config)
}

/// Resolves the answer columns of every questionnaire. Questionnaires without
/// explicit columns start right after the previous one.
pub fn build_layout(config: &SurveyConfig, catalog: &Catalog) -> ScrResult<SurveyLayout> {
    let src = &config.response_source;
    let lead_column = src.lead_column_index()?;
    let company_column = src.company_column_index()?;
    if config.questionnaires.is_empty() {
        whatever!("No questionnaire to score")
    }

    let mut next_column = lead_column.max(company_column) + 1;
    let mut questionnaires: Vec<QuestionnaireColumns> = Vec::new();
    for qs in config.questionnaires.iter() {
        let q = catalog.get_questionnaire(&qs.id).context(ScoringSnafu {})?;
        let first = qs.first_answer_column_index()?.unwrap_or(next_column);
        let last = match qs.last_answer_column_index()? {
            Some(x) => x,
            None => (first + q.questions.len()).saturating_sub(1),
        };
        if last < first {
            whatever!(
                "Questionnaire {:?}: the last answer column comes before the first one",
                qs.id
            )
        }
        debug!("build_layout: {:?}: columns {}..={}", qs.id, first, last);
        questionnaires.push(QuestionnaireColumns {
            questionnaire_id: qs.id.clone(),
            columns: first..=last,
            ordinal: qs.ordinal,
        });
        next_column = last + 1;
    }

    Ok(SurveyLayout {
        responses_sheet: src
            .worksheet_name
            .clone()
            .unwrap_or_else(|| DEFAULT_RESPONSES_SHEET.to_string()),
        first_data_row: src.first_data_row_index()?,
        lead_column,
        company_column,
        questionnaires,
    })
}

// ********* Catalog files ***********

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ScaleDef {
    pub name: String,
    pub questions: Vec<u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireDef {
    pub id: String,
    pub name: Option<String>,
    pub index: Option<u32>,
    pub scoring: String,
    #[serde(rename = "optionLabels")]
    pub option_labels: Option<Vec<String>>,
    #[serde(rename = "questionCount")]
    pub question_count: Option<usize>,
    pub titles: Option<Vec<String>>,
    pub reversed: Option<Vec<u32>>,
    pub keys: Option<Vec<Vec<i32>>>,
    pub scales: Vec<ScaleDef>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub questionnaires: Vec<QuestionnaireDef>,
}

pub fn read_catalog_file(path: &str) -> ScrResult<Vec<Questionnaire>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let file: CatalogFile = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    file.questionnaires.iter().map(validate_questionnaire).collect()
}

/// Turns a questionnaire description into a questionnaire, checking its consistency.
pub fn validate_questionnaire(def: &QuestionnaireDef) -> ScrResult<Questionnaire> {
    let header = QuestionnaireHeader {
        id: def.id.clone(),
        name: def.name.clone().unwrap_or_default(),
        index: def.index.unwrap_or(0),
    };
    let titles = def.titles.clone().unwrap_or_default();
    let scales: Vec<Scale> = def
        .scales
        .iter()
        .map(|s| Scale {
            name: s.name.clone(),
            questions: s.questions.clone(),
        })
        .collect();

    let res = match def.scoring.as_str() {
        "likert" => {
            let count = match (titles.len(), def.question_count) {
                (n, _) if n > 0 => n,
                (_, Some(n)) => n,
                _ => whatever!(
                    "Questionnaire {:?}: either titles or questionCount must be given",
                    def.id
                ),
            };
            let scale = match def.option_labels.clone() {
                Some(labels) => LikertScale::from_labels(labels),
                None => LikertScale::new(&AGREEMENT_LABELS),
            };
            likert_questionnaire(
                header,
                &base_questions(&titles, count),
                &scale,
                def.reversed.as_deref().unwrap_or(&[]),
                scales,
            )
        }
        "forcedChoice" => {
            let keys = match def.keys.as_ref() {
                Some(k) => k,
                None => whatever!("Questionnaire {:?}: forcedChoice requires keys", def.id),
            };
            let labels = def
                .option_labels
                .clone()
                .unwrap_or_else(|| vec!["A".to_string(), "B".to_string(), "C".to_string()]);
            let count = match (titles.len(), def.question_count) {
                (n, _) if n > 0 => n,
                (_, Some(n)) => n,
                _ => keys.len(),
            };
            forced_choice_questionnaire(header, &base_questions(&titles, count), &labels, keys, scales)
        }
        x => whatever!("Questionnaire {:?}: unknown scoring {:?}", def.id, x),
    };
    res.context(InvalidCatalogSnafu {})
}

pub fn read_summary(path: &str) -> ScrResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Reads a 1-based index: a number, a number in a string, or an Excel column name (`C`, `AT`).
fn read_js_int(x: &Option<JSValue>) -> ScrResult<usize> {
    let res = match x {
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize),
        // Parsing the Excel-style columns
        Some(JSValue::String(s)) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            s.to_ascii_uppercase().chars().try_fold(0usize, |acc, c| {
                acc.checked_mul(26)?
                    .checked_add(c as usize - 'A' as usize + 1)
            })
        }
        Some(JSValue::String(s)) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    match res {
        Some(idx) if idx >= 1 => Ok(idx),
        _ => ParsingJsonNumberSnafu {
            value: format!("{:?}", x),
        }
        .fail(),
    }
}
