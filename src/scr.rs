use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_scoring::*;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::scr::config_reader::*;

mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum ScrError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {worksheet} could not be read from {path}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("Error writing file {path}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive number or a column name, found {value}"))]
    ParsingJsonNumber { value: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error writing CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error writing {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Scoring failed"))]
    Scoring { source: ScoringError },
    #[snafu(display("Invalid questionnaire definition"))]
    InvalidCatalog { source: CatalogError },
    #[snafu(display("The config file has no parent directory"))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ScrResult<T> = Result<T, ScrError>;

/// The error and all its causes, on one line.
pub fn error_chain(e: &ScrError) -> String {
    let mut msg = e.to_string();
    let mut cur: Option<&dyn Error> = e.source();
    while let Some(cause) = cur {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        cur = cause.source();
    }
    msg
}

fn block_to_json(block: &QuestionnaireBlock) -> JSValue {
    json!({
        "id": block.questionnaire_id,
        "name": block.questionnaire_name,
        "startRow": block.start_row,
        "scales": block.aggregate.scale_names,
        "participants": block.aggregate.per_participant,
        "average": block.aggregate.average,
    })
}

fn build_summary_js(summary: &RunSummary) -> JSValue {
    let companies: Vec<JSValue> = summary
        .companies
        .iter()
        .map(|report| {
            let blocks: Vec<JSValue> = report.blocks.iter().map(block_to_json).collect();
            json!({ "company": report.company, "questionnaires": blocks })
        })
        .collect();
    json!({
        "participants": summary.participant_count,
        "companies": companies
    })
}

fn load_catalog(catalog_files: &[String]) -> ScrResult<Catalog> {
    let mut catalog = Catalog::builtin().context(InvalidCatalogSnafu {})?;
    for path in catalog_files.iter() {
        let questionnaires = read_catalog_file(path)?;
        info!(
            "Read {} questionnaire(s) from catalog {:?}",
            questionnaires.len(),
            path
        );
        catalog = catalog.merge(questionnaires).context(InvalidCatalogSnafu {})?;
    }
    Ok(catalog)
}

fn read_responses(source: &ResponseSource, sheet_name: &str) -> ScrResult<MemoryWorkbook> {
    info!("Attempting to read response file {:?}", source.file_path);
    match source.provider.as_str() {
        "xlsx" => io_xlsx::read_workbook(&source.file_path),
        "csv" => io_csv::read_csv_sheet(&source.file_path, sheet_name),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

fn write_output(
    settings: &OutputSettings,
    book: &MemoryWorkbook,
    summary: &RunSummary,
) -> ScrResult<()> {
    let path = match settings.output_path.as_ref() {
        Some(p) => p,
        None => {
            debug!("write_output: no output path, skipping");
            return Ok(());
        }
    };
    match settings.output_format.as_deref().unwrap_or("xlsx") {
        "xlsx" => io_xlsx::write_workbook(book, path),
        "csv" => io_csv::write_company_sheets(book, summary, path),
        x => whatever!("Output format not implemented {:?}", x),
    }
}

fn write_summary(path: &str, summary_js: &JSValue) -> ScrResult<String> {
    let pretty_js = serde_json::to_string_pretty(summary_js).context(ParsingJsonSnafu {})?;
    if path == "stdout" {
        println!("{}", pretty_js);
    } else if !path.is_empty() {
        fs::write(path, &pretty_js).context(WritingFileSnafu { path })?;
        info!("Summary written to {:?}", path);
    }
    Ok(pretty_js)
}

fn check_reference(reference_path: &str, summary_js: &JSValue) -> ScrResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(summary_js).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

/// Scores the responses described by `config` and writes the company sheets.
pub fn run_survey(config: &SurveyConfig, reference: Option<&str>) -> ScrResult<RunSummary> {
    debug!("run_survey: config: {:?}", config);
    let catalog = load_catalog(&config.catalog_files)?;
    let layout = build_layout(config, &catalog)?;
    info!(
        "Layout: sheet {:?}, questionnaires {:?}",
        layout.responses_sheet, layout.questionnaires
    );

    let mut book = read_responses(&config.response_source, &layout.responses_sheet)?;
    let summary = process_responses(&mut book, &catalog, &layout).context(ScoringSnafu {})?;

    write_output(&config.output_settings, &book, &summary)?;

    let summary_js = build_summary_js(&summary);
    if let Some(p) = config.output_settings.summary_path.as_deref() {
        write_summary(p, &summary_js)?;
    }
    if let Some(reference_path) = reference {
        check_reference(reference_path, &summary_js)?;
    }
    Ok(summary)
}

/// Reads the run config (if any) and applies the command line overrides.
pub fn config_from_args(args: &Args) -> ScrResult<SurveyConfig> {
    let mut config = match args.config.as_ref() {
        Some(config_path) => {
            let config_p = Path::new(config_path.as_str());
            let mut config = read_config(config_path)?;
            let root_p: PathBuf = config_p
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            config.resolve_paths(&root_p);
            config
        }
        None => {
            let input = match args.input.clone() {
                Some(x) => x,
                None => whatever!("Either --config or --input must be provided"),
            };
            SurveyConfig::for_input(&input)
        }
    };

    if let Some(input) = args.input.clone() {
        config.response_source.file_path = input;
    }
    if let Some(input_type) = args.input_type.clone() {
        config.response_source.provider = input_type;
    }
    if let Some(worksheet_name) = args.worksheet_name.clone() {
        config.response_source.worksheet_name = Some(worksheet_name);
    }
    if let Some(ids) = args.questionnaire.clone() {
        // Blocks are stacked in the order of the command line.
        config.questionnaires = ids
            .into_iter()
            .enumerate()
            .map(|(pos, id)| {
                let mut qs = QuestionnaireSource::packed(id);
                qs.ordinal = Some(pos as u32);
                qs
            })
            .collect();
    }
    if let Some(catalogs) = args.catalog.clone() {
        config.catalog_files.extend(catalogs);
    }
    if let Some(out) = args.out.clone() {
        config.output_settings.output_path = Some(out);
    }
    if let Some(output_type) = args.output_type.clone() {
        config.output_settings.output_format = Some(output_type);
    }
    if let Some(summary) = args.summary.clone() {
        config.output_settings.summary_path = Some(summary);
    }
    if config.output_settings.output_path.is_none() && args.config.is_none() {
        config.output_settings.output_path = Some(io_common::default_output_path(
            &config.response_source.file_path,
            config.output_settings.output_format.as_deref().unwrap_or("xlsx"),
        ));
    }
    Ok(config)
}

pub fn run(args: &Args) -> ScrResult<()> {
    let config = config_from_args(args)?;
    let summary = run_survey(&config, args.reference.as_deref())?;
    info!(
        "Scored {} participants in {} companies",
        summary.participant_count,
        summary.companies.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP: &str = "Да, совершенно верно";

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("surveyscore-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn csv_line(cells: &[&str]) -> String {
        cells
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<String>>()
            .join(",")
    }

    fn write_inputs(dir: &Path) {
        let catalog = r#"{
            "questionnaires": [{
                "id": "fc",
                "name": "Forced",
                "index": 1,
                "scoring": "forcedChoice",
                "optionLabels": ["A", "B", "C"],
                "keys": [[2, 1, 0], [0, 1, 2]],
                "scales": [{ "name": "F", "questions": [1, 2] }]
            }]
        }"#;
        fs::write(dir.join("catalog.json"), catalog).unwrap();

        let mut header = vec!["Timestamp", "Company"];
        header.extend(std::iter::repeat("Q").take(46));
        let mut acme = vec!["2024-05-01", "Acme"];
        acme.extend(std::iter::repeat("Затрудняюсь ответить").take(44));
        acme.extend(["a", "c"]);
        let mut beta = vec!["2024-05-02", "Beta"];
        beta.extend(std::iter::repeat(TOP).take(44));
        beta.extend(["C", " b "]);
        let lines = vec![csv_line(&header), csv_line(&acme), csv_line(&beta), String::new()];
        fs::write(dir.join("responses.csv"), lines.join("\n")).unwrap();

        let config = r#"{
            "outputSettings": { "outputPath": "out", "outputFormat": "csv", "summaryPath": "summary.json" },
            "responseSource": {
                "provider": "csv",
                "filePath": "responses.csv",
                "firstDataRowIndex": 2,
                "leadColumnIndex": "A",
                "companyColumnIndex": 2
            },
            "catalogFiles": ["catalog.json"],
            "questionnaires": [
                { "id": "team", "firstAnswerColumnIndex": "C", "lastAnswerColumnIndex": "AT" },
                { "id": "fc" }
            ]
        }"#;
        fs::write(dir.join("config.json"), config).unwrap();
    }

    fn args_for(config: &Path) -> Args {
        Args {
            config: Some(config.display().to_string()),
            reference: None,
            out: None,
            output_type: None,
            summary: None,
            input: None,
            input_type: None,
            worksheet_name: None,
            questionnaire: None,
            catalog: None,
            verbose: false,
        }
    }

    #[test]
    fn csv_run_end_to_end() {
        let dir = temp_dir("e2e");
        write_inputs(&dir);
        let config = config_from_args(&args_for(&dir.join("config.json"))).unwrap();
        let summary = run_survey(&config, None).unwrap();
        assert_eq!(summary.participant_count, 2);

        let acme = &summary.companies[0];
        assert_eq!(acme.company, "Acme");
        assert_eq!(acme.blocks[0].aggregate.per_participant[0][0], 12);
        assert_eq!(acme.blocks[1].aggregate.per_participant, vec![vec![4]]);
        assert_eq!(acme.blocks[1].start_row, 5);
        let beta = &summary.companies[1];
        assert_eq!(beta.blocks[1].aggregate.per_participant, vec![vec![1]]);

        let acme_csv = fs::read_to_string(dir.join("out").join("Acme.csv")).unwrap();
        let lines: Vec<&str> = acme_csv.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("Acme 1,12,"));
        assert!(lines[4].starts_with("Forced,F"));
        assert!(lines[6].starts_with("Acme AVG,4"));

        let summary_js: JSValue =
            serde_json::from_str(&fs::read_to_string(dir.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary_js["participants"], json!(2));
        assert_eq!(summary_js["companies"][1]["company"], json!("Beta"));
        assert_eq!(
            summary_js["companies"][0]["questionnaires"][1]["startRow"],
            json!(5)
        );

        // The summary is its own reference.
        let reference = dir.join("summary.json").display().to_string();
        assert!(run_survey(&config, Some(reference.as_str())).is_ok());
    }

    #[test]
    fn reference_mismatch_fails() {
        let dir = temp_dir("reference");
        write_inputs(&dir);
        let config = config_from_args(&args_for(&dir.join("config.json"))).unwrap();
        let reference = dir.join("other.json");
        fs::write(&reference, r#"{ "participants": 3, "companies": [] }"#).unwrap();
        let res = run_survey(&config, Some(reference.display().to_string().as_str()));
        assert!(matches!(res, Err(ScrError::Whatever { .. })));
    }

    #[test]
    fn unknown_answer_is_reported() {
        let dir = temp_dir("unknown");
        write_inputs(&dir);
        let responses = fs::read_to_string(dir.join("responses.csv")).unwrap();
        fs::write(dir.join("responses.csv"), responses.replace("\"C\"", "\"D\"")).unwrap();
        let config = config_from_args(&args_for(&dir.join("config.json"))).unwrap();
        let err = run_survey(&config, None).unwrap_err();
        let msg = error_chain(&err);
        assert!(msg.starts_with("Scoring failed: "));
        assert!(msg.contains("\"D\""));
        assert!(!dir.join("out").exists());
    }

    #[test]
    fn cli_overrides_config() {
        let dir = temp_dir("overrides");
        write_inputs(&dir);
        let mut args = args_for(&dir.join("config.json"));
        args.questionnaire = Some(vec!["team".to_string()]);
        args.summary = Some("stdout".to_string());
        let config = config_from_args(&args).unwrap();
        assert_eq!(config.questionnaires.len(), 1);
        assert_eq!(config.questionnaires[0].ordinal, Some(0));
        assert_eq!(config.output_settings.summary_path.as_deref(), Some("stdout"));
        assert!(config.response_source.file_path.ends_with("responses.csv"));
        assert!(Path::new(&config.response_source.file_path).is_absolute());
    }

    #[test]
    fn cli_questionnaires_are_stacked() {
        let dir = temp_dir("stacked");
        let top = vec![TOP; 44 + 112].join("\",\"");
        let lines = [
            "\"Timestamp\",\"Company\"".to_string(),
            format!("\"2024-05-01\",\"Acme\",\"{}\"", top),
        ];
        let input = dir.join("responses.csv");
        fs::write(&input, lines.join("\n")).unwrap();

        let mut args = args_for(&dir.join("unused.json"));
        args.config = None;
        args.input = Some(input.display().to_string());
        args.questionnaire = Some(vec!["team".to_string(), "personnel".to_string()]);
        args.out = Some(dir.join("out").display().to_string());
        args.output_type = Some("csv".to_string());
        let config = config_from_args(&args).unwrap();
        let summary = run_survey(&config, None).unwrap();
        let blocks = &summary.companies[0].blocks;
        assert_eq!(blocks[0].start_row, 1);
        assert_eq!(blocks[1].start_row, 5);
    }
}
