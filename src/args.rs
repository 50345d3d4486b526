use clap::Parser;

/// This is a survey scoring program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file describing the run in JSON format. If provided, the other options
    /// override the corresponding settings of the file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the summary of a run in JSON format. If provided, surveyscore
    /// will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path or directory) Where to write the company sheets. With the xlsx output, a workbook
    /// holding the response sheets and one sheet per company. With the csv output, a directory
    /// with one file per company.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default xlsx) The format of the output: xlsx or csv.
    #[clap(long, value_parser)]
    pub output_type: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the run will be written in JSON format
    /// to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) The file containing the responses.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default xlsx) The type of the input: xlsx or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default 'Form Responses 1') The name of the worksheet holding the responses.
    #[clap(long, value_parser)]
    pub worksheet_name: Option<String>,

    /// (questionnaire id, default team) The questionnaires filled in the form, in the order of their
    /// answer columns. Can be repeated. Their blocks are stacked on the company sheets in the same order.
    #[clap(short, long, value_parser)]
    pub questionnaire: Option<Vec<String>>,

    /// (file path) A JSON file with additional questionnaire definitions. Can be repeated.
    #[clap(long, value_parser)]
    pub catalog: Option<Vec<String>>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
