use clap::Parser;

/// Compares county-level election results between two years, state by state.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the two data sources and the display options.
    /// See the manual of the state_shift crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The CSV file with the county results of the earlier year. Setting this option
    /// overrides the file that may be specified with the --config option.
    #[clap(long, value_parser)]
    pub year_a: Option<String>,

    /// (file path) The CSV file with the county results of the later year. Setting this option
    /// overrides the file that may be specified with the --config option.
    #[clap(long, value_parser)]
    pub year_b: Option<String>,

    /// (default alphabetical) How to order the states: alphabetical, margin, dem or gop.
    #[clap(short, long, value_parser)]
    pub sort: Option<String>,

    /// (default all) How many states to display: 5, 10, 20, 30 or all.
    #[clap(short = 'n', long, value_parser)]
    pub count: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the comparison will be written in JSON
    /// format to the given location. Setting this option overrides the path that may be specified with the
    /// --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, shiftcount will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
