use clap::ValueEnum;

/// Where results go. Absent means plain tab-separated rows on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered, width-aligned console table
    Pretty,
    /// CSV file in the results directory
    File,
    /// One JSON object on stdout
    Json,
}
