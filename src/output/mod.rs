pub mod config;
pub mod presenter;
pub mod table;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tracing::info;

use crate::config::DATETIME_FORMAT;
use config::OutputFormat;
use presenter::{CsvPresenter, JsonPresenter, Presenter, PrettyPresenter, RowsPresenter};
pub use table::ResultTable;

/// Routes a finished result table to the selected presentation: stdout for
/// the console formats, a timestamped CSV in the results directory for
/// `--output file`.
pub struct Emitter {
    format: Option<OutputFormat>,
    results_dir: PathBuf,
}

impl Emitter {
    pub fn new(format: Option<OutputFormat>, results_dir: &str) -> Self {
        Emitter {
            format,
            results_dir: PathBuf::from(results_dir),
        }
    }

    pub fn emit(&self, mode: &str, table: &ResultTable) -> Result<()> {
        if self.format == Some(OutputFormat::File) {
            return self.write_csv_file(mode, table);
        }
        let presenter: Box<dyn Presenter> = match self.format {
            Some(OutputFormat::Pretty) => Box::new(PrettyPresenter),
            Some(OutputFormat::Json) => Box::new(JsonPresenter),
            _ => Box::new(RowsPresenter),
        };
        let mut out = io::stdout();
        presenter.emit(mode, table, &mut out)?;
        out.flush()?;
        Ok(())
    }

    fn write_csv_file(&self, mode: &str, table: &ResultTable) -> Result<()> {
        fs::create_dir_all(&self.results_dir)?;
        let stamp = Local::now().format(DATETIME_FORMAT);
        let path = self.results_dir.join(format!("{mode}_{stamp}.csv"));
        let mut writer = BufWriter::new(File::create(&path)?);
        CsvPresenter.emit(mode, table, &mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "results saved");
        Ok(())
    }
}
