use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Download;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    FetchIndex,
    LocateArchive,
    FetchArchive,
    WriteFile,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::FetchIndex => "fetch_index",
            Phase::LocateArchive => "locate_archive",
            Phase::FetchArchive => "fetch_archive",
            Phase::WriteFile => "write_file",
        }
    }
    fn span(&self) -> Span {
        match self {
            Phase::FetchIndex => info_span!("fetch_index"),
            Phase::LocateArchive => info_span!("locate_archive"),
            Phase::FetchArchive => info_span!("fetch_archive"),
            Phase::WriteFile => info_span!("write_file"),
        }
    }
}

impl OpMarker for Download {
    const NAME: &'static str = "download";
    type Phase = Phase;
    fn root_span() -> Span {
        info_span!("download")
    }
}
