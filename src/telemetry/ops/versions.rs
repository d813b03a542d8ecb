use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Versions;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    FetchIndex,
    ParseSidebar,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::FetchIndex => "fetch_index",
            Phase::ParseSidebar => "parse_sidebar",
        }
    }
    fn span(&self) -> Span {
        match self {
            Phase::FetchIndex => info_span!("fetch_index"),
            Phase::ParseSidebar => info_span!("parse_sidebar"),
        }
    }
}

impl OpMarker for Versions {
    const NAME: &'static str = "latest-versions";
    type Phase = Phase;
    fn root_span() -> Span {
        info_span!("latest_versions")
    }
}
