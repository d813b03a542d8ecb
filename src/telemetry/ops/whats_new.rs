use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct WhatsNew;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    FetchIndex,
    ParseIndex,
    FetchEntry,
    Extract,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::FetchIndex => "fetch_index",
            Phase::ParseIndex => "parse_index",
            Phase::FetchEntry => "fetch_entry",
            Phase::Extract => "extract",
        }
    }
    fn span(&self) -> Span {
        match self {
            Phase::FetchIndex => info_span!("fetch_index"),
            Phase::ParseIndex => info_span!("parse_index"),
            Phase::FetchEntry => info_span!("fetch_entry"),
            Phase::Extract => info_span!("extract"),
        }
    }
}

impl OpMarker for WhatsNew {
    const NAME: &'static str = "whats-new";
    type Phase = Phase;
    fn root_span() -> Span {
        info_span!("whats_new")
    }
}
