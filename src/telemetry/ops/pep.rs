use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Pep;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    FetchIndex,
    CollectRows,
    FetchDetail,
    Reconcile,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::FetchIndex => "fetch_index",
            Phase::CollectRows => "collect_rows",
            Phase::FetchDetail => "fetch_detail",
            Phase::Reconcile => "reconcile",
        }
    }
    fn span(&self) -> Span {
        match self {
            Phase::FetchIndex => info_span!("fetch_index"),
            Phase::CollectRows => info_span!("collect_rows"),
            Phase::FetchDetail => info_span!("fetch_detail"),
            Phase::Reconcile => info_span!("reconcile"),
        }
    }
}

impl OpMarker for Pep {
    const NAME: &'static str = "pep";
    type Phase = Phase;
    fn root_span() -> Span {
        info_span!("pep")
    }
}
