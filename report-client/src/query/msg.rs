use crate::types::{AnalysisReport, FilterSelection, ModelReport};
use std::fmt;

/// Monotonic tag identifying which submission a pending request belongs to
pub type Generation = u64;

/// Inputs to the query state machine (unidirectional flow)
#[derive(Debug, Clone)]
pub enum QueryMsg {
    /// User submitted a filter snapshot
    Submit { selection: FilterSelection },
    CountSettled {
        generation: Generation,
        result: Result<u64, String>,
    },
    /// The gate answered; an error means no decision could be made
    ConfirmationResolved {
        generation: Generation,
        decision: Result<bool, String>,
    },
    AnalysisSettled {
        generation: Generation,
        result: Result<AnalysisReport, String>,
    },
    ModelSettled {
        generation: Generation,
        result: Result<ModelReport, String>,
    },
}

impl QueryMsg {
    /// Generation the message was dispatched with; `None` for user input
    pub fn generation(&self) -> Option<Generation> {
        match self {
            QueryMsg::Submit { .. } => None,
            QueryMsg::CountSettled { generation, .. }
            | QueryMsg::ConfirmationResolved { generation, .. }
            | QueryMsg::AnalysisSettled { generation, .. }
            | QueryMsg::ModelSettled { generation, .. } => Some(*generation),
        }
    }
}

/// Side effects produced by the reducer. The driver executes them.
#[derive(Debug, Clone)]
pub enum Effect {
    CountEntries {
        generation: Generation,
        selection: FilterSelection,
    },
    RequestConfirmation {
        generation: Generation,
        entries_count: u64,
    },
    /// Issue the analysis and model requests; they carry no relative order
    FetchReports {
        generation: Generation,
        selection: FilterSelection,
    },
    Emit(QueryEvent),
}

/// The two independently fetched report sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Analysis,
    Model,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Analysis => f.write_str("analysis"),
            ReportKind::Model => f.write_str("model"),
        }
    }
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEvent {
    AwaitingConfirmation {
        generation: Generation,
        entries_count: u64,
    },
    /// A report section has data and can be rendered (and scrolled to)
    SectionReady {
        generation: Generation,
        section: ReportKind,
    },
    SectionUnavailable {
        generation: Generation,
        section: ReportKind,
        error: String,
    },
    Settled {
        generation: Generation,
        outcome: super::QueryOutcome,
    },
}
