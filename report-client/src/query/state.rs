use super::msg::{Effect, Generation, QueryEvent, QueryMsg, ReportKind};
use crate::types::{AnalysisReport, FilterSelection, ModelReport};
use tracing::{debug, info, warn};

/// Where the current submission stands
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Idle,
    Counting,
    AwaitingConfirmation { entries_count: u64 },
    Fetching,
    /// Both report fetches have settled; each slot says whether it loaded
    Ready,
    /// The count stage failed; no report request was issued
    PartialFailure { error: String },
    /// The confirmation gate could not produce a decision
    Cancelled { reason: String },
}

impl QueryOutcome {
    /// No request of the current generation is outstanding
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            QueryOutcome::Idle
                | QueryOutcome::Ready
                | QueryOutcome::PartialFailure { .. }
                | QueryOutcome::Cancelled { .. }
        )
    }
}

/// Result slot of one report fetch
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSlot<T> {
    Empty,
    Pending,
    Loaded(T),
    /// The fetch failed; the message is shown inline in place of the section
    Unavailable(String),
}

impl<T> Default for ReportSlot<T> {
    fn default() -> Self {
        ReportSlot::Empty
    }
}

impl<T> ReportSlot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, ReportSlot::Pending)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ReportSlot::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReportSlot::Unavailable(error) => Some(error),
            _ => None,
        }
    }
}

/// Orchestrator state: generation, outcome, loading flag and the two report slots
#[derive(Debug, Clone)]
pub struct QueryState {
    generation: Generation,
    outcome: QueryOutcome,
    loading: bool,
    selection: Option<FilterSelection>,
    entries_count: Option<u64>,
    analysis: ReportSlot<AnalysisReport>,
    model: ReportSlot<ModelReport>,
    stale_discarded: u64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self {
            generation: 0,
            outcome: QueryOutcome::Idle,
            loading: false,
            selection: None,
            entries_count: None,
            analysis: ReportSlot::Empty,
            model: ReportSlot::Empty,
            stale_discarded: 0,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    /// True from confirmation until both report fetches have settled
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a submission would be accepted right now
    pub fn can_submit(&self) -> bool {
        !self.loading && !matches!(self.outcome, QueryOutcome::AwaitingConfirmation { .. })
    }

    pub fn is_settled(&self) -> bool {
        self.outcome.is_settled()
    }

    /// Entry count reported for the current generation
    pub fn entries_count(&self) -> Option<u64> {
        self.entries_count
    }

    pub fn analysis(&self) -> &ReportSlot<AnalysisReport> {
        &self.analysis
    }

    pub fn model(&self) -> &ReportSlot<ModelReport> {
        &self.model
    }

    /// Number of settled responses dropped because a newer submission superseded them
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }

    /// Apply one message and return the effects the driver must run
    pub fn update(&mut self, msg: QueryMsg) -> Vec<Effect> {
        if let Some(generation) = msg.generation() {
            if generation != self.generation {
                self.discard_stale(generation, message_name(&msg));
                return Vec::new();
            }
        }

        match msg {
            QueryMsg::Submit { selection } => self.submit(selection),
            QueryMsg::CountSettled { generation, result } => self.count_settled(generation, result),
            QueryMsg::ConfirmationResolved {
                generation,
                decision,
            } => self.confirmation_resolved(generation, decision),
            QueryMsg::AnalysisSettled { generation, result } => {
                if !self.analysis.is_pending() {
                    self.discard_stale(generation, "analysis");
                    return Vec::new();
                }
                self.analysis = match result {
                    Ok(report) => ReportSlot::Loaded(report),
                    Err(error) => ReportSlot::Unavailable(error),
                };
                self.section_settled(ReportKind::Analysis)
            }
            QueryMsg::ModelSettled { generation, result } => {
                if !self.model.is_pending() {
                    self.discard_stale(generation, "model");
                    return Vec::new();
                }
                self.model = match result {
                    Ok(report) => ReportSlot::Loaded(report),
                    Err(error) => ReportSlot::Unavailable(error),
                };
                self.section_settled(ReportKind::Model)
            }
        }
    }

    fn submit(&mut self, selection: FilterSelection) -> Vec<Effect> {
        if let QueryOutcome::AwaitingConfirmation { .. } = self.outcome {
            warn!(
                generation = self.generation,
                "submission refused while a confirmation is pending"
            );
            return Vec::new();
        }

        // Superseded fetches will be discarded on arrival, so their slots never fill
        if self.analysis.is_pending() {
            self.analysis = ReportSlot::Empty;
        }
        if self.model.is_pending() {
            self.model = ReportSlot::Empty;
        }

        self.generation += 1;
        self.outcome = QueryOutcome::Counting;
        self.loading = false;
        self.entries_count = None;
        self.selection = Some(selection.clone());
        debug!(generation = self.generation, "submission started");

        vec![Effect::CountEntries {
            generation: self.generation,
            selection,
        }]
    }

    fn count_settled(&mut self, generation: Generation, result: Result<u64, String>) -> Vec<Effect> {
        if self.outcome != QueryOutcome::Counting {
            self.discard_stale(generation, "count");
            return Vec::new();
        }

        match result {
            Ok(entries_count) => {
                info!(generation, entries_count, "entry count received");
                self.entries_count = Some(entries_count);
                self.outcome = QueryOutcome::AwaitingConfirmation { entries_count };
                vec![
                    Effect::Emit(QueryEvent::AwaitingConfirmation {
                        generation,
                        entries_count,
                    }),
                    Effect::RequestConfirmation {
                        generation,
                        entries_count,
                    },
                ]
            }
            Err(error) => {
                warn!(generation, %error, "entry count failed; no reports requested");
                self.loading = false;
                self.outcome = QueryOutcome::PartialFailure { error };
                vec![self.settled_event()]
            }
        }
    }

    fn confirmation_resolved(
        &mut self,
        generation: Generation,
        decision: Result<bool, String>,
    ) -> Vec<Effect> {
        if !matches!(self.outcome, QueryOutcome::AwaitingConfirmation { .. }) {
            self.discard_stale(generation, "confirmation");
            return Vec::new();
        }

        match decision {
            Ok(true) => {
                let Some(selection) = self.selection.clone() else {
                    warn!(generation, "confirmation accepted without a selection");
                    self.outcome = QueryOutcome::Idle;
                    return vec![self.settled_event()];
                };
                info!(generation, "confirmation accepted; fetching reports");
                self.analysis = ReportSlot::Pending;
                self.model = ReportSlot::Pending;
                self.loading = true;
                self.outcome = QueryOutcome::Fetching;
                vec![Effect::FetchReports {
                    generation,
                    selection,
                }]
            }
            Ok(false) => {
                info!(generation, "confirmation declined");
                self.outcome = QueryOutcome::Idle;
                vec![self.settled_event()]
            }
            Err(reason) => {
                warn!(generation, %reason, "confirmation unavailable");
                self.outcome = QueryOutcome::Cancelled { reason };
                vec![self.settled_event()]
            }
        }
    }

    fn section_settled(&mut self, section: ReportKind) -> Vec<Effect> {
        let generation = self.generation;
        let error = match section {
            ReportKind::Analysis => self.analysis.error(),
            ReportKind::Model => self.model.error(),
        };

        let mut effects = vec![match error {
            Some(error) => {
                warn!(generation, %section, %error, "report fetch failed");
                Effect::Emit(QueryEvent::SectionUnavailable {
                    generation,
                    section,
                    error: error.to_string(),
                })
            }
            None => {
                debug!(generation, %section, "report section ready");
                Effect::Emit(QueryEvent::SectionReady {
                    generation,
                    section,
                })
            }
        }];

        if !self.analysis.is_pending() && !self.model.is_pending() {
            self.loading = false;
            self.outcome = QueryOutcome::Ready;
            effects.push(self.settled_event());
        }

        effects
    }

    fn settled_event(&self) -> Effect {
        Effect::Emit(QueryEvent::Settled {
            generation: self.generation,
            outcome: self.outcome.clone(),
        })
    }

    fn discard_stale(&mut self, generation: Generation, message: &'static str) {
        self.stale_discarded += 1;
        debug!(
            generation,
            current = self.generation,
            message,
            "discarding stale response"
        );
    }
}

fn message_name(msg: &QueryMsg) -> &'static str {
    match msg {
        QueryMsg::Submit { .. } => "submit",
        QueryMsg::CountSettled { .. } => "count",
        QueryMsg::ConfirmationResolved { .. } => "confirmation",
        QueryMsg::AnalysisSettled { .. } => "analysis",
        QueryMsg::ModelSettled { .. } => "model",
    }
}
