use super::msg::{Effect, Generation, QueryEvent, QueryMsg};
use super::state::{QueryOutcome, QueryState};
use crate::error::{ReportClientError, Result};
use crate::traits::{ConfirmationGate, ReportApi};
use crate::types::FilterSelection;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Drives `QueryState` by executing its effects.
///
/// Requests run on spawned tasks, so the methods that dispatch must be called
/// from inside a tokio runtime.
pub struct QueryOrchestrator<A, G>
where
    A: ReportApi + 'static,
    G: ConfirmationGate + 'static,
{
    api: Arc<A>,
    gate: Arc<G>,
    state: QueryState,
    tx: UnboundedSender<QueryMsg>,
    rx: UnboundedReceiver<QueryMsg>,
}

impl<A, G> QueryOrchestrator<A, G>
where
    A: ReportApi + 'static,
    G: ConfirmationGate + 'static,
{
    pub fn new(api: A, gate: G) -> Self {
        Self::with_shared(Arc::new(api), Arc::new(gate))
    }

    /// Build from already shared handles (e.g. an API client also used by the predictor)
    pub fn with_shared(api: Arc<A>, gate: Arc<G>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            gate,
            state: QueryState::new(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Start a submission with a filter snapshot and return its generation.
    /// A refused submission (confirmation pending) returns the unchanged generation.
    pub fn submit(&mut self, selection: FilterSelection) -> Generation {
        self.dispatch(QueryMsg::Submit { selection });
        self.state.generation()
    }

    /// Submit only when no query is loading or awaiting confirmation.
    /// This is the entry point for a user-facing submit control.
    pub fn try_submit(&mut self, selection: FilterSelection) -> Result<Generation> {
        if !self.state.can_submit() {
            return Err(ReportClientError::general(format!(
                "query {} is still in progress",
                self.state.generation()
            )));
        }
        Ok(self.submit(selection))
    }

    /// Wait for the next settled operation and apply it
    pub async fn step(&mut self) -> Vec<QueryEvent> {
        match self.rx.recv().await {
            Some(msg) => self.dispatch(msg),
            None => Vec::new(),
        }
    }

    /// Apply everything that has already settled without waiting
    pub fn drain(&mut self) -> Vec<QueryEvent> {
        let mut events = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            events.extend(self.dispatch(msg));
        }
        events
    }

    /// Process messages until the current generation has settled
    pub async fn run_until_settled<F>(&mut self, mut on_event: F) -> QueryOutcome
    where
        F: FnMut(&QueryEvent, &QueryState),
    {
        while !self.state.is_settled() {
            for event in self.step().await {
                on_event(&event, &self.state);
            }
        }
        self.state.outcome().clone()
    }

    /// Submit and wait for the submission to settle
    pub async fn submit_and_wait(&mut self, selection: FilterSelection) -> QueryOutcome {
        self.submit(selection);
        self.run_until_settled(|_, _| {}).await
    }

    fn dispatch(&mut self, msg: QueryMsg) -> Vec<QueryEvent> {
        let mut events = Vec::new();
        for effect in self.state.update(msg) {
            match effect {
                Effect::Emit(event) => events.push(event),
                other => self.spawn_effect(other),
            }
        }
        events
    }

    fn spawn_effect(&self, effect: Effect) {
        match effect {
            Effect::CountEntries {
                generation,
                selection,
            } => {
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api
                        .count_entries(&selection)
                        .await
                        .map_err(|e| e.to_string());
                    send(&tx, QueryMsg::CountSettled { generation, result });
                });
            }
            Effect::RequestConfirmation {
                generation,
                entries_count,
            } => {
                let gate = Arc::clone(&self.gate);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let decision = gate.confirm(entries_count).await.map_err(|e| e.to_string());
                    send(
                        &tx,
                        QueryMsg::ConfirmationResolved {
                            generation,
                            decision,
                        },
                    );
                });
            }
            Effect::FetchReports {
                generation,
                selection,
            } => {
                let selection = Arc::new(selection);

                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                let analysis_selection = Arc::clone(&selection);
                tokio::spawn(async move {
                    let result = api
                        .fetch_analysis(&analysis_selection)
                        .await
                        .map_err(|e| e.to_string());
                    send(&tx, QueryMsg::AnalysisSettled { generation, result });
                });

                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.fetch_model(&selection).await.map_err(|e| e.to_string());
                    send(&tx, QueryMsg::ModelSettled { generation, result });
                });
            }
            Effect::Emit(_) => {}
        }
    }
}

fn send(tx: &UnboundedSender<QueryMsg>, msg: QueryMsg) {
    if tx.send(msg).is_err() {
        debug!("orchestrator dropped before a request settled");
    }
}
