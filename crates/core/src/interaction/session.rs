//! Tracking of one interaction analysis against the current selection.
//!
//! Reconciliation policy: **cancel on reset**. Each request is stamped with the session epoch.
//! A reset, or any change to the selection, moves to a new epoch, and a response carrying an
//! older epoch is dropped instead of overwriting the current state.

use super::client::InteractionService;
use super::types::AnalysisReport;
use crate::catalog::Drug;
use crate::constants::MIN_DRUGS_FOR_ANALYSIS;
use crate::error::AnalysisError;
use crate::selection::SelectionStore;
use crate::{PharmaError, PharmaResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Pending,
    Ready(AnalysisReport),
    /// Static user-facing message.
    Failed(&'static str),
}

/// Handle for a request in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    epoch: u64,
    drugs: Vec<Drug>,
}

impl AnalysisTicket {
    /// Drugs to send, as selected when the request started.
    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    epoch: u64,
    seen_revision: Option<u64>,
    state: AnalysisState,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            epoch: 0,
            seen_revision: None,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Drops any pending request and previous result.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state = AnalysisState::Idle;
    }

    /// Resets if the selection changed since the session last looked at it.
    fn observe(&mut self, selection: &SelectionStore) {
        if let Some(seen) = self.seen_revision {
            if seen != selection.revision() {
                tracing::debug!("selection changed, discarding analysis state");
                self.reset();
            }
        }
        self.seen_revision = Some(selection.revision());
    }

    /// Starts an analysis of the current selection.
    ///
    /// # Errors
    ///
    /// - `PharmaError::NotEnoughDrugs` with fewer than two drugs selected
    /// - `PharmaError::AnalysisAlreadyPending` if a request for this epoch is in flight
    pub fn begin(&mut self, selection: &SelectionStore) -> PharmaResult<AnalysisTicket> {
        self.observe(selection);

        if selection.len() < MIN_DRUGS_FOR_ANALYSIS {
            return Err(PharmaError::NotEnoughDrugs {
                required: MIN_DRUGS_FOR_ANALYSIS,
                selected: selection.len(),
            });
        }
        if self.state == AnalysisState::Pending {
            return Err(PharmaError::AnalysisAlreadyPending);
        }

        self.state = AnalysisState::Pending;
        Ok(AnalysisTicket {
            epoch: self.epoch,
            drugs: selection.drugs().to_vec(),
        })
    }

    /// Applies the response for `ticket`. Returns `false` if the response is stale and was
    /// discarded.
    pub fn complete(
        &mut self,
        selection: &SelectionStore,
        ticket: AnalysisTicket,
        result: Result<AnalysisReport, AnalysisError>,
    ) -> bool {
        self.observe(selection);

        if ticket.epoch != self.epoch || self.state != AnalysisState::Pending {
            tracing::info!(
                ticket_epoch = ticket.epoch,
                current_epoch = self.epoch,
                "discarding stale analysis response"
            );
            return false;
        }

        self.state = match result {
            Ok(report) => AnalysisState::Ready(report),
            Err(e) => {
                tracing::warn!("analysis failed: {e}");
                AnalysisState::Failed(e.user_message())
            }
        };
        true
    }

    /// Runs a full blocking round trip through `service`.
    pub fn run(
        &mut self,
        selection: &SelectionStore,
        service: &dyn InteractionService,
    ) -> PharmaResult<&AnalysisState> {
        let ticket = self.begin(selection)?;
        let result = service.analyze(ticket.drugs());
        self.complete(selection, ticket, result);
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::GlobalSeverity;

    struct FixedService {
        fail: bool,
    }

    impl InteractionService for FixedService {
        fn search(&self, _term: &str) -> Vec<Drug> {
            Vec::new()
        }

        fn analyze(&self, drugs: &[Drug]) -> Result<AnalysisReport, AnalysisError> {
            if self.fail {
                return Err(AnalysisError::Status { status: 502 });
            }
            Ok(report(&format!("{} drugs", drugs.len())))
        }
    }

    fn report(explanation: &str) -> AnalysisReport {
        AnalysisReport {
            interaction_detected: true,
            global_severity: Some(GlobalSeverity::Jaune),
            explanation: explanation.into(),
            conduct_to_follow: String::new(),
            technical_details: vec![],
        }
    }

    fn drug(cis: &str) -> Drug {
        Drug {
            cis: cis.into(),
            nom: format!("DRUG {cis}"),
            substances: vec![],
        }
    }

    fn two_drugs() -> SelectionStore {
        let mut store = SelectionStore::new();
        store.add(drug("1"));
        store.add(drug("2"));
        store
    }

    #[test]
    fn needs_two_drugs() {
        let mut store = SelectionStore::new();
        store.add(drug("1"));
        let mut session = AnalysisSession::new();
        assert!(matches!(
            session.begin(&store),
            Err(PharmaError::NotEnoughDrugs { selected: 1, .. })
        ));
        assert_eq!(session.state(), &AnalysisState::Idle);
    }

    #[test]
    fn successful_round_trip() {
        let store = two_drugs();
        let mut session = AnalysisSession::new();
        let state = session.run(&store, &FixedService { fail: false }).unwrap();
        assert_eq!(state, &AnalysisState::Ready(report("2 drugs")));
    }

    #[test]
    fn failure_surfaces_static_message() {
        let store = two_drugs();
        let mut session = AnalysisSession::new();
        let state = session.run(&store, &FixedService { fail: true }).unwrap();
        assert_eq!(
            state,
            &AnalysisState::Failed("Impossible de joindre le serveur d'analyse.")
        );
    }

    #[test]
    fn response_after_reset_is_discarded() {
        let store = two_drugs();
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&store).unwrap();

        session.reset();
        assert!(!session.complete(&store, ticket, Ok(report("stale"))));
        assert_eq!(session.state(), &AnalysisState::Idle);
    }

    #[test]
    fn response_after_selection_change_is_discarded() {
        let mut store = two_drugs();
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&store).unwrap();

        store.add(drug("3"));
        assert!(!session.complete(&store, ticket, Ok(report("stale"))));
        assert_eq!(session.state(), &AnalysisState::Idle);

        let ticket = session.begin(&store).unwrap();
        assert_eq!(ticket.drugs().len(), 3);
        assert!(session.complete(&store, ticket, Ok(report("fresh"))));
    }

    #[test]
    fn second_begin_while_pending_is_rejected() {
        let store = two_drugs();
        let mut session = AnalysisSession::new();
        let _ticket = session.begin(&store).unwrap();
        assert!(matches!(
            session.begin(&store),
            Err(PharmaError::AnalysisAlreadyPending)
        ));
    }
}
