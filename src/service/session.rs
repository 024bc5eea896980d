//! Single-flight analysis session state
//!
//! Explicit finite-state machine for the submit → pending → result → reset
//! cycle. One analysis may be in flight at a time; the held report and error
//! are mutually exclusive by construction.

use crate::model::report::ComplianceReport;

/// Session state for a single analysis slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisState {
    #[default]
    Idle,
    /// An analysis is in flight
    Pending,
    /// Last analysis produced a validated report
    Success(ComplianceReport),
    /// Last analysis failed with a presentable message
    Failure(String),
}

/// Error type for session transitions
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("an analysis is already in flight")]
    AlreadyPending,

    #[error("no analysis is in flight")]
    NotPending,
}

/// Owner of the single "current report or error" slot
#[derive(Debug, Default)]
pub struct AnalysisSession {
    state: AnalysisState,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, AnalysisState::Pending)
    }

    /// Enter Pending from Idle or a terminal state, clearing any held result
    ///
    /// A submit while an analysis is already in flight is refused; there is
    /// no queuing and no cancel-and-replace.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.is_pending() {
            return Err(SessionError::AlreadyPending);
        }
        self.state = AnalysisState::Pending;
        Ok(())
    }

    /// Record the outcome of the in-flight analysis
    pub fn complete(
        &mut self,
        outcome: Result<ComplianceReport, String>,
    ) -> Result<(), SessionError> {
        if !self.is_pending() {
            return Err(SessionError::NotPending);
        }
        self.state = match outcome {
            Ok(report) => AnalysisState::Success(report),
            Err(message) => AnalysisState::Failure(message),
        };
        Ok(())
    }

    /// Explicit reset back to Idle, discarding any held result
    pub fn reset(&mut self) {
        self.state = AnalysisState::Idle;
    }

    /// Held report, if the last analysis succeeded
    pub fn report(&self) -> Option<&ComplianceReport> {
        match &self.state {
            AnalysisState::Success(report) => Some(report),
            _ => None,
        }
    }

    /// Held error message, if the last analysis failed
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            AnalysisState::Failure(message) => Some(message),
            _ => None,
        }
    }
}
