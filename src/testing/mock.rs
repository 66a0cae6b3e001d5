//! Mock platform authenticator
//!
//! Replays a scripted outcome for every ceremony and records the options it
//! was called with, so tests can check exactly what reached the platform.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::ceremony::BinaryCeremonyDescription;
use crate::platform::{CancelReason, CeremonyOutcome, CredentialResult, PlatformAuthenticator};

/// A ceremony the mock was asked to perform
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedCall {
    Create(BinaryCeremonyDescription),
    Get(BinaryCeremonyDescription),
}

impl RecordedCall {
    /// Options passed to the platform
    #[must_use]
    pub fn options(&self) -> &BinaryCeremonyDescription {
        match self {
            RecordedCall::Create(options) | RecordedCall::Get(options) => options,
        }
    }
}

/// Scripted stand-in for a platform authenticator
pub struct MockAuthenticator {
    outcome: CeremonyOutcome,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockAuthenticator {
    /// Mock that answers every ceremony with `outcome`
    #[must_use]
    pub fn new(outcome: CeremonyOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock whose ceremonies complete with `credential`
    #[must_use]
    pub fn completing(credential: CredentialResult) -> Self {
        Self::new(CeremonyOutcome::Completed(credential))
    }

    /// Mock whose ceremonies are cancelled for `reason`
    #[must_use]
    pub fn cancelling(reason: CancelReason) -> Self {
        Self::new(CeremonyOutcome::Cancelled(reason))
    }

    /// Every ceremony performed so far, in call order
    ///
    /// # Panics
    ///
    /// Panics if a previous caller panicked while recording a call.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> CeremonyOutcome {
        self.calls.lock().unwrap().push(call);
        self.outcome.clone()
    }
}

#[async_trait]
impl PlatformAuthenticator for MockAuthenticator {
    async fn create_credential(&self, options: BinaryCeremonyDescription) -> CeremonyOutcome {
        self.record(RecordedCall::Create(options))
    }

    async fn get_assertion(&self, options: BinaryCeremonyDescription) -> CeremonyOutcome {
        self.record(RecordedCall::Get(options))
    }
}
