//! Platform authenticator boundary
//!
//! The relay never talks to an authenticator directly. Everything goes through
//! the [`PlatformAuthenticator`] trait, which a host application implements on
//! top of its platform's credential API (and which tests replace with a fake).

use async_trait::async_trait;
use std::sync::Arc;

use crate::ceremony::BinaryCeremonyDescription;

mod types;

pub use types::{AuthenticatorResponse, CancelReason, CeremonyOutcome, CredentialResult};

/// Platform credential capability
///
/// Each call is one user-interactive ceremony. Implementations suspend until
/// the user finishes or dismisses the prompt, or the options' timeout elapses,
/// and report any failure as [`CeremonyOutcome::Cancelled`].
#[async_trait]
pub trait PlatformAuthenticator: Send + Sync {
    /// Create a new credential (registration)
    async fn create_credential(&self, options: BinaryCeremonyDescription) -> CeremonyOutcome;

    /// Produce an assertion with an existing credential (login)
    async fn get_assertion(&self, options: BinaryCeremonyDescription) -> CeremonyOutcome;
}

#[async_trait]
impl<T> PlatformAuthenticator for Arc<T>
where
    T: PlatformAuthenticator + ?Sized,
{
    async fn create_credential(&self, options: BinaryCeremonyDescription) -> CeremonyOutcome {
        (**self).create_credential(options).await
    }

    async fn get_assertion(&self, options: BinaryCeremonyDescription) -> CeremonyOutcome {
        (**self).get_assertion(options).await
    }
}
