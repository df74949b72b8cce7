use std::cell::Cell;

use codeatlas_shared::{ModalKind, SubmissionOutcome};
use thiserror::Error;

use super::api::FormTransport;
use super::logging::Logger;
use crate::config::Endpoints;

const COMPONENT: &str = "submission";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a {0} submission is already in flight")]
    InFlight(ModalKind),
}

/// Posts a dialog's form to its route and classifies the reply.
///
/// At most one submission per dialog is outstanding; a second one started
/// before the first resolves is refused without touching the network.
pub struct SubmissionClient<T> {
    transport: T,
    endpoints: Endpoints,
    in_flight: [Cell<bool>; 2],
}

impl<T: FormTransport> SubmissionClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            in_flight: [Cell::new(false), Cell::new(false)],
        }
    }

    pub fn is_in_flight(&self, kind: ModalKind) -> bool {
        self.flag(kind).get()
    }

    pub fn endpoint(&self, kind: ModalKind) -> &str {
        self.endpoints.for_kind(kind)
    }

    pub async fn submit(&self, kind: ModalKind, form: &T::Form) -> Result<SubmissionOutcome, SubmitError> {
        let _guard = InFlightGuard::acquire(self.flag(kind), kind)?;
        let endpoint = self.endpoint(kind);
        Logger::info_with_component(COMPONENT, &format!("submitting {} form to {}", kind, endpoint));

        let outcome = match self.transport.post_form(endpoint, form).await {
            Ok(reply) => {
                Logger::debug_with_component(COMPONENT, &format!("{} replied {}", endpoint, reply.status));
                SubmissionOutcome::from_response(reply.status, &reply.body)
            }
            Err(e) => {
                Logger::warn_with_component(COMPONENT, &format!("{} submission failed: {}", kind, e));
                SubmissionOutcome::NetworkFailure
            }
        };

        Logger::info_with_component(COMPONENT, &format!("{} submission outcome: {:?}", kind, outcome));
        Ok(outcome)
    }

    fn flag(&self, kind: ModalKind) -> &Cell<bool> {
        match kind {
            ModalKind::Signup => &self.in_flight[0],
            ModalKind::Login => &self.in_flight[1],
        }
    }
}

/// Marks a dialog busy for the lifetime of one submission, including when
/// the submitting future is dropped early.
struct InFlightGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a Cell<bool>, kind: ModalKind) -> Result<Self, SubmitError> {
        if flag.replace(true) {
            return Err(SubmitError::InFlight(kind));
        }
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
