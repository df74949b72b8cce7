//! Dialog-level submit flow: clear the old error, submit, then either
//! reload the page or show the failure in the same dialog.

use codeatlas_shared::{FeedbackMessages, ModalKind, SubmissionOutcome};

use super::api::FormTransport;
use super::logging::Logger;
use super::navigation::Navigator;
use super::submission::{SubmissionClient, SubmitError};
use crate::state::modal_coordinator::{ErrorText, ModalCoordinator, ScrollLock};
use crate::state::visibility::Presentation;

const COMPONENT: &str = "modal-flow";

/// The dialogs, their submission client and the page navigator.
///
/// Only built when the signup/login markup is present.
pub struct ModalFlow<E, T, L, X, N> {
    coordinator: ModalCoordinator<E, T, L>,
    client: SubmissionClient<X>,
    navigator: N,
    messages: FeedbackMessages,
}

impl<E, T, L, X, N> ModalFlow<E, T, L, X, N>
where
    E: Presentation,
    T: ErrorText,
    L: ScrollLock,
    X: FormTransport,
    N: Navigator,
{
    pub fn new(
        coordinator: ModalCoordinator<E, T, L>,
        client: SubmissionClient<X>,
        navigator: N,
        messages: FeedbackMessages,
    ) -> Self {
        Self {
            coordinator,
            client,
            navigator,
            messages,
        }
    }

    pub fn coordinator(&self) -> &ModalCoordinator<E, T, L> {
        &self.coordinator
    }

    pub fn client(&self) -> &SubmissionClient<X> {
        &self.client
    }

    /// Submit `kind`'s form and act on the outcome.
    ///
    /// The dialog may be closed while the request is pending; the outcome is
    /// still rendered into its (hidden) error element.
    pub async fn submit(&self, kind: ModalKind, form: &X::Form) -> Result<SubmissionOutcome, SubmitError> {
        if self.client.is_in_flight(kind) {
            Logger::warn_with_component(COMPONENT, &format!("ignoring {} submit while one is pending", kind));
            return Err(SubmitError::InFlight(kind));
        }

        self.coordinator.clear_error(kind);
        let outcome = self.client.submit(kind, form).await?;

        match &outcome {
            SubmissionOutcome::Success => {
                Logger::info_with_component(COMPONENT, &format!("{} succeeded, reloading", kind));
                self.navigator.reload();
            }
            SubmissionOutcome::ServerRejected(_) | SubmissionOutcome::NetworkFailure => {
                if let Some(message) = outcome.error_message(&self.messages) {
                    self.coordinator.show_error(kind, &message);
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;
    use crate::state::modal_coordinator::{ModalHandle, ModalSet};
    use crate::test_utils::{
        form, FakeElement, FakeErrorText, FakeNavigator, FakeScrollLock, FakeTransport,
    };
    use futures::executor::block_on;
    use std::rc::Rc;

    type TestFlow = ModalFlow<FakeElement, FakeErrorText, FakeScrollLock, FakeTransport, FakeNavigator>;

    struct Fixture {
        flow: Rc<TestFlow>,
        transport: FakeTransport,
        navigator: FakeNavigator,
        lock: FakeScrollLock,
        signup_error: FakeErrorText,
        login_error: FakeErrorText,
    }

    fn fixture() -> Fixture {
        let transport = FakeTransport::default();
        let navigator = FakeNavigator::default();
        let lock = FakeScrollLock::default();
        let signup_error = FakeErrorText::default();
        let login_error = FakeErrorText::default();

        let modals = ModalSet::new(
            ModalHandle::new(FakeElement::new("signup"), "active", signup_error.clone()),
            ModalHandle::new(FakeElement::new("login"), "active", login_error.clone()),
        );
        let flow = ModalFlow::new(
            ModalCoordinator::new(modals, lock.clone()),
            SubmissionClient::new(transport.clone(), Endpoints::default()),
            navigator.clone(),
            FeedbackMessages::default(),
        );

        Fixture {
            flow: Rc::new(flow),
            transport,
            navigator,
            lock,
            signup_error,
            login_error,
        }
    }

    #[test]
    fn test_signup_created_reloads_page() {
        let f = fixture();
        f.transport.reply(201, r#"{"id": 1, "username": "ada", "email": "ada@example.com"}"#);
        f.flow.coordinator().open(ModalKind::Signup);

        let fields = form(&[("username", "ada"), ("email", "ada@example.com"), ("password", "correct horse")]);
        let outcome = block_on(f.flow.submit(ModalKind::Signup, &fields)).unwrap();

        assert_eq!(outcome, SubmissionOutcome::Success);
        assert_eq!(f.navigator.reloads(), 1);
        assert_eq!(f.signup_error.text(), "");
    }

    #[test]
    fn test_login_rejected_shows_detail() {
        let f = fixture();
        f.transport.reply(401, r#"{"detail":"invalid credentials"}"#);
        f.flow.coordinator().open(ModalKind::Login);

        block_on(f.flow.submit(ModalKind::Login, &form(&[("username", "ada"), ("password", "x")]))).unwrap();

        assert!(f.flow.coordinator().is_open(ModalKind::Login));
        assert_eq!(f.login_error.text(), "invalid credentials");
        assert_eq!(f.navigator.reloads(), 0);
        assert!(f.lock.is_locked());
    }

    #[test]
    fn test_signup_rejected_without_detail_shows_generic() {
        let f = fixture();
        f.transport.reply(400, "{}");
        f.flow.coordinator().open(ModalKind::Signup);

        block_on(f.flow.submit(ModalKind::Signup, &form(&[]))).unwrap();

        assert_eq!(f.signup_error.text(), "Something went wrong");
        assert!(f.flow.coordinator().is_open(ModalKind::Signup));
    }

    #[test]
    fn test_login_offline_shows_network_error() {
        let f = fixture();
        f.transport.fail("TypeError: NetworkError when attempting to fetch resource.");
        f.flow.coordinator().open(ModalKind::Login);

        let outcome = block_on(f.flow.submit(ModalKind::Login, &form(&[]))).unwrap();

        assert_eq!(outcome, SubmissionOutcome::NetworkFailure);
        assert_eq!(f.login_error.text(), "Network error. Please try again.");
        assert!(f.flow.coordinator().is_open(ModalKind::Login));
        assert_eq!(f.navigator.reloads(), 0);
    }

    #[test]
    fn test_html_error_page_shows_network_error() {
        let f = fixture();
        f.transport.reply(502, "<html><body>Bad Gateway</body></html>");

        block_on(f.flow.submit(ModalKind::Signup, &form(&[]))).unwrap();
        assert_eq!(f.signup_error.text(), "Network error. Please try again.");
    }

    #[test]
    fn test_previous_error_cleared_before_request() {
        let f = fixture();
        f.flow.coordinator().open(ModalKind::Login);
        f.flow.coordinator().show_error(ModalKind::Login, "old message");
        f.transport.reply(201, "{}");

        let during = Rc::new(std::cell::RefCell::new(None));
        {
            let during = during.clone();
            let login_error = f.login_error.clone();
            f.transport.on_in_flight(move || *during.borrow_mut() = Some(login_error.text()));
        }

        block_on(f.flow.submit(ModalKind::Login, &form(&[]))).unwrap();
        assert_eq!(during.borrow().as_deref(), Some(""));
    }

    #[test]
    fn test_closing_modal_mid_flight_is_harmless() {
        let f = fixture();
        f.flow.coordinator().open(ModalKind::Login);
        f.transport.reply(401, r#"{"detail": "Invalid username or password"}"#);
        {
            let flow = f.flow.clone();
            f.transport.on_in_flight(move || flow.coordinator().close_all());
        }

        block_on(f.flow.submit(ModalKind::Login, &form(&[]))).unwrap();

        assert!(!f.flow.coordinator().any_open());
        assert!(!f.lock.is_locked());
        assert_eq!(f.login_error.text(), "Invalid username or password");
    }

    #[test]
    fn test_reentrant_submit_keeps_error_and_sends_once() {
        let f = fixture();
        f.transport.reply(400, r#"{"detail": "Email 'a@b.c' already exists"}"#);
        let fields = form(&[("email", "a@b.c")]);

        let (first, second) = block_on(async {
            futures::join!(
                f.flow.submit(ModalKind::Signup, &fields),
                f.flow.submit(ModalKind::Signup, &fields)
            )
        });

        assert!(first.is_ok());
        assert_eq!(second, Err(SubmitError::InFlight(ModalKind::Signup)));
        assert_eq!(f.transport.requests().len(), 1);
        assert_eq!(f.signup_error.text(), "Email 'a@b.c' already exists");
    }

    #[test]
    fn test_both_modals_succeeding_each_reload() {
        let f = fixture();
        f.transport.reply(201, "{}").reply(200, "{}");
        let empty = form(&[]);

        let (signup, login) = block_on(async {
            futures::join!(
                f.flow.submit(ModalKind::Signup, &empty),
                f.flow.submit(ModalKind::Login, &empty)
            )
        });

        assert!(signup.is_ok() && login.is_ok());
        assert_eq!(f.navigator.reloads(), 2);
    }
}
