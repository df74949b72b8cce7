//! In-memory stand-ins for DOM regions, the HTTP transport and navigation,
//! shared by the unit tests of the state and service modules.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use async_trait::async_trait;

use crate::services::api::{FormTransport, HttpReply, TransportError};
use crate::services::navigation::Navigator;
use crate::state::modal_coordinator::{ErrorText, ScrollLock};
use crate::state::visibility::Presentation;

/// Shared, ordered record of every observable mutation in a test
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A page region with a class list. Clones share state.
#[derive(Clone)]
pub struct FakeElement {
    name: String,
    classes: Rc<RefCell<BTreeSet<String>>>,
    log: EventLog,
}

impl FakeElement {
    pub fn new(name: &str) -> Self {
        Self::with_log(name, event_log())
    }

    pub fn with_log(name: &str, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            classes: Rc::new(RefCell::new(BTreeSet::new())),
            log,
        }
    }

    /// Mutations recorded as `name+class` / `name-class`
    pub fn history(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl Presentation for FakeElement {
    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
        self.log.borrow_mut().push(format!("{}+{}", self.name, class));
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
        self.log.borrow_mut().push(format!("{}-{}", self.name, class));
    }
}

/// An error message element
#[derive(Clone, Default)]
pub struct FakeErrorText {
    text: Rc<RefCell<String>>,
}

impl FakeErrorText {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl ErrorText for FakeErrorText {
    fn show(&self, message: &str) {
        *self.text.borrow_mut() = message.to_string();
    }

    fn clear(&self) {
        self.text.borrow_mut().clear();
    }
}

/// Body scroll lock that records its current state
#[derive(Clone, Default)]
pub struct FakeScrollLock {
    locked: Rc<Cell<bool>>,
}

impl FakeScrollLock {
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }
}

impl ScrollLock for FakeScrollLock {
    fn set_locked(&self, locked: bool) {
        self.locked.set(locked);
    }
}

#[derive(Clone, Default)]
pub struct FakeNavigator {
    reloads: Rc<Cell<u32>>,
}

impl FakeNavigator {
    pub fn reloads(&self) -> u32 {
        self.reloads.get()
    }
}

impl Navigator for FakeNavigator {
    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

/// A request the fake transport received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
}

/// Scripted transport: replies are consumed in order, one per request.
///
/// Each request yields to the executor once before resolving, so two
/// submissions polled together genuinely overlap. An optional hook runs
/// while the request is in flight.
#[derive(Clone, Default)]
pub struct FakeTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpReply, TransportError>>>>,
    requests: Rc<RefCell<Vec<RecordedRequest>>>,
    in_flight_hook: Rc<RefCell<Option<Box<dyn Fn()>>>>,
}

impl FakeTransport {
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies.borrow_mut().push_back(Ok(HttpReply {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::Send(message.to_string())));
        self
    }

    pub fn on_in_flight(&self, hook: impl Fn() + 'static) {
        *self.in_flight_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FormTransport for FakeTransport {
    type Form = Vec<(String, String)>;

    async fn post_form(&self, endpoint: &str, form: &Self::Form) -> Result<HttpReply, TransportError> {
        self.requests.borrow_mut().push(RecordedRequest {
            endpoint: endpoint.to_string(),
            fields: form.clone(),
        });

        if let Some(hook) = self.in_flight_hook.borrow().as_ref() {
            hook();
        }
        YieldOnce::default().await;

        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Send("no scripted reply".to_string())))
    }
}

/// Returns `Pending` once (waking itself), then `Ready`
#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub fn form(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
