//! # Event Router
//!
//! Looks up the page's regions once, builds the page-scoped [`PageContext`]
//! and binds every DOM trigger to it. Holds no UI state of its own.
//!
//! The dialog flow exists only when both auth dialogs were rendered; on the
//! signed-in rendering nothing dialog-related is looked up again or bound.

use std::rc::Rc;

use codeatlas_shared::{ModalKind, SubmissionOutcome};
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, FormData, KeyboardEvent};

use crate::config::PageConfig;
use crate::dom::{contains_target, find, is_target, BodyScrollLock, DomElement, DomErrorText, ModalMarkup, ModalPair};
use crate::error::PageError;
use crate::services::api::GlooTransport;
use crate::services::logging::Logger;
use crate::services::modal_flow::ModalFlow;
use crate::services::navigation::BrowserNavigator;
use crate::services::submission::{SubmissionClient, SubmitError};
use crate::state::modal_coordinator::{ModalCoordinator, ModalHandle, ModalSet};
use crate::state::visibility::{ClickOrigin, Dropdown, MobileNav, Propagation};

const COMPONENT: &str = "router";

pub type DomModalFlow = ModalFlow<DomElement, DomErrorText, BodyScrollLock, GlooTransport, BrowserNavigator>;

/// Everything the page's handlers act on, created once per page load
pub struct PageContext {
    pub config: PageConfig,
    pub dropdown: Option<Dropdown<DomElement>>,
    pub nav: Option<MobileNav<DomElement>>,
    pub modals: Option<DomModalFlow>,
}

impl PageContext {
    pub fn new(document: &Document, config: PageConfig, modal_markup: Option<&ModalPair>) -> Self {
        let classes = &config.classes;
        let dropdown = find(document, &config.elements.dropdown)
            .map(|el| Dropdown::new(DomElement::new(el), classes.dropdown_open.clone()));
        let nav = find(document, &config.elements.navbar)
            .map(|el| MobileNav::new(DomElement::new(el), classes.nav_mobile_open.clone()));

        let modals = modal_markup.map(|pair| {
            let handle = |markup: &ModalMarkup| {
                ModalHandle::new(
                    DomElement::new(markup.container.clone()),
                    classes.modal_open.clone(),
                    DomErrorText::new(markup.error.clone()),
                )
            };
            let coordinator = ModalCoordinator::new(
                ModalSet::new(handle(&pair.signup), handle(&pair.login)),
                BodyScrollLock::new(document, classes.scroll_lock.clone()),
            );
            ModalFlow::new(
                coordinator,
                SubmissionClient::new(GlooTransport, config.endpoints.clone()),
                BrowserNavigator,
                config.messages.clone(),
            )
        });

        Self {
            config,
            dropdown,
            nav,
            modals,
        }
    }
}

/// The page's bound listeners and the context they share
pub struct EventRouter {
    context: Rc<PageContext>,
    listeners: Vec<EventListener>,
}

impl EventRouter {
    pub fn install(document: &Document, config: PageConfig) -> Result<Self, PageError> {
        let modal_markup = ModalPair::locate(document, &config);
        let context = Rc::new(PageContext::new(document, config, modal_markup.as_ref()));

        let mut router = Self {
            context,
            listeners: Vec::new(),
        };
        router.bind_dropdown(document)?;
        router.bind_nav(document);
        if let Some(pair) = &modal_markup {
            router.bind_modals(document, pair);
        }

        Logger::info_with_component(
            COMPONENT,
            &format!(
                "bound {} listeners (dropdown: {}, nav: {}, dialogs: {})",
                router.listeners.len(),
                router.context.dropdown.is_some(),
                router.context.nav.is_some(),
                router.context.modals.is_some(),
            ),
        );
        Ok(router)
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Keep every binding alive for the rest of the page's lifetime
    pub fn persist(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }

    fn listen<F>(&mut self, target: &Element, event: &'static str, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.listeners.push(EventListener::new(target, event, handler));
    }

    /// Like `listen`, for handlers that call `prevent_default`
    fn listen_active<F>(&mut self, target: &Element, event: &'static str, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.listeners.push(EventListener::new_with_options(
            target,
            event,
            EventListenerOptions::enable_prevent_default(),
            handler,
        ));
    }

    fn bind_dropdown(&mut self, document: &Document) -> Result<(), PageError> {
        let Some(dropdown) = &self.context.dropdown else {
            Logger::warn_with_component(COMPONENT, "no dropdown on this page");
            return Ok(());
        };
        let container = dropdown.element().element().clone();

        match find(document, &self.context.config.elements.dropdown_trigger) {
            Some(trigger) => {
                let context = self.context.clone();
                self.listen(&trigger, "click", move |event| {
                    if let Some(dropdown) = &context.dropdown {
                        stop_if(dropdown.on_trigger_click(), event);
                    }
                });
            }
            None => Logger::warn_with_component(COMPONENT, "dropdown has no trigger"),
        }

        let links = container.query_selector_all("a")?;
        for index in 0..links.length() {
            let Some(link) = links.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let context = self.context.clone();
            self.listen(&link, "click", move |event| {
                if let Some(dropdown) = &context.dropdown {
                    stop_if(dropdown.on_link_click(), event);
                }
            });
        }

        let context = self.context.clone();
        self.listeners.push(EventListener::new(document, "click", move |event| {
            if let Some(dropdown) = &context.dropdown {
                let origin = if contains_target(dropdown.element().element(), event.target()) {
                    ClickOrigin::Inside
                } else {
                    ClickOrigin::Outside
                };
                dropdown.on_document_click(origin);
            }
        }));
        Ok(())
    }

    fn bind_nav(&mut self, document: &Document) {
        if self.context.nav.is_none() {
            Logger::warn_with_component(COMPONENT, "no navbar on this page");
            return;
        }
        let Some(hamburger) = find(document, &self.context.config.elements.hamburger) else {
            Logger::warn_with_component(COMPONENT, "navbar has no hamburger control");
            return;
        };

        let context = self.context.clone();
        self.listen(&hamburger, "click", move |_| {
            if let Some(nav) = &context.nav {
                nav.on_hamburger_click();
            }
        });
    }

    fn bind_modals(&mut self, document: &Document, pair: &ModalPair) {
        for kind in ModalKind::ALL {
            let markup = pair.get(kind);
            let missing = markup.missing_fields();
            if !missing.is_empty() {
                Logger::warn_with_component(
                    COMPONENT,
                    &format!("{} form lacks fields: {}", kind, missing.join(", ")),
                );
            }

            if let Some(trigger) = &markup.open_trigger {
                let context = self.context.clone();
                self.listen(trigger, "click", move |_| {
                    if let Some(flow) = &context.modals {
                        flow.coordinator().open(kind);
                    }
                });
            }

            if let Some(trigger) = &markup.close_trigger {
                let context = self.context.clone();
                self.listen(trigger, "click", move |_| {
                    if let Some(flow) = &context.modals {
                        flow.coordinator().close(kind);
                    }
                });
            }

            if let Some(link) = &markup.switch_link {
                let context = self.context.clone();
                self.listen_active(link, "click", move |event| {
                    event.prevent_default();
                    if let Some(flow) = &context.modals {
                        flow.coordinator().switch_to(kind.other());
                    }
                });
            }

            // Backdrop clicks land on the container itself, content clicks on descendants
            let context = self.context.clone();
            self.listen(&markup.container, "click", move |event| {
                if let Some(flow) = &context.modals {
                    let container = flow.coordinator().modals().get(kind).container();
                    if is_target(container.element(), event.target()) {
                        flow.coordinator().close(kind);
                    }
                }
            });

            let context = self.context.clone();
            let submit_markup = markup.clone();
            self.listen_active(&markup.form, "submit", move |event| {
                event.prevent_default();
                submit_form(context.clone(), submit_markup.clone());
            });
        }

        let context = self.context.clone();
        self.listeners.push(EventListener::new(document, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .map_or(false, |key| key.key() == "Escape");
            if is_escape {
                if let Some(flow) = &context.modals {
                    flow.coordinator().close_all();
                }
            }
        }));
    }
}

fn stop_if(propagation: Propagation, event: &Event) {
    if propagation == Propagation::Stop {
        event.stop_propagation();
    }
}

fn submit_form(context: Rc<PageContext>, markup: ModalMarkup) {
    let kind = markup.kind;
    let form_data = match FormData::new_with_form(&markup.form) {
        Ok(form_data) => form_data,
        Err(e) => {
            Logger::error_with_component(
                COMPONENT,
                &format!("could not read {} form: {}", kind, crate::error::js_error_message(&e)),
            );
            return;
        }
    };

    spawn_local(async move {
        let Some(flow) = &context.modals else {
            return;
        };
        markup.set_submitting(true);
        match flow.submit(kind, &form_data).await {
            // The page is reloading; leave the form disabled
            Ok(SubmissionOutcome::Success) => {}
            Ok(SubmissionOutcome::ServerRejected(_) | SubmissionOutcome::NetworkFailure) => {
                markup.set_submitting(false);
            }
            // The pending submission re-enables the form when it resolves
            Err(SubmitError::InFlight(_)) => {}
        }
    });
}
