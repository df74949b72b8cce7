//! web-sys adapters: element lookup by id and the browser-side
//! implementations of the presentation, error text and scroll lock seams.

use codeatlas_shared::ModalKind;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlFormElement, Node};

use crate::config::{ModalElementIds, PageConfig, CONFIG_ELEMENT_ID};
use crate::error::{js_error_message, PageError};
use crate::services::logging::Logger;
use crate::state::modal_coordinator::{ErrorText, ScrollLock};
use crate::state::visibility::Presentation;

const COMPONENT: &str = "dom";

pub fn find(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

pub fn require(document: &Document, id: &str) -> Result<Element, PageError> {
    find(document, id).ok_or_else(|| PageError::MissingElement { id: id.to_string() })
}

pub fn require_form(document: &Document, id: &str) -> Result<HtmlFormElement, PageError> {
    require(document, id)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| PageError::UnexpectedElement {
            id: id.to_string(),
            expected: "form",
        })
}

/// Overrides from the page's JSON config block, or the defaults
pub fn read_config(document: &Document) -> Result<PageConfig, PageError> {
    match find(document, CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) {
        Some(json) if !json.trim().is_empty() => PageConfig::from_json(&json),
        _ => Ok(PageConfig::default()),
    }
}

/// Whether an event's target sits inside `container` (inclusive)
pub fn contains_target(container: &Element, target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<Node>().ok())
        .map_or(false, |node| container.contains(Some(&node)))
}

/// Whether an event's target is `element` itself rather than a descendant
pub fn is_target(element: &Element, target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<Node>().ok())
        .map_or(false, |node| element.is_same_node(Some(&node)))
}

/// A page region whose class list carries its visibility
#[derive(Debug, Clone)]
pub struct DomElement(Element);

impl DomElement {
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl Presentation for DomElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().add_1(class) {
            Logger::warn_with_component(COMPONENT, &format!("adding class {}: {}", class, js_error_message(&e)));
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().remove_1(class) {
            Logger::warn_with_component(COMPONENT, &format!("removing class {}: {}", class, js_error_message(&e)));
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomErrorText(Element);

impl DomErrorText {
    pub fn new(element: Element) -> Self {
        Self(element)
    }
}

impl ErrorText for DomErrorText {
    fn show(&self, message: &str) {
        self.0.set_text_content(Some(message));
    }

    fn clear(&self) {
        self.0.set_text_content(Some(""));
    }
}

/// Toggles a class on `<body>`; a page without a body has nothing to lock
#[derive(Debug, Clone)]
pub struct BodyScrollLock {
    body: Option<HtmlElement>,
    class: String,
}

impl BodyScrollLock {
    pub fn new(document: &Document, class: impl Into<String>) -> Self {
        Self {
            body: document.body(),
            class: class.into(),
        }
    }
}

impl ScrollLock for BodyScrollLock {
    fn set_locked(&self, locked: bool) {
        let Some(body) = &self.body else {
            return;
        };
        let class_list = body.class_list();
        let result = if locked {
            class_list.add_1(&self.class)
        } else {
            class_list.remove_1(&self.class)
        };
        if let Err(e) = result {
            Logger::warn_with_component(COMPONENT, &format!("scroll lock: {}", js_error_message(&e)));
        }
    }
}

/// The elements of one rendered dialog
#[derive(Debug, Clone)]
pub struct ModalMarkup {
    pub kind: ModalKind,
    pub container: Element,
    pub form: HtmlFormElement,
    pub error: Element,
    pub open_trigger: Option<Element>,
    pub close_trigger: Option<Element>,
    pub switch_link: Option<Element>,
}

impl ModalMarkup {
    /// `Ok(None)` when the dialog was not rendered at all.
    ///
    /// A rendered container without its form or error element is an error;
    /// missing triggers only cost their binding.
    pub fn locate(document: &Document, kind: ModalKind, ids: &ModalElementIds) -> Result<Option<Self>, PageError> {
        let Some(container) = find(document, &ids.container) else {
            return Ok(None);
        };

        let markup = Self {
            kind,
            container,
            form: require_form(document, &ids.form)?,
            error: require(document, &ids.error)?,
            open_trigger: find(document, &ids.open_trigger),
            close_trigger: find(document, &ids.close_trigger),
            switch_link: find(document, &ids.switch_link),
        };

        for (id, element) in [
            (&ids.open_trigger, &markup.open_trigger),
            (&ids.close_trigger, &markup.close_trigger),
            (&ids.switch_link, &markup.switch_link),
        ] {
            if element.is_none() {
                Logger::warn_with_component(COMPONENT, &format!("{} dialog has no #{}", kind, id));
            }
        }

        Ok(Some(markup))
    }

    /// Required form fields that have no named control in the form
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.kind
            .required_fields()
            .iter()
            .copied()
            .filter(|field| {
                !matches!(self.form.query_selector(&format!("[name=\"{}\"]", field)), Ok(Some(_)))
            })
            .collect()
    }

    /// Disable or re-enable the form's submit controls
    pub fn set_submitting(&self, submitting: bool) {
        let Ok(controls) = self
            .form
            .query_selector_all("button[type=\"submit\"], input[type=\"submit\"], button:not([type])")
        else {
            return;
        };
        for index in 0..controls.length() {
            let Some(control) = controls.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let result = if submitting {
                control.set_attribute("disabled", "")
            } else {
                control.remove_attribute("disabled")
            };
            if let Err(e) = result {
                Logger::warn_with_component(COMPONENT, &format!("toggling submit control: {}", js_error_message(&e)));
            }
        }
    }
}

/// Both dialogs, present only on the signed-out rendering of the page
#[derive(Debug, Clone)]
pub struct ModalPair {
    pub signup: ModalMarkup,
    pub login: ModalMarkup,
}

impl ModalPair {
    pub fn locate(document: &Document, config: &PageConfig) -> Option<Self> {
        let signup = ModalMarkup::locate(document, ModalKind::Signup, config.modal_ids(ModalKind::Signup));
        let login = ModalMarkup::locate(document, ModalKind::Login, config.modal_ids(ModalKind::Login));

        match (signup, login) {
            (Ok(Some(signup)), Ok(Some(login))) => Some(Self { signup, login }),
            (Ok(None), Ok(None)) => {
                Logger::info_with_component(COMPONENT, "no auth dialogs on this page");
                None
            }
            (Err(e), _) | (_, Err(e)) => {
                Logger::warn_with_component(COMPONENT, &format!("auth dialogs not bound: {}", e));
                None
            }
            _ => {
                Logger::warn_with_component(COMPONENT, "only one auth dialog rendered, not binding either");
                None
            }
        }
    }

    pub fn get(&self, kind: ModalKind) -> &ModalMarkup {
        match kind {
            ModalKind::Signup => &self.signup,
            ModalKind::Login => &self.login,
        }
    }
}
