use codeatlas_shared::{FeedbackMessages, ModalKind};
use serde::Deserialize;

use crate::error::PageError;

/// Id of the optional `<script type="application/json">` block holding overrides
pub const CONFIG_ELEMENT_ID: &str = "page-config";

/// Everything the controller needs to know about the server-rendered page
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub elements: ElementIds,
    pub classes: PresentationClasses,
    pub endpoints: Endpoints,
    pub messages: FeedbackMessages,
    pub log_level: LogLevel,
}

impl PageConfig {
    /// Merge a JSON override document over the defaults
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        serde_json::from_str(json).map_err(PageError::InvalidConfig)
    }

    pub fn modal_ids(&self, kind: ModalKind) -> &ModalElementIds {
        match kind {
            ModalKind::Signup => &self.elements.signup,
            ModalKind::Login => &self.elements.login,
        }
    }
}

/// Element ids the controller binds to.
///
/// Overrides are merged key by key, including inside each dialog's ids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ElementIdOverrides")]
pub struct ElementIds {
    pub dropdown: String,
    pub dropdown_trigger: String,
    pub navbar: String,
    pub hamburger: String,
    pub signup: ModalElementIds,
    pub login: ModalElementIds,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            dropdown: "coursesDropdown".to_string(),
            dropdown_trigger: "dropdownTrigger".to_string(),
            navbar: "navbar".to_string(),
            hamburger: "hamburger".to_string(),
            signup: ModalElementIds::for_kind(ModalKind::Signup),
            login: ModalElementIds::for_kind(ModalKind::Login),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ElementIdOverrides {
    dropdown: Option<String>,
    dropdown_trigger: Option<String>,
    navbar: Option<String>,
    hamburger: Option<String>,
    signup: ModalIdOverrides,
    login: ModalIdOverrides,
}

impl From<ElementIdOverrides> for ElementIds {
    fn from(overrides: ElementIdOverrides) -> Self {
        let defaults = ElementIds::default();
        Self {
            dropdown: overrides.dropdown.unwrap_or(defaults.dropdown),
            dropdown_trigger: overrides.dropdown_trigger.unwrap_or(defaults.dropdown_trigger),
            navbar: overrides.navbar.unwrap_or(defaults.navbar),
            hamburger: overrides.hamburger.unwrap_or(defaults.hamburger),
            signup: overrides.signup.merge_over(defaults.signup),
            login: overrides.login.merge_over(defaults.login),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModalIdOverrides {
    container: Option<String>,
    open_trigger: Option<String>,
    close_trigger: Option<String>,
    form: Option<String>,
    error: Option<String>,
    switch_link: Option<String>,
}

impl ModalIdOverrides {
    fn merge_over(self, base: ModalElementIds) -> ModalElementIds {
        ModalElementIds {
            container: self.container.unwrap_or(base.container),
            open_trigger: self.open_trigger.unwrap_or(base.open_trigger),
            close_trigger: self.close_trigger.unwrap_or(base.close_trigger),
            form: self.form.unwrap_or(base.form),
            error: self.error.unwrap_or(base.error),
            switch_link: self.switch_link.unwrap_or(base.switch_link),
        }
    }
}

/// Ids of the six elements that make up one modal
#[derive(Debug, Clone, PartialEq)]
pub struct ModalElementIds {
    pub container: String,
    pub open_trigger: String,
    pub close_trigger: String,
    pub form: String,
    pub error: String,
    pub switch_link: String,
}

impl ModalElementIds {
    /// Conventional camelCase ids: `signupModal`, `openSignup`, `switchToLogin`, ...
    pub fn for_kind(kind: ModalKind) -> Self {
        let name = kind.as_str();
        let title = title_case(name);
        Self {
            container: format!("{name}Modal"),
            open_trigger: format!("open{title}"),
            close_trigger: format!("close{title}"),
            form: format!("{name}Form"),
            error: format!("{name}Error"),
            switch_link: format!("switchTo{}", title_case(kind.other().as_str())),
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// CSS classes whose presence is the single source of visibility state
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PresentationClasses {
    pub dropdown_open: String,
    pub nav_mobile_open: String,
    pub modal_open: String,
    /// Applied to `<body>` while any modal is open
    pub scroll_lock: String,
}

impl Default for PresentationClasses {
    fn default() -> Self {
        Self {
            dropdown_open: "open".to_string(),
            nav_mobile_open: "mobile-open".to_string(),
            modal_open: "active".to_string(),
            scroll_lock: "modal-open".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub signup: String,
    pub login: String,
}

impl Endpoints {
    pub fn for_kind(&self, kind: ModalKind) -> &str {
        match kind {
            ModalKind::Signup => &self.signup,
            ModalKind::Login => &self.login,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            signup: ModalKind::Signup.default_endpoint().to_string(),
            login: ModalKind::Login.default_endpoint().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
