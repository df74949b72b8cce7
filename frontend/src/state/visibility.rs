//! # Visibility State
//!
//! Open/closed state for a single page region. The state lives in the
//! region's presentation class and nowhere else: `is_open` reads the class,
//! `open`/`close` add or remove it. Regions are reached through the
//! [`Presentation`] trait so the same logic drives real DOM elements and
//! in-memory fakes.

/// Class-list access for one page region
pub trait Presentation {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// Whether a click handler consumed the event or lets it bubble on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Where a document-level click landed relative to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    Inside,
    Outside,
}

/// A region shown while its presentation class is present
pub struct VisibilityToggle<E> {
    element: E,
    class: String,
}

impl<E: Presentation> VisibilityToggle<E> {
    pub fn new(element: E, class: impl Into<String>) -> Self {
        Self {
            element,
            class: class.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.element.has_class(&self.class)
    }

    pub fn open(&self) {
        if !self.is_open() {
            self.element.add_class(&self.class);
        }
    }

    pub fn close(&self) {
        if self.is_open() {
            self.element.remove_class(&self.class);
        }
    }

    /// Flip the state, returning whether the region is now open
    pub fn toggle(&self) -> bool {
        if self.is_open() {
            self.close();
            false
        } else {
            self.open();
            true
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }
}

/// Navigation dropdown: trigger toggles, outside clicks and link clicks close.
///
/// Trigger and link handlers report `Propagation::Stop`; the caller must stop
/// the event there, otherwise the document handler sees the same click.
pub struct Dropdown<E> {
    toggle: VisibilityToggle<E>,
}

impl<E: Presentation> Dropdown<E> {
    pub fn new(element: E, open_class: impl Into<String>) -> Self {
        Self {
            toggle: VisibilityToggle::new(element, open_class),
        }
    }

    pub fn is_open(&self) -> bool {
        self.toggle.is_open()
    }

    pub fn on_trigger_click(&self) -> Propagation {
        self.toggle.toggle();
        Propagation::Stop
    }

    pub fn on_link_click(&self) -> Propagation {
        self.toggle.close();
        Propagation::Stop
    }

    pub fn on_document_click(&self, origin: ClickOrigin) {
        if origin == ClickOrigin::Outside {
            self.toggle.close();
        }
    }

    pub fn element(&self) -> &E {
        self.toggle.element()
    }
}

/// Hamburger-driven mobile navigation; no outside-click handling
pub struct MobileNav<E> {
    toggle: VisibilityToggle<E>,
}

impl<E: Presentation> MobileNav<E> {
    pub fn new(element: E, open_class: impl Into<String>) -> Self {
        Self {
            toggle: VisibilityToggle::new(element, open_class),
        }
    }

    pub fn is_open(&self) -> bool {
        self.toggle.is_open()
    }

    pub fn on_hamburger_click(&self) -> bool {
        self.toggle.toggle()
    }
}
