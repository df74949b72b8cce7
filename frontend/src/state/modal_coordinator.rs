//! # Modal Coordinator
//!
//! Owns the signup and login dialogs and keeps two rules true after every
//! operation:
//! - at most one dialog is open
//! - the page scroll lock is held exactly while a dialog is open
//!
//! Mutual exclusion is enforced here, not by the markup: every open closes
//! the other dialog first. The scroll lock is re-derived from the dialogs'
//! state on every close instead of being counted.

use codeatlas_shared::ModalKind;

use super::visibility::{Presentation, VisibilityToggle};
use crate::services::logging::Logger;

const COMPONENT: &str = "modal-coordinator";

/// The element a dialog shows its submission error in
pub trait ErrorText {
    fn show(&self, message: &str);
    fn clear(&self);
}

/// Page-wide scroll suppression while a dialog covers the page
pub trait ScrollLock {
    fn set_locked(&self, locked: bool);
}

/// One dialog: its visibility and its error element
pub struct ModalHandle<E, T> {
    visibility: VisibilityToggle<E>,
    error: T,
}

impl<E: Presentation, T: ErrorText> ModalHandle<E, T> {
    pub fn new(container: E, open_class: impl Into<String>, error: T) -> Self {
        Self {
            visibility: VisibilityToggle::new(container, open_class),
            error,
        }
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn container(&self) -> &E {
        self.visibility.element()
    }
}

/// Both dialogs. Only constructible as a pair.
pub struct ModalSet<E, T> {
    signup: ModalHandle<E, T>,
    login: ModalHandle<E, T>,
}

impl<E: Presentation, T: ErrorText> ModalSet<E, T> {
    pub fn new(signup: ModalHandle<E, T>, login: ModalHandle<E, T>) -> Self {
        Self { signup, login }
    }

    pub fn get(&self, kind: ModalKind) -> &ModalHandle<E, T> {
        match kind {
            ModalKind::Signup => &self.signup,
            ModalKind::Login => &self.login,
        }
    }
}

pub struct ModalCoordinator<E, T, L> {
    modals: ModalSet<E, T>,
    scroll_lock: L,
}

impl<E, T, L> ModalCoordinator<E, T, L>
where
    E: Presentation,
    T: ErrorText,
    L: ScrollLock,
{
    /// Take over the dialogs as rendered.
    ///
    /// If the markup arrives with both dialogs open, login is closed so the
    /// exclusion rule holds from the start.
    pub fn new(modals: ModalSet<E, T>, scroll_lock: L) -> Self {
        let coordinator = Self { modals, scroll_lock };
        if coordinator.modals.signup.is_open() && coordinator.modals.login.is_open() {
            Logger::warn_with_component(COMPONENT, "both dialogs rendered open, closing login");
            coordinator.modals.login.visibility.close();
        }
        coordinator.sync_scroll_lock();
        coordinator
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.modals.get(kind).is_open()
    }

    /// The dialog currently shown, if any
    pub fn open_modal(&self) -> Option<ModalKind> {
        ModalKind::ALL.into_iter().find(|kind| self.is_open(*kind))
    }

    pub fn any_open(&self) -> bool {
        self.open_modal().is_some()
    }

    pub fn modals(&self) -> &ModalSet<E, T> {
        &self.modals
    }

    pub fn open(&self, target: ModalKind) {
        self.close_others(target);
        self.modals.get(target).visibility.open();
        self.scroll_lock.set_locked(true);
        Logger::debug_with_component(COMPONENT, &format!("opened {}", target));
    }

    pub fn close(&self, target: ModalKind) {
        self.modals.get(target).visibility.close();
        self.sync_scroll_lock();
        Logger::debug_with_component(COMPONENT, &format!("closed {}", target));
    }

    /// Close whatever is open, then open `target`, within one call so no
    /// frame shows both or neither.
    pub fn switch_to(&self, target: ModalKind) {
        Logger::debug_with_component(
            COMPONENT,
            &format!("switching {} -> {}", target.other(), target),
        );
        self.open(target);
    }

    /// Close both dialogs; a no-op when nothing is open
    pub fn close_all(&self) {
        for kind in ModalKind::ALL {
            self.modals.get(kind).visibility.close();
        }
        self.sync_scroll_lock();
    }

    pub fn show_error(&self, kind: ModalKind, message: &str) {
        self.modals.get(kind).error.show(message);
    }

    pub fn clear_error(&self, kind: ModalKind) {
        self.modals.get(kind).error.clear();
    }

    fn close_others(&self, target: ModalKind) {
        for kind in ModalKind::ALL.into_iter().filter(|kind| *kind != target) {
            self.modals.get(kind).visibility.close();
        }
    }

    fn sync_scroll_lock(&self) {
        self.scroll_lock.set_locked(self.any_open());
    }
}
