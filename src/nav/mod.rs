//! Screen navigation stack
//!
//! Presents exactly one of a fixed set of named screens at a time, with
//! push-and-show, clear-history-and-show (root), and single-step back
//! semantics. All failures here are logged warnings, never errors.

use std::collections::HashMap;

/// Identifiers for every screen the navigator can manage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    /// Main menu
    Home,
    /// Level selection grid
    LevelSelect,
    /// Active quiz attempt
    Quiz,
    /// Result card after a level attempt
    Results,
    /// Past persisted results
    History,
}

/// Displayable handle managed by the [`Navigator`].
///
/// `activate`/`deactivate` toggle visibility; `on_shown`/`on_hidden` are
/// notification hooks fired after the toggle. Hooks are synchronous and
/// must not call back into the navigator.
pub trait Screen {
    fn activate(&mut self);
    fn deactivate(&mut self);
    fn on_shown(&mut self) {}
    fn on_hidden(&mut self) {}
}

/// A completed navigation step, reported so the owning context can react
/// (e.g. start a quiz session when the quiz screen becomes visible).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Option<ScreenId>,
    pub to: ScreenId,
}

/// Centralized screen navigation with stack behavior
#[derive(Debug)]
pub struct Navigator<S: Screen> {
    screens: HashMap<ScreenId, S>,
    history: Vec<ScreenId>,
    current: Option<ScreenId>,
}

impl<S: Screen> Navigator<S> {
    pub fn new() -> Self {
        Self {
            screens: HashMap::new(),
            history: Vec::new(),
            current: None,
        }
    }

    /// Associate a screen id with its handle. First registration wins;
    /// a duplicate id is logged and ignored.
    pub fn register(&mut self, id: ScreenId, mut screen: S) {
        if self.screens.contains_key(&id) {
            log::warn!("navigator: screen {:?} already registered, ignoring", id);
            return;
        }
        screen.deactivate();
        self.screens.insert(id, screen);
    }

    /// The currently visible screen id, if any screen has been shown yet
    pub fn current(&self) -> Option<ScreenId> {
        self.current
    }

    /// Borrow the currently visible screen handle
    pub fn current_screen(&self) -> Option<&S> {
        self.current.and_then(|id| self.screens.get(&id))
    }

    /// Mutably borrow the currently visible screen handle
    pub fn current_screen_mut(&mut self) -> Option<&mut S> {
        self.current.and_then(|id| self.screens.get_mut(&id))
    }

    /// Borrow a registered screen handle by id
    pub fn screen(&self, id: ScreenId) -> Option<&S> {
        self.screens.get(&id)
    }

    /// Mutably borrow a registered screen handle by id
    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut S> {
        self.screens.get_mut(&id)
    }

    /// Number of entries on the back-history stack
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Show `id`, optionally pushing the screen being left onto history.
    ///
    /// Unknown ids and showing the already-visible screen are safe no-ops.
    /// Returns the transition performed, or `None` when nothing changed.
    pub fn show(&mut self, id: ScreenId, add_to_history: bool) -> Option<Transition> {
        if !self.screens.contains_key(&id) {
            log::warn!("navigator: screen not found {:?}", id);
            return None;
        }

        if self.current == Some(id) {
            return None;
        }

        let from = self.current;
        if let Some(current_id) = self.current {
            if add_to_history {
                self.history.push(current_id);
            }
            if let Some(screen) = self.screens.get_mut(&current_id) {
                screen.deactivate();
                screen.on_hidden();
            }
        }

        self.current = Some(id);
        if let Some(screen) = self.screens.get_mut(&id) {
            screen.activate();
            screen.on_shown();
        }

        Some(Transition { from, to: id })
    }

    /// Clear the entire history, then show `id`. Represents transitions
    /// with no way back (post-login, post-logout).
    pub fn set_as_root(&mut self, id: ScreenId) -> Option<Transition> {
        self.history.clear();
        self.show(id, false)
    }

    /// Pop the most recent history entry and show it. The screen being
    /// left is not re-pushed: this is a single-use back, not a full
    /// browser-style forward/back.
    pub fn back(&mut self) -> Option<Transition> {
        let prev = self.history.pop()?;
        let from = self.current;
        if let Some(current_id) = self.current {
            if let Some(screen) = self.screens.get_mut(&current_id) {
                screen.deactivate();
                screen.on_hidden();
            }
        }
        self.current = Some(prev);
        if let Some(screen) = self.screens.get_mut(&prev) {
            screen.activate();
            screen.on_shown();
        }
        Some(Transition { from, to: prev })
    }
}

impl<S: Screen> Default for Navigator<S> {
    fn default() -> Self {
        Self::new()
    }
}
