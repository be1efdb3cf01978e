//! Screen components for the TUI
//!
//! One component per navigable screen; the [`AppScreen`] enum is the
//! handle type registered with the navigator so hide/show hooks and
//! rendering dispatch over the same object.

pub mod history;
pub mod home;
pub mod levels;
pub mod quiz;
pub mod results;

pub use history::HistoryScreen;
pub use home::{HomeAction, HomeScreen};
pub use levels::LevelSelectScreen;
pub use quiz::{ContinueChoice, QuizScreen};
pub use results::{ResultAction, ResultsScreen};

use crate::nav::Screen;

/// Navigator handle wrapping every concrete screen component
#[derive(Debug)]
pub enum AppScreen {
    Home(HomeScreen),
    LevelSelect(LevelSelectScreen),
    Quiz(QuizScreen),
    Results(ResultsScreen),
    History(HistoryScreen),
}

impl AppScreen {
    pub fn as_home_mut(&mut self) -> Option<&mut HomeScreen> {
        match self {
            AppScreen::Home(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn as_levels_mut(&mut self) -> Option<&mut LevelSelectScreen> {
        match self {
            AppScreen::LevelSelect(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn as_quiz_mut(&mut self) -> Option<&mut QuizScreen> {
        match self {
            AppScreen::Quiz(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn as_results_mut(&mut self) -> Option<&mut ResultsScreen> {
        match self {
            AppScreen::Results(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn as_history_mut(&mut self) -> Option<&mut HistoryScreen> {
        match self {
            AppScreen::History(screen) => Some(screen),
            _ => None,
        }
    }

    fn set_visible(&mut self, visible: bool) {
        match self {
            AppScreen::Home(screen) => screen.visible = visible,
            AppScreen::LevelSelect(screen) => screen.visible = visible,
            AppScreen::Quiz(screen) => screen.visible = visible,
            AppScreen::Results(screen) => screen.visible = visible,
            AppScreen::History(screen) => screen.visible = visible,
        }
    }
}

impl Screen for AppScreen {
    fn activate(&mut self) {
        self.set_visible(true);
    }

    fn deactivate(&mut self) {
        self.set_visible(false);
    }
}
