//! Results screen implementation
//!
//! Displays the result card for a finished level attempt with accuracy,
//! grade, stars, and actions to move on, retry, or return to the menu.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::QuizResult;

/// Available actions on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    NextLevel,
    Retry,
    BackToMenu,
}

impl ResultAction {
    fn display_text(&self) -> &'static str {
        match self {
            Self::NextLevel => "Next Level",
            Self::Retry => "Retry",
            Self::BackToMenu => "Back to Menu",
        }
    }
}

/// Results screen component
#[derive(Debug)]
pub struct ResultsScreen {
    pub visible: bool,
    result: Option<QuizResult>,
    /// The attempt ran through all its questions (unlocks Next Level)
    cleared: bool,
    /// A next level exists in the grade
    has_next: bool,
    selected_index: usize,
}

impl ResultsScreen {
    pub fn new() -> Self {
        Self {
            visible: false,
            result: None,
            cleared: false,
            has_next: false,
            selected_index: 0,
        }
    }

    /// Install the result to display and recompute available actions
    pub fn set_result(&mut self, result: QuizResult, cleared: bool, has_next: bool) {
        self.result = Some(result);
        self.cleared = cleared;
        self.has_next = has_next;
        self.selected_index = 0;
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// Actions valid for the displayed result
    pub fn actions(&self) -> Vec<ResultAction> {
        let mut actions = Vec::new();
        if self.cleared && self.has_next {
            actions.push(ResultAction::NextLevel);
        }
        actions.push(ResultAction::Retry);
        actions.push(ResultAction::BackToMenu);
        actions
    }

    pub fn selected_action(&self) -> ResultAction {
        let actions = self.actions();
        actions[self.selected_index.min(actions.len() - 1)]
    }

    pub fn select_previous_action(&mut self) {
        let count = self.actions().len();
        self.selected_index = (self.selected_index + count - 1) % count;
    }

    pub fn select_next_action(&mut self) {
        let count = self.actions().len();
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Render the results screen
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(10),    // Result card
                Constraint::Length(3),  // Actions
                Constraint::Length(1),  // Help
            ])
            .split(f.size());

        let title_text = if self.cleared {
            "Level Cleared!"
        } else {
            "Level Over"
        };
        let title = Paragraph::new(title_text)
            .style(
                Style::default()
                    .fg(if self.cleared { Color::Green } else { Color::Red })
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.render_card(f, chunks[1]);
        self.render_actions(f, chunks[2]);

        let help = Paragraph::new("Left/Right: choose | Enter: confirm | Esc: menu")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[3]);
    }

    fn render_card(&self, f: &mut Frame, area: Rect) {
        let lines = match &self.result {
            Some(result) => vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Level {}", result.level_number),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(format!(
                    "Correct {}   Wrong {}   Score {}",
                    result.correct_answers, result.wrong_answers, result.score
                )),
                Line::from(format!(
                    "Accuracy {:.0}%   Grade {}   {}",
                    result.accuracy_percentage,
                    result.grade,
                    "*".repeat(result.stars as usize)
                )),
                Line::from(format!("Time {}", result.formatted_time())),
                Line::from(""),
                Line::from(Span::styled(
                    result.performance_message(),
                    Style::default().fg(Color::Cyan),
                )),
            ],
            None => vec![Line::from("No result to display")],
        };

        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Result "));
        f.render_widget(card, area);
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let spans: Vec<Span> = self
            .actions()
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let style = if i == self.selected_index {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Span::styled(format!("  {}  ", action.display_text()), style)
            })
            .collect();

        let actions = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(actions, area);
    }
}

impl Default for ResultsScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result() -> QuizResult {
        QuizResult::new(1, 4, 1, 40, Duration::from_secs(30))
    }

    #[test]
    fn test_next_level_requires_clear_and_next() {
        let mut screen = ResultsScreen::new();

        screen.set_result(result(), true, true);
        assert_eq!(screen.actions()[0], ResultAction::NextLevel);

        screen.set_result(result(), false, true);
        assert_eq!(screen.actions()[0], ResultAction::Retry);

        screen.set_result(result(), true, false);
        assert_eq!(screen.actions()[0], ResultAction::Retry);
    }

    #[test]
    fn test_action_selection_wraps() {
        let mut screen = ResultsScreen::new();
        screen.set_result(result(), true, true);
        assert_eq!(screen.selected_action(), ResultAction::NextLevel);

        screen.select_previous_action();
        assert_eq!(screen.selected_action(), ResultAction::BackToMenu);
        screen.select_next_action();
        assert_eq!(screen.selected_action(), ResultAction::NextLevel);
    }

    #[test]
    fn test_selection_stays_in_bounds_after_reset() {
        let mut screen = ResultsScreen::new();
        screen.set_result(result(), true, true);
        screen.select_next_action();
        screen.select_next_action();

        // New result with fewer actions must not index out of range.
        screen.set_result(result(), false, false);
        assert_eq!(screen.selected_action(), ResultAction::Retry);
    }
}
