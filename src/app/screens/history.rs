//! History screen implementation
//!
//! Lists persisted results from past level attempts, newest first.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::QuizResult;

/// History screen component
#[derive(Debug)]
pub struct HistoryScreen {
    pub visible: bool,
    results: Vec<QuizResult>,
}

impl HistoryScreen {
    pub fn new() -> Self {
        Self {
            visible: false,
            results: Vec::new(),
        }
    }

    /// Replace the displayed results (oldest first, as stored)
    pub fn set_results(&mut self, results: Vec<QuizResult>) {
        self.results = results;
    }

    /// Render the history list
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Result list
                Constraint::Length(1), // Help
            ])
            .split(f.size());

        let title = Paragraph::new("History")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = if self.results.is_empty() {
            vec![ListItem::new("  No results yet. Play a level!")
                .style(Style::default().fg(Color::DarkGray))]
        } else {
            self.results
                .iter()
                .rev()
                .map(|result| ListItem::new(format!("  {}", result.summary())))
                .collect()
        };
        let list =
            List::new(items).block(Block::default().borders(Borders::ALL).title(" Past Runs "));
        f.render_widget(list, chunks[1]);

        let help = Paragraph::new("Esc: back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[2]);
    }
}

impl Default for HistoryScreen {
    fn default() -> Self {
        Self::new()
    }
}
