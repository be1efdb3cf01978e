//! Level selection screen
//!
//! Lists every level in the active grade with its completion marker.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// One row in the level list
#[derive(Debug, Clone)]
pub struct LevelRow {
    pub level_number: u32,
    pub completed: bool,
}

/// Level selection screen component
#[derive(Debug)]
pub struct LevelSelectScreen {
    pub visible: bool,
    rows: Vec<LevelRow>,
    selected_index: usize,
    list_state: ListState,
}

impl LevelSelectScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            visible: false,
            rows: Vec::new(),
            selected_index: 0,
            list_state,
        }
    }

    /// Replace the rows, keeping the selection in bounds
    pub fn set_rows(&mut self, rows: Vec<LevelRow>) {
        self.rows = rows;
        if self.selected_index >= self.rows.len() && !self.rows.is_empty() {
            self.selected_index = self.rows.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Level number currently highlighted
    pub fn selected_level(&self) -> Option<u32> {
        self.rows.get(self.selected_index).map(|r| r.level_number)
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + self.rows.len() - 1) % self.rows.len();
        self.list_state.select(Some(self.selected_index));
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.rows.len();
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the level list
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Level list
                Constraint::Length(1), // Help
            ])
            .split(f.size());

        let title = Paragraph::new("Select Level")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                let marker = if row.completed { "[x]" } else { "[ ]" };
                let style = if row.completed {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!("  {} Level {}", marker, row.level_number)).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Levels "))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        f.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new("Up/Down: navigate | Enter: play | Esc: back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[2]);
    }
}

impl Default for LevelSelectScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: u32) -> Vec<LevelRow> {
        (1..=count)
            .map(|level_number| LevelRow {
                level_number,
                completed: false,
            })
            .collect()
    }

    #[test]
    fn test_selection_tracks_rows() {
        let mut screen = LevelSelectScreen::new();
        assert_eq!(screen.selected_level(), None);

        screen.set_rows(rows(3));
        assert_eq!(screen.selected_level(), Some(1));
        screen.select_next();
        assert_eq!(screen.selected_level(), Some(2));
        screen.select_previous();
        screen.select_previous();
        assert_eq!(screen.selected_level(), Some(3));
    }

    #[test]
    fn test_shrinking_rows_clamps_selection() {
        let mut screen = LevelSelectScreen::new();
        screen.set_rows(rows(5));
        for _ in 0..4 {
            screen.select_next();
        }
        assert_eq!(screen.selected_level(), Some(5));

        screen.set_rows(rows(2));
        assert_eq!(screen.selected_level(), Some(2));
    }
}
