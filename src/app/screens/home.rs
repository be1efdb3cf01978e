//! Home screen implementation
//!
//! Main menu with Play, Select Level, History, and Quit options.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Actions on the home menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    Play,
    SelectLevel,
    History,
    Quit,
}

impl HomeAction {
    fn all() -> [Self; 4] {
        [Self::Play, Self::SelectLevel, Self::History, Self::Quit]
    }

    fn display_text(&self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::SelectLevel => "Select Level",
            Self::History => "History",
            Self::Quit => "Quit",
        }
    }
}

/// Home screen component
#[derive(Debug)]
pub struct HomeScreen {
    pub visible: bool,
    selected_index: usize,
    list_state: ListState,
    /// Completed / total levels, shown under the title
    progress_line: String,
}

impl HomeScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            visible: false,
            selected_index: 0,
            list_state,
            progress_line: String::new(),
        }
    }

    /// Refresh the progress summary under the title
    pub fn set_progress(&mut self, completed: usize, total: usize) {
        self.progress_line = format!("{} of {} levels completed", completed, total);
    }

    pub fn selected_action(&self) -> HomeAction {
        HomeAction::all()[self.selected_index]
    }

    pub fn select_previous(&mut self) {
        let count = HomeAction::all().len();
        self.selected_index = (self.selected_index + count - 1) % count;
        self.list_state.select(Some(self.selected_index));
    }

    pub fn select_next(&mut self) {
        let count = HomeAction::all().len();
        self.selected_index = (self.selected_index + 1) % count;
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the home screen
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // Progress line
                Constraint::Min(8),    // Menu
                Constraint::Length(1), // Help
            ])
            .split(f.size());

        let title = Paragraph::new("QUIZBIRD")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, chunks[0]);

        let progress = Paragraph::new(self.progress_line.as_str())
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(progress, chunks[1]);

        let items: Vec<ListItem> = HomeAction::all()
            .iter()
            .map(|action| ListItem::new(format!("  {}", action.display_text())))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Menu "))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        f.render_stateful_widget(menu, chunks[2], &mut self.list_state);

        let help = Paragraph::new("Up/Down: navigate | Enter: select | q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[3]);
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut screen = HomeScreen::new();
        assert_eq!(screen.selected_action(), HomeAction::Play);

        screen.select_previous();
        assert_eq!(screen.selected_action(), HomeAction::Quit);

        screen.select_next();
        assert_eq!(screen.selected_action(), HomeAction::Play);
        screen.select_next();
        assert_eq!(screen.selected_action(), HomeAction::SelectLevel);
    }
}
