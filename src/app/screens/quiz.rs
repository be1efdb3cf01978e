//! Quiz screen implementation
//!
//! Renders the active question, candidate answers, countdown gauge, and
//! the continue-after-loss overlay. All gameplay state lives in the
//! session; this component only holds presentation state (feedback
//! colors, hidden 50/50 answers, overlay selection).

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::config::QuizConfig;
use crate::session::{QuizSession, SessionPhase};
use crate::util::countdown_secs;

/// Player's highlighted choice on the continue overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueChoice {
    ContinueStage,
    Result,
}

impl ContinueChoice {
    fn display_text(&self) -> &'static str {
        match self {
            Self::ContinueStage => "Continue Stage",
            Self::Result => "Result",
        }
    }
}

/// Quiz screen component
#[derive(Debug)]
pub struct QuizScreen {
    pub visible: bool,
    /// Last judged answer: (candidate index, was correct)
    feedback: Option<(usize, bool)>,
    /// Candidate indices removed by the 50/50 help
    hidden_answers: Vec<usize>,
    choice: ContinueChoice,
    /// An ad request is in flight; overlay shows a waiting message
    awaiting_ad: bool,
    /// Transient notice (ad unavailable, help spent)
    notice: Option<String>,
}

impl QuizScreen {
    pub fn new() -> Self {
        Self {
            visible: false,
            feedback: None,
            hidden_answers: Vec::new(),
            choice: ContinueChoice::ContinueStage,
            awaiting_ad: false,
            notice: None,
        }
    }

    /// Clear all presentation state for a fresh level
    pub fn reset_for_level(&mut self) {
        self.reset_for_question();
        self.awaiting_ad = false;
        self.choice = ContinueChoice::ContinueStage;
    }

    /// Clear per-question presentation state
    pub fn reset_for_question(&mut self) {
        self.feedback = None;
        self.hidden_answers.clear();
        self.notice = None;
    }

    pub fn set_feedback(&mut self, selected: usize, correct: bool) {
        self.feedback = Some((selected, correct));
    }

    pub fn hide_answers(&mut self, indices: [usize; 2]) {
        self.hidden_answers = indices.to_vec();
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden_answers.contains(&index)
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn set_awaiting_ad(&mut self, awaiting: bool) {
        self.awaiting_ad = awaiting;
    }

    pub fn awaiting_ad(&self) -> bool {
        self.awaiting_ad
    }

    pub fn choice(&self) -> ContinueChoice {
        self.choice
    }

    pub fn toggle_choice(&mut self) {
        self.choice = match self.choice {
            ContinueChoice::ContinueStage => ContinueChoice::Result,
            ContinueChoice::Result => ContinueChoice::ContinueStage,
        };
    }

    /// Render the quiz screen from live session state
    pub fn render(&mut self, f: &mut Frame, session: &QuizSession, config: &QuizConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Countdown
                Constraint::Length(5), // Prompt
                Constraint::Min(6),    // Answers
                Constraint::Length(1), // Help
            ])
            .split(f.size());

        self.render_header(f, chunks[0], session);
        self.render_countdown(f, chunks[1], session, config);
        self.render_prompt(f, chunks[2], session);
        self.render_answers(f, chunks[3], session);

        let help = Paragraph::new("1-4: answer | h: 50/50 help | Esc: leave level")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[4]);

        if session.phase() == SessionPhase::ContinuePrompt {
            self.render_continue_overlay(f);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, session: &QuizSession) {
        let header = Line::from(vec![
            Span::styled(
                format!(" Level {} ", session.level_number()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "| Question {}/{} ",
                session.question_number().min(session.questions_in_attempt()),
                session.questions_in_attempt()
            )),
            Span::raw(format!("| Score {} ", session.score())),
            Span::styled(
                if session.continue_used() { "| continue spent " } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let paragraph = Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Left);
        f.render_widget(paragraph, area);
    }

    fn render_countdown(&self, f: &mut Frame, area: Rect, session: &QuizSession, config: &QuizConfig) {
        let total = config.time_per_question.as_secs_f64();
        let remaining = session.timer_remaining().as_secs_f64();
        let ratio = if total > 0.0 {
            (remaining / total).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let color = if ratio > 0.5 {
            Color::Green
        } else if ratio > 0.25 {
            Color::Yellow
        } else {
            Color::Red
        };

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Time "))
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(format!("{}s", countdown_secs(session.timer_remaining())));
        f.render_widget(gauge, area);
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect, session: &QuizSession) {
        let prompt = session
            .current_question()
            .map(|q| q.prompt.clone())
            .unwrap_or_default();
        let paragraph = Paragraph::new(prompt)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Question "));
        f.render_widget(paragraph, area);
    }

    fn render_answers(&self, f: &mut Frame, area: Rect, session: &QuizSession) {
        let mut lines: Vec<Line> = Vec::new();
        if let Some(question) = session.current_question() {
            for (i, answer) in question.answers.iter().enumerate() {
                if self.is_hidden(i) {
                    lines.push(Line::from(Span::styled(
                        format!("  {}. ---", i + 1),
                        Style::default().fg(Color::DarkGray),
                    )));
                    continue;
                }

                let style = match self.feedback {
                    Some((selected, correct)) if selected == i => {
                        if correct {
                            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                        }
                    }
                    _ => Style::default().fg(Color::White),
                };
                lines.push(Line::from(Span::styled(
                    format!("  {}. {}", i + 1, answer),
                    style,
                )));
            }
        }

        if let Some(notice) = &self.notice {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {}", notice),
                Style::default().fg(Color::Yellow),
            )));
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Answers "));
        f.render_widget(paragraph, area);
    }

    fn render_continue_overlay(&self, f: &mut Frame) {
        let area = centered_rect(44, 7, f.size());
        f.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Do you want to continue?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if self.awaiting_ad {
            lines.push(Line::from(Span::styled(
                "Loading rewarded ad...",
                Style::default().fg(Color::Yellow),
            )));
        } else {
            let buttons: Vec<Span> = [ContinueChoice::ContinueStage, ContinueChoice::Result]
                .iter()
                .map(|choice| {
                    let style = if *choice == self.choice {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Span::styled(format!("  {}  ", choice.display_text()), style)
                })
                .collect();
            lines.push(Line::from(buttons));
        }

        let overlay = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Continue "),
            );
        f.render_widget(overlay, area);
    }
}

impl Default for QuizScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-size rect centered in `parent`
fn centered_rect(width: u16, height: u16, parent: Rect) -> Rect {
    let x = parent.x + parent.width.saturating_sub(width) / 2;
    let y = parent.y + parent.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(parent.width),
        height: height.min(parent.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_state_resets() {
        let mut screen = QuizScreen::new();
        screen.set_feedback(2, false);
        screen.hide_answers([0, 3]);
        screen.set_notice("Ad unavailable. Cannot continue.");
        assert!(screen.is_hidden(0));

        screen.reset_for_question();
        assert!(!screen.is_hidden(0));
        assert!(screen.feedback.is_none());
        assert!(screen.notice.is_none());
    }

    #[test]
    fn test_toggle_choice() {
        let mut screen = QuizScreen::new();
        assert_eq!(screen.choice(), ContinueChoice::ContinueStage);
        screen.toggle_choice();
        assert_eq!(screen.choice(), ContinueChoice::Result);
        screen.toggle_choice();
        assert_eq!(screen.choice(), ContinueChoice::ContinueStage);
    }

    #[test]
    fn test_centered_rect_clamps_to_parent() {
        let parent = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(44, 7, parent);
        assert!(rect.width <= parent.width);
        assert!(rect.height <= parent.height);
    }
}
