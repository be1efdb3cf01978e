//! Main application controller
//!
//! Manages the TUI, the navigator, the quiz session and persistence,
//! and runs the tick loop that drives the countdown and the deferred
//! question advance. The session never touches screens or stores
//! directly; this controller drains its event queue once per tick and
//! forwards what each collaborator needs.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::{
    app::{
        ads::SimulatedAdGate,
        screens::{
            AppScreen, ContinueChoice, HistoryScreen, HomeAction, HomeScreen, LevelSelectScreen,
            QuizScreen, ResultAction, ResultsScreen,
        },
        screens::levels::LevelRow,
        tui::Tui,
    },
    config::QuizConfig,
    content::ContentProvider,
    models::QuizResult,
    nav::{Navigator, ScreenId, Transition},
    session::{AdGate, AdOutcome, QuizSession, SessionEvent, SessionPhase},
    store::{CompletedLevels, JsonFileStore, ResultsStorage},
    Result,
};

/// Grade whose levels the terminal build plays
const DEFAULT_GRADE: u32 = 1;

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Application config
    config: QuizConfig,
    /// Screen navigation stack
    navigator: Navigator<AppScreen>,
    /// Active quiz state machine
    session: QuizSession,
    /// Persisted completed-level set
    progress: CompletedLevels<JsonFileStore>,
    /// Persisted result history
    results: ResultsStorage,
    /// Rewarded-ad gate for the continue flow
    ad_gate: SimulatedAdGate,
    /// Cloned into each ad request so the outcome lands back here
    ad_tx: mpsc::Sender<AdOutcome>,
    ad_rx: mpsc::Receiver<AdOutcome>,
    last_tick: Instant,
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = QuizConfig::load()?;
        let content = ContentProvider::builtin()?;
        let grade = content.grade(DEFAULT_GRADE)?.clone();
        let session = QuizSession::new(grade, config.clone());

        let mut navigator = Navigator::new();
        navigator.register(ScreenId::Home, AppScreen::Home(HomeScreen::new()));
        navigator.register(
            ScreenId::LevelSelect,
            AppScreen::LevelSelect(LevelSelectScreen::new()),
        );
        navigator.register(ScreenId::Quiz, AppScreen::Quiz(QuizScreen::new()));
        navigator.register(ScreenId::Results, AppScreen::Results(ResultsScreen::new()));
        navigator.register(ScreenId::History, AppScreen::History(HistoryScreen::new()));

        let (ad_tx, ad_rx) = mpsc::channel(4);

        Ok(Self {
            tui: Tui::new()?,
            config,
            navigator,
            session,
            progress: CompletedLevels::load(JsonFileStore::open_default()?),
            results: ResultsStorage::new()?,
            ad_gate: SimulatedAdGate::new(),
            ad_tx,
            ad_rx,
            last_tick: Instant::now(),
            should_quit: false,
        })
    }

    /// Initialize the terminal and show the home screen
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()?;
        self.refresh_home_progress();
        let transition = self.navigator.set_as_root(ScreenId::Home);
        self.after_transition(transition);
        Ok(())
    }

    /// Restore the terminal to its original state
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.last_tick = Instant::now();
        while !self.should_quit {
            self.poll_ad_outcomes();

            let now = Instant::now();
            let delta = now.duration_since(self.last_tick);
            self.last_tick = now;
            self.session.advance_timer(delta);

            self.process_session_events();
            self.draw()?;
            if let Some(key) = self.tui.poll_key()? {
                self.handle_key(key);
                // Keys can produce events too (answer feedback, level
                // completion); route them before the next draw.
                self.process_session_events();
            }
        }
        Ok(())
    }

    /// Draw the current screen
    fn draw(&mut self) -> Result<()> {
        let session = &self.session;
        let config = &self.config;
        let navigator = &mut self.navigator;
        self.tui.draw(|f| match navigator.current_screen_mut() {
            Some(AppScreen::Home(screen)) => screen.render(f),
            Some(AppScreen::LevelSelect(screen)) => screen.render(f),
            Some(AppScreen::Quiz(screen)) => screen.render(f, session, config),
            Some(AppScreen::Results(screen)) => screen.render(f),
            Some(AppScreen::History(screen)) => screen.render(f),
            None => {}
        })?;
        Ok(())
    }

    /// Deliver ad outcomes that arrived since the last tick.
    ///
    /// The session's own guards make a stale outcome harmless: if the
    /// player already left the quiz, resuming is a no-op.
    fn poll_ad_outcomes(&mut self) {
        while let Ok(outcome) = self.ad_rx.try_recv() {
            if let Some(quiz) = self.quiz_screen_mut() {
                quiz.set_awaiting_ad(false);
            }
            match outcome {
                AdOutcome::Watched => self.session.resume_after_continue(),
                AdOutcome::Failed => {
                    if let Some(quiz) = self.quiz_screen_mut() {
                        quiz.set_notice("Ad unavailable, cannot continue");
                    }
                    self.session.decline_continue();
                }
            }
        }
    }

    /// Route queued session events to the screens and stores
    fn process_session_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                SessionEvent::QuestionLoaded { .. } => {
                    if let Some(quiz) = self.quiz_screen_mut() {
                        quiz.reset_for_question();
                    }
                }
                SessionEvent::AnswerJudged { selected, correct } => {
                    if let Some(quiz) = self.quiz_screen_mut() {
                        quiz.set_feedback(selected, correct);
                    }
                }
                SessionEvent::TimerExpired => {
                    if let Some(quiz) = self.quiz_screen_mut() {
                        quiz.set_notice("Time is up!");
                    }
                }
                SessionEvent::ContinueOffered => {}
                SessionEvent::LevelCompleted(result) => self.finish_level(result),
            }
        }
    }

    /// Record a completed attempt and move to the results screen
    fn finish_level(&mut self, result: QuizResult) {
        let cleared = self.session.level_cleared();
        if cleared {
            self.progress.mark_level_completed(result.level_number);
        }
        if let Err(err) = self.results.append_result(result.clone()) {
            log::warn!("app: failed to record result: {}", err);
        }

        let has_next = (result.level_number as usize) < self.session.level_count();
        if let Some(screen) = self
            .navigator
            .screen_mut(ScreenId::Results)
            .and_then(AppScreen::as_results_mut)
        {
            screen.set_result(result, cleared, has_next);
        }
        let transition = self.navigator.show(ScreenId::Results, true);
        self.after_transition(transition);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.navigator.current() {
            Some(ScreenId::Home) => self.handle_home_key(key.code),
            Some(ScreenId::LevelSelect) => self.handle_levels_key(key.code),
            Some(ScreenId::Quiz) => self.handle_quiz_key(key.code),
            Some(ScreenId::Results) => self.handle_results_key(key.code),
            Some(ScreenId::History) => self.handle_history_key(key.code),
            None => {}
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(home) = self.home_screen_mut() {
                    home.select_previous();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(home) = self.home_screen_mut() {
                    home.select_next();
                }
            }
            KeyCode::Enter => {
                let action = match self.home_screen_mut() {
                    Some(home) => home.selected_action(),
                    None => return,
                };
                match action {
                    HomeAction::Play => {
                        let total = self.session.level_count() as u32;
                        if total == 0 {
                            return;
                        }
                        let next = self.progress.first_uncompleted().min(total);
                        self.start_level(next);
                    }
                    HomeAction::SelectLevel => {
                        self.refresh_level_rows();
                        let transition = self.navigator.show(ScreenId::LevelSelect, true);
                        self.after_transition(transition);
                    }
                    HomeAction::History => {
                        self.refresh_history();
                        let transition = self.navigator.show(ScreenId::History, true);
                        self.after_transition(transition);
                    }
                    HomeAction::Quit => self.should_quit = true,
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_levels_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(levels) = self.levels_screen_mut() {
                    levels.select_previous();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(levels) = self.levels_screen_mut() {
                    levels.select_next();
                }
            }
            KeyCode::Enter => {
                let selected = self.levels_screen_mut().and_then(|s| s.selected_level());
                if let Some(level) = selected {
                    self.start_level(level);
                }
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                let transition = self.navigator.back();
                self.after_transition(transition);
            }
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, code: KeyCode) {
        match self.session.phase() {
            SessionPhase::ContinuePrompt => {
                let awaiting = self
                    .quiz_screen_mut()
                    .map(|q| q.awaiting_ad())
                    .unwrap_or(false);
                if awaiting {
                    return;
                }
                match code {
                    KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                        if let Some(quiz) = self.quiz_screen_mut() {
                            quiz.toggle_choice();
                        }
                    }
                    KeyCode::Enter => {
                        let choice = self
                            .quiz_screen_mut()
                            .map(|q| q.choice())
                            .unwrap_or(ContinueChoice::Result);
                        match choice {
                            ContinueChoice::ContinueStage => {
                                if let Some(quiz) = self.quiz_screen_mut() {
                                    quiz.set_awaiting_ad(true);
                                }
                                self.ad_gate.request_rewarded_ad(self.ad_tx.clone());
                            }
                            ContinueChoice::Result => self.session.decline_continue(),
                        }
                    }
                    KeyCode::Esc => self.session.decline_continue(),
                    _ => {}
                }
            }
            SessionPhase::QuestionActive | SessionPhase::AnswerLocked => match code {
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    let hidden = self
                        .quiz_screen_mut()
                        .map(|q| q.is_hidden(index))
                        .unwrap_or(false);
                    if !hidden {
                        self.session.submit_answer(index);
                    }
                }
                KeyCode::Char('h') => {
                    if let Some(hidden) = self.session.fifty_fifty() {
                        if let Some(quiz) = self.quiz_screen_mut() {
                            quiz.hide_answers(hidden);
                        }
                    } else if let Some(quiz) = self.quiz_screen_mut() {
                        quiz.set_notice("50/50 not available");
                    }
                }
                KeyCode::Esc => {
                    let transition = self.navigator.back();
                    self.after_transition(transition);
                }
                _ => {}
            },
            SessionPhase::Idle | SessionPhase::LevelComplete => {}
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(results) = self.results_screen_mut() {
                    results.select_previous_action();
                }
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                if let Some(results) = self.results_screen_mut() {
                    results.select_next_action();
                }
            }
            KeyCode::Enter => {
                let (action, level) = match self.results_screen_mut() {
                    Some(screen) => (
                        screen.selected_action(),
                        screen.result().map(|r| r.level_number),
                    ),
                    None => return,
                };
                match action {
                    ResultAction::NextLevel => {
                        if let Some(level) = level {
                            self.start_level(level + 1);
                        }
                    }
                    ResultAction::Retry => {
                        if let Some(level) = level {
                            self.start_level(level);
                        }
                    }
                    ResultAction::BackToMenu => self.go_home(),
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.go_home(),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                let transition = self.navigator.back();
                self.after_transition(transition);
            }
            _ => {}
        }
    }

    /// Navigate to the quiz screen and load `level` into the session
    fn start_level(&mut self, level: u32) {
        let transition = self.navigator.show(ScreenId::Quiz, true);
        self.after_transition(transition);
        if self.navigator.current() != Some(ScreenId::Quiz) {
            return;
        }
        if self.session.load_level(level) {
            if let Some(quiz) = self.quiz_screen_mut() {
                quiz.reset_for_level();
            }
        } else {
            // Out-of-range level, bounce back to where we came from.
            let transition = self.navigator.back();
            self.after_transition(transition);
        }
    }

    /// Clear navigation history and return to the home screen
    fn go_home(&mut self) {
        self.refresh_home_progress();
        let transition = self.navigator.set_as_root(ScreenId::Home);
        self.after_transition(transition);
    }

    /// React to a completed navigation step. Leaving the quiz screen for
    /// any reason abandons the in-flight attempt.
    fn after_transition(&mut self, transition: Option<Transition>) {
        if let Some(t) = transition {
            if t.from == Some(ScreenId::Quiz) {
                self.session.abort();
            }
        }
    }

    fn refresh_home_progress(&mut self) {
        let total = self.session.level_count();
        let completed = (1..=total as u32)
            .filter(|n| self.progress.is_level_completed(*n))
            .count();
        if let Some(home) = self.home_screen_mut() {
            home.set_progress(completed, total);
        }
    }

    fn refresh_level_rows(&mut self) {
        let rows: Vec<LevelRow> = (1..=self.session.level_count() as u32)
            .map(|n| LevelRow {
                level_number: n,
                completed: self.progress.is_level_completed(n),
            })
            .collect();
        if let Some(levels) = self.levels_screen_mut() {
            levels.set_rows(rows);
        }
    }

    fn refresh_history(&mut self) {
        let results = match self.results.recent_results(50) {
            Ok(results) => results,
            Err(err) => {
                log::warn!("app: failed to load result history: {}", err);
                Vec::new()
            }
        };
        if let Some(history) = self.history_screen_mut() {
            history.set_results(results);
        }
    }

    fn home_screen_mut(&mut self) -> Option<&mut HomeScreen> {
        self.navigator
            .screen_mut(ScreenId::Home)
            .and_then(AppScreen::as_home_mut)
    }

    fn levels_screen_mut(&mut self) -> Option<&mut LevelSelectScreen> {
        self.navigator
            .screen_mut(ScreenId::LevelSelect)
            .and_then(AppScreen::as_levels_mut)
    }

    fn quiz_screen_mut(&mut self) -> Option<&mut QuizScreen> {
        self.navigator
            .screen_mut(ScreenId::Quiz)
            .and_then(AppScreen::as_quiz_mut)
    }

    fn results_screen_mut(&mut self) -> Option<&mut ResultsScreen> {
        self.navigator
            .screen_mut(ScreenId::Results)
            .and_then(AppScreen::as_results_mut)
    }

    fn history_screen_mut(&mut self) -> Option<&mut HistoryScreen> {
        self.navigator
            .screen_mut(ScreenId::History)
            .and_then(AppScreen::as_history_mut)
    }
}
