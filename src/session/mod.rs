//! Quiz session state machine
//!
//! One finite-state machine per level attempt: question sequencing and
//! shuffling, the per-question countdown, answer scoring, the one-shot
//! continue-after-loss and help mechanics, and level-completion handoff.
//!
//! The session is single-threaded and tick-driven: the host calls
//! [`QuizSession::advance_timer`] once per frame, and every external
//! trigger (key press, ad outcome) must be marshaled onto that same
//! thread before touching the session. Mutating calls queue
//! [`SessionEvent`]s instead of invoking collaborators directly, so no
//! callback can re-enter the machine mid-transition.

pub mod scheduler;

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::QuizConfig;
use crate::content::{Grade, Question};
use crate::models::QuizResult;

use scheduler::Scheduler;

/// Phases of one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No level loaded (or the attempt was aborted)
    Idle,
    /// A question is being served, countdown running
    QuestionActive,
    /// Answer judged correct; feedback showing until the deferred advance
    AnswerLocked,
    /// Wrong answer or timeout with the continue still available;
    /// paused pending the ad-gated confirmation
    ContinuePrompt,
    /// Terminal for this attempt
    LevelComplete,
}

/// Notifications queued by the session and drained by the owning
/// context once per tick
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A new question was served (0-based index into the shuffled set)
    QuestionLoaded { index: usize },
    /// An answer was judged
    AnswerJudged { selected: usize, correct: bool },
    /// The countdown ran out; counted as a wrong answer
    TimerExpired,
    /// The attempt paused on the one-shot continue offer
    ContinueOffered,
    /// The attempt finished; forward the result to the progress store
    /// and results sink
    LevelCompleted(QuizResult),
}

/// Outcome of a rewarded-ad request, delivered back to the app loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdOutcome {
    Watched,
    Failed,
}

/// Rewarded-ad collaborator. Exactly one outcome per request must be
/// sent on `reply`; the app loop receives it and calls
/// [`QuizSession::resume_after_continue`] or
/// [`QuizSession::decline_continue`] on the session thread.
pub trait AdGate {
    fn request_rewarded_ad(&mut self, reply: tokio::sync::mpsc::Sender<AdOutcome>);
}

/// Deferred session-internal actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    AdvanceQuestion,
}

/// Per-level-attempt quiz state machine
#[derive(Debug)]
pub struct QuizSession {
    config: QuizConfig,
    grade: Grade,
    phase: SessionPhase,
    level_number: u32,
    /// Shuffled working copy of the level's questions
    questions: Vec<Question>,
    question_index: usize,
    correct_answers: u32,
    wrong_answers: u32,
    score: u32,
    /// Accumulated from ticks while the attempt is live
    elapsed: Duration,
    timer_remaining: Duration,
    timer_active: bool,
    continue_used_this_level: bool,
    help_used_this_level: bool,
    scheduler: Scheduler<PendingAction>,
    rng: SmallRng,
    events: Vec<SessionEvent>,
    last_result: Option<QuizResult>,
    /// The attempt ran through all its questions (as opposed to ending
    /// on a loss with the continue spent)
    level_cleared: bool,
}

impl QuizSession {
    /// Create a session over a grade's content
    pub fn new(grade: Grade, config: QuizConfig) -> Self {
        Self::with_rng(grade, config, SmallRng::from_entropy())
    }

    /// Create a session with a fixed shuffle seed (tests)
    pub fn with_seed(grade: Grade, config: QuizConfig, seed: u64) -> Self {
        Self::with_rng(grade, config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(grade: Grade, config: QuizConfig, rng: SmallRng) -> Self {
        Self {
            config,
            grade,
            phase: SessionPhase::Idle,
            level_number: 0,
            questions: Vec::new(),
            question_index: 0,
            correct_answers: 0,
            wrong_answers: 0,
            score: 0,
            elapsed: Duration::ZERO,
            timer_remaining: Duration::ZERO,
            timer_active: false,
            continue_used_this_level: false,
            help_used_this_level: false,
            scheduler: Scheduler::new(),
            rng,
            events: Vec::new(),
            last_result: None,
            level_cleared: false,
        }
    }

    // --- accessors ---

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    /// The question currently being served
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::LevelComplete => None,
            _ => self.questions.get(self.question_index),
        }
    }

    /// 1-based number of the current question for display
    pub fn question_number(&self) -> usize {
        self.question_index + 1
    }

    /// How many questions this attempt will serve at most
    pub fn questions_in_attempt(&self) -> usize {
        self.config.questions_per_level.min(self.questions.len())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    pub fn timer_remaining(&self) -> Duration {
        self.timer_remaining
    }

    pub fn continue_used(&self) -> bool {
        self.continue_used_this_level
    }

    pub fn help_used(&self) -> bool {
        self.help_used_this_level
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Result of the most recently completed attempt
    pub fn last_result(&self) -> Option<&QuizResult> {
        self.last_result.as_ref()
    }

    /// True when the last completed attempt ran through every question.
    /// A level ended by declining the continue prompt is not cleared.
    pub fn level_cleared(&self) -> bool {
        self.level_cleared
    }

    /// Number of levels in the grade backing this session
    pub fn level_count(&self) -> usize {
        self.grade.levels.len()
    }

    /// Queued events since the last drain
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // --- operations ---

    /// (Re)initialize the session for a level. Invalid ordinals are a
    /// logged no-op with no state change. Reloading cancels any pending
    /// deferred advance from the superseded attempt.
    pub fn load_level(&mut self, level_number: u32) -> bool {
        if level_number < 1 || level_number as usize > self.grade.levels.len() {
            log::warn!(
                "session: invalid level {} (grade has {})",
                level_number,
                self.grade.levels.len()
            );
            return false;
        }

        self.scheduler.cancel_all();
        self.events.clear();

        let level = &self.grade.levels[level_number as usize - 1];
        self.questions = level.questions.clone();
        self.questions.shuffle(&mut self.rng);

        self.level_number = level_number;
        self.question_index = 0;
        self.correct_answers = 0;
        self.wrong_answers = 0;
        self.score = 0;
        self.elapsed = Duration::ZERO;
        self.continue_used_this_level = false;
        self.help_used_this_level = false;
        self.last_result = None;
        self.level_cleared = false;

        if self.questions.is_empty() {
            log::warn!("session: level {} has no questions", level_number);
            self.phase = SessionPhase::QuestionActive;
            self.complete_level();
            return true;
        }

        self.phase = SessionPhase::QuestionActive;
        self.start_countdown();
        self.events.push(SessionEvent::QuestionLoaded { index: 0 });
        log::info!(
            "session: level {} loaded, serving {} of {} question(s)",
            level_number,
            self.questions_in_attempt(),
            self.questions.len()
        );
        true
    }

    /// Judge the candidate at `answer_index` against the current
    /// question. Only valid while a question is active; out-of-range
    /// indices and answers landing after the timer expired are no-ops.
    pub fn submit_answer(&mut self, answer_index: usize) {
        if self.phase != SessionPhase::QuestionActive {
            return;
        }
        let Some(question) = self.questions.get(self.question_index) else {
            return;
        };
        if answer_index >= question.answers.len() {
            return;
        }

        // First of {answer, expiry} wins; the timer is dead from here.
        self.timer_active = false;

        let correct = question.is_correct(answer_index);
        self.events.push(SessionEvent::AnswerJudged {
            selected: answer_index,
            correct,
        });

        if correct {
            self.correct_answers += 1;
            self.score += self.config.points_per_correct;
            self.phase = SessionPhase::AnswerLocked;
            self.scheduler
                .schedule(self.config.answer_reveal_delay, PendingAction::AdvanceQuestion);
        } else {
            self.wrong_answers += 1;
            self.enter_loss_branch();
        }
    }

    /// Host tick: drives the countdown, fires timer expiry, and runs
    /// deferred advances. `delta` is the time since the previous tick.
    pub fn advance_timer(&mut self, delta: Duration) {
        match self.phase {
            SessionPhase::Idle | SessionPhase::LevelComplete => return,
            _ => {}
        }

        self.elapsed += delta;

        if self.timer_active {
            self.timer_remaining = self.timer_remaining.saturating_sub(delta);
            if self.timer_remaining.is_zero() {
                self.timer_active = false;
                log::debug!("session: time's up on question {}", self.question_number());
                self.events.push(SessionEvent::TimerExpired);
                self.wrong_answers += 1;
                self.enter_loss_branch();
            }
        }

        for action in self.scheduler.advance(delta) {
            match action {
                PendingAction::AdvanceQuestion => self.next_question(),
            }
        }
    }

    /// Consume the one-shot continue and advance past the failed
    /// question. Only valid in the continue prompt with the flag unused.
    pub fn resume_after_continue(&mut self) {
        if self.phase != SessionPhase::ContinuePrompt || self.continue_used_this_level {
            return;
        }
        self.continue_used_this_level = true;
        log::info!("session: continue consumed on level {}", self.level_number);
        self.next_question();
    }

    /// Turn down (or fail) the continue offer and finish the attempt
    pub fn decline_continue(&mut self) {
        if self.phase != SessionPhase::ContinuePrompt {
            return;
        }
        self.complete_level();
    }

    /// One-shot 50/50 help: removes two wrong candidates from play.
    /// Returns the candidate indices to hide, or `None` when the help
    /// was already spent or no question is active.
    pub fn fifty_fifty(&mut self) -> Option<[usize; 2]> {
        if self.phase != SessionPhase::QuestionActive || self.help_used_this_level {
            return None;
        }
        let question = self.questions.get(self.question_index)?;

        let mut wrong: Vec<usize> = question
            .answers
            .iter()
            .enumerate()
            .filter(|(_, text)| **text != question.right_answer)
            .map(|(i, _)| i)
            .collect();
        if wrong.len() < 2 {
            return None;
        }

        self.help_used_this_level = true;
        // Hide two of the wrong candidates, chosen at random.
        let first = wrong.remove(self.rng.gen_range(0..wrong.len()));
        let second = wrong.remove(self.rng.gen_range(0..wrong.len()));
        Some([first, second])
    }

    /// Abandon the current attempt (e.g. the quiz screen was hidden
    /// mid-level). Pending deferred advances are cancelled so a stale
    /// one cannot fire against a freshly-reset session.
    pub fn abort(&mut self) {
        if self.phase == SessionPhase::Idle {
            return;
        }
        self.scheduler.cancel_all();
        self.events.clear();
        self.timer_active = false;
        self.phase = SessionPhase::Idle;
        log::debug!("session: attempt aborted on level {}", self.level_number);
    }

    // --- internals ---

    fn start_countdown(&mut self) {
        self.timer_remaining = self.config.time_per_question;
        self.timer_active = true;
    }

    /// Wrong answer or timeout: offer the one-shot continue if it is
    /// still available, otherwise the attempt is over.
    fn enter_loss_branch(&mut self) {
        if !self.continue_used_this_level {
            self.phase = SessionPhase::ContinuePrompt;
            self.events.push(SessionEvent::ContinueOffered);
        } else {
            self.complete_level();
        }
    }

    fn next_question(&mut self) {
        self.question_index += 1;
        if self.question_index >= self.questions_in_attempt() {
            self.complete_level();
        } else {
            self.phase = SessionPhase::QuestionActive;
            self.start_countdown();
            self.events.push(SessionEvent::QuestionLoaded {
                index: self.question_index,
            });
        }
    }

    fn complete_level(&mut self) {
        self.scheduler.cancel_all();
        self.timer_active = false;
        self.phase = SessionPhase::LevelComplete;
        self.level_cleared = self.question_index >= self.questions_in_attempt();

        let result = QuizResult::new(
            self.level_number,
            self.correct_answers,
            self.wrong_answers,
            self.score,
            self.elapsed,
        );
        log::info!("session: {}", result.summary());
        self.last_result = Some(result.clone());
        self.events.push(SessionEvent::LevelCompleted(result));
    }
}
