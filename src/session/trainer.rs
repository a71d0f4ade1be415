use std::time::Instant;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::catalog::{HANGUL_JAMO, Symbol};
use crate::engine::mastery::MAX_SCORE;
use crate::engine::scoring;
use crate::engine::selector::{DrawContext, FocusMode};
use crate::engine::unlock::compute_unlocked;
use crate::session::evaluator::{self, HintReveal, Outcome};
use crate::session::hint_timer::{HintTicket, HintTimer};
use crate::session::history::RecentHistory;
use crate::session::lookahead::LookaheadQueue;
use crate::store::{JsonStore, KeyValueStore, MasteryStore};

const STREAK_BADGE_MIN: u32 = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressTile {
    pub symbol: Symbol,
    pub score: u8,
    pub is_mastered: bool,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSummary {
    pub mastered_count: usize,
    pub total_count: usize,
    pub unlocked_count: usize,
    pub level: u32,
    pub xp: u32,
    pub xp_progress_percent: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub daily_streak: u32,
    pub session_score: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSnapshot {
    pub tiles: Vec<ProgressTile>,
    pub summary: ProgressSummary,
}

/// Process-lifetime drill state. Nothing here is persisted directly.
struct RuntimeSession {
    current: Symbol,
    streak: u32,
    hint_shown: bool,
    focus: FocusMode,
    recent: RecentHistory,
    queue: LookaheadQueue,
}

/// Drives one learner's practice: draws symbols, scores answers, applies
/// hints and persists progress after every mutation.
pub struct Trainer<S: KeyValueStore> {
    store: MasteryStore<S>,
    catalog: &'static [Symbol],
    unlocked_len: usize,
    runtime: RuntimeSession,
    timer: HintTimer,
    rng: SmallRng,
}

impl Trainer<JsonStore> {
    /// File-backed trainer under `config.data_dir`.
    pub fn open(config: &Config) -> Result<Self> {
        let store = JsonStore::with_base_dir(config.data_path())?;
        Ok(Self::new(store, config))
    }
}

impl<S: KeyValueStore> Trainer<S> {
    pub fn new(backend: S, config: &Config) -> Self {
        Self::with_rng(backend, config, SmallRng::from_entropy())
    }

    pub fn with_rng(backend: S, config: &Config, rng: SmallRng) -> Self {
        Self::start_on(backend, config, rng, today())
    }

    /// Load the profile, decay the daily streak against `today`, and present
    /// the first symbol.
    pub fn start_on(backend: S, config: &Config, rng: SmallRng, today: NaiveDate) -> Self {
        let catalog = HANGUL_JAMO;
        let mut store = MasteryStore::new(backend, catalog);
        store.load();

        let session = &mut store.profile_mut().session;
        let decayed = session.decay_daily_streak(today);
        if decayed {
            info!("daily streak lapsed");
        }
        let leveled = evaluator::sync_level(session);
        if (decayed || leveled)
            && let Err(e) = store.save()
        {
            warn!(error = %e, "failed to save profile");
        }

        let mut trainer = Self {
            store,
            catalog,
            unlocked_len: 0,
            runtime: RuntimeSession {
                current: catalog[0],
                streak: 0,
                hint_shown: false,
                focus: config.focus(),
                recent: RecentHistory::new(config.recent_len),
                queue: LookaheadQueue::new(config.lookahead_len),
            },
            timer: HintTimer::new(config.hint_delay()),
            rng,
        };
        trainer.refresh_unlocked();
        trainer.restart_queue(None);
        trainer
    }

    fn refresh_unlocked(&mut self) {
        let len = compute_unlocked(self.store.mastery(), self.catalog).len();
        if len > self.unlocked_len && self.unlocked_len != 0 {
            info!(unlocked = len, "unlock frontier advanced");
        }
        self.unlocked_len = len;
    }

    /// Discard look-ahead and draw a fresh current symbol. With two or more
    /// candidates, the new draws avoid `previous`.
    fn restart_queue(&mut self, previous: Option<Symbol>) {
        let ctx = DrawContext::new(
            &self.catalog[..self.unlocked_len],
            self.store.mastery(),
            self.runtime.focus,
        );
        let queue = &mut self.runtime.queue;
        queue.clear();
        queue.fill(previous, &ctx, &mut self.rng);
        if let Some(next) = queue.advance(&ctx, &mut self.rng) {
            self.present(next);
        }
    }

    fn advance(&mut self) {
        let ctx = DrawContext::new(
            &self.catalog[..self.unlocked_len],
            self.store.mastery(),
            self.runtime.focus,
        );
        if let Some(next) = self.runtime.queue.advance(&ctx, &mut self.rng) {
            self.present(next);
        }
    }

    fn present(&mut self, symbol: Symbol) {
        self.runtime.current = symbol;
        self.runtime.hint_shown = false;
        self.timer.arm(Instant::now());
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save() {
            warn!(error = %e, "failed to save profile");
        }
    }

    pub fn current_symbol(&self) -> Symbol {
        self.runtime.current
    }

    pub fn preview(&self, n: usize) -> Vec<Symbol> {
        self.runtime.queue.peek(n)
    }

    pub fn recent(&self, n: usize) -> Vec<Symbol> {
        self.runtime.recent.recent(n)
    }

    pub fn unlocked(&self) -> &'static [Symbol] {
        let catalog = self.catalog;
        &catalog[..self.unlocked_len]
    }

    pub fn focus_mode(&self) -> FocusMode {
        self.runtime.focus
    }

    pub fn streak(&self) -> u32 {
        self.runtime.streak
    }

    /// `Some(streak)` once the run is long enough to celebrate.
    pub fn streak_badge(&self) -> Option<u32> {
        (self.runtime.streak >= STREAK_BADGE_MIN).then_some(self.runtime.streak)
    }

    pub fn hint_shown(&self) -> bool {
        self.runtime.hint_shown
    }

    pub fn store(&self) -> &MasteryStore<S> {
        &self.store
    }

    pub fn submit_answer(&mut self, text: &str) -> Outcome {
        self.submit_answer_on(text, today())
    }

    /// Score the answer, persist, recompute the unlock frontier, then move on
    /// to the next symbol.
    pub fn submit_answer_on(&mut self, text: &str, today: NaiveDate) -> Outcome {
        let current = self.runtime.current;
        let profile = self.store.profile_mut();
        let outcome = evaluator::evaluate(
            text,
            current,
            &mut profile.mastery,
            &mut profile.session,
            &mut self.runtime.streak,
            today,
        );
        debug!(glyph = %current.glyph, correct = outcome.correct, score = outcome.new_score, "answer");

        self.persist();
        self.refresh_unlocked();
        self.runtime.recent.push(current);
        self.advance();
        outcome
    }

    pub fn request_hint(&mut self) -> HintReveal {
        self.timer.disarm();
        self.reveal_hint()
    }

    fn reveal_hint(&mut self) -> HintReveal {
        let reveal = evaluator::apply_hint(
            self.runtime.current,
            &mut self.store.profile_mut().mastery,
            &mut self.runtime.streak,
            &mut self.runtime.hint_shown,
        );
        if reveal.penalty_applied {
            self.persist();
        }
        reveal
    }

    /// Ticket for the auto-hint armed on the current presentation.
    pub fn hint_ticket(&self) -> Option<HintTicket> {
        self.timer.ticket()
    }

    pub fn hint_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Fire the auto-hint for `ticket`. Tickets from earlier presentations
    /// are ignored.
    pub fn fire_hint(&mut self, ticket: HintTicket) -> Option<HintReveal> {
        if self.timer.fire(ticket) {
            Some(self.reveal_hint())
        } else {
            debug!(?ticket, "ignoring stale hint timer");
            None
        }
    }

    /// Poll the auto-hint timer; call from the host's tick loop.
    pub fn tick(&mut self, now: Instant) -> Option<HintReveal> {
        self.timer.poll(now)?;
        Some(self.reveal_hint())
    }

    /// Switch focus and redraw the current symbol under the new filter.
    pub fn set_focus_mode(&mut self, mode: FocusMode) {
        self.runtime.focus = mode;
        let previous = self.runtime.current;
        self.restart_queue(Some(previous));
    }

    /// Erase all progress, stored and in memory, and start over.
    pub fn reset_progress(&mut self) {
        if let Err(e) = self.store.reset_all() {
            warn!(error = %e, "failed to clear stored progress");
        }
        self.runtime.streak = 0;
        self.runtime.recent.clear();
        self.unlocked_len = 0;
        self.refresh_unlocked();
        self.restart_queue(None);
    }

    pub fn progress_snapshot(&self) -> ProgressSnapshot {
        let mastery = self.store.mastery();
        let session = self.store.session();
        let tiles: Vec<ProgressTile> = self
            .catalog
            .iter()
            .map(|&symbol| {
                let score = mastery.score(symbol.glyph);
                ProgressTile {
                    symbol,
                    score,
                    is_mastered: score >= MAX_SCORE,
                    percent: (score as f64 / MAX_SCORE as f64 * 100.0).min(100.0),
                }
            })
            .collect();

        let summary = ProgressSummary {
            mastered_count: mastery.count_at_least(self.catalog, MAX_SCORE),
            total_count: self.catalog.len(),
            unlocked_count: self.unlocked_len,
            level: scoring::level_from_xp(session.xp),
            xp: session.xp,
            xp_progress_percent: scoring::xp_progress_percent(session.xp),
            current_streak: self.runtime.streak,
            best_streak: session.best_streak,
            daily_streak: session.daily_streak,
            session_score: session.session_score,
        };

        ProgressSnapshot { tiles, summary }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
