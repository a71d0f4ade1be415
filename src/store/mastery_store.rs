use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::engine::catalog::Symbol;
use crate::engine::mastery::MasteryRecord;
use crate::store::schema::{
    LEGACY_KEY, LegacyProfileData, PROFILE_KEY, ProfileData, mastery_from_wire,
};
use crate::store::{KeyValueStore, StoreError};

/// Aggregates persisted alongside the mastery record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub session_score: u32,
    pub xp: u32,
    pub best_streak: u32,
    pub daily_streak: u32,
    pub last_active: Option<NaiveDate>,
    /// Last level the learner was told about; used to detect level-ups.
    pub level: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session_score: 0,
            xp: 0,
            best_streak: 0,
            daily_streak: 0,
            last_active: None,
            level: 1,
        }
    }
}

impl SessionState {
    /// Drop the daily streak if more than one calendar day passed since the
    /// last active day. Returns true if it was reset.
    pub fn decay_daily_streak(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.last_active else {
            self.daily_streak = 0;
            return false;
        };
        let gap = today.signed_duration_since(last).num_days();
        if gap > 1 && self.daily_streak != 0 {
            self.daily_streak = 0;
            return true;
        }
        false
    }

    /// Credit activity on `today`. Consecutive days extend the streak, any
    /// other gap restarts it at 1. Same-day activity is a no-op.
    pub fn record_active_day(&mut self, today: NaiveDate) {
        match self.last_active {
            Some(last) if last == today => return,
            Some(last) if today.signed_duration_since(last).num_days() == 1 => {
                self.daily_streak = self.daily_streak.saturating_add(1);
            }
            _ => self.daily_streak = 1,
        }
        self.last_active = Some(today);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedProfile {
    pub mastery: MasteryRecord,
    pub session: SessionState,
}

impl PersistedProfile {
    pub fn fresh(catalog: &[Symbol]) -> Self {
        Self {
            mastery: MasteryRecord::fresh(catalog),
            session: SessionState::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileSource {
    Current,
    Legacy,
    Fresh,
}

/// Sole owner of the mastery record and session aggregates.
pub struct MasteryStore<S> {
    backend: S,
    catalog: &'static [Symbol],
    profile: PersistedProfile,
    persisted_best_streak: u32,
}

impl<S: KeyValueStore> MasteryStore<S> {
    pub fn new(backend: S, catalog: &'static [Symbol]) -> Self {
        Self {
            backend,
            catalog,
            profile: PersistedProfile::fresh(catalog),
            persisted_best_streak: 0,
        }
    }

    pub fn profile(&self) -> &PersistedProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut PersistedProfile {
        &mut self.profile
    }

    pub fn mastery(&self) -> &MasteryRecord {
        &self.profile.mastery
    }

    pub fn session(&self) -> &SessionState {
        &self.profile.session
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the current-format profile, else migrate the legacy score map,
    /// else start fresh. Missing or unreadable data is never an error.
    pub fn load(&mut self) -> &PersistedProfile {
        let (profile, source) = self.read_profile();
        match source {
            ProfileSource::Current => debug!("loaded profile"),
            ProfileSource::Legacy => info!(
                symbols = profile.mastery.len(),
                "migrated legacy score-only profile"
            ),
            ProfileSource::Fresh => info!("initialized fresh profile"),
        }
        self.persisted_best_streak = profile.session.best_streak;
        self.profile = profile;
        &self.profile
    }

    fn read_profile(&self) -> (PersistedProfile, ProfileSource) {
        if let Some(data) = self.read_json::<ProfileData>(PROFILE_KEY) {
            return (data.into_profile(), ProfileSource::Current);
        }
        if let Some(legacy) = self.read_json::<LegacyProfileData>(LEGACY_KEY) {
            let profile = PersistedProfile {
                mastery: mastery_from_wire(&legacy),
                session: SessionState::default(),
            };
            return (profile, ProfileSource::Legacy);
        }
        (PersistedProfile::fresh(self.catalog), ProfileSource::Fresh)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "profile read failed, treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed profile data");
                None
            }
        }
    }

    /// Write the profile in the current format. The stored best streak never
    /// decreases across saves.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let session = &mut self.profile.session;
        session.best_streak = session.best_streak.max(self.persisted_best_streak);
        let json = serde_json::to_string(&ProfileData::from_profile(&self.profile))?;
        self.backend.set(PROFILE_KEY, &json)?;
        self.persisted_best_streak = self.profile.session.best_streak;
        Ok(())
    }

    pub fn adjust_score(&mut self, glyph: char, delta: i32) -> u8 {
        self.profile.mastery.adjust_score(glyph, delta)
    }

    /// Clear both stored formats and return to the zero profile. The
    /// in-memory reset happens even if clearing storage fails.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        self.profile = PersistedProfile::fresh(self.catalog);
        self.persisted_best_streak = 0;
        let current = self.backend.remove(PROFILE_KEY);
        let legacy = self.backend.remove(LEGACY_KEY);
        info!("progress reset");
        current.and(legacy)
    }
}
