use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::engine::mastery::MasteryRecord;
use crate::store::mastery_store::{PersistedProfile, SessionState};

pub const PROFILE_KEY: &str = "hangul_memory_v2";
pub const LEGACY_KEY: &str = "hangul_memory";

const DATE_FORMAT: &str = "%Y-%m-%d";
// Shape written by older browser builds, e.g. "Fri Oct 16 2026".
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Legacy layout: a bare glyph -> score map.
pub type LegacyProfileData = BTreeMap<String, i64>;

/// Current layout. Each field decodes on its own: a bad value falls back to
/// that field's default instead of rejecting the whole record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default, deserialize_with = "lenient_scores")]
    pub jamo: BTreeMap<String, i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub xp: u32,
    #[serde(default = "default_level", deserialize_with = "lenient_count")]
    pub level: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub best_streak: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub session_score: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub daily_streak: u32,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_date: Option<String>,
}

fn default_level() -> u32 {
    1
}

// Negative counts read as 0, fractions truncate, oversized values saturate.
fn count_from_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).unwrap_or(u32::MAX),
            None => n.as_f64().map_or(0, |v| v.clamp(0.0, u32::MAX as f64) as u32),
        },
        _ => 0,
    }
}

fn score_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v as i64)),
        _ => None,
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(count_from_value(&Value::deserialize(deserializer)?))
}

/// Non-numeric scores are dropped; the rest of the map survives.
fn lenient_scores<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, i64>, D::Error> {
    let scores = match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| score_from_value(value).map(|s| (key.clone(), s)))
            .collect(),
        _ => BTreeMap::new(),
    };
    Ok(scores)
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(raw) => Ok(Some(raw)),
        _ => Ok(None),
    }
}

impl ProfileData {
    pub fn from_profile(profile: &PersistedProfile) -> Self {
        let s = &profile.session;
        Self {
            jamo: mastery_to_wire(&profile.mastery),
            xp: s.xp,
            level: s.level,
            best_streak: s.best_streak,
            session_score: s.session_score,
            daily_streak: s.daily_streak,
            last_date: s.last_active.map(format_day),
        }
    }

    pub fn into_profile(self) -> PersistedProfile {
        PersistedProfile {
            mastery: mastery_from_wire(&self.jamo),
            session: SessionState {
                session_score: self.session_score,
                xp: self.xp,
                best_streak: self.best_streak,
                daily_streak: self.daily_streak,
                last_active: self.last_date.as_deref().and_then(parse_day),
                level: self.level.max(1),
            },
        }
    }
}

/// Multi-character keys cannot name a glyph and are dropped.
pub fn mastery_from_wire(jamo: &BTreeMap<String, i64>) -> MasteryRecord {
    let mut record = MasteryRecord::default();
    for (key, &score) in jamo {
        let mut chars = key.chars();
        if let (Some(glyph), None) = (chars.next(), chars.next()) {
            record.set_score(glyph, score);
        }
    }
    record
}

fn mastery_to_wire(record: &MasteryRecord) -> BTreeMap<String, i64> {
    record
        .iter()
        .map(|(glyph, score)| (glyph.to_string(), score as i64))
        .collect()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
        .ok()
}
