//! JSON files standing in for the profile store and the daily log source.

use anyhow::{Context, Result};
use diet_core::{DayLog, UserProfile};
use serde::{Serialize, de::DeserializeOwned};
use std::{fs, path::Path};
use tracing::debug;

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what}: {}", path.display()))?;
    let value = serde_json::from_str(&txt)
        .with_context(|| format!("Invalid {what} JSON: {}", path.display()))?;
    debug!(path = %path.display(), "loaded {what}");
    Ok(value)
}

fn save_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    let txt = serde_json::to_string_pretty(value)?;
    fs::write(path, txt).with_context(|| format!("Failed to save {what}: {}", path.display()))?;
    debug!(path = %path.display(), "saved {what}");
    Ok(())
}

pub fn load_profile(path: &Path) -> Result<UserProfile> {
    load_json(path, "profile")
}

pub fn save_profile(path: &Path, profile: &UserProfile) -> Result<()> {
    save_json(path, profile, "profile")
}

pub fn load_day_log(path: &Path) -> Result<DayLog> {
    load_json(path, "day log")
}

/// Like [`load_day_log`], but a missing file is an empty day.
pub fn load_day_log_or_default(path: &Path) -> Result<DayLog> {
    if path.exists() {
        load_day_log(path)
    } else {
        Ok(DayLog::default())
    }
}

pub fn save_day_log(path: &Path, log: &DayLog) -> Result<()> {
    save_json(path, log, "day log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use diet_core::{ActivityLevel, BodyMetrics, LogEntry, Sex};

    #[test]
    fn test_profile_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let metrics =
            BodyMetrics::new(Sex::Female, 34, 170.0, 72.0, ActivityLevel::High).unwrap();
        let profile = UserProfile::onboard(Some("Ada".into()), metrics, 65.0, None).unwrap();

        save_profile(&path, &profile).unwrap();
        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_invalid_profile_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(
            &path,
            r#"{"metrics":{"sex":"male","age_years":30,"height_cm":-180,"weight_kg":80},
                "target_weight_kg":75,"daily_calorie_target":2000,"water_target_liters":2.6}"#,
        )
        .unwrap();
        let err = load_profile(&path).unwrap_err();
        assert!(format!("{err:#}").contains("height"));
    }

    #[test]
    fn test_profile_with_bad_water_target_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(
            &path,
            r#"{"metrics":{"sex":"male","age_years":30,"height_cm":180,"weight_kg":80},
                "target_weight_kg":75,"daily_calorie_target":2000,"water_target_liters":-1.0}"#,
        )
        .unwrap();
        let err = load_profile(&path).unwrap_err();
        assert!(format!("{err:#}").contains("water target"));
    }

    #[test]
    fn test_missing_log_is_empty_day() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.json");
        let mut log = load_day_log_or_default(&path).unwrap();
        assert!(log.entries.is_empty());

        log.water_ml = 400;
        log.entries.push(LogEntry::Exercise(
            diet_core::ExerciseEntry::from_met("Walk", 3.5, 70.0, 40).unwrap(),
        ));
        save_day_log(&path, &log).unwrap();
        assert_eq!(load_day_log_or_default(&path).unwrap(), log);
    }
}
