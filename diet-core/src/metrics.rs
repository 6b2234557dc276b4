use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, Result, positive};

/// Biological sex used by the BMR formula and the calorie safety floor.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Lowest daily calorie target a weight-loss plan may prescribe.
    pub fn calorie_floor(self) -> u32 {
        match self {
            Sex::Male => 1500,
            Sex::Female => 1200,
        }
    }

    /// Constant term of the Mifflin-St Jeor equation.
    pub fn bmr_offset(self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Sex {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(EngineError::UnrecognizedEnum {
                kind: "sex",
                value: s.to_string(),
            }),
        }
    }
}

/// Self-reported activity level, ordered from least to most active.
#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
    Extreme,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Low,
        ActivityLevel::Moderate,
        ActivityLevel::High,
        ActivityLevel::Extreme,
    ];

    /// TDEE multiplier applied to BMR.
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Low => 1.2,
            ActivityLevel::Moderate => 1.375,
            ActivityLevel::High => 1.55,
            ActivityLevel::Extreme => 1.725,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActivityLevel::Low => "Sedentary",
            ActivityLevel::Moderate => "Exercise 3-5 days a week",
            ActivityLevel::High => "Exercise 6-7 days a week",
            ActivityLevel::Extreme => "Training twice a day",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
            ActivityLevel::Extreme => "extreme",
        };
        f.write_str(s)
    }
}

impl FromStr for ActivityLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            "extreme" => Ok(ActivityLevel::Extreme),
            _ => Err(EngineError::UnrecognizedEnum {
                kind: "activity level",
                value: s.to_string(),
            }),
        }
    }
}

/// Validated physical profile of a user.
///
/// Fields are private so a `BodyMetrics` value can only exist once every
/// numeric field is finite and positive. A weight change produces a new value
/// through [`BodyMetrics::with_weight`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBodyMetrics")]
pub struct BodyMetrics {
    sex: Sex,
    age_years: u32,
    height_cm: f64,
    weight_kg: f64,
    activity_level: ActivityLevel,
}

/// Unvalidated shape of stored body metrics.
#[derive(Deserialize)]
struct RawBodyMetrics {
    sex: Sex,
    age_years: u32,
    height_cm: f64,
    weight_kg: f64,
    #[serde(default)]
    activity_level: ActivityLevel,
}

impl TryFrom<RawBodyMetrics> for BodyMetrics {
    type Error = EngineError;

    fn try_from(raw: RawBodyMetrics) -> Result<Self> {
        BodyMetrics::new(
            raw.sex,
            raw.age_years,
            raw.height_cm,
            raw.weight_kg,
            raw.activity_level,
        )
    }
}

impl BodyMetrics {
    pub fn new(
        sex: Sex,
        age_years: u32,
        height_cm: f64,
        weight_kg: f64,
        activity_level: ActivityLevel,
    ) -> Result<Self> {
        if age_years == 0 {
            return Err(EngineError::InvalidMetrics(
                "age must be greater than zero".into(),
            ));
        }
        let height_cm = positive(height_cm, "height").map_err(EngineError::InvalidMetrics)?;
        let weight_kg = positive(weight_kg, "weight").map_err(EngineError::InvalidMetrics)?;

        Ok(BodyMetrics {
            sex,
            age_years,
            height_cm,
            weight_kg,
            activity_level,
        })
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn age_years(&self) -> u32 {
        self.age_years
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    /// Same profile at a different body weight.
    pub fn with_weight(&self, weight_kg: f64) -> Result<Self> {
        BodyMetrics::new(
            self.sex,
            self.age_years,
            self.height_cm,
            weight_kg,
            self.activity_level,
        )
    }

    pub fn with_activity_level(&self, activity_level: ActivityLevel) -> Self {
        BodyMetrics {
            activity_level,
            ..*self
        }
    }
}
