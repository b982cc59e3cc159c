use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::FitStatsError;

/// Workout types understood by the package reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutKind {
    Running,
    SportsWalking,
    Swimming,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 3] = [
        WorkoutKind::Swimming,
        WorkoutKind::Running,
        WorkoutKind::SportsWalking,
    ];

    /// Three-letter code used by sensor packages
    pub fn code(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "RUN",
            WorkoutKind::SportsWalking => "WLK",
            WorkoutKind::Swimming => "SWM",
        }
    }

    /// Name shown in the training summary
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::SportsWalking => "SportsWalking",
            WorkoutKind::Swimming => "Swimming",
        }
    }

    /// Number of raw values a package of this kind carries
    pub fn arity(&self) -> usize {
        match self {
            WorkoutKind::Running => 3,
            WorkoutKind::SportsWalking => 4,
            WorkoutKind::Swimming => 5,
        }
    }

    /// Distance covered by one action (step or stroke) in metres
    pub fn len_step(&self) -> f64 {
        match self {
            WorkoutKind::Running | WorkoutKind::SportsWalking => 0.65,
            WorkoutKind::Swimming => 1.38,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkoutKind {
    type Err = FitStatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RUN" => Ok(WorkoutKind::Running),
            "WLK" => Ok(WorkoutKind::SportsWalking),
            "SWM" => Ok(WorkoutKind::Swimming),
            _ => Err(FitStatsError::UnknownWorkoutType {
                code: s.to_string(),
            }),
        }
    }
}

/// Positional sensor values as delivered in a package
///
/// Layout per type code:
/// - `RUN`: action, duration (h), weight (kg)
/// - `WLK`: action, duration (h), weight (kg), height (cm)
/// - `SWM`: action, duration (h), weight (kg), pool length (m), pool count
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawReading(pub Vec<f64>);

impl RawReading {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for RawReading {
    fn from(values: Vec<f64>) -> Self {
        RawReading(values)
    }
}

/// A single sensor package: type code plus its raw reading
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Package {
    pub workout_type: String,
    pub data: RawReading,
}

impl Package {
    pub fn new(workout_type: impl Into<String>, data: impl Into<Vec<f64>>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data: RawReading(data.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in WorkoutKind::ALL {
            assert_eq!(kind.code().parse::<WorkoutKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_code() {
        let err = "XYZ".parse::<WorkoutKind>().unwrap_err();
        assert!(matches!(err, FitStatsError::UnknownWorkoutType { ref code } if code == "XYZ"));

        // codes are case sensitive
        assert!("run".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn test_raw_reading_is_transparent() {
        let package: Package =
            serde_json::from_str(r#"{"workout_type": "RUN", "data": [15000, 1, 75]}"#).unwrap();
        assert_eq!(package, Package::new("RUN", vec![15000.0, 1.0, 75.0]));
        assert_eq!(package.data.len(), 3);
    }
}
