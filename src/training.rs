//! Distance, speed and calorie calculations per workout type
//!
//! A `Training` is built once from a validated package and never mutated.
//! All figures are derived on demand by matching on the variant, so the
//! calculations are pure and repeatable.

use std::str::FromStr;

use crate::error::{FitStatsError, Result};
use crate::models::WorkoutKind;
use crate::report::InfoMessage;

pub const M_IN_KM: f64 = 1000.0;
pub const MIN_IN_H: f64 = 60.0;

// Running
const RUN_SPEED_MULTIPLIER: f64 = 18.0;
const RUN_SPEED_SHIFT: f64 = 1.79;

// Sports walking
const WLK_WEIGHT_MULTIPLIER: f64 = 0.035;
const WLK_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
const KMH_IN_MSEC: f64 = 0.278;
const CM_IN_M: f64 = 100.0;

// Swimming
const SWM_SPEED_SHIFT: f64 = 1.1;
const SWM_WEIGHT_MULTIPLIER: f64 = 2.0;

/// Fields every workout carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Common {
    action: f64,
    duration_hours: f64,
    weight_kg: f64,
}

impl Common {
    fn validated(action: f64, duration_hours: f64, weight_kg: f64) -> Result<Self> {
        Ok(Self {
            action: require_non_negative("action", action)?,
            duration_hours: require_positive("duration_hours", duration_hours)?,
            weight_kg: require_positive("weight_kg", weight_kg)?,
        })
    }

    /// Steps or strokes counted by the sensor
    pub fn action(&self) -> f64 {
        self.action
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SportsWalkingSession {
    common: Common,
    height_cm: f64,
}

impl SportsWalkingSession {
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwimmingSession {
    common: Common,
    pool_length_m: f64,
    pool_count: f64,
}

impl SwimmingSession {
    pub fn pool_length_m(&self) -> f64 {
        self.pool_length_m
    }

    pub fn pool_count(&self) -> f64 {
        self.pool_count
    }
}

/// A completed training session.
///
/// Payloads have private fields, so the validated constructors are the only
/// way to build one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Training {
    Running(Common),
    SportsWalking(SportsWalkingSession),
    Swimming(SwimmingSession),
}

impl Training {
    pub fn running(action: f64, duration_hours: f64, weight_kg: f64) -> Result<Self> {
        Ok(Training::Running(Common::validated(
            action,
            duration_hours,
            weight_kg,
        )?))
    }

    pub fn sports_walking(
        action: f64,
        duration_hours: f64,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<Self> {
        Ok(Training::SportsWalking(SportsWalkingSession {
            common: Common::validated(action, duration_hours, weight_kg)?,
            height_cm: require_positive("height_cm", height_cm)?,
        }))
    }

    pub fn swimming(
        action: f64,
        duration_hours: f64,
        weight_kg: f64,
        pool_length_m: f64,
        pool_count: f64,
    ) -> Result<Self> {
        Ok(Training::Swimming(SwimmingSession {
            common: Common::validated(action, duration_hours, weight_kg)?,
            pool_length_m: require_non_negative("pool_length_m", pool_length_m)?,
            pool_count: require_non_negative("pool_count", pool_count)?,
        }))
    }

    /// Build a training from positional sensor values
    pub fn from_reading(kind: WorkoutKind, values: &[f64]) -> Result<Self> {
        if values.len() != kind.arity() {
            return Err(FitStatsError::InvalidArity {
                code: kind.code().to_string(),
                expected: kind.arity(),
                actual: values.len(),
            });
        }

        match kind {
            WorkoutKind::Running => Self::running(values[0], values[1], values[2]),
            WorkoutKind::SportsWalking => {
                Self::sports_walking(values[0], values[1], values[2], values[3])
            }
            WorkoutKind::Swimming => {
                Self::swimming(values[0], values[1], values[2], values[3], values[4])
            }
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            Training::Running(_) => WorkoutKind::Running,
            Training::SportsWalking(_) => WorkoutKind::SportsWalking,
            Training::Swimming(_) => WorkoutKind::Swimming,
        }
    }

    pub fn common(&self) -> &Common {
        match self {
            Training::Running(common) => common,
            Training::SportsWalking(session) => &session.common,
            Training::Swimming(session) => &session.common,
        }
    }

    /// Distance in km, from the action count and the per-kind step length
    pub fn distance(&self) -> f64 {
        self.common().action * self.kind().len_step() / M_IN_KM
    }

    /// Mean speed in km/h
    pub fn mean_speed(&self) -> f64 {
        match self {
            Training::Swimming(session) => {
                session.pool_length_m * session.pool_count
                    / M_IN_KM
                    / session.common.duration_hours
            }
            _ => self.distance() / self.common().duration_hours,
        }
    }

    /// Calories spent over the whole session
    pub fn spent_calories(&self) -> f64 {
        let speed = self.mean_speed();
        match self {
            Training::Running(common) => {
                (RUN_SPEED_MULTIPLIER * speed + RUN_SPEED_SHIFT) * common.weight_kg / M_IN_KM
                    * common.duration_hours
                    * MIN_IN_H
            }
            Training::SportsWalking(SportsWalkingSession { common, height_cm }) => {
                (WLK_WEIGHT_MULTIPLIER * common.weight_kg
                    + ((speed * KMH_IN_MSEC).powi(2) / (height_cm / CM_IN_M))
                        * WLK_SPEED_HEIGHT_MULTIPLIER
                        * common.weight_kg)
                    * common.duration_hours
                    * MIN_IN_H
            }
            Training::Swimming(SwimmingSession { common, .. }) => {
                (speed + SWM_SPEED_SHIFT)
                    * SWM_WEIGHT_MULTIPLIER
                    * common.weight_kg
                    * common.duration_hours
            }
        }
    }

    /// Summarize the session.
    ///
    /// Fails with `Validation` when a figure is not finite, e.g. a huge
    /// action count over a tiny duration.
    pub fn show_training_info(&self) -> Result<InfoMessage> {
        Ok(InfoMessage {
            training_type: self.kind().name().to_string(),
            duration: self.common().duration_hours,
            distance: require_finite("distance", self.distance())?,
            speed: require_finite("mean_speed", self.mean_speed())?,
            calories: require_finite("spent_calories", self.spent_calories())?,
        })
    }
}

fn require_positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FitStatsError::validation(
            field,
            format!("must be a positive number, got {}", value),
        ));
    }
    Ok(value)
}

/// Accepts zero and positive values; `-0.0` is folded into `0.0`
fn require_non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(FitStatsError::validation(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(value + 0.0)
}

fn require_finite(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(FitStatsError::validation(
            field,
            format!("computed value is out of range ({})", value),
        ));
    }
    Ok(value)
}

/// Read a sensor package into a training.
///
/// Unknown type codes and readings of the wrong length are reported as
/// errors instead of producing a half-built training.
pub fn read_package(workout_type: &str, data: &[f64]) -> Result<Training> {
    let kind = WorkoutKind::from_str(workout_type)?;
    Training::from_reading(kind, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_running_figures() {
        let training = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap();
        assert_eq!(training.kind(), WorkoutKind::Running);
        assert_close(training.distance(), 9.75);
        assert_close(training.mean_speed(), 9.75);
        assert_close(training.spent_calories(), 797.805);
    }

    #[test]
    fn test_walking_figures() {
        let training = read_package("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();
        assert_close(training.distance(), 5.85);
        assert_close(training.mean_speed(), 5.85);

        let speed_ms = 5.85 * 0.278;
        let expected = (0.035 * 75.0 + (speed_ms * speed_ms / 1.8) * 0.029 * 75.0) * 60.0;
        assert_close(training.spent_calories(), expected);
        assert!((training.spent_calories() - 349.252).abs() < 0.001);
    }

    #[test]
    fn test_swimming_uses_pool_geometry_for_speed() {
        let training = read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
        assert_close(training.mean_speed(), 1.0);
        assert_close(training.spent_calories(), 336.0);
        // distance still follows the stroke length
        assert_close(training.distance(), 720.0 * 1.38 / 1000.0);
    }

    #[test]
    fn test_duration_scales_speed() {
        let training = Training::running(15000.0, 2.0, 75.0).unwrap();
        assert_close(training.mean_speed(), 4.875);
        assert_close(
            training.spent_calories(),
            (18.0 * 4.875 + 1.79) * 75.0 / 1000.0 * 2.0 * 60.0,
        );
    }

    #[test]
    fn test_unknown_type_code() {
        let err = read_package("XYZ", &[1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, FitStatsError::UnknownWorkoutType { .. }));
    }

    #[test]
    fn test_wrong_arity() {
        let err = read_package("SWM", &[720.0, 1.0, 80.0]).unwrap_err();
        match err {
            FitStatsError::InvalidArity {
                code,
                expected,
                actual,
            } => {
                assert_eq!(code, "SWM");
                assert_eq!(expected, 5);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(read_package("RUN", &[15000.0, 1.0, 75.0, 180.0]).is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = read_package("RUN", &[15000.0, 0.0, 75.0]).unwrap_err();
        assert!(
            matches!(err, FitStatsError::Validation { ref field, .. } if field == "duration_hours")
        );
        assert!(Training::running(100.0, f64::NAN, 75.0).is_err());
    }

    #[test]
    fn test_every_constructor_validates_duration() {
        let attempts = [
            Training::running(15000.0, 0.0, 75.0),
            Training::sports_walking(9000.0, 0.0, 75.0, 180.0),
            Training::swimming(720.0, 0.0, 80.0, 25.0, 40.0),
            Training::from_reading(WorkoutKind::Running, &[15000.0, 0.0, 75.0]),
        ];
        for attempt in attempts {
            assert!(matches!(
                attempt,
                Err(FitStatsError::Validation { ref field, .. }) if field == "duration_hours"
            ));
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        assert!(Training::running(-1.0, 1.0, 75.0).is_err());
        assert!(Training::sports_walking(9000.0, 1.0, 75.0, 0.0).is_err());
        assert!(Training::swimming(720.0, 1.0, 80.0, -25.0, 40.0).is_err());
    }

    #[test]
    fn test_overflowing_figures_rejected() {
        let training = read_package("RUN", &[1e308, 1e-300, 75.0]).unwrap();
        assert!(training.mean_speed().is_infinite());

        let err = training.show_training_info().unwrap_err();
        assert!(
            matches!(err, FitStatsError::Validation { ref field, .. } if field == "mean_speed")
        );
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let training = read_package("RUN", &[-0.0, 1.0, 75.0]).unwrap();
        assert!(training.common().action().is_sign_positive());
        assert!(training.distance().is_sign_positive());

        let message = training.show_training_info().unwrap();
        assert!(message
            .get_message()
            .contains("Distance: 0.000 km; Mean speed: 0.000 km/h"));

        let training = Training::swimming(0.0, 1.0, 80.0, -0.0, 40.0).unwrap();
        assert!(training.mean_speed().is_sign_positive());
    }

    #[test]
    fn test_accessors_expose_validated_fields() {
        let training = Training::sports_walking(9000.0, 1.5, 75.0, 180.0).unwrap();
        assert_eq!(training.common().duration_hours(), 1.5);
        assert_eq!(training.common().weight_kg(), 75.0);
        match training {
            Training::SportsWalking(session) => assert_eq!(session.height_cm(), 180.0),
            other => panic!("unexpected training: {:?}", other),
        }

        match Training::swimming(720.0, 1.0, 80.0, 25.0, 40.0).unwrap() {
            Training::Swimming(session) => {
                assert_eq!(session.pool_length_m(), 25.0);
                assert_eq!(session.pool_count(), 40.0);
            }
            other => panic!("unexpected training: {:?}", other),
        }
    }

    #[test]
    fn test_zero_action_is_valid() {
        let training = Training::running(0.0, 1.0, 75.0).unwrap();
        assert_eq!(training.distance(), 0.0);
        assert_close(training.spent_calories(), 1.79 * 75.0 / 1000.0 * 60.0);
    }
}
