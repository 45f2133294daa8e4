use crate::model::VertexKind;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Importance weight per configurable attribute category.
///
/// The four fields cover exactly the categories whose edge weights are
/// caller-tunable; flag, rating-bucket, and listed-in edges always use the
/// graph's fixed default weight instead.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WeightConfig {
    pub location: f64,
    pub rest_type: f64,
    pub cuisines: f64,
    pub approx_cost: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeightConfigError {
    #[error("weight for {0} must be a positive finite number")]
    NonPositiveWeight(VertexKind),
}

impl WeightConfig {
    pub fn validate(&self) -> Result<(), WeightConfigError> {
        for (kind, weight) in [
            (VertexKind::Location, self.location),
            (VertexKind::RestType, self.rest_type),
            (VertexKind::Cuisines, self.cuisines),
            (VertexKind::ApproxCost, self.approx_cost),
        ] {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(WeightConfigError::NonPositiveWeight(kind));
            }
        }
        Ok(())
    }

    /// The configured weight for `kind`, or `None` for kinds whose edges
    /// always use the fixed default weight.
    pub fn weight_for(&self, kind: VertexKind) -> Option<f64> {
        match kind {
            VertexKind::Location => Some(self.location),
            VertexKind::RestType => Some(self.rest_type),
            VertexKind::Cuisines => Some(self.cuisines),
            VertexKind::ApproxCost => Some(self.approx_cost),
            VertexKind::Restaurant | VertexKind::Other | VertexKind::User => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub weights: WeightConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        tracing::debug!(%run_mode, "loading configuration");

        let builder = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("SAVORA").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeightConfig {
        WeightConfig {
            location: 9.0,
            rest_type: 8.0,
            cuisines: 4.0,
            approx_cost: 7.0,
        }
    }

    #[test]
    fn valid_weights_pass_validation() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn zero_and_negative_weights_are_rejected() {
        let mut weights = sample();
        weights.cuisines = 0.0;
        assert_eq!(
            weights.validate(),
            Err(WeightConfigError::NonPositiveWeight(VertexKind::Cuisines))
        );

        weights.cuisines = -3.0;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn non_finite_weights_are_rejected() {
        let mut weights = sample();
        weights.location = f64::NAN;
        assert_eq!(
            weights.validate(),
            Err(WeightConfigError::NonPositiveWeight(VertexKind::Location))
        );
    }

    #[test]
    fn weight_for_covers_only_configurable_kinds() {
        let weights = sample();
        assert_eq!(weights.weight_for(VertexKind::Location), Some(9.0));
        assert_eq!(weights.weight_for(VertexKind::ApproxCost), Some(7.0));
        assert_eq!(weights.weight_for(VertexKind::Other), None);
        assert_eq!(weights.weight_for(VertexKind::User), None);
    }
}
