use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::env;

/// Midpoint handling for the final total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Banker's rounding
    #[default]
    HalfEven,
    HalfUp,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decimal places kept on the final total
    #[serde(default = "default_scale")]
    pub rounding_scale: u32,

    #[serde(default)]
    pub rounding: RoundingMode,
}

fn default_scale() -> u32 {
    2
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding_scale: default_scale(),
            rounding: RoundingMode::default(),
        }
    }
}

impl EngineConfig {
    /// Load from `config/pricing`, an optional per-mode overlay and
    /// `CLEANLY__*` environment variables. Missing sources fall back to
    /// the defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/pricing").required(false))
            .add_source(config::File::with_name(&format!("config/pricing.{}", run_mode)).required(false))
            .add_source(
                config::Environment::with_prefix("CLEANLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load from a single explicit source
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder().add_source(source).build()?.try_deserialize()
    }

    /// Round to `rounding_scale` places, padding so every amount carries
    /// the same number of decimals ("45" becomes "45.00")
    pub fn round(&self, amount: Decimal) -> Decimal {
        let mut rounded = amount.round_dp_with_strategy(self.rounding_scale, self.rounding.strategy());
        rounded.rescale(self.rounding_scale);
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use std::str::FromStr;

    #[test]
    fn test_default_is_bankers_two_places() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.rounding_scale, 2);
        assert_eq!(cfg.round(Decimal::from_str("2.345").unwrap()), Decimal::from_str("2.34").unwrap());
        assert_eq!(cfg.round(Decimal::from_str("2.355").unwrap()), Decimal::from_str("2.36").unwrap());
        assert_eq!(cfg.round(Decimal::from_str("-0.125").unwrap()), Decimal::from_str("-0.12").unwrap());
    }

    #[test]
    fn test_round_pads_to_scale() {
        let cfg = EngineConfig::default();
        let rounded = cfg.round(Decimal::from(45));
        assert_eq!(rounded.scale(), 2);
        assert_eq!(rounded.to_string(), "45.00");
        assert_eq!(cfg.round(Decimal::from_str("49.5").unwrap()).to_string(), "49.50");
    }

    // Only test in this crate touching CLEANLY__* variables
    #[test]
    fn test_load_reads_environment() {
        std::env::set_var("CLEANLY__ROUNDING_SCALE", "1");
        std::env::set_var("CLEANLY__ROUNDING", "half_up");
        let loaded = EngineConfig::load();
        std::env::remove_var("CLEANLY__ROUNDING_SCALE");
        std::env::remove_var("CLEANLY__ROUNDING");

        let cfg = loaded.unwrap();
        assert_eq!(cfg.rounding_scale, 1);
        assert_eq!(cfg.rounding, RoundingMode::HalfUp);

        assert_eq!(EngineConfig::load().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_from_toml_source() {
        let cfg = EngineConfig::from_source(File::from_str(
            "rounding_scale = 1\nrounding = \"half_up\"\n",
            FileFormat::Toml,
        ))
        .unwrap();
        assert_eq!(cfg.rounding_scale, 1);
        assert_eq!(cfg.rounding, RoundingMode::HalfUp);
        assert_eq!(cfg.round(Decimal::from_str("0.25").unwrap()), Decimal::from_str("0.3").unwrap());
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let cfg = EngineConfig::from_source(File::from_str("", FileFormat::Toml)).unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }
}
