//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, ChartsConfig, DataSettings, ExecutionSettings, LoggingConfig,
    VisionSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment overrides: `TRADING__RISK__ACCOUNT_EQUITY=25000`,
/// `TRADING__SYMBOLS=AAPL,MSFT`.
fn environment() -> Environment {
    Environment::with_prefix("TRADING")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("symbols")
}

/// Load configuration from file and environment, then validate it.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    load_with(path, environment())
}

fn load_with(path: &Path, env: Environment) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(env)
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate().map_err(ConfigError::Message)?;
    Ok(app)
}

/// Render the effective configuration as TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::io::Write;
    use trading_core::types::Timeframe;
    use trading_data::DataProviderKind;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn no_env() -> Environment {
        environment().source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let file = write_config("symbols = [\"TSLA\"]\n");
        let config = load_with(file.path(), no_env()).unwrap();

        assert_eq!(config.symbols, vec!["TSLA"]);
        assert_eq!(config.vision.model, "gpt-4o-mini");
        assert_eq!(config.vision.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.risk.account_equity, dec!(10000));
        assert_eq!(config.charts.intraday.timeframe, Timeframe::Hour4);
        assert_eq!(config.charts.daily.indicators.moving_averages, vec![20, 50, 200]);
        assert_eq!(
            config.logging.file.as_deref(),
            Some(Path::new("trading_bot.log"))
        );
    }

    #[test]
    fn test_file_values() {
        let file = write_config(
            r#"
symbols = ["AAPL", "MSFT"]

[data]
provider = "csv"
csv_dir = "fixtures"

[risk]
account_equity = 25000
risk_per_trade_percent = 0.5
fractional_shares = false

[execution]
latency_ms = 0
"#,
        );
        let config = load_with(file.path(), no_env()).unwrap();

        assert_eq!(config.data.provider, DataProviderKind::Csv);
        assert_eq!(config.data.csv_dir, Path::new("fixtures"));
        assert_eq!(config.risk.account_equity, dec!(25000));
        assert_eq!(config.risk.risk_per_trade_percent, dec!(0.5));
        assert_eq!(config.risk.min_reward_to_risk, dec!(2));
        assert!(!config.risk.fractional_shares);
        assert!(config.execution.latency().is_zero());
    }

    #[test]
    fn test_environment_overrides() {
        let file = write_config("symbols = [\"AAPL\"]\n");
        let vars = HashMap::from([
            ("TRADING__SYMBOLS".to_string(), "NVDA,GOOGL".to_string()),
            ("TRADING__VISION__MODEL".to_string(), "gpt-4o".to_string()),
            ("TRADING__DATA__TIMEOUT_SECS".to_string(), "30".to_string()),
        ]);
        let config = load_with(file.path(), environment().source(Some(vars))).unwrap();

        assert_eq!(config.symbols, vec!["NVDA", "GOOGL"]);
        assert_eq!(config.vision.model, "gpt-4o");
        assert_eq!(config.data.timeout_secs, Some(30));
    }

    #[test]
    fn test_validation_errors() {
        let empty = write_config("symbols = []\n");
        assert!(load_with(empty.path(), no_env()).is_err());

        let bad_risk = write_config("[risk]\nrisk_per_trade_percent = 0\n");
        let err = load_with(bad_risk.path(), no_env()).unwrap_err();
        assert!(err.to_string().contains("risk"));

        assert!(load_with(Path::new("does/not/exist.toml"), no_env()).is_err());
    }

    #[test]
    fn test_shipped_default_matches_built_in_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = load_with(&path, no_env()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_effective_config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = to_toml(&config).unwrap();
        assert!(text.contains("gpt-4o-mini"));

        let file = write_config(&text);
        assert_eq!(load_with(file.path(), no_env()).unwrap(), config);
    }
}
