//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use trading_core::types::{ChartSettings, FundamentalData};
use trading_data::DataProviderKind;
use trading_risk::RiskSettings;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Symbols processed in order on every run
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub charts: ChartsConfig,
    #[serde(default)]
    pub vision: VisionSettings,
    #[serde(default)]
    pub risk: RiskSettings,
    #[serde(default)]
    pub execution: ExecutionSettings,
    #[serde(default)]
    pub fundamentals: FundamentalData,
}

fn default_symbols() -> Vec<String> {
    ["AAPL", "NVDA", "MSFT", "GOOGL"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            symbols: default_symbols(),
            data: DataSettings::default(),
            charts: ChartsConfig::default(),
            vision: VisionSettings::default(),
            risk: RiskSettings::default(),
            execution: ExecutionSettings::default(),
            fundamentals: FundamentalData::default(),
        }
    }
}

impl AppConfig {
    /// Check cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.symbols.is_empty() {
            return Err("symbols: at least one symbol is required".into());
        }
        if let Some(blank) = self.symbols.iter().position(|s| s.trim().is_empty()) {
            return Err(format!("symbols: entry {} is blank", blank));
        }

        for (name, chart) in [("daily", &self.charts.daily), ("intraday", &self.charts.intraday)] {
            if chart.num_points == 0 {
                return Err(format!("charts.{}.num_points must be positive", name));
            }
            chart
                .indicators
                .validate()
                .map_err(|e| format!("charts.{}.indicators: {}", name, e))?;
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err("charts: width and height must be positive".into());
        }

        if self.vision.model.trim().is_empty() {
            return Err("vision.model must not be empty".into());
        }
        if self.vision.max_tokens == 0 {
            return Err("vision.max_tokens must be positive".into());
        }

        self.risk.validate().map_err(|e| format!("risk: {}", e))
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "vision-trader".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Plain-text log file next to the console output
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: Some(PathBuf::from("trading_bot.log")),
        }
    }
}

/// Market data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub provider: DataProviderKind,
    /// Directory read by the CSV provider
    pub csv_dir: PathBuf,
    /// Request timeout; unset waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            provider: DataProviderKind::Yahoo,
            csv_dir: PathBuf::from("data"),
            timeout_secs: None,
        }
    }
}

impl DataSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Chart timeframes and image output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    /// TrueType font for titles and axis labels
    pub font_path: Option<PathBuf>,
    pub daily: ChartSettings,
    pub intraday: ChartSettings,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            width: 1500,
            height: 1000,
            font_path: None,
            daily: ChartSettings::daily(),
            intraday: ChartSettings::intraday(),
        }
    }
}

/// Vision model connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionSettings {
    pub model: String,
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1500,
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: None,
        }
    }
}

impl VisionSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Simulated execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSettings {
    pub broker_name: String,
    /// Pause before a fill is reported
    pub latency_ms: u64,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            broker_name: "Simulated Broker".to_string(),
            latency_ms: 1000,
        }
    }
}

impl ExecutionSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
