//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use broadcaster::config::{DEFAULT_QUEUE_CAP, DEFAULT_RECONNECT_DELAY, DEFAULT_SCAN_INTERVAL};
use broadcaster::settings::interval_from_secs;
use broadcaster::BotConfig;
use news_feed::NewsApiConfig;

/// Admin web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Directory holding the queue, history and session files.
    pub data_dir: PathBuf,
    /// Signal daemon URL.
    pub signal_daemon_url: String,
    /// Name the linked device shows on the phone.
    pub device_name: String,
    /// Group every article is posted to.
    pub destination_group_id: String,
    pub news: NewsApiConfig,
    pub post_interval: Duration,
    pub scan_interval: Duration,
    pub history_cap: usize,
    pub queue_cap: usize,
    pub reconnect_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `0.0.0.0:3000` |
    /// | `DATA_DIR` | Store and session directory | `./temp` |
    /// | `SIGNAL_DAEMON_URL` | Signal daemon URL | `http://127.0.0.1:8080` |
    /// | `SIGNAL_DEVICE_NAME` | Linked device name | `Watchdog Pro` |
    /// | `DESTINATION_GROUP_ID` | Broadcast group id | (required) |
    /// | `NEWS_API_KEY` | NewsAPI key | (required) |
    /// | `NEWS_API_URL` | NewsAPI base URL | `https://newsapi.org` |
    /// | `NEWS_QUERY` | Search query | `world` |
    /// | `NEWS_LANGUAGE` | Article language | `en` |
    /// | `NEWS_LAST_24H` | Only the last 24 hours | `false` |
    /// | `POST_INTERVAL_SECS` | Initial post interval | `30` |
    /// | `SCAN_INTERVAL_SECS` | Scan period | `3600` |
    /// | `HISTORY_CAP` | Sent history size | `1000` |
    /// | `QUEUE_CAP` | Queue size | `500` |
    /// | `RECONNECT_DELAY_SECS` | Pause before reconnecting | `5` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let addr = var("ADMIN_ADDR", "0.0.0.0:3000")
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let destination_group_id =
            lookup("DESTINATION_GROUP_ID").ok_or(ConfigError::Missing("DESTINATION_GROUP_ID"))?;
        let api_key = lookup("NEWS_API_KEY").ok_or(ConfigError::Missing("NEWS_API_KEY"))?;

        let news = NewsApiConfig::new(api_key)
            .with_base_url(var("NEWS_API_URL", news_feed::DEFAULT_BASE_URL))
            .with_query(var("NEWS_QUERY", "world"))
            .with_language(var("NEWS_LANGUAGE", "en"))
            .with_last_24_hours(parse(&lookup, "NEWS_LAST_24H", false)?);

        let post_secs: f64 = parse(&lookup, "POST_INTERVAL_SECS", 30.0)?;
        let post_interval = interval_from_secs(post_secs).map_err(|e| ConfigError::Invalid {
            name: "POST_INTERVAL_SECS",
            reason: e.to_string(),
        })?;

        Ok(Self {
            addr,
            data_dir: PathBuf::from(var("DATA_DIR", "./temp")),
            signal_daemon_url: var("SIGNAL_DAEMON_URL", "http://127.0.0.1:8080"),
            device_name: var("SIGNAL_DEVICE_NAME", "Watchdog Pro"),
            destination_group_id,
            news,
            post_interval,
            scan_interval: secs(&lookup, "SCAN_INTERVAL_SECS", DEFAULT_SCAN_INTERVAL)?,
            history_cap: positive(&lookup, "HISTORY_CAP", article_store::DEFAULT_HISTORY_CAP)?,
            queue_cap: positive(&lookup, "QUEUE_CAP", DEFAULT_QUEUE_CAP)?,
            reconnect_delay: secs(&lookup, "RECONNECT_DELAY_SECS", DEFAULT_RECONNECT_DELAY)?,
        })
    }

    /// Bot tuning derived from this configuration.
    pub fn bot_config(&self) -> BotConfig {
        BotConfig {
            post_interval: self.post_interval,
            scan_interval: self.scan_interval,
            queue_cap: self.queue_cap,
            reconnect_delay: self.reconnect_delay,
            ..BotConfig::new(self.destination_group_id.clone())
        }
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("cannot parse {raw:?}"),
        }),
        None => Ok(default),
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: usize,
) -> Result<usize, ConfigError> {
    match parse(lookup, name, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        }),
        value => Ok(value),
    }
}

fn secs(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let value = parse(lookup, name, default.as_secs())?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(value))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,

    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [("DESTINATION_GROUP_ID", "group"), ("NEWS_API_KEY", "key")];

    #[test]
    fn test_defaults() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.data_dir, PathBuf::from("./temp"));
        assert_eq!(config.device_name, "Watchdog Pro");
        assert_eq!(config.post_interval, Duration::from_secs(30));
        assert_eq!(config.scan_interval, Duration::from_secs(3600));
        assert_eq!((config.history_cap, config.queue_cap), (1000, 500));
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
        assert_eq!(config.news.query, "world");
        assert!(!config.news.last_24_hours);
    }

    #[test]
    fn test_missing_required() {
        let err = load(&[("NEWS_API_KEY", "key")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DESTINATION_GROUP_ID")));

        let err = load(&[("DESTINATION_GROUP_ID", "group")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("NEWS_API_KEY")));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("ADMIN_ADDR", "127.0.0.1:9000"),
            ("POST_INTERVAL_SECS", "90"),
            ("QUEUE_CAP", "10"),
            ("NEWS_LAST_24H", "true"),
            ("NEWS_QUERY", "climate"),
        ]);
        let config = load(&vars).unwrap();

        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.news.query, "climate");
        assert!(config.news.last_24_hours);

        let bot = config.bot_config();
        assert_eq!(bot.destination, "group");
        assert_eq!(bot.post_interval, Duration::from_secs(90));
        assert_eq!(bot.queue_cap, 10);
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("POST_INTERVAL_SECS", "0"),
            ("POST_INTERVAL_SECS", "abc"),
            ("QUEUE_CAP", "0"),
            ("SCAN_INTERVAL_SECS", "0"),
            ("NEWS_LAST_24H", "maybe"),
        ] {
            let mut vars = REQUIRED.to_vec();
            vars.push((name, value));
            assert!(
                matches!(load(&vars), Err(ConfigError::Invalid { .. })),
                "{name}={value} should be rejected"
            );
        }

        let mut vars = REQUIRED.to_vec();
        vars.push(("ADMIN_ADDR", "nowhere"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidAddr)));
    }
}
