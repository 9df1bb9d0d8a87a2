//! Dashboard configuration, read and validated through [`ConfigPort`].

use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::error::QuotefolioError;
use crate::domain::normalizer::MalformedRowPolicy;
use crate::domain::range::ChartRange;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_EMA_PERIODS: [usize; 3] = [20, 50, 200];

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub portfolio_path: PathBuf,
    pub default_range: ChartRange,
    pub ema_periods: Vec<usize>,
    pub malformed_rows: MalformedRowPolicy,
}

impl DashboardConfig {
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, QuotefolioError> {
        Ok(DashboardConfig {
            data_dir: required_path(config, "data", "dir")?,
            portfolio_path: required_path(config, "portfolio", "path")?,
            default_range: parse_range(config)?,
            ema_periods: parse_ema_periods(config)?,
            malformed_rows: parse_policy(config)?,
        })
    }
}

fn invalid(section: &str, key: &str, reason: String) -> QuotefolioError {
    QuotefolioError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn required_path(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<PathBuf, QuotefolioError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(PathBuf::from(s.trim())),
        Some(_) => Err(invalid(section, key, format!("{key} must not be empty"))),
        None => Err(QuotefolioError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn parse_range(config: &dyn ConfigPort) -> Result<ChartRange, QuotefolioError> {
    match config.get_string("chart", "default_range") {
        None => Ok(ChartRange::default()),
        Some(s) => s.parse().map_err(|e| invalid("chart", "default_range", e)),
    }
}

fn parse_ema_periods(config: &dyn ConfigPort) -> Result<Vec<usize>, QuotefolioError> {
    let Some(raw) = config.get_string("chart", "ema_periods") else {
        return Ok(DEFAULT_EMA_PERIODS.to_vec());
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut periods = Vec::new();
    let mut seen = HashSet::new();
    for token in raw.split(',') {
        let period: usize = token.trim().parse().map_err(|_| {
            invalid("chart", "ema_periods", format!("not a period: {:?}", token.trim()))
        })?;
        if period == 0 {
            return Err(invalid("chart", "ema_periods", "periods must be positive".into()));
        }
        if !seen.insert(period) {
            return Err(invalid("chart", "ema_periods", format!("duplicate period {period}")));
        }
        periods.push(period);
    }
    Ok(periods)
}

fn parse_policy(config: &dyn ConfigPort) -> Result<MalformedRowPolicy, QuotefolioError> {
    match config.get_string("normalize", "malformed_rows") {
        None => Ok(MalformedRowPolicy::default()),
        Some(s) => s.parse().map_err(|e| invalid("normalize", "malformed_rows", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<(String, String), String>);

    impl MapConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            MapConfig(
                entries
                    .iter()
                    .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                    .collect(),
            )
        }
    }

    impl ConfigPort for MapConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.0.get(&(section.to_string(), key.to_string())).cloned()
        }
    }

    fn minimal() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![("data", "dir", "/var/data"), ("portfolio", "path", "holdings.csv")]
    }

    #[test]
    fn defaults_apply() {
        let config = DashboardConfig::from_port(&MapConfig::new(&minimal())).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/data"));
        assert_eq!(config.portfolio_path, PathBuf::from("holdings.csv"));
        assert_eq!(config.default_range, ChartRange::OneMonth);
        assert_eq!(config.ema_periods, vec![20, 50, 200]);
        assert_eq!(config.malformed_rows, MalformedRowPolicy::FailFast);
    }

    #[test]
    fn explicit_values() {
        let mut entries = minimal();
        entries.push(("chart", "default_range", "3m"));
        entries.push(("chart", "ema_periods", "9, 21"));
        entries.push(("normalize", "malformed_rows", "skip"));
        let config = DashboardConfig::from_port(&MapConfig::new(&entries)).unwrap();

        assert_eq!(config.default_range, ChartRange::ThreeMonths);
        assert_eq!(config.ema_periods, vec![9, 21]);
        assert_eq!(config.malformed_rows, MalformedRowPolicy::Skip);
    }

    #[test]
    fn empty_ema_list_disables_overlays() {
        let mut entries = minimal();
        entries.push(("chart", "ema_periods", ""));
        let config = DashboardConfig::from_port(&MapConfig::new(&entries)).unwrap();
        assert!(config.ema_periods.is_empty());
    }

    #[test]
    fn missing_data_dir() {
        let err = DashboardConfig::from_port(&MapConfig::new(&[("portfolio", "path", "p")]))
            .unwrap_err();
        assert!(matches!(err, QuotefolioError::ConfigMissing { ref key, .. } if key == "dir"));
    }

    #[test]
    fn rejects_bad_values() {
        for (section, key, value) in [
            ("chart", "default_range", "5D"),
            ("chart", "ema_periods", "20,0"),
            ("chart", "ema_periods", "20,abc"),
            ("chart", "ema_periods", "20,20"),
            ("normalize", "malformed_rows", "maybe"),
            ("data", "dir", "  "),
        ] {
            let mut entries: Vec<_> = minimal()
                .into_iter()
                .filter(|(s, k, _)| !(*s == section && *k == key))
                .collect();
            entries.push((section, key, value));
            let result = DashboardConfig::from_port(&MapConfig::new(&entries));
            assert!(
                matches!(result, Err(QuotefolioError::ConfigInvalid { .. })),
                "{section}.{key} = {value:?} should be invalid"
            );
        }
    }
}
