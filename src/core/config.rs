//! Chart frame configuration object + fluent builder.

use crate::core::{
    color::AnsiCode,
    constants::{MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
    error::ConfigError,
};

/// Immutable parameters handed to the frame renderer.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub subtitle: Option<String>,
    pub y_range: (f64, f64),
    /// Labels printed under the left and right ends of the x axis.
    pub x_labels: Option<(String, String)>,
    pub x_chars: usize,
    pub y_chars: usize,
    pub color: AnsiCode,
}

impl Config {
    #[inline]
    #[must_use]
    pub fn builder(x_chars: usize, y_chars: usize) -> ConfigBuilder {
        ConfigBuilder::new(x_chars, y_chars)
    }
}

/// Fluent builder; validation happens in `build`.
#[derive(Debug)]
pub struct ConfigBuilder {
    x_chars: usize,
    y_chars: usize,
    title: Option<String>,
    subtitle: Option<String>,
    y_min: Option<f64>,
    y_max: Option<f64>,
    x_labels: Option<(String, String)>,
    color: Option<AnsiCode>,
}

impl ConfigBuilder {
    pub(crate) fn new(x_chars: usize, y_chars: usize) -> Self {
        Self {
            x_chars,
            y_chars,
            title: None,
            subtitle: None,
            y_min: None,
            y_max: None,
            x_labels: None,
            color: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn subtitle_opt(mut self, s: Option<String>) -> Self {
        self.subtitle = s;
        self
    }
    #[inline]
    #[must_use]
    pub fn y_range(mut self, (low, high): (f64, f64)) -> Self {
        self.y_min = Some(low);
        self.y_max = Some(high);
        self
    }
    #[inline]
    #[must_use]
    pub fn x_labels(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.x_labels = Some((left.into(), right.into()));
        self
    }
    #[inline]
    #[must_use]
    pub fn color(mut self, c: AnsiCode) -> Self {
        self.color = Some(c);
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let y_min = self.y_min.ok_or(ConfigError::MissingField("y_min"))?;
        let y_max = self.y_max.ok_or(ConfigError::MissingField("y_max"))?;
        if y_min.is_nan() || y_max.is_nan() || y_min >= y_max {
            return Err(ConfigError::InvalidRange {
                low: y_min,
                high: y_max,
            });
        }
        if self.x_chars < MIN_GRAPH_WIDTH || self.y_chars < MIN_GRAPH_HEIGHT {
            return Err(ConfigError::GraphTooSmall {
                want_w: MIN_GRAPH_WIDTH,
                want_h: MIN_GRAPH_HEIGHT,
                got_w: self.x_chars,
                got_h: self.y_chars,
            });
        }
        Ok(Config {
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle,
            y_range: (y_min, y_max),
            x_labels: self.x_labels,
            x_chars: self.x_chars,
            y_chars: self.y_chars,
            color: self.color.unwrap_or_else(AnsiCode::industrial_orange),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected() {
        let err = Config::builder(20, 10).y_range((5.0, 1.0)).build();
        assert!(matches!(err, Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn missing_range_is_reported() {
        let err = Config::builder(20, 10).build();
        assert!(matches!(err, Err(ConfigError::MissingField("y_min"))));
    }

    #[test]
    fn tiny_graph_is_rejected() {
        let err = Config::builder(3, 2).y_range((0.0, 1.0)).build();
        assert!(matches!(err, Err(ConfigError::GraphTooSmall { .. })));
    }

    #[test]
    fn defaults_fill_title_and_color() {
        let cfg = Config::builder(20, 10).y_range((0.0, 1.0)).build().unwrap();
        assert!(cfg.title.is_empty());
        assert_eq!(cfg.color, AnsiCode::industrial_orange());
    }
}
