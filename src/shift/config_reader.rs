use crate::shift::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    pub title: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// What ends up in the `config` section of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: Option<String>,
    #[serde(rename = "yearA")]
    pub year_a: String,
    #[serde(rename = "yearB")]
    pub year_b: String,
    #[serde(rename = "sortMode")]
    pub sort_mode: String,
    #[serde(rename = "displayCount")]
    pub display_count: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct YearSource {
    pub label: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Sources {
    #[serde(rename = "yearA")]
    pub year_a: YearSource,
    #[serde(rename = "yearB")]
    pub year_b: YearSource,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(rename = "sortMode")]
    pub sort_mode: Option<String>,
    // Either a number or a string such as "all".
    #[serde(rename = "displayCount")]
    pub display_count: Option<JSValue>,
}

impl DisplaySettings {
    pub fn sort_mode(&self) -> ShiftResult<SortMode> {
        match &self.sort_mode {
            None => Ok(SortMode::Alphabetical),
            Some(s) => SortMode::parse(s).context(InvalidSortModeSnafu { mode: s.clone() }),
        }
    }

    pub fn display_count(&self) -> ShiftResult<DisplayCount> {
        let s = match &self.display_count {
            None => return Ok(DisplayCount::All),
            Some(JSValue::String(s)) => s.clone(),
            Some(JSValue::Number(n)) => match n.as_u64() {
                Some(x) => x.to_string(),
                // Accept integral floats such as 10.0
                None => match n.as_f64() {
                    Some(f) if f >= 0.0 && f.fract() == 0.0 => (f as u64).to_string(),
                    _ => n.to_string(),
                },
            },
            Some(x) => x.to_string(),
        };
        DisplayCount::parse(s.as_str()).context(InvalidDisplayCountSnafu { count: s })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ShiftConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    pub sources: Sources,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl ShiftConfig {
    pub fn output_config(&self) -> ShiftResult<OutputConfig> {
        Ok(OutputConfig {
            title: self.output_settings.title.clone(),
            year_a: self.sources.year_a.label.clone().unwrap_or_else(|| "A".to_string()),
            year_b: self.sources.year_b.label.clone().unwrap_or_else(|| "B".to_string()),
            sort_mode: self.display.sort_mode()?.name().to_string(),
            display_count: self.display.display_count()?.name(),
        })
    }
}

pub fn read_config(path: &str) -> ShiftResult<ShiftConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ShiftConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> ShiftResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
