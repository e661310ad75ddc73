//! Response models and endpoints of the disease.sh v3 COVID-19 API.
//!
//! Every numeric field is optional and parsed leniently: `null`, missing
//! keys, negative corrections and floats are all accepted so a single odd
//! record never fails a whole payload.

use crate::domain::{CasesType, Selection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";
pub const DEFAULT_HISTORY_DAYS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Global,
    Countries,
    Country(String),
    Historical { last_days: u32 },
}

impl Endpoint {
    pub fn for_selection(selection: &Selection) -> Self {
        match selection {
            Selection::Worldwide => Self::Global,
            Selection::Country(code) => Self::Country(code.clone()),
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::Global => format!("{base}/all"),
            Self::Countries => format!("{base}/countries"),
            Self::Country(code) => format!("{base}/countries/{}", urlencoding::encode(code)),
            Self::Historical { last_days } => format!("{base}/historical/all?lastdays={last_days}"),
        }
    }
}

/// The six counters every statistics record carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCounts {
    #[serde(default, deserialize_with = "lenient_count")]
    pub cases: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub today_cases: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub recovered: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub today_recovered: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub deaths: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub today_deaths: Option<u64>,
}

impl StatCounts {
    pub const fn total(&self, cases_type: CasesType) -> Option<u64> {
        match cases_type {
            CasesType::Cases => self.cases,
            CasesType::Recovered => self.recovered,
            CasesType::Deaths => self.deaths,
        }
    }

    pub const fn today(&self, cases_type: CasesType) -> Option<u64> {
        match cases_type {
            CasesType::Cases => self.today_cases,
            CasesType::Recovered => self.today_recovered,
            CasesType::Deaths => self.today_deaths,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub long: Option<f64>,
    #[serde(default)]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country_info: CountryInfo,
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(flatten)]
    pub counts: StatCounts,
}

impl CountryStat {
    pub fn iso2(&self) -> Option<&str> {
        self.country_info.iso2.as_deref().filter(|code| !code.is_empty())
    }

    /// The code used to select this country: ISO2 when the API has one,
    /// otherwise the name, which the single-country endpoint also accepts.
    pub fn selection_code(&self) -> &str {
        self.iso2().unwrap_or(&self.country)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.country_info.lat?, self.country_info.long?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStat {
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub affected_countries: Option<u64>,
    #[serde(flatten)]
    pub counts: StatCounts,
}

/// The record backing the info cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum StatsSnapshot {
    Global(GlobalStat),
    Country(CountryStat),
}

impl StatsSnapshot {
    pub const fn counts(&self) -> &StatCounts {
        match self {
            Self::Global(global) => &global.counts,
            Self::Country(country) => &country.counts,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Global(_) => "Worldwide",
            Self::Country(country) => &country.country,
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self {
            Self::Global(_) => None,
            Self::Country(country) => country.coordinates(),
        }
    }

    pub const fn updated(&self) -> Option<i64> {
        match self {
            Self::Global(global) => global.updated,
            Self::Country(country) => country.updated,
        }
    }
}

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(Into::into)
}

/// Decodes a global or single-country payload depending on what was asked for.
pub fn decode_snapshot(selection: &Selection, body: &[u8]) -> Result<StatsSnapshot, ApiError> {
    match selection {
        Selection::Worldwide => decode(body).map(StatsSnapshot::Global),
        Selection::Country(_) => decode(body).map(StatsSnapshot::Country),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|value| match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_i64().map(|signed| signed.max(0).unsigned_abs()))
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.is_finite())
                    .map(|float| float.max(0.0).round() as u64)
            }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
