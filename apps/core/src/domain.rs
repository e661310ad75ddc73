use serde::{Deserialize, Serialize};

/// Wire and CLI value of the "no specific country" selection.
pub const WORLDWIDE: &str = "worldwide";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasesType {
    #[default]
    Cases,
    Recovered,
    Deaths,
}

impl CasesType {
    pub const ALL: [Self; 3] = [Self::Cases, Self::Recovered, Self::Deaths];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Recovered => "recovered",
            Self::Deaths => "deaths",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Cases),
            1 => Some(Self::Recovered),
            2 => Some(Self::Deaths),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Cases => 0,
            Self::Recovered => 1,
            Self::Deaths => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cases" => Some(Self::Cases),
            "recovered" => Some(Self::Recovered),
            "deaths" => Some(Self::Deaths),
            _ => None,
        }
    }

    /// Info card title.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cases => "Coronavirus Cases",
            Self::Recovered => "Recovered",
            Self::Deaths => "Deaths",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Cases => Self::Recovered,
            Self::Recovered => Self::Deaths,
            Self::Deaths => Self::Cases,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Cases => Self::Deaths,
            Self::Recovered => Self::Cases,
            Self::Deaths => Self::Recovered,
        }
    }
}

/// Which statistics the dashboard is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Worldwide,
    Country(String),
}

impl Selection {
    /// Blank input and the worldwide sentinel (any case) both mean worldwide.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(WORLDWIDE) {
            Self::Worldwide
        } else {
            Self::Country(value.to_string())
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Worldwide => WORLDWIDE,
            Self::Country(code) => code,
        }
    }

    pub const fn is_worldwide(&self) -> bool {
        matches!(self, Self::Worldwide)
    }
}

/// One entry of the country selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub name: String,
    pub code: String,
}

impl CountryOption {
    pub fn selection(&self) -> Selection {
        Selection::Country(self.code.clone())
    }
}
