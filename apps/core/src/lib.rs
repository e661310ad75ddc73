// Shared logic for the COVID-19 tracker front ends.
// Nothing in here touches the network or a terminal, so it builds for wasm too.

pub mod api;
pub mod domain;
pub mod format;
pub mod history;
pub mod map;
pub mod sort;
pub mod view;

pub use api::{ApiError, CountryInfo, CountryStat, Endpoint, GlobalStat, StatCounts, StatsSnapshot};
pub use domain::{CasesType, CountryOption, Selection, WORLDWIDE};
pub use view::{ApplyOutcome, FetchRequest, InfoCard, ViewState};
