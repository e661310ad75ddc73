//! Map viewport and per-country bubble styling.

use crate::api::CountryStat;
use crate::domain::CasesType;
use serde::Serialize;

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 34.807_46,
    lng: -40.4796,
};
pub const WORLD_ZOOM: u8 = 3;
pub const COUNTRY_ZOOM: u8 = 4;

const METRES_PER_DEGREE: f64 = 111_320.0;
// Longitude visible at zoom 0; every zoom step halves it.
const ZOOM_ZERO_SPAN: f64 = 1440.0;
const MAX_BUBBLE_SHARE: f64 = 0.06;
// Smallest drawn bubble as a share of the visible longitude.
const MIN_BUBBLE_SHARE: f64 = 0.004;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::world()
    }
}

impl MapViewport {
    pub const fn world() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: WORLD_ZOOM,
        }
    }

    pub const fn country(lat: f64, lng: f64) -> Self {
        Self {
            center: LatLng { lat, lng },
            zoom: COUNTRY_ZOOM,
        }
    }

    pub fn lng_span(&self) -> f64 {
        ZOOM_ZERO_SPAN / 2_f64.powi(i32::from(self.zoom))
    }

    pub fn lat_span(&self) -> f64 {
        self.lng_span() / 2.0
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.lng_span() / 2.0;
        [self.center.lng - half, self.center.lng + half]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.lat_span() / 2.0;
        [
            (self.center.lat - half).max(-90.0),
            (self.center.lat + half).min(90.0),
        ]
    }

    /// Largest bubble radius in degrees, so one country can't cover the map.
    pub fn max_bubble_radius(&self) -> f64 {
        self.lng_span() * MAX_BUBBLE_SHARE
    }

    /// Smallest radius worth drawing at this zoom.
    pub fn min_bubble_radius(&self) -> f64 {
        self.lng_span() * MIN_BUBBLE_SHARE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasesTypeStyle {
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
    pub multiplier: f64,
}

impl CasesType {
    pub const fn style(self) -> CasesTypeStyle {
        match self {
            Self::Cases => CasesTypeStyle {
                hex: "#CC1034",
                rgb: (204, 16, 52),
                multiplier: 800.0,
            },
            Self::Recovered => CasesTypeStyle {
                hex: "#7dd71d",
                rgb: (125, 215, 29),
                multiplier: 1200.0,
            },
            Self::Deaths => CasesTypeStyle {
                hex: "#fb4443",
                rgb: (251, 68, 67),
                multiplier: 2000.0,
            },
        }
    }
}

/// Bubble radius in metres: square root of the value scaled per category.
pub fn bubble_radius_metres(value: Option<u64>, cases_type: CasesType) -> f64 {
    (value.unwrap_or(0) as f64).sqrt() * cases_type.style().multiplier
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub name: String,
    pub center: LatLng,
    /// Radius in degrees.
    pub radius: f64,
    pub rgb: (u8, u8, u8),
}

impl Bubble {
    pub fn drawn_radius(&self, viewport: &MapViewport) -> f64 {
        self.radius.max(viewport.min_bubble_radius())
    }
}

/// One bubble per located country with a non-zero value.
pub fn bubbles(countries: &[CountryStat], cases_type: CasesType, viewport: &MapViewport) -> Vec<Bubble> {
    let rgb = cases_type.style().rgb;
    let max_radius = viewport.max_bubble_radius();

    countries
        .iter()
        .filter_map(|country| {
            let (lat, lng) = country.coordinates()?;
            let value = country.counts.total(cases_type).filter(|value| *value > 0)?;
            let radius = bubble_radius_metres(Some(value), cases_type) / METRES_PER_DEGREE;
            Some(Bubble {
                name: country.country.clone(),
                center: LatLng { lat, lng },
                radius: radius.min(max_radius),
                rgb,
            })
        })
        .collect()
}
