//! Location resolution: turn a free-form query into a [`Point`].
//!
//! Strategies are tried in order and the first success wins:
//! 1. `lat,lon` coordinates, answered locally
//! 2. postal codes, tried country by country with failures swallowed
//! 3. free-text geocoding of the best single match

use crate::{
    error::WeatherError,
    models::Point,
    services::openweather::{GeoPlace, OpenWeatherClient},
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Longest query still treated as a postal code
const MAX_POSTAL_CODE_LEN: usize = 10;

static COORDINATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*,\s*([+-]?\d+(?:\.\d+)?)\s*$")
        .expect("valid coordinate pattern")
});

/// Which strategy produced a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// `lat`/`lon` query parameters supplied by the caller
    Explicit,
    Coordinates,
    Postal,
    Direct,
}

impl ResolutionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStrategy::Explicit => "explicit",
            ResolutionStrategy::Coordinates => "coordinates",
            ResolutionStrategy::Postal => "postal",
            ResolutionStrategy::Direct => "direct",
        }
    }
}

/// A resolved point and how it was found
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub point: Point,
    pub strategy: ResolutionStrategy,
}

/// Parse `"<lat>,<lon>"`, accepting only in-range values
pub fn parse_coordinates(text: &str) -> Option<(f64, f64)> {
    let captures = COORDINATE_PATTERN.captures(text)?;
    let lat: f64 = captures[1].parse().ok()?;
    let lon: f64 = captures[2].parse().ok()?;

    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)).then_some((lat, lon))
}

/// Postal heuristic: has a digit, no comma, at most ten characters
pub fn looks_like_postal_code(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && !text.contains(',')
        && text.chars().count() <= MAX_POSTAL_CODE_LEN
}

/// Countries to try for a postal lookup: the hint first, then the fallbacks,
/// each at most once
pub fn postal_candidates<'a>(hint: &'a str, fallbacks: &'a [String]) -> Vec<&'a str> {
    let mut candidates: Vec<&str> = Vec::with_capacity(fallbacks.len() + 1);
    for country in std::iter::once(hint).chain(fallbacks.iter().map(String::as_str)) {
        if !country.is_empty() && !candidates.iter().any(|c| c.eq_ignore_ascii_case(country)) {
            candidates.push(country);
        }
    }
    candidates
}

/// "name, state, country" with absent or empty parts left out
pub fn display_name(place: &GeoPlace) -> String {
    [&place.name, &place.state, &place.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves free-form queries against the geocoding API
#[derive(Clone)]
pub struct LocationResolver {
    client: OpenWeatherClient,
    default_country: String,
    postal_fallback_countries: Vec<String>,
}

impl LocationResolver {
    pub fn new(
        client: OpenWeatherClient,
        default_country: impl Into<String>,
        postal_fallback_countries: Vec<String>,
    ) -> Self {
        Self {
            client,
            default_country: default_country.into(),
            postal_fallback_countries,
        }
    }

    /// Resolve `query` to a point, trying postal lookups in `country_hint`
    /// (or the configured default) first
    pub async fn resolve(
        &self,
        query: &str,
        country_hint: Option<&str>,
    ) -> Result<Resolution, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::LocationNotFound);
        }

        if let Some((lat, lon)) = parse_coordinates(query) {
            return Ok(Resolution {
                point: Point::from_coordinates(lat, lon),
                strategy: ResolutionStrategy::Coordinates,
            });
        }

        if looks_like_postal_code(query) {
            let hint = country_hint.unwrap_or(self.default_country.as_str());
            if let Some(point) = self.resolve_postal(query, hint).await {
                return Ok(Resolution {
                    point,
                    strategy: ResolutionStrategy::Postal,
                });
            }
        }

        self.resolve_direct(query).await.map(|point| Resolution {
            point,
            strategy: ResolutionStrategy::Direct,
        })
    }

    async fn resolve_postal(&self, code: &str, hint: &str) -> Option<Point> {
        for country in postal_candidates(hint, &self.postal_fallback_countries) {
            match self.client.postal_code(code, country).await {
                Ok(place) => {
                    let name = place.name.as_deref().unwrap_or("ZIP");
                    return Some(Point::new(
                        format!("{name} ({country})"),
                        place.lat,
                        place.lon,
                    ));
                }
                Err(e) => {
                    debug!(postal_code = %code, country, error = %e, "Postal lookup missed");
                }
            }
        }
        None
    }

    async fn resolve_direct(&self, query: &str) -> Result<Point, WeatherError> {
        let places = match self.client.direct(query).await {
            Ok(places) => places,
            Err(WeatherError::Upstream { status, .. }) => {
                debug!(query, status, "Direct geocoding returned non-success status");
                return Err(WeatherError::LocationNotFound);
            }
            Err(e) => return Err(e),
        };

        let best = places.first().ok_or(WeatherError::LocationNotFound)?;
        Ok(Point::new(display_name(best), best.lat, best.lon))
    }
}
