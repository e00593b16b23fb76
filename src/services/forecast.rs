//! Forecast aggregation: current conditions plus one summary per local day.

use crate::{
    error::WeatherError,
    models::{CurrentConditions, DailyForecast, Point, Units},
    services::openweather::{
        ConditionPayload, CurrentWeatherPayload, ForecastEntry, ForecastPayload, OpenWeatherClient,
    },
    utils::{round_to_tenth, title_case},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use std::collections::BTreeMap;

/// Most days returned in a report
pub const MAX_FORECAST_DAYS: usize = 5;

/// Local hour whose sample best represents a day
const REPRESENTATIVE_HOUR: i64 = 12;

/// Fetches weather for a point and shapes it into report sections
#[derive(Clone)]
pub struct ForecastAggregator {
    client: OpenWeatherClient,
}

impl ForecastAggregator {
    pub fn new(client: OpenWeatherClient) -> Self {
        Self { client }
    }

    /// Current conditions and up to five daily summaries for `point`
    ///
    /// Both upstream calls are issued concurrently; either failing fails the
    /// whole aggregation.
    pub async fn aggregate(
        &self,
        point: &Point,
        units: Units,
    ) -> Result<(CurrentConditions, Vec<DailyForecast>), WeatherError> {
        let (current, forecast) = tokio::try_join!(
            self.client.current(point.lat, point.lon, units),
            self.client.forecast(point.lat, point.lon, units),
        )?;

        Ok((summarize_current(&current)?, summarize_daily(&forecast)?))
    }
}

/// Shape the `/weather` payload
pub fn summarize_current(payload: &CurrentWeatherPayload) -> Result<CurrentConditions, WeatherError> {
    let condition = primary_condition(&payload.weather, "current weather")?;

    Ok(CurrentConditions {
        temp: round_to_tenth(payload.main.temp),
        feels_like: round_to_tenth(payload.main.feels_like),
        humidity: payload.main.humidity,
        pressure: payload.main.pressure,
        wind_speed: round_to_tenth(payload.wind.speed),
        description: title_case(&condition.description),
        icon: condition.icon.clone(),
    })
}

/// Collapse the 3-hour feed into one entry per local calendar day
pub fn summarize_daily(payload: &ForecastPayload) -> Result<Vec<DailyForecast>, WeatherError> {
    let offset = payload.city.timezone;

    // Feed order is kept inside each bucket so ties go to the earliest sample
    let mut buckets: BTreeMap<NaiveDate, Vec<(NaiveDateTime, &ForecastEntry)>> = BTreeMap::new();
    for entry in &payload.list {
        let local = local_time(entry.dt, offset)?;
        buckets.entry(local.date()).or_default().push((local, entry));
    }

    let mut daily = Vec::with_capacity(MAX_FORECAST_DAYS);
    for (date, samples) in buckets.iter().take(MAX_FORECAST_DAYS) {
        if let Some(summary) = summarize_day(*date, samples)? {
            daily.push(summary);
        }
    }

    Ok(daily)
}

fn summarize_day(
    date: NaiveDate,
    samples: &[(NaiveDateTime, &ForecastEntry)],
) -> Result<Option<DailyForecast>, WeatherError> {
    let Some((_, representative)) = samples
        .iter()
        .min_by_key(|(local, _)| (i64::from(local.hour()) - REPRESENTATIVE_HOUR).abs())
    else {
        return Ok(None);
    };

    let (temp_min, temp_max) = samples.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), (_, entry)| (min.min(entry.main.temp), max.max(entry.main.temp)),
    );
    let condition = primary_condition(&representative.weather, "forecast entry")?;

    Ok(Some(DailyForecast {
        date: date.format("%Y-%m-%d").to_string(),
        temp_min: round_to_tenth(temp_min),
        temp_max: round_to_tenth(temp_max),
        description: title_case(&condition.description),
        icon: condition.icon.clone(),
    }))
}

/// Wall-clock time at the point: the UTC instant shifted by the offset
fn local_time(epoch_seconds: i64, offset_seconds: i64) -> Result<NaiveDateTime, WeatherError> {
    epoch_seconds
        .checked_add(offset_seconds)
        .and_then(|shifted| DateTime::from_timestamp(shifted, 0))
        .map(|shifted| shifted.naive_utc())
        .ok_or_else(|| {
            WeatherError::MalformedPayload(format!(
                "timestamp {epoch_seconds} with offset {offset_seconds} is out of range"
            ))
        })
}

fn primary_condition<'a>(
    conditions: &'a [ConditionPayload],
    context: &str,
) -> Result<&'a ConditionPayload, WeatherError> {
    conditions
        .first()
        .ok_or_else(|| WeatherError::MalformedPayload(format!("{context} has no weather condition")))
}
