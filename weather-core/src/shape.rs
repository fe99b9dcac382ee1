//! Pure reshaping of the raw one-call payload into the simplified structure
//! returned to callers. No I/O and no clock reads: the same input and offset
//! always produce the same output.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

use crate::model::{
    CurrentConditions, DailyEntry, RawCurrent, RawDaily, RawForecast, RawHourly, RawWeather,
    ShapedForecast, WeatherSnapshot, Wind,
};

/// Safety bound on the hourly sequence; upstream already caps at 48.
pub const MAX_HOURLY: usize = 48;

/// Today plus seven days.
pub const MAX_DAILY: usize = 8;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Named time-of-day buckets within a forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayPart {
    Morning,
    Afternoon,
    Evening,
}

impl DayPart {
    const ALL: [DayPart; 3] = [DayPart::Morning, DayPart::Afternoon, DayPart::Evening];

    fn local_hour(self) -> u32 {
        match self {
            DayPart::Morning => 9,
            DayPart::Afternoon => 15,
            DayPart::Evening => 20,
        }
    }

    /// Representative temperature from the daily block, used when no hourly
    /// data covers the day.
    fn day_temperature(self, day: &RawDaily) -> f64 {
        match self {
            DayPart::Morning => day.temp.morn,
            DayPart::Afternoon => day.temp.day,
            DayPart::Evening => day.temp.eve,
        }
    }

    fn day_feels_like(self, day: &RawDaily) -> f64 {
        match self {
            DayPart::Morning => day.feels_like.morn,
            DayPart::Afternoon => day.feels_like.day,
            DayPart::Evening => day.feels_like.eve,
        }
    }
}

/// Shape the full one-call payload into the simplified forecast.
pub fn shape_forecast(raw: &RawForecast, timezone_offset_hours: f64) -> ShapedForecast {
    let offset = offset_from_hours(timezone_offset_hours);

    let hourly_raw = &raw.hourly[..raw.hourly.len().min(MAX_HOURLY)];
    let hourly = hourly_raw.iter().map(|h| shape_hourly(h, offset)).collect();

    let daily = raw
        .daily
        .iter()
        .take(MAX_DAILY)
        .map(|d| shape_day(d, hourly_raw, offset))
        .collect();

    ShapedForecast {
        current: shape_current(&raw.current, timezone_offset_hours),
        hourly,
        daily,
    }
}

/// Shape only the current block; used by the current-weather-only path.
pub fn shape_current(current: &RawCurrent, timezone_offset_hours: f64) -> CurrentConditions {
    let offset = offset_from_hours(timezone_offset_hours);

    CurrentConditions {
        time: format_local(current.dt, offset),
        temperature: current.temp,
        feels_like: current.feels_like,
        condition: condition(&current.weather),
        humidity: current.humidity,
        wind: Wind {
            speed: current.wind_speed,
            direction_deg: current.wind_deg,
        },
        rain_mm_per_h: current.rain.as_ref().map(|r| r.one_hour),
        clouds: current.clouds,
    }
}

fn shape_day(day: &RawDaily, hourly: &[RawHourly], offset: FixedOffset) -> DailyEntry {
    let date = local_time(day.dt, offset).date_naive();

    let [morning, afternoon, evening] =
        DayPart::ALL.map(|part| part_snapshot(day, date, part, hourly, offset));

    DailyEntry {
        date,
        summary: day.summary.clone().unwrap_or_default(),
        precipitation_probability: day.pop,
        temp_min: day.temp.min,
        temp_max: day.temp.max,
        morning,
        afternoon,
        evening,
    }
}

/// Pick the hourly entry on `date` closest to the bucket's local hour, or
/// fall back to the daily block's representative values when the day lies
/// beyond the hourly horizon.
fn part_snapshot(
    day: &RawDaily,
    date: NaiveDate,
    part: DayPart,
    hourly: &[RawHourly],
    offset: FixedOffset,
) -> WeatherSnapshot {
    let target_local = date.and_time(
        NaiveTime::from_hms_opt(part.local_hour(), 0, 0).unwrap_or_default(),
    );
    let target_ts = target_local.and_utc().timestamp() - i64::from(offset.local_minus_utc());

    let nearest = hourly
        .iter()
        .filter(|h| local_time(h.dt, offset).date_naive() == date)
        .min_by_key(|h| (h.dt - target_ts).abs());

    match nearest {
        Some(hour) => shape_hourly(hour, offset),
        None => WeatherSnapshot {
            time: target_local.format(TIME_FORMAT).to_string(),
            temperature: part.day_temperature(day),
            feels_like: part.day_feels_like(day),
            condition: condition(&day.weather),
            humidity: day.humidity,
            wind: Wind {
                speed: day.wind_speed,
                direction_deg: day.wind_deg,
            },
            pop: day.pop,
            clouds: day.clouds,
        },
    }
}

fn shape_hourly(hour: &RawHourly, offset: FixedOffset) -> WeatherSnapshot {
    WeatherSnapshot {
        time: format_local(hour.dt, offset),
        temperature: hour.temp,
        feels_like: hour.feels_like,
        condition: condition(&hour.weather),
        humidity: hour.humidity,
        wind: Wind {
            speed: hour.wind_speed,
            direction_deg: hour.wind_deg,
        },
        pop: hour.pop,
        clouds: hour.clouds,
    }
}

fn condition(weather: &[RawWeather]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Convert fractional hours to a fixed offset, clamped to the valid range.
fn offset_from_hours(hours: f64) -> FixedOffset {
    let secs = (hours * 3600.0).round() as i32;
    FixedOffset::east_opt(secs.clamp(-86_399, 86_399)).unwrap_or_else(|| Utc.fix())
}

fn local_time(ts: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&offset)
}

fn format_local(ts: i64, offset: FixedOffset) -> String {
    local_time(ts, offset).format(TIME_FORMAT).to_string()
}
