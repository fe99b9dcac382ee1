use reqwest::StatusCode;

use crate::error::WeatherError;

pub mod openweather;

/// Map a non-success upstream status to an error kind. Shared by the
/// geocoding and one-call endpoints, which follow the same conventions.
fn classify_status(status: StatusCode, body: &str) -> WeatherError {
    match status.as_u16() {
        401 | 403 => WeatherError::Auth(status.as_u16()),
        429 => WeatherError::RateLimited,
        _ => WeatherError::Unavailable(format!(
            "request failed with status {status}: {}",
            truncate_body(body)
        )),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary; a fixed byte index may land inside a
        // multi-byte character.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
