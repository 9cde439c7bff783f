use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::WindowError;

/// canonical text layout used for comparison and display
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// layout the backend expects for `start_at` / `end_at`
pub const TRANSPORT_FORMAT: &str = "%Y-%m-%dT%H:%M:00";

// every accepted layout exposes the same named groups
const LAYOUTS: [&str; 5] = [
    r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})T(?P<h>\d{2}):(?P<min>\d{2})$",
    r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2}) (?P<h>\d{2}):(?P<min>\d{2})$",
    r"^(?P<y>\d{4})/(?P<m>\d{2})/(?P<d>\d{2}) (?P<h>\d{2}):(?P<min>\d{2})$",
    r"^(?P<y>\d{4})(?P<m>\d{2})(?P<d>\d{2}) (?P<h>\d{2}):(?P<min>\d{2})$",
    r"^(?P<d>\d{2})/(?P<m>\d{2})/(?P<y>\d{4}) (?P<h>\d{2}):(?P<min>\d{2})$",
];

fn layouts() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        LAYOUTS
            .iter()
            .map(|p| Regex::new(p).expect("date layout pattern must compile"))
            .collect()
    })
}

/// Parse form text in any accepted layout into a zone-naive, minute-precision
/// date-time. Impossible calendar values (month 13, Feb 30, 24:00) are rejected.
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, WindowError> {
    let raw = raw.trim();
    let cap = layouts()
        .iter()
        .find_map(|re| re.captures(raw))
        .ok_or(WindowError::InvalidDate)?;

    let num = |name: &str| -> Result<u32, WindowError> {
        cap[name].parse().map_err(|_| WindowError::InvalidDate)
    };
    let year = cap["y"].parse::<i32>().map_err(|_| WindowError::InvalidDate)?;

    let (month, day, hour, minute) = (num("m")?, num("d")?, num("h")?, num("min")?);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or(WindowError::InvalidDate)
}

/// Normalize form text into `YYYY-MM-DD HH:mm`.
pub fn normalize(raw: &str) -> Result<String, WindowError> {
    Ok(parse_datetime(raw)?.format(CANONICAL_FORMAT).to_string())
}

/// Normalize form text into the wire layout `YYYY-MM-DDTHH:mm:00`.
pub fn to_transport_format(raw: &str) -> Result<String, WindowError> {
    Ok(convert_to_transport(&parse_datetime(raw)?))
}

pub fn convert_to_transport(dt: &NaiveDateTime) -> String {
    dt.format(TRANSPORT_FORMAT).to_string()
}

pub fn convert_to_canonical(dt: &NaiveDateTime) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}
