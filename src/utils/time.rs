use chrono::{DateTime, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_status_date(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = from_rfc3339(s) {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid calendar date: {}", s))?;
    Ok(midnight.and_utc())
}
