use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Tolka ett appliceringsdatum (flexibelt format).
///
/// Accepterar RFC 3339, datum med tid utan tidszon och rena datum. Tider utan
/// tidszon tolkas som lokal tid.
pub fn parse_application_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f", // 2024-01-15T10:30:00.000
        "%Y-%m-%dT%H:%M:%S",    // 2024-01-15T10:30:00
        "%Y-%m-%d %H:%M:%S",    // 2024-01-15 10:30:00
    ];

    for format in datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return local_to_utc(naive);
        }
    }

    let date_formats = [
        "%Y-%m-%d", // 2024-01-15
        "%d/%m/%Y", // 15/01/2024
    ];

    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).and_then(local_to_utc);
        }
    }

    None
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formatera ett datum för visning (kort form, lokal tid)
pub fn format_short_date(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
