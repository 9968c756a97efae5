//! Date formatting for the id-ID locale

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

/// Indonesian month names, January first
pub const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Western Indonesia Time (UTC+07:00)
pub fn wib() -> FixedOffset {
    offset_hours(7)
}

/// Build a fixed offset from whole hours, falling back to UTC when the value
/// is out of range
pub fn offset_hours(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or(Utc.fix())
}

/// Long id-ID date, e.g. "19 Oktober 2026"
pub fn format_joined_date(created_at: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = created_at.with_timezone(&offset);
    format!(
        "{} {} {}",
        local.day(),
        MONTHS_ID[local.month0() as usize],
        local.year()
    )
}
