use time::{OffsetDateTime, UtcOffset, macros::format_description};

pub mod auth;
pub mod checkin;
pub mod comment;
pub mod feed;
pub mod game;
pub mod health;
pub mod sse;
pub mod validation;
pub mod ws;

/// Render a timestamp as fixed-width RFC 3339 UTC with millisecond precision, so that
/// stored timestamps sort lexically in chronological order.
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
