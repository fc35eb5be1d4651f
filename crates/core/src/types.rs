use chrono::{Duration, Utc};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current time, guaranteed to be strictly after `previous`.
///
/// Two mutations landing within the same clock tick would otherwise store
/// equal `updated` values. Postgres keeps microseconds, so the bump is one
/// microsecond.
pub fn timestamp_after(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_after_is_strictly_later() {
        let future = Utc::now() + Duration::hours(1);
        let next = timestamp_after(future);
        assert!(next > future);
        assert_eq!(next - future, Duration::microseconds(1));
    }

    #[test]
    fn timestamp_after_past_value_is_now() {
        let past = Utc::now() - Duration::hours(1);
        let next = timestamp_after(past);
        assert!(next > past + Duration::minutes(59));
    }
}
