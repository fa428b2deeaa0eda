use chrono::{DateTime, Utc};

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathtermind_core::time::fixed_now;

    #[test]
    fn formats_calendar_date() {
        assert_eq!(format_date(fixed_now()), "2023-11-14");
    }
}
