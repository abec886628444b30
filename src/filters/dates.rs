//! Date renderings for page bodies, feeds, and archive headings.

use crate::utils::date::DateTimeUtc;

/// Long-form date: "January 5, 2024".
pub fn readable_date(date: &DateTimeUtc) -> String {
    date.readable()
}

/// Date part only, fields joined by `separator`: "2024-01-05".
pub fn iso_date_only(date: &DateTimeUtc, separator: &str) -> String {
    format!(
        "{:04}{sep}{:02}{sep}{:02}",
        date.year,
        date.month,
        date.day,
        sep = separator
    )
}

/// RFC 822 timestamp for feed `pubDate` elements.
pub fn rfc822_date(date: &DateTimeUtc) -> String {
    date.to_rfc2822()
}

/// Whether `now` lies more than three calendar years past `date`.
///
/// Used to badge aging posts whose content may no longer hold up.
pub fn is_old_post(date: &DateTimeUtc, now: &DateTimeUtc) -> bool {
    let mut cutoff = *date;
    cutoff.year = date.year + 3;
    // A Feb 29 anniversary lands on Feb 28 in common years
    if cutoff.month == 2 && cutoff.day == 29 && !DateTimeUtc::is_leap_year(cutoff.year) {
        cutoff.day = 28;
    }
    *now > cutoff
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_date() {
        let date = DateTimeUtc::from_ymd(2024, 1, 5);
        assert_eq!(readable_date(&date), "January 5, 2024");
    }

    #[test]
    fn test_iso_date_only_pads_fields() {
        let date = DateTimeUtc::from_ymd(2024, 1, 5);
        assert_eq!(iso_date_only(&date, "-"), "2024-01-05");
        assert_eq!(iso_date_only(&date, "/"), "2024/01/05");
    }

    #[test]
    fn test_rfc822_date() {
        let date = DateTimeUtc::new(2024, 1, 5, 9, 30, 0);
        assert_eq!(rfc822_date(&date), "Fri, 05 Jan 2024 09:30:00 GMT");
    }

    #[test]
    fn test_is_old_post_boundary() {
        let date = DateTimeUtc::from_ymd(2020, 5, 10);
        // Exactly three years is not yet old
        assert!(!is_old_post(&date, &DateTimeUtc::from_ymd(2023, 5, 10)));
        assert!(is_old_post(&date, &DateTimeUtc::from_ymd(2023, 5, 11)));
        assert!(!is_old_post(&date, &DateTimeUtc::from_ymd(2022, 5, 10)));
    }

    #[test]
    fn test_is_old_post_leap_day() {
        let date = DateTimeUtc::from_ymd(2020, 2, 29);
        assert!(!is_old_post(&date, &DateTimeUtc::from_ymd(2023, 2, 28)));
        assert!(is_old_post(&date, &DateTimeUtc::from_ymd(2023, 3, 1)));
    }

    #[test]
    fn test_is_old_post_compares_time_of_day() {
        let date = DateTimeUtc::new(2020, 5, 10, 12, 0, 0);
        assert!(!is_old_post(&date, &DateTimeUtc::new(2023, 5, 10, 12, 0, 0)));
        assert!(is_old_post(&date, &DateTimeUtc::new(2023, 5, 10, 12, 0, 1)));
    }
}
