//! Text shown in the watchface labels

use core::fmt;

/// Two-letter day abbreviations, Monday first
const DAYS: &str = "MOTUWETHFRSASU";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format the time as "14:05" (24-hour) or "2:05" (12-hour, no leading
/// zero) into `buf`.
pub fn format_time(
    buf: &mut [u8],
    hour: u32,
    minute: u32,
    clock_24h: bool,
) -> Result<&str, fmt::Error> {
    if clock_24h {
        format_no_std::show(buf, format_args!("{:02}:{:02}", hour, minute))
    } else {
        let hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format_no_std::show(buf, format_args!("{}:{:02}", hour, minute))
    }
}

/// Format the date as " 8 December" into `buf`. Single-digit days are
/// padded with a space, `month0` is zero-based.
pub fn format_date(buf: &mut [u8], month0: u32, day: u32) -> Result<&str, fmt::Error> {
    let month = MONTHS.get(month0 as usize).copied().unwrap_or("");
    format_no_std::show(buf, format_args!("{:>2} {}", day, month))
}

/// Two-letter abbreviation of a Monday-origin weekday.
pub fn day_abbreviation(weekday: u8) -> &'static str {
    let start = 2 * (weekday as usize % 7);
    &DAYS[start..start + 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32, clock_24h: bool) -> String {
        let mut buf = [0u8; 8];
        format_time(&mut buf, hour, minute, clock_24h)
            .unwrap()
            .to_string()
    }

    fn date(month0: u32, day: u32) -> String {
        let mut buf = [0u8; 16];
        format_date(&mut buf, month0, day).unwrap().to_string()
    }

    #[test]
    fn time_24h() {
        assert_eq!(time(14, 5, true), "14:05");
        assert_eq!(time(9, 30, true), "09:30");
        assert_eq!(time(0, 0, true), "00:00");
    }

    #[test]
    fn time_12h_strips_leading_zero() {
        assert_eq!(time(14, 5, false), "2:05");
        assert_eq!(time(9, 30, false), "9:30");
        assert_eq!(time(23, 59, false), "11:59");
    }

    #[test]
    fn time_12h_midnight_and_noon() {
        assert_eq!(time(0, 7, false), "12:07");
        assert_eq!(time(12, 0, false), "12:00");
    }

    #[test]
    fn date_pads_single_digit_day() {
        assert_eq!(date(11, 8), " 8 December");
        assert_eq!(date(8, 30), "30 September");
        assert_eq!(date(0, 1), " 1 January");
    }

    #[test]
    fn day_abbreviations() {
        let days: Vec<&str> = (0..7).map(day_abbreviation).collect();
        assert_eq!(days, ["MO", "TU", "WE", "TH", "FR", "SA", "SU"]);
    }
}
