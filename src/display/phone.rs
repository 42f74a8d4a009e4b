/// Markers the data uses for "no number on file"
const NOT_PROVIDED_MARKERS: [&str; 2] = ["未提供", "not provided"];

/// Group a phone number for display: 11 digits as `3 4 4`, 10 digits as `3 4 3`.
///
/// Anything else (other lengths, non-digits) is returned unchanged.
///
/// # Examples
///
/// ```
/// use scan_move::display::format_phone;
///
/// assert_eq!(format_phone("13953128666"), "139 5312 8666");
/// assert_eq!(format_phone("12345"), "12345");
/// ```
pub fn format_phone(number: &str) -> String {
    let all_digits = !number.is_empty() && number.chars().all(|c| c.is_ascii_digit());
    match number.len() {
        10 | 11 if all_digits => {
            format!("{} {} {}", &number[..3], &number[3..7], &number[7..])
        }
        _ => number.to_string(),
    }
}

/// Whether a stored number can actually be dialled
pub fn is_dialable(number: &str) -> bool {
    let trimmed = number.trim();
    !trimmed.is_empty() && !NOT_PROVIDED_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m))
}

/// `tel:` URI for a stored number, whitespace removed
pub fn tel_uri(number: &str) -> String {
    let compact: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eleven_digits() {
        assert_eq!(format_phone("13953128666"), "139 5312 8666");
        assert_eq!(format_phone("15555555555"), "155 5555 5555");
    }

    #[test]
    fn test_format_ten_digits() {
        assert_eq!(format_phone("0531886666"), "053 1886 666");
    }

    #[test]
    fn test_other_lengths_unchanged() {
        assert_eq!(format_phone("12345"), "12345");
        assert_eq!(format_phone("123456789012"), "123456789012");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_non_digits_unchanged() {
        assert_eq!(format_phone("139-5312-866"), "139-5312-866");
        assert_eq!(format_phone("+8613953128"), "+8613953128");
        assert_eq!(format_phone("１３９５３１２８６６６"), "１３９５３１２８６６６");
    }

    #[test]
    fn test_is_dialable() {
        assert!(is_dialable("13953128666"));
        assert!(is_dialable("110"));
        assert!(!is_dialable(""));
        assert!(!is_dialable("   "));
        assert!(!is_dialable("未提供"));
        assert!(!is_dialable("Not Provided"));
    }

    #[test]
    fn test_tel_uri() {
        assert_eq!(tel_uri("15555555555"), "tel:15555555555");
        assert_eq!(tel_uri("139 5312 8666"), "tel:13953128666");
    }
}
