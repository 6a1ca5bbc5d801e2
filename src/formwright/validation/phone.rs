/// Live display transform for phone inputs: keeps the first ten digits and
/// lays them out as `(xxx) xxx-xxxx`, growing as digits are typed.
pub fn format_phone(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(10)
        .collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({}", digits),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

pub fn digit_count(input: &str) -> usize {
    input.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_full_number() {
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("555.123.4567"), "(555) 123-4567");
    }

    #[test]
    fn formats_partial_input() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("5"), "(5");
        assert_eq!(format_phone("555"), "(555");
        assert_eq!(format_phone("5551"), "(555) 1");
        assert_eq!(format_phone("555-123"), "(555) 123");
        assert_eq!(format_phone("5551234"), "(555) 123-4");
    }

    #[test]
    fn extra_digits_are_dropped() {
        assert_eq!(format_phone("555123456789"), "(555) 123-4567");
    }

    #[test]
    fn reformatting_is_stable() {
        let once = format_phone("5551234567");
        assert_eq!(format_phone(&once), once);
        assert_eq!(digit_count(&once), 10);
    }
}
