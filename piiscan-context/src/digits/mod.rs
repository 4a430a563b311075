// piiscan-context/src/digits/mod.rs

/// Strips every non-digit character from the input.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns true if a digit string has an obvious placeholder shape:
/// too short, a single repeated digit, well-known filler runs, or a full
/// ascending/descending sequence.
pub fn looks_like_placeholder(digits: &str) -> bool {
    if digits.len() < 7 {
        return true;
    }
    let mut chars = digits.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }
    if digits.contains("000000") || digits.contains("123456") || digits.contains("987654") {
        return true;
    }
    matches!(digits, "1234567890" | "0987654321")
}
