//! Number and text shaping for report fields.

/// Round to one decimal place
///
/// Rounds the exact stored value, with exact ties going to the even digit:
/// 20.25 becomes 20.2, while 1.15 (stored just below) becomes 1.1.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A word starts at any letter that follows a non-letter, so
/// "light intensity drizzle" becomes "Light Intensity Drizzle".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}
