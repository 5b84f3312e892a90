use regex::Regex;
use std::sync::OnceLock;

/// Russian mobile numbers: "8" or "+7", then either "(XXX)XXX-XX-XX" or ten bare ASCII digits.
static NUMBER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_PATTERN.get_or_init(|| {
        Regex::new(r"^(?:8|\+7)(?:\([0-9]{3}\)[0-9]{3}-[0-9]{2}-[0-9]{2}|[0-9]{10})$")
            .expect("Invalid phone number regex pattern")
    })
}

/// Returns true when `number` does NOT match the accepted format and must be rejected.
pub fn is_invalid_number(number: &str) -> bool {
    !number_regex().is_match(number)
}

pub fn is_valid_number(number: &str) -> bool {
    !is_invalid_number(number)
}
