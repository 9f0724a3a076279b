//! Search suggestions backed by a small static list of popular cities.

/// Cities offered as typing suggestions.
pub const POPULAR_CITIES: [&str; 10] = [
    "London",
    "New York",
    "Tokyo",
    "Paris",
    "Dubai",
    "Sydney",
    "Singapore",
    "Los Angeles",
    "Hong Kong",
    "Toronto",
];

/// Filter the popular-city list by case-insensitive substring match.
/// Empty or whitespace-only input yields no suggestions.
pub fn filter(input: &str) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    POPULAR_CITIES
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().contains(&needle))
        .collect()
}
