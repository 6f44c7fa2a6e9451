//! Keyword classifier that suggests a category for an expense description.
//!
//! The rules form an ordered table and the first matching rule wins, so rule
//! order matters. "bookshop" matches the Study rule ("book") before the
//! Shopping rule ("shop") ever gets checked.

/// The category suggested when no rule matches.
pub const FALLBACK_CATEGORY: &str = "Others";

/// The ordered rule table. Each entry pairs a category name with the keywords
/// that select it.
const CLASSIFIER_RULES: [(&str, &[&str]); 5] = [
    (
        "Food & Drinks",
        &[
            "food",
            "kfc",
            "starbucks",
            "pizza",
            "dinner",
            "lunch",
            "cafe",
            "bread",
            "apple",
            "fruit",
            "market",
            "grocery",
            "meat",
        ],
    ),
    (
        "Transportation",
        &[
            "grab", "taxi", "bus", "parking", "gas", "fuel", "uber", "flight",
        ],
    ),
    ("House", &["rent"]),
    (
        "Study",
        &[
            "study", "book", "course", "tutor", "pen", "library", "tuition", "notebook", "school",
        ],
    ),
    (
        "Shopping",
        &[
            "shop",
            "shoes",
            "clothes",
            "shirt",
            "mall",
            "iphone",
            "store",
            "supermarket",
        ],
    ),
];

/// Suggest a category for an expense description.
///
/// The description is lower-cased and stripped of everything except ASCII
/// letters and spaces, then checked for keyword substrings against the rule
/// table in order. Returns [FALLBACK_CATEGORY] if no rule matches.
pub fn classify_category(description: &str) -> &'static str {
    let cleaned = clean_description(description);

    CLASSIFIER_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| cleaned.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

fn clean_description(description: &str) -> String {
    description
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect()
}
