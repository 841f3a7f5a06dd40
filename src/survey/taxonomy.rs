// Rating taxonomy for satisfaction surveys
// Maps the five literal rating strings to ticket tags and human-readable labels

use std::fmt;

/// Satisfaction rating on the closed "1".."5" scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    VeryDissatisfied,
    Dissatisfied,
    Neutral,
    Satisfied,
    VerySatisfied,
}

/// Polarity bucket a rating falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::VeryDissatisfied,
        Rating::Dissatisfied,
        Rating::Neutral,
        Rating::Satisfied,
        Rating::VerySatisfied,
    ];

    /// Parse one of the literal rating strings "1".."5"
    ///
    /// Anything else (including " 5", "05" and "5.0") is outside the domain.
    pub fn parse(raw: &str) -> Option<Rating> {
        match raw {
            "1" => Some(Rating::VeryDissatisfied),
            "2" => Some(Rating::Dissatisfied),
            "3" => Some(Rating::Neutral),
            "4" => Some(Rating::Satisfied),
            "5" => Some(Rating::VerySatisfied),
            _ => None,
        }
    }

    pub fn score(self) -> u8 {
        match self {
            Rating::VeryDissatisfied => 1,
            Rating::Dissatisfied => 2,
            Rating::Neutral => 3,
            Rating::Satisfied => 4,
            Rating::VerySatisfied => 5,
        }
    }

    /// Internal satisfaction tag written to the rating custom field
    pub fn tag(self) -> &'static str {
        match self {
            Rating::VeryDissatisfied => "very_dissatisfied",
            Rating::Dissatisfied => "dissatisfied",
            Rating::Neutral => "neutral",
            Rating::Satisfied => "satisfied",
            Rating::VerySatisfied => "very_satisfied",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Rating::VeryDissatisfied => "Very dissatisfied",
            Rating::Dissatisfied => "Dissatisfied",
            Rating::Neutral => "Neutral",
            Rating::Satisfied => "Satisfied",
            Rating::VerySatisfied => "Very satisfied",
        }
    }

    pub fn sentiment(self) -> Sentiment {
        match self {
            Rating::VeryDissatisfied | Rating::Dissatisfied => Sentiment::Negative,
            Rating::Neutral => Sentiment::Neutral,
            Rating::Satisfied | Rating::VerySatisfied => Sentiment::Positive,
        }
    }

    /// Numeric tag followed by the polarity tag, e.g. ["csat-5", "csat-positive"]
    pub fn sentiment_tags(self) -> [&'static str; 2] {
        let numeric = match self {
            Rating::VeryDissatisfied => "csat-1",
            Rating::Dissatisfied => "csat-2",
            Rating::Neutral => "csat-3",
            Rating::Satisfied => "csat-4",
            Rating::VerySatisfied => "csat-5",
        };
        [numeric, self.sentiment().tag()]
    }
}

impl Sentiment {
    pub fn tag(self) -> &'static str {
        match self {
            Sentiment::Negative => "csat-negative",
            Sentiment::Neutral => "csat-neutral",
            Sentiment::Positive => "csat-positive",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score())
    }
}

/// Internal tag for a raw rating, or "" outside "1".."5"
pub fn tag_for(rating: &str) -> &'static str {
    Rating::parse(rating).map(Rating::tag).unwrap_or("")
}

/// Sentiment tags for a raw rating, or an empty list outside "1".."5"
pub fn sentiment_tags_for(rating: &str) -> Vec<&'static str> {
    Rating::parse(rating)
        .map(|r| r.sentiment_tags().to_vec())
        .unwrap_or_default()
}

/// Human-readable label for a raw rating, or "Unknown" outside "1".."5"
pub fn text_for(rating: &str) -> &'static str {
    Rating::parse(rating).map(Rating::text).unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_ratings_map_to_fixed_values() {
        let table: [(&str, &str, &[&str], &str); 5] = [
            ("1", "very_dissatisfied", &["csat-1", "csat-negative"], "Very dissatisfied"),
            ("2", "dissatisfied", &["csat-2", "csat-negative"], "Dissatisfied"),
            ("3", "neutral", &["csat-3", "csat-neutral"], "Neutral"),
            ("4", "satisfied", &["csat-4", "csat-positive"], "Satisfied"),
            ("5", "very_satisfied", &["csat-5", "csat-positive"], "Very satisfied"),
        ];

        for (rating, tag, tags, text) in table {
            assert_eq!(tag_for(rating), tag, "tag for {}", rating);
            assert_eq!(sentiment_tags_for(rating), tags.to_vec(), "tags for {}", rating);
            assert_eq!(text_for(rating), text, "text for {}", rating);
        }
    }

    #[test]
    fn test_out_of_domain_ratings_map_to_empty_values() {
        for rating in ["0", "", "6", "five", " 5", "05", "5.0", "-1"] {
            assert_eq!(tag_for(rating), "");
            assert!(sentiment_tags_for(rating).is_empty());
            assert_eq!(text_for(rating), "Unknown");
        }
    }

    #[test]
    fn test_parse_and_display_agree() {
        for rating in Rating::ALL {
            let raw = rating.to_string();
            assert_eq!(Rating::parse(&raw), Some(rating));
            assert_eq!(raw, rating.score().to_string());
        }
    }

    #[test]
    fn test_sentiment_buckets() {
        assert_eq!(Rating::VeryDissatisfied.sentiment(), Sentiment::Negative);
        assert_eq!(Rating::Dissatisfied.sentiment(), Sentiment::Negative);
        assert_eq!(Rating::Neutral.sentiment(), Sentiment::Neutral);
        assert_eq!(Rating::Satisfied.sentiment(), Sentiment::Positive);
        assert_eq!(Rating::VerySatisfied.sentiment(), Sentiment::Positive);
    }

    proptest! {
        // Lookups are total: any string either parses or yields the empty values
        #[test]
        fn prop_lookups_are_total(raw in ".{0,12}") {
            match Rating::parse(&raw) {
                Some(rating) => {
                    prop_assert_eq!(tag_for(&raw), rating.tag());
                    prop_assert_eq!(sentiment_tags_for(&raw).len(), 2);
                    prop_assert_eq!(text_for(&raw), rating.text());
                }
                None => {
                    prop_assert_eq!(tag_for(&raw), "");
                    prop_assert!(sentiment_tags_for(&raw).is_empty());
                    prop_assert_eq!(text_for(&raw), "Unknown");
                }
            }
        }

        #[test]
        fn prop_numbers_outside_one_to_five_are_unknown(n in 6u32..100000) {
            let raw = n.to_string();
            prop_assert_eq!(tag_for(&raw), "");
            prop_assert_eq!(text_for(&raw), "Unknown");
        }
    }
}
