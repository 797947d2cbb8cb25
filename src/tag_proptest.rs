//! Property-based tests for the tag naming convention.
//!
//! These tests use proptest to generate random tag names and verify that
//! `parse_tag` behaves consistently for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::tag::{parse_tag, VersionTag};
    use proptest::prelude::*;

    /// A segment that cannot itself contain the separator
    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9.-]{0,11}"
    }

    proptest! {
        /// Property: parse_tag never panics
        #[test]
        fn parse_tag_never_panics(input in ".*") {
            let _ = parse_tag(&input);
        }

        /// Property: the entity is always segment -2 of a split on "__"
        #[test]
        fn entity_is_second_to_last_segment(input in "[a-z_]{0,24}") {
            let segments: Vec<&str> = input.split("__").collect();
            match parse_tag(&input) {
                Some(tag) => {
                    prop_assert!(segments.len() >= 2);
                    prop_assert_eq!(tag.entity.as_str(), segments[segments.len() - 2]);
                    prop_assert_eq!(tag.sequence.as_str(), segments[segments.len() - 1]);
                }
                None => prop_assert!(segments.len() < 2),
            }
        }

        /// Property: formatting then parsing yields the same tag
        #[test]
        fn display_then_parse_is_identity(
            categories in proptest::collection::vec(segment(), 0..4),
            entity in segment(),
            sequence in segment(),
        ) {
            let tag = VersionTag::new(categories, entity, sequence);
            let parsed = parse_tag(&tag.to_string());
            prop_assert_eq!(parsed, Some(tag));
        }

        /// Property: a tag without the separator is never versioned
        #[test]
        fn tags_without_separator_are_rejected(input in "[a-zA-Z0-9.-]*") {
            prop_assert_eq!(parse_tag(&input), None);
        }
    }
}
