//! Tag tokenizer for delimited attribute strings.
//!
//! A raw attribute such as `"免疫学関連, ウイルス学関連、腫瘍学"` is split on an
//! ASCII comma (swallowing any whitespace that follows it) or on the
//! ideographic comma `、`. Entries that are blank after trimming are dropped; everything else
//! is kept exactly as written, without trimming or case folding.
//!
//! The relevance builder and the predicate evaluator both go through
//! [`split_tags`], so "the same tag" means the same thing everywhere.

/// The wide-form comma treated as a delimiter (ideographic comma, U+3001).
pub const WIDE_COMMA: char = '、';

/// Tokenize an optional raw attribute. `None` yields no tags.
pub fn tokenize(raw: Option<&str>) -> Vec<String> {
    raw.map(split_tags).unwrap_or_default()
}

/// Split a raw delimited string into its tags, in order of appearance.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ',' {
            push_tag(&mut tags, &mut current);
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
        } else if c == WIDE_COMMA {
            push_tag(&mut tags, &mut current);
        } else {
            current.push(c);
        }
    }
    push_tag(&mut tags, &mut current);

    tags
}

fn push_tag(tags: &mut Vec<String>, current: &mut String) {
    let tag = std::mem::take(current);
    if !tag.trim().is_empty() {
        tags.push(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_ascii_and_wide_commas() {
        assert_eq!(tokenize(Some("A, B、C")), vec!["A", "B", "C"]);
    }

    #[test]
    fn fullwidth_comma_is_part_of_the_tag() {
        assert_eq!(split_tags("A，B"), vec!["A，B"]);
        assert_eq!(split_tags("A，B、C"), vec!["A，B", "C"]);
    }

    #[test]
    fn empty_and_missing_input_yield_nothing() {
        assert!(tokenize(Some("")).is_empty());
        assert!(tokenize(None).is_empty());
    }

    #[test]
    fn blank_entries_are_dropped() {
        assert_eq!(split_tags("A,, ,B,"), vec!["A", "B"]);
        assert_eq!(split_tags("、、A、 、"), vec!["A"]);
    }

    #[test]
    fn whitespace_after_ascii_comma_is_swallowed() {
        assert_eq!(split_tags("A,\t  B"), vec!["A", "B"]);
        // Ideographic space counts as whitespace too.
        assert_eq!(split_tags("A,\u{3000}B"), vec!["A", "B"]);
    }

    #[test]
    fn retained_entries_are_not_normalized() {
        assert_eq!(split_tags("Alpha ,beta"), vec!["Alpha ", "beta"]);
        assert_eq!(split_tags("A、 B"), vec!["A", " B"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(split_tags("X,X,Y"), vec!["X", "X", "Y"]);
    }

    #[test]
    fn single_tag_without_delimiter() {
        assert_eq!(split_tags("造血器腫瘍学・造血幹細胞・造血発生関連"), vec!["造血器腫瘍学・造血幹細胞・造血発生関連"]);
    }
}
