//! Tag tokenizer: splits a protected block into prose and `@tag` pairs.

use super::protect;
use crate::model::RawTag;
use regex::Regex;
use std::sync::LazyLock;

// Comment-block left margin: leading asterisks and whitespace.
static RE_MARGIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*\s]+").unwrap());

// `@` at line start or after a non-word char, so `foo@bar.com` stays prose.
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_])@([A-Za-z0-9_]+)(.*)$").unwrap()
});

/// Output of tokenizing one block.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Unmatched lines, each followed by a newline.
    pub text: String,
    /// Tags in source order, duplicates kept.
    pub tags: Vec<RawTag>,
}

/// Tokenize a block whose code regions have already been protected.
pub fn tokenize(protected: &str) -> Tokens {
    let mut tokens = Tokens::default();

    for line in protected.split('\n') {
        let line = RE_MARGIN.replace(line, "");
        match RE_TAG.captures(&line) {
            Some(caps) => tokens.tags.push(RawTag {
                tag: caps[1].to_string(),
                argument: protect::restore(caps[2].trim()),
            }),
            None => {
                tokens.text.push_str(&line);
                tokens.text.push('\n');
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(tag: &str, argument: &str) -> RawTag {
        RawTag {
            tag: tag.to_string(),
            argument: argument.to_string(),
        }
    }

    #[test]
    fn margin_stripped_and_tags_split() {
        let tokens = tokenize("\n * Does a thing.\n * @function bar\n * @memberof Foo\n ");
        assert_eq!(tokens.tags, vec![tag("function", "bar"), tag("memberof", "Foo")]);
        assert_eq!(tokens.text, "\nDoes a thing.\n\n");
    }

    #[test]
    fn email_in_prose_is_not_a_tag() {
        let tokens = tokenize("contact me at foo@bar.com please");
        assert!(tokens.tags.is_empty());
        assert_eq!(tokens.text, "contact me at foo@bar.com please\n");
    }

    #[test]
    fn tag_after_non_word_char() {
        let tokens = tokenize("see {@link Foo}");
        assert_eq!(tokens.tags, vec![tag("link", "Foo}")]);
        assert!(tokens.text.is_empty());
    }

    #[test]
    fn duplicates_kept_in_order() {
        let tokens = tokenize("@param a\n@param b\n@param a");
        let args: Vec<_> = tokens.tags.iter().map(|t| t.argument.as_str()).collect();
        assert_eq!(args, ["a", "b", "a"]);
    }

    #[test]
    fn tag_without_argument() {
        let tokens = tokenize("@name   ");
        assert_eq!(tokens.tags, vec![tag("name", "")]);
    }

    #[test]
    fn code_region_in_argument_restored() {
        let tokens = tokenize(&protect::protect("@shortdesc uses <code>a  b</code>"));
        assert_eq!(tokens.tags, vec![tag("shortdesc", "uses <code>a  b</code>")]);
    }

    #[test]
    fn argument_is_trimmed() {
        let tokens = tokenize("*   @shortdesc   Short one.  ");
        assert_eq!(tokens.tags, vec![tag("shortdesc", "Short one.")]);
    }
}
