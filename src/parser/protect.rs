//! Code-region protection.
//!
//! Line scanning splits blocks on `\n` and the interpreter later folds
//! whitespace runs. Both would mangle `<code>` and `<pre>` samples, so
//! their spaces and newlines are swapped for private control characters
//! before scanning and swapped back once the text is final.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Stand-in for every newline while code regions are located.
pub const NEWLINE: char = '\u{1}';
/// Stand-in for a space inside a code region.
pub const CODE_SPACE: char = '\u{2}';
/// Stand-in for a newline inside a code region.
pub const CODE_NEWLINE: char = '\u{3}';

static RE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<code>(.*?)</code>").unwrap());

static RE_PRE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<pre>(.*?)</pre>").unwrap());

/// Protect `<code>` and `<pre>` regions of a raw block.
///
/// Newlines outside the regions come back as real newlines.
pub fn protect(block: &str) -> String {
    let flattened = block.replace('\n', &NEWLINE.to_string());
    let coded = RE_CODE.replace_all(&flattened, |caps: &Captures| wrap("code", &caps[1]));
    let pre = RE_PRE.replace_all(&coded, |caps: &Captures| wrap("pre", &caps[1]));
    pre.replace(NEWLINE, "\n")
}

/// Swap the code-region stand-ins back to real whitespace.
pub fn restore(text: &str) -> String {
    text.replace(CODE_SPACE, " ").replace(CODE_NEWLINE, "\n")
}

fn wrap(tag: &str, inner: &str) -> String {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let body = inner
        .replace(' ', &CODE_SPACE.to_string())
        .replace(NEWLINE, &CODE_NEWLINE.to_string())
        .replace(&open, "")
        .replace(&close, "")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("{}{}{}", open, body, close)
}
