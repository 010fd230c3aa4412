//! Link and heading normalization for the merged reference document.
//!
//! The rewrites run in a fixed order over the whole buffer; later rules
//! expect the output of earlier ones (the catch-all class link rule only
//! sees links the specific rules left alone). Patterns keep the exact
//! matching behavior downstream site builds were written against,
//! including greedy/lazy choices.
//!
//! Line terminators are `\n`, `\r`, U+2028 and U+2029. Patterns are
//! written with `.` and `^` and compiled by [`line_pattern`], which makes
//! `.` stop at every terminator and `^` match after any of them, so CRLF
//! pages are cut at the same places as LF pages.
//!
//! Two rules need a negative lookahead on the remainder of the line after
//! a link's opening `](`. The `regex` crate has no lookaround, so those
//! rules carry a [`LinkGuard`]: a candidate whose line tail fails the
//! guard is rejected and the search resumes one byte later, which is
//! exactly how a backtracking engine retries after a failed lookahead.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Opening of a markdown link target.
const LINK_OPEN: &str = "](";

/// Characters that end a line.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Replacement for an unescaped `.`: any character but a terminator.
const NOT_TERMINATOR: &str = r"[^\n\r\u{2028}\u{2029}]";

/// Replacement for an unescaped `^`. The second branch consumes a
/// terminator other than `\n`, which lands on the line start after it;
/// trying it after `(?m:^)` at each offset keeps leftmost-first order.
const LINE_START: &str = r"(?:(?m:^)|[\r\u{2028}\u{2029}])";

/// Compiles `pattern` with terminator-aware `.` and `^`.
///
/// Patterns given here never use `.` or `^` inside a character class, and
/// `^` only follows a lazy `[\s\S]*?` that would otherwise have consumed
/// the terminator.
fn line_pattern(pattern: &str) -> Regex {
    let mut compiled = String::with_capacity(pattern.len() * 2);
    let mut escaped = false;
    for c in pattern.chars() {
        match c {
            '.' if !escaped => compiled.push_str(NOT_TERMINATOR),
            '^' if !escaped => compiled.push_str(LINE_START),
            _ => compiled.push(c),
        }
        escaped = c == '\\' && !escaped;
    }
    Regex::new(&compiled).expect("valid regex")
}

/// Condition on the rest of the line following a link's `](`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkGuard {
    /// No further `](` on the line.
    NoNestedLink,
    /// No further `](` and no `github.com` on the line.
    NoNestedLinkOrGithub,
}

/// `github.com` with a regex dot, as the original pattern was written.
static GITHUB_RE: LazyLock<Regex> = LazyLock::new(|| line_pattern("github.com"));

impl LinkGuard {
    /// Whether a link whose target begins `line_tail` may be rewritten.
    #[must_use]
    pub fn allows(self, line_tail: &str) -> bool {
        let line_tail = line_tail
            .split(LINE_TERMINATORS)
            .next()
            .unwrap_or_default();
        let nested = line_tail.contains(LINK_OPEN);
        match self {
            Self::NoNestedLink => !nested,
            Self::NoNestedLinkOrGithub => !nested && !GITHUB_RE.is_match(line_tail),
        }
    }
}

/// One ordered substitution.
#[derive(Debug)]
pub struct Rewrite {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
    guard: Option<LinkGuard>,
}

impl Rewrite {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: line_pattern(pattern),
            replacement,
            guard: None,
        }
    }

    fn guarded(mut self, guard: LinkGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Short identifier used in trace logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Replaces every accepted match in `text`.
    #[must_use]
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(guard) = self.guard else {
            return self.pattern.replace_all(text, self.replacement);
        };

        let mut out: Option<String> = None;
        let mut copied = 0;
        let mut pos = 0;
        while pos <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, pos) else {
                break;
            };
            let Some(m) = caps.get(0) else { break };

            // Guarded patterns all start with `](`, so the tail is well-formed.
            if !guard.allows(&text[m.start() + LINK_OPEN.len()..]) {
                pos = m.start() + 1;
                continue;
            }

            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[copied..m.start()]);
            caps.expand(self.replacement, buf);
            copied = m.end();
            pos = m.end();
        }

        match out {
            Some(mut buf) => {
                buf.push_str(&text[copied..]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(text),
        }
    }
}

/// The ordered rewrite table.
static REWRITES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    vec![
        // [x](page.md#frag) -> [x](#frag), except GitHub source links.
        Rewrite::new("fragment-link", r"\]\((.*)(#.*\))", "]($2")
            .guarded(LinkGuard::NoNestedLinkOrGithub),
        Rewrite::new(
            "interface-link",
            r"\]\(../interfaces/.*?\.(.*?)\.md\)",
            "](#interface-$1)",
        ),
        Rewrite::new(
            "class-link",
            r"\]\(../classes/.*?\.(.*?)\.md\)",
            "](#class-$1)",
        ),
        Rewrite::new(
            "enum-link",
            r"\]\(../enums/.*?\.(.*?)\.md\)",
            "](#enumeration-$1)",
        ),
        Rewrite::new(
            "inherited-link",
            r"(Inherited from.*\]\().*?\.(.*?)\.md\)",
            "${1}#interface-$2)",
        ),
        Rewrite::new("module-link", r"\]\(../modules/.*?\.md", "]("),
        Rewrite::new("types-link", r"\]\(_types_\.(.*?)\.md\)", "](#interface-$1)"),
        Rewrite::new("any-md-link", r"\]\(.*\.(.*?)\.md\)", "](#class-$1)")
            .guarded(LinkGuard::NoNestedLink),
        // Absolute paths leak the build machine layout.
        Rewrite::new("defined-in-absolute", r"Defined in /.*", ""),
        Rewrite::new("inherited-from-void", r"\*Inherited from void\*", ""),
        Rewrite::new("quoted-heading", r"> #", "#"),
        // A heading id of "constructor" breaks the hosting site.
        Rewrite::new("constructor-heading", r"###  constructor", ""),
        Rewrite::new("external-module", r"(.*)# External module:(.*)", ""),
        Rewrite::new("index-section", r"## Index[\s\S]*?^(\n## |<hr />)", "${1} "),
        Rewrite::new("hierarchy-section", r"##( |  )Hierarchy[\s\S]*?^(\n## )", "${2} "),
    ]
});

/// Returns the rewrite table in application order.
#[must_use]
pub fn rewrites() -> &'static [Rewrite] {
    &REWRITES
}

/// Applies every rewrite, in order, to `docs`.
#[must_use]
pub fn normalize(docs: &str) -> String {
    let mut docs = docs.to_owned();
    for rewrite in REWRITES.iter() {
        let changed = match rewrite.apply(&docs) {
            Cow::Borrowed(_) => None,
            Cow::Owned(changed) => Some(changed),
        };
        if let Some(changed) = changed {
            trace!(rule = rewrite.name(), "rewrite applied");
            docs = changed;
        }
    }
    docs
}
