//! Segmentation of a raw summary file into per-tournament text blocks.
//!
//! Blocks are separated by a line made of four or more hyphens. Splitting is
//! purely textual; whitespace-only segments are dropped.

use std::sync::OnceLock;

use regex::Regex;

/// A line consisting of four or more hyphens (surrounding blanks and a
/// trailing carriage return allowed).
fn delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*-{4,}[ \t]*\r?$").expect("regex is valid"))
}

/// Lazy iterator over the non-blank blocks of a text.
///
/// A clone is an independent cursor at the same position. Call
/// [`split_blocks`] again to start over from the beginning.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.rest?;
            let segment = match delimiter().find(rest) {
                Some(m) => {
                    self.rest = Some(&rest[m.end()..]);
                    &rest[..m.start()]
                }
                None => {
                    self.rest = None;
                    rest
                }
            };
            if !segment.trim().is_empty() {
                return Some(segment);
            }
        }
    }
}

/// Split `text` into tournament blocks.
///
/// Blocks borrow from `text` and keep their surrounding newlines, so joining
/// them back with the original delimiter lines reproduces the input minus
/// the discarded blank segments.
pub fn split_blocks(text: &str) -> Blocks<'_> {
    Blocks { rest: Some(text) }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
