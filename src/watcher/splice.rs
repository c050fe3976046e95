//! Scan one rule across a payload sequence and splice in highlights.

use crate::alert::Rule;
use crate::chat::Payload;

/// Result of running one rule over a rich text.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// No text run matched.
    NoMatch,
    /// A run matched but the rule does not highlight; the input is untouched.
    Matched,
    /// A run matched and this is the highlighted replacement sequence.
    Rewritten(Vec<Payload>),
}

impl ScanOutcome {
    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// Run `rule` over every text run of `payloads`.
///
/// A replacement sequence is only allocated once the first run matches;
/// everything before it is copied unchanged, every matching run is split
/// around its matches and the remainder is copied after the last run.
#[must_use]
pub fn scan_and_splice(rule: &Rule, payloads: &[Payload]) -> ScanOutcome {
    let mut rewritten: Option<Vec<Payload>> = None;
    let mut copied_up_to = 0;

    for (index, payload) in payloads.iter().enumerate() {
        let Payload::Text(text) = payload else {
            continue;
        };
        let Some(mut found) = rule.find_match(text, 0) else {
            continue;
        };
        if !rule.highlight_enabled {
            return ScanOutcome::Matched;
        }

        let out = rewritten.get_or_insert_with(|| Vec::with_capacity(payloads.len() + 6));
        out.extend_from_slice(&payloads[copied_up_to..index]);
        copied_up_to = index + 1;

        let mut cursor = 0;
        loop {
            if found.start > cursor {
                out.push(Payload::text(&text[cursor..found.start]));
            }
            push_highlighted(out, rule, &text[found.clone()]);
            cursor = found.end;

            match rule.find_match(text, cursor) {
                Some(next) => found = next,
                None => break,
            }
        }
        if cursor < text.len() {
            out.push(Payload::text(&text[cursor..]));
        }
    }

    match rewritten {
        Some(mut out) => {
            out.extend_from_slice(&payloads[copied_up_to..]);
            ScanOutcome::Rewritten(out)
        }
        None => ScanOutcome::NoMatch,
    }
}

fn push_highlighted(out: &mut Vec<Payload>, rule: &Rule, matched: &str) {
    if rule.foreground_color != 0 {
        out.push(Payload::ForegroundOn(rule.foreground_color));
    }
    if rule.glow_color != 0 {
        out.push(Payload::GlowOn(rule.glow_color));
    }
    out.push(Payload::text(matched));
    if rule.foreground_color != 0 {
        out.push(Payload::ForegroundOff);
    }
    if rule.glow_color != 0 {
        out.push(Payload::GlowOff);
    }
}
