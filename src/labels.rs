//! Channel-name label lookup in the page text layer.
//!
//! Runs are trimmed and matched as whole tokens against the fixed vocabulary,
//! so `"III"` never produces an `"I"` hit. Stacked renderings of the same label
//! (identical text at the same anchor, rounded to 0.1 units) collapse to one
//! token before they can bias clustering.

use crate::types::{Channel, LabelToken, TextRun};
use serde::Serialize;

/// Counters emitted by [`locate_labels`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStats {
    pub runs_scanned: usize,
    pub matched: usize,
    pub duplicates_removed: usize,
    pub kept: usize,
}

/// Anchor rounded to 0.1 units, used as the identity of a physical label.
fn rounded_anchor(token: &LabelToken) -> (i64, i64) {
    (
        (token.anchor.x * 10.0).round() as i64,
        (token.anchor.y * 10.0).round() as i64,
    )
}

/// Find channel-name tokens in `runs` and drop duplicate renderings.
///
/// Output order is top-to-bottom, then left-to-right, then by channel order,
/// independent of the order of `runs`.
pub fn locate_labels(runs: &[TextRun]) -> (Vec<LabelToken>, LabelStats) {
    let mut stats = LabelStats {
        runs_scanned: runs.len(),
        ..Default::default()
    };

    let mut tokens: Vec<LabelToken> = runs
        .iter()
        .filter(|run| run.bounds.is_finite())
        .filter_map(|run| {
            let text = run.text.trim();
            let channel = Channel::from_label(text)?;
            Some(LabelToken {
                text: text.to_string(),
                channel,
                anchor: run.bounds.center(),
                bounds: run.bounds,
            })
        })
        .collect();
    stats.matched = tokens.len();

    // Total order: text, rounded anchor, then raw coordinates as tiebreak.
    tokens.sort_by(|a, b| {
        a.text
            .cmp(&b.text)
            .then_with(|| rounded_anchor(a).cmp(&rounded_anchor(b)))
            .then_with(|| a.anchor.x.total_cmp(&b.anchor.x))
            .then_with(|| a.anchor.y.total_cmp(&b.anchor.y))
    });
    tokens.dedup_by(|later, earlier| {
        later.text == earlier.text && rounded_anchor(later) == rounded_anchor(earlier)
    });
    stats.duplicates_removed = stats.matched - tokens.len();

    tokens.sort_by(|a, b| {
        let (ax, ay) = rounded_anchor(a);
        let (bx, by) = rounded_anchor(b);
        ay.cmp(&by)
            .then(ax.cmp(&bx))
            .then(a.channel.cmp(&b.channel))
    });
    stats.kept = tokens.len();
    (tokens, stats)
}

/// Token for `channel` lying furthest down the page.
pub fn lowest_label(tokens: &[LabelToken], channel: Channel) -> Option<&LabelToken> {
    tokens
        .iter()
        .filter(|t| t.channel == channel)
        .max_by(|a, b| {
            a.anchor
                .y
                .total_cmp(&b.anchor.y)
                .then_with(|| b.anchor.x.total_cmp(&a.anchor.x))
        })
}
