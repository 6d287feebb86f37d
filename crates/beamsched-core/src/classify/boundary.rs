use crate::classify::zones::ZoneAssignment;
use crate::model::TextItem;
use crate::parsing::merge_texts;
use crate::spans::Span;

/// Share top reinforcement over the support between each pair of adjacent
/// spans.
///
/// `spans` must be ordered left to right and `assignments` must line up with
/// them. Returns the texts shared over each support, one entry per pair.
pub fn merge_boundaries(
    spans: &[Span],
    assignments: &mut [ZoneAssignment],
    rebar: &[TextItem],
) -> Vec<Vec<String>> {
    let mut shared_per_support = Vec::new();

    for i in 0..spans.len().saturating_sub(1) {
        let shared = shared_candidates(&spans[i], &spans[i + 1], rebar);
        if !shared.is_empty() {
            log::debug!(
                "support at x={}..{}: sharing {}",
                spans[i].max_x,
                spans[i + 1].min_x,
                shared.join(", ")
            );
        }
        if let Some(left) = assignments.get_mut(i) {
            merge_texts(&mut left.top.right, &shared);
        }
        if let Some(right) = assignments.get_mut(i + 1) {
            merge_texts(&mut right.top.left, &shared);
        }
        shared_per_support.push(shared);
    }

    shared_per_support
}

/// Top-bar texts running over the support between `left` and `right`.
///
/// A label qualifies when it sits at or above the lower of the two center
/// lines and its X is in the gap between the spans, in the left span's right
/// third, or in the right span's left third.
pub fn shared_candidates(left: &Span, right: &Span, rebar: &[TextItem]) -> Vec<String> {
    let floor_y = left.center_y.min(right.center_y);
    let mut shared = Vec::new();

    for label in rebar {
        let c = label.center();
        if c.y < floor_y {
            continue;
        }
        let in_gap = c.x > left.max_x && c.x < right.min_x;
        if in_gap || left.in_right_band(c.x) || right.in_left_band(c.x) {
            merge_texts(&mut shared, [&label.text]);
        }
    }

    shared
}
