use crate::classify::boundary::merge_boundaries;
use crate::classify::outcome::{BeamRecord, ScheduleResult, SkipReason, SkippedItem, Workflow};
use crate::classify::zones::{classify_span, within_span, ZoneAssignment};
use crate::error::BeamError;
use crate::extraction::Collected;
use crate::layers::schema::LayerMap;
use crate::model::TextItem;
use crate::parsing::{bar_kind, parse_beam_id, parse_stirrup, BeamId};
use crate::spans::{resolve_single_span, resolve_spans, Span, SpanInputs};

/// Build the beam schedule for one workflow from collected primitives.
pub fn schedule(
    collected: &Collected,
    layers: &LayerMap,
    workflow: Workflow,
) -> Result<ScheduleResult, BeamError> {
    let result = match workflow {
        Workflow::Single => schedule_single(collected, layers),
        Workflow::Multi => schedule_multi(collected, layers)?,
    };
    log::info!(
        "{} workflow: {} record(s), {} skipped item(s)",
        result.workflow,
        result.records.len(),
        result.skipped.len()
    );
    Ok(result)
}

/// Exactly one record. Annotations outside the span's X window are skipped.
fn schedule_single(collected: &Collected, layers: &LayerMap) -> ScheduleResult {
    let tol = layers.tolerance;
    let inputs = SpanInputs {
        polygons: &collected.boundary_polygons,
        lines: &collected.boundary_lines,
        aux_lines: &collected.steel_lines,
        rebar_labels: &collected.rebar_labels,
        id_labels: &collected.id_labels,
        tolerance: tol,
    };
    let span = resolve_single_span(&inputs);

    let rebar = within_span(&span, &collected.rebar_labels, tol, |l| l.center().x);
    let stirrups = within_span(&span, &collected.stirrup_labels, tol, |l| l.center().x);
    let dims = within_span(&span, &collected.dimensions, tol, |d| d.text_anchor.x);
    let zones = classify_span(&span, &rebar, &stirrups, &dims);

    let mut skipped = Vec::new();
    let id = match collected.id_labels.split_first() {
        Some((first, rest)) => {
            skipped.extend(
                rest.iter()
                    .map(|l| skip(&layers.id_layer, &l.text, SkipReason::UnusedId)),
            );
            parse_beam_id(&first.text)
        }
        None => {
            log::warn!("no beam ID label on layer '{}'", layers.id_layer);
            parse_beam_id("")
        }
    };
    skipped.extend(unusable_callouts(&rebar, &stirrups, layers));
    skipped.extend(outside_callouts(collected, layers, |x| span.contains_x(x, tol)));

    ScheduleResult {
        workflow: Workflow::Single,
        records: vec![BeamRecord::build(&id, level(collected), span, &zones)],
        skipped,
    }
}

/// One record per span that carries a beam ID label.
fn schedule_multi(collected: &Collected, layers: &LayerMap) -> Result<ScheduleResult, BeamError> {
    if collected.id_labels.is_empty() {
        return Err(BeamError::NoBeamLabels {
            layer: layers.id_layer.clone(),
        });
    }

    let tol = layers.tolerance;
    let inputs = SpanInputs {
        polygons: &collected.boundary_polygons,
        lines: &collected.boundary_lines,
        aux_lines: &[],
        rebar_labels: &collected.rebar_labels,
        id_labels: &collected.id_labels,
        tolerance: tol,
    };
    let spans = resolve_spans(&inputs);

    let mut assignments: Vec<ZoneAssignment> = spans
        .iter()
        .map(|span| {
            let rebar = within_span(span, &collected.rebar_labels, tol, |l| l.center().x);
            let stirrups = within_span(span, &collected.stirrup_labels, tol, |l| l.center().x);
            let dims = within_span(span, &collected.dimensions, tol, |d| d.text_anchor.x);
            classify_span(span, &rebar, &stirrups, &dims)
        })
        .collect();

    merge_boundaries(&spans, &mut assignments, &collected.rebar_labels);

    let mut skipped = Vec::new();
    let mut used_ids = vec![false; collected.id_labels.len()];
    let mut records = Vec::new();
    for (span, zones) in spans.iter().zip(&assignments) {
        match pick_id(span, &collected.id_labels, &used_ids, tol) {
            Some(idx) => {
                used_ids[idx] = true;
                let id: BeamId = parse_beam_id(&collected.id_labels[idx].text);
                records.push(BeamRecord::build(&id, level(collected), *span, zones));
            }
            None => {
                log::debug!("span {}..{} has no beam ID", span.min_x, span.max_x);
                skipped.push(skip(
                    &layers.boundary_layer,
                    &format!("span {}..{}", span.min_x, span.max_x),
                    SkipReason::SpanWithoutId,
                ));
            }
        }
    }

    for (label, used) in collected.id_labels.iter().zip(&used_ids) {
        if !used {
            skipped.push(skip(&layers.id_layer, &label.text, SkipReason::UnusedId));
        }
    }

    let inside = |x: f64| {
        spans.iter().any(|s| s.contains_x(x, tol))
            || spans.windows(2).any(|w| x > w[0].max_x && x < w[1].min_x)
    };
    let rebar: Vec<&TextItem> = collected
        .rebar_labels
        .iter()
        .filter(|l| inside(l.center().x))
        .collect();
    let stirrups: Vec<&TextItem> = collected
        .stirrup_labels
        .iter()
        .filter(|l| inside(l.center().x))
        .collect();
    skipped.extend(unusable_callouts(&rebar, &stirrups, layers));
    skipped.extend(outside_callouts(collected, layers, inside));

    Ok(ScheduleResult {
        workflow: Workflow::Multi,
        records,
        skipped,
    })
}

/// The unused ID label over a span, nearest the span's middle.
fn pick_id(span: &Span, ids: &[TextItem], used: &[bool], tol: f64) -> Option<usize> {
    let mid = (span.min_x + span.max_x) / 2.0;
    ids.iter()
        .enumerate()
        .filter(|(i, l)| !used[*i] && span.contains_x(l.center().x, tol))
        .min_by(|(_, a), (_, b)| {
            (a.center().x - mid)
                .abs()
                .total_cmp(&(b.center().x - mid).abs())
        })
        .map(|(i, _)| i)
}

/// Reinforcement without a bar marker and stirrups that do not parse.
fn unusable_callouts(
    rebar: &[&TextItem],
    stirrups: &[&TextItem],
    layers: &LayerMap,
) -> Vec<SkippedItem> {
    let bars = rebar
        .iter()
        .filter(|l| bar_kind(&l.text).is_none())
        .map(|l| skip(&layers.rebar_layer, &l.text, SkipReason::UnmarkedBar));
    let rings = stirrups
        .iter()
        .filter(|l| parse_stirrup(&l.text).is_none())
        .map(|l| skip(&layers.stirrup_layer, &l.text, SkipReason::MalformedStirrup));
    bars.chain(rings).collect()
}

/// Reinforcement and stirrup labels whose center X fails `inside`.
fn outside_callouts<F>(collected: &Collected, layers: &LayerMap, inside: F) -> Vec<SkippedItem>
where
    F: Fn(f64) -> bool,
{
    let bars = collected
        .rebar_labels
        .iter()
        .filter(|l| !inside(l.center().x))
        .map(|l| skip(&layers.rebar_layer, &l.text, SkipReason::OutsideSpans));
    let rings = collected
        .stirrup_labels
        .iter()
        .filter(|l| !inside(l.center().x))
        .map(|l| skip(&layers.stirrup_layer, &l.text, SkipReason::OutsideSpans));
    bars.chain(rings).collect()
}

fn skip(layer: &str, text: &str, reason: SkipReason) -> SkippedItem {
    log::debug!("skipping '{text}' on '{layer}': {reason}");
    SkippedItem {
        layer: layer.to_string(),
        text: text.to_string(),
        reason,
    }
}

fn level(collected: &Collected) -> &str {
    collected.level.as_deref().unwrap_or("")
}
