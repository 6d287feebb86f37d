use crate::model::{DimensionMark, TextItem, Zone, ZoneMap};
use crate::parsing::values::format_dimension;
use crate::parsing::{bar_kind, merge_texts, parse_stirrup, BarKind, Stirrup};
use crate::spans::Span;

/// Everything assigned to one span, kept per zone until the record is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneAssignment {
    /// Bars below the span's center line.
    pub bottom: ZoneMap<Vec<String>>,
    /// Bars at or above the span's center line.
    pub top: ZoneMap<Vec<String>>,
    pub stirrups: ZoneMap<Option<Stirrup>>,
    /// Dimension values in meters. The mid zone is never filled.
    pub dimensions: ZoneMap<Option<String>>,
}

/// Bars of one group (top or bottom) before zones are finalized.
#[derive(Default)]
struct BarGroup {
    throughout: Vec<String>,
    curtailed: ZoneMap<Vec<String>>,
}

impl BarGroup {
    fn add(&mut self, span: &Span, label: &TextItem) {
        match bar_kind(&label.text) {
            Some(BarKind::Throughout) => merge_texts(&mut self.throughout, [&label.text]),
            Some(BarKind::Curtailed) => {
                let zone = span.zone_of(label.center().x);
                merge_texts(self.curtailed.get_mut(zone), [&label.text]);
            }
            None => {}
        }
    }

    /// Throughout bars go to every zone, ahead of that zone's curtailed bars.
    fn finish(self) -> ZoneMap<Vec<String>> {
        let mut out = ZoneMap::<Vec<String>>::default();
        for zone in Zone::ALL {
            let texts = out.get_mut(zone);
            merge_texts(texts, &self.throughout);
            merge_texts(texts, self.curtailed.get(zone));
        }
        out
    }
}

/// Assign reinforcement, stirrup and dimension annotations to the zones of
/// one span.
///
/// Callers choose which items belong to the span; see [`within_span`].
pub fn classify_span(
    span: &Span,
    rebar: &[&TextItem],
    stirrups: &[&TextItem],
    dimensions: &[&DimensionMark],
) -> ZoneAssignment {
    let mut bottom = BarGroup::default();
    let mut top = BarGroup::default();
    for label in rebar {
        if label.center().y < span.center_y {
            bottom.add(span, label);
        } else {
            top.add(span, label);
        }
    }

    let mut out = ZoneAssignment {
        bottom: bottom.finish(),
        top: top.finish(),
        ..ZoneAssignment::default()
    };

    for label in stirrups {
        if let Some(stirrup) = parse_stirrup(&label.text) {
            *out.stirrups.get_mut(span.zone_of(label.center().x)) = Some(stirrup);
        }
    }

    for dim in dimensions {
        match span.zone_of(dim.text_anchor.x) {
            Zone::Mid => {}
            zone => *out.dimensions.get_mut(zone) = Some(format_dimension(dim.measurement)),
        }
    }

    out
}

/// Items whose position falls inside the span, widened by the tolerance.
pub fn within_span<'a, T, F>(span: &Span, items: &'a [T], tolerance: f64, x_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> f64,
{
    items
        .iter()
        .filter(|item| span.contains_x(x_of(*item), tolerance))
        .collect()
}
