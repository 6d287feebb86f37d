use crate::classify::zones::ZoneAssignment;
use crate::model::{Zone, ZoneMap};
use crate::parsing::{callouts::join_texts, BeamId};
use crate::spans::Span;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the beam schedule.
///
/// Built once from finished zone assignments and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamRecord {
    /// Beam mark, e.g. "B1".
    pub mark: String,
    /// Section width in millimeters.
    pub width: Decimal,
    /// Section depth in millimeters.
    pub depth: Decimal,
    pub level: String,
    pub span: Span,
    pub left_bottom: String,
    pub mid_bottom: String,
    pub right_bottom: String,
    pub left_top: String,
    pub mid_top: String,
    pub right_top: String,
    pub left_stirrup_dia: String,
    pub left_stirrup_space: String,
    pub mid_stirrup_dia: String,
    pub mid_stirrup_space: String,
    pub right_stirrup_dia: String,
    pub right_stirrup_space: String,
    /// Left dimension in meters, one decimal.
    pub left_at_dist: String,
    /// Right dimension in meters, one decimal.
    pub right_at_dist: String,
}

impl BeamRecord {
    pub fn build(id: &BeamId, level: &str, span: Span, zones: &ZoneAssignment) -> BeamRecord {
        let bars = |group: &ZoneMap<Vec<String>>, zone: Zone| join_texts(group.get(zone));
        let stirrup = |zone: Zone| {
            zones
                .stirrups
                .get(zone)
                .as_ref()
                .map(|s| (s.diameter.clone(), s.spacing.clone()))
                .unwrap_or_default()
        };
        let (left_stirrup_dia, left_stirrup_space) = stirrup(Zone::Left);
        let (mid_stirrup_dia, mid_stirrup_space) = stirrup(Zone::Mid);
        let (right_stirrup_dia, right_stirrup_space) = stirrup(Zone::Right);

        BeamRecord {
            mark: id.mark.clone(),
            width: id.width,
            depth: id.depth,
            level: level.to_string(),
            span,
            left_bottom: bars(&zones.bottom, Zone::Left),
            mid_bottom: bars(&zones.bottom, Zone::Mid),
            right_bottom: bars(&zones.bottom, Zone::Right),
            left_top: bars(&zones.top, Zone::Left),
            mid_top: bars(&zones.top, Zone::Mid),
            right_top: bars(&zones.top, Zone::Right),
            left_stirrup_dia,
            left_stirrup_space,
            mid_stirrup_dia,
            mid_stirrup_space,
            right_stirrup_dia,
            right_stirrup_space,
            left_at_dist: zones.dimensions.left.clone().unwrap_or_default(),
            right_at_dist: zones.dimensions.right.clone().unwrap_or_default(),
        }
    }
}

/// Which entry workflow produced a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    /// One beam per drawing; auxiliary steel lines count toward its extent.
    Single,
    /// Several spans side by side, with top bars shared over supports.
    Multi,
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workflow::Single => write!(f, "single"),
            Workflow::Multi => write!(f, "multi"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Reinforcement text with neither "(T)", "(C)" nor "EXTRA".
    UnmarkedBar,
    /// Stirrup text that is not "<dia>@<spacing>".
    MalformedStirrup,
    /// Annotation outside every span.
    OutsideSpans,
    /// A resolved span with no beam ID label over it.
    SpanWithoutId,
    /// An ID label left over once every span had its beam.
    UnusedId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::UnmarkedBar => "no (T)/(C)/EXTRA marker",
            SkipReason::MalformedStirrup => "not in <dia>@<spacing> form",
            SkipReason::OutsideSpans => "outside every beam span",
            SkipReason::SpanWithoutId => "span has no beam ID label",
            SkipReason::UnusedId => "beam ID not matched to a span",
        };
        write!(f, "{s}")
    }
}

/// An input item that contributed nothing to the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub layer: String,
    pub text: String,
    pub reason: SkipReason,
}

/// Records of one workflow run, ordered left to right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub workflow: Workflow,
    pub records: Vec<BeamRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedItem>,
}
