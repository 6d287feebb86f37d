use serde::{Deserialize, Serialize};

/// How a longitudinal bar callout runs along the beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    /// Marked "(T)": runs the full length of the span.
    Throughout,
    /// Marked "(C)" or "EXTRA": stops within the span.
    Curtailed,
}

/// Classify a reinforcement callout by its marker. Unmarked text is not
/// tabulated and returns None.
pub fn bar_kind(text: &str) -> Option<BarKind> {
    let upper = text.to_uppercase();
    if upper.contains("(T)") {
        Some(BarKind::Throughout)
    } else if upper.contains("(C)") || upper.contains("EXTRA") {
        Some(BarKind::Curtailed)
    } else {
        None
    }
}

/// Stirrup diameter and spacing, as written on the drawing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stirrup {
    pub diameter: String,
    pub spacing: String,
}

/// Parse a stirrup callout "<dia>@<spacing>", e.g. "8@150".
///
/// Text that does not split into exactly two parts on '@' is rejected.
pub fn parse_stirrup(text: &str) -> Option<Stirrup> {
    let mut parts = text.split('@');
    let diameter = parts.next()?.trim();
    let spacing = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    Some(Stirrup {
        diameter: diameter.to_string(),
        spacing: spacing.to_string(),
    })
}

/// Append texts to a list, skipping blanks and anything already present
/// (compared trimmed, ignoring case). Existing order is preserved.
pub fn merge_texts<I, S>(existing: &mut Vec<String>, additions: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for text in additions {
        let text = text.as_ref().trim();
        if text.is_empty() {
            continue;
        }
        let lower = text.to_lowercase();
        if existing.iter().any(|e| e.to_lowercase() == lower) {
            continue;
        }
        existing.push(text.to_string());
    }
}

/// Render a text list as a field value.
pub fn join_texts(texts: &[String]) -> String {
    texts.join(", ")
}
