use super::builtin::GENERIC_DESCRIPTION;
use crate::markers::resolve_markers;
use crate::types::{RawTemplate, RichText, Template};

/// Bring a backend template into the same shape as the built-in ones.
///
/// Marker keys go through the fixed table with unknown keys dropped. A
/// non-empty description is kept byte for byte; a missing or empty one is
/// replaced by the generic description.
pub fn normalize_template(raw: RawTemplate) -> Template {
    let bullets = raw
        .bullets
        .as_deref()
        .map(resolve_markers)
        .unwrap_or_default();

    let description = match raw.description {
        Some(d) if !d.is_empty() => RichText::new(d),
        _ => RichText::new(GENERIC_DESCRIPTION),
    };

    Template {
        name: raw.name,
        columns: raw.columns,
        folded_columns: raw.folded_columns,
        description,
        bullets,
        fold_field: raw.fold_field,
    }
}

pub fn normalize_all(raw: Vec<RawTemplate>) -> Vec<Template> {
    raw.into_iter().map(normalize_template).collect()
}
