//! Filtering events by the crafts a user is interested in.

use std::collections::BTreeSet;

use crate::event::Event;

/// Keep events matching at least one of `crafts` (case-insensitive), plus any
/// event tagged with the catch-all tag. An empty `crafts` list means no filter.
///
/// Input order is preserved.
pub fn filter_by_crafts<'a, I, S>(events: I, crafts: &[S]) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
    S: AsRef<str>,
{
    if crafts.is_empty() {
        return events.into_iter().collect();
    }

    let wanted: Vec<String> = crafts.iter().map(|c| c.as_ref().to_lowercase()).collect();

    events
        .into_iter()
        .filter(|event| {
            event.matches_all_crafts()
                || event
                    .craft_tags
                    .iter()
                    .any(|tag| wanted.contains(&tag.to_lowercase()))
        })
        .collect()
}

/// Every distinct craft tag in `events`, sorted. These are the choices offered
/// when a user edits their craft preference.
pub fn all_tags<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<String> {
    events
        .into_iter()
        .flat_map(|e| e.craft_tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
