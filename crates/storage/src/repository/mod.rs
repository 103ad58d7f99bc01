pub mod event;
pub mod participant;
pub mod sport;
pub mod team;

/// Resolve a partial update of a nullable text column.
///
/// `None` keeps the stored value, a blank string clears it.
pub(crate) fn merge_nullable(update: Option<&String>, existing: Option<&String>) -> Option<String> {
    match update {
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value.clone()),
        None => existing.cloned(),
    }
}
