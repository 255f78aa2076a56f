use uuid::Uuid;

/// Random 128-bit identifier rendered in hyphenated form.
pub(crate) fn next_id() -> String {
    Uuid::new_v4().to_string()
}
