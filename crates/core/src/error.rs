#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// One or more submission fields were absent, empty, or out of range.
    ///
    /// `fields` follows the canonical submission order and never contains
    /// duplicates.
    #[error("Missing fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
}
