/// All database primary keys are PostgreSQL BIGSERIAL. Locally persisted
/// records use the same id space (assigned as `max(id) + 1` per collection)
/// so the two stores stay schema-compatible.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
