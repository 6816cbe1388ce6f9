/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All audit timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Money amounts are whole Vietnamese đồng. The schema stores them as
/// BIGINT; there are no fractional amounts anywhere in the domain.
pub type Amount = i64;
