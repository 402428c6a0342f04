// Helper for generating UUIDv7 (timestamp-sortable UUIDs)
//
// Product ids are generated app-side so that listing by id follows
// creation order. User ids keep PG's gen_random_uuid() (v4).

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}

/// Parse an identifier taken from a URL path. Malformed input yields `None`.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
