//! Diesel schema for board document persistence.

diesel::table! {
    /// Board documents with their nested columns and members.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board title.
        title -> Text,
        /// Owning user identifier.
        #[max_length = 255]
        owner -> Varchar,
        /// Columns, cards, tasks, comments and members as one JSON document.
        document -> Jsonb,
        /// Optimistic concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
