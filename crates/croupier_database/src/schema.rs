diesel::table! {
    /// When each item was last selected, keyed by its ledger path.
    posts (path) {
        path -> Text,
        posted_at -> Timestamptz,
    }
}

diesel::table! {
    /// Alias substitutions applied to searches, in `id` order.
    names (id) {
        id -> Int4,
        original -> Text,
        replacement -> Text,
    }
}
