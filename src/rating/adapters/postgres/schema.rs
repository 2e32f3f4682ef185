//! Diesel schema for ratings and legacy feedback.

diesel::table! {
    /// One rating per service request.
    mechanic_ratings (id) {
        /// Rating identifier.
        id -> Uuid,
        /// Rated request, unique.
        service_request_id -> Uuid,
        /// Rated mechanic.
        mechanic_id -> Uuid,
        /// Rating customer.
        customer_id -> Uuid,
        /// Star value, `1..=5`.
        rating -> Int2,
        /// Optional free-text feedback.
        feedback -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last revision timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only feedback from the completion form.
    legacy_feedback (id) {
        /// Feedback identifier.
        id -> Uuid,
        /// Reviewed mechanic.
        mechanic_id -> Uuid,
        /// Reviewing customer.
        customer_id -> Uuid,
        /// Star value, `1..=5`.
        rating -> Int2,
        /// Optional comment.
        comment -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
