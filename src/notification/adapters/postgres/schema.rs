//! Diesel schema for notifications.

diesel::table! {
    /// Per-user inbox entries.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient user.
        recipient_id -> Uuid,
        /// Sender user, absent for system events.
        sender_id -> Nullable<Uuid>,
        /// Rendered message text.
        message -> Text,
        /// Optional deep link.
        #[max_length = 255]
        link -> Nullable<Varchar>,
        /// Read flag.
        is_read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
