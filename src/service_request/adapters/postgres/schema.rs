//! Diesel schema for requests and chat.

diesel::table! {
    /// Customer service requests.
    service_requests (id) {
        /// Request identifier.
        id -> Uuid,
        /// Requesting customer.
        requester_id -> Uuid,
        /// Assigned mechanic.
        assignee_id -> Nullable<Uuid>,
        /// Problem description.
        issue_description -> Text,
        /// Free-text location label.
        #[max_length = 255]
        location_label -> Varchar,
        /// Latitude in degrees.
        latitude -> Nullable<Float8>,
        /// Longitude in degrees.
        longitude -> Nullable<Float8>,
        /// Requested service category.
        #[max_length = 20]
        mechanic_type -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Dispatch mode.
        #[max_length = 20]
        dispatch -> Varchar,
        /// Latest rating.
        rating -> Nullable<Int2>,
        /// Latest feedback.
        feedback -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Messages exchanged within a request.
    chat_messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Owning request.
        service_request_id -> Uuid,
        /// Sender.
        sender_id -> Uuid,
        /// Receiver.
        receiver_id -> Uuid,
        /// Message text.
        body -> Text,
        /// Send timestamp.
        sent_at -> Timestamptz,
        /// Read flag.
        is_read -> Bool,
    }
}

diesel::joinable!(chat_messages -> service_requests (service_request_id));
diesel::allow_tables_to_appear_in_same_query!(service_requests, chat_messages);
