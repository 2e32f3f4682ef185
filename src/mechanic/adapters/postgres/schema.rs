//! Diesel schema for mechanic profiles.

diesel::table! {
    /// Mechanic workshop profiles.
    mechanic_profiles (mechanic_id) {
        /// Mechanic identity.
        mechanic_id -> Uuid,
        /// Shop name shown to customers.
        #[max_length = 100]
        shop_name -> Varchar,
        /// Free-text location label.
        #[max_length = 255]
        location_label -> Varchar,
        /// Workshop latitude in degrees.
        latitude -> Nullable<Float8>,
        /// Workshop longitude in degrees.
        longitude -> Nullable<Float8>,
        /// Registered service categories.
        mechanic_types -> Array<Text>,
        /// First registration timestamp, defines enumeration order.
        registered_at -> Timestamptz,
    }
}
