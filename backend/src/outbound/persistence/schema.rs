//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered pet owners.
    owners (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        address -> Varchar,
        city -> Varchar,
        telephone -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered pets. `identifier` is unique.
    pets (id) {
        id -> Uuid,
        identifier -> Bpchar,
        name -> Varchar,
        pet_type -> Varchar,
        breed -> Varchar,
        description -> Text,
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Visits keyed by the pet's business identifier.
    visits (id) {
        id -> Uuid,
        pet_identifier -> Bpchar,
        visit_time -> Timestamptz,
        description -> Text,
    }
}

diesel::joinable!(pets -> owners (owner_id));
diesel::allow_tables_to_appear_in_same_query!(owners, pets, visits);
