diesel::table! {
    inventory (id) {
        id -> Int4,
        name_of_drink -> Varchar,
        price -> Numeric,
        quantity -> Int4,
        expiry_date -> Date,
        batch_no -> Varchar,
        drink_subtype -> Varchar,
    }
}
