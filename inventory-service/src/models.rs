use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use shared::{DrinkForm, ValidatedDrink, DATE_FORMAT};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::inventory)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InventoryItem {
    pub id: i32,
    pub name_of_drink: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub batch_no: String,
    pub drink_subtype: String,
}

/// Column values written by both insert and update; `id` is never part of it.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::inventory)]
pub struct DrinkRow {
    pub name_of_drink: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub batch_no: String,
    pub drink_subtype: String,
}

impl From<&ValidatedDrink> for DrinkRow {
    fn from(drink: &ValidatedDrink) -> Self {
        Self {
            name_of_drink: drink.name_of_drink.clone(),
            price: drink.price.clone(),
            quantity: drink.quantity,
            expiry_date: drink.expiry_date,
            batch_no: drink.batch_no.clone(),
            drink_subtype: drink.drink_subtype.clone(),
        }
    }
}

impl InventoryItem {
    pub fn from_row(id: i32, row: DrinkRow) -> Self {
        Self {
            id,
            name_of_drink: row.name_of_drink,
            price: row.price,
            quantity: row.quantity,
            expiry_date: row.expiry_date,
            batch_no: row.batch_no,
            drink_subtype: row.drink_subtype,
        }
    }
}

impl From<&InventoryItem> for DrinkForm {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name_of_drink: item.name_of_drink.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
            expiry_date: item.expiry_date.format(DATE_FORMAT).to_string(),
            batch_no: item.batch_no.clone(),
            drink_subtype: item.drink_subtype.clone(),
        }
    }
}
