use sea_orm::entity::prelude::*;

/// An item users can put in their cart.
///
/// The application never writes this table; it is seeded out of band.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "store")]
pub struct Model {
    /// The identifier carts refer to (as its decimal string form).
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
