use sea_orm::entity::prelude::*;

/// Counter row: one accumulated total per name
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "counters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Metric name
    #[sea_orm(unique)]
    pub name: String,

    /// Accumulated total
    pub delta: i64,

    pub created_at: DateTimeWithTimeZone,

    /// Refreshed by trigger on every update
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
