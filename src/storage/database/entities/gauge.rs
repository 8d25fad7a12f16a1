use sea_orm::entity::prelude::*;

/// Gauge row: latest value per name
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gauges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Metric name
    #[sea_orm(unique)]
    pub name: String,

    /// Last written value
    #[sea_orm(column_type = "Double")]
    pub value: f64,

    pub created_at: DateTimeWithTimeZone,

    /// Refreshed by trigger on every update
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
