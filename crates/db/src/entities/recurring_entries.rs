//! `SeaORM` Entity for the recurring_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{RecurringFrequency, RecurringStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    pub reference_prefix: String,
    pub frequency: RecurringFrequency,
    pub next_run_date: Date,
    pub end_date: Option<Date>,
    pub status: RecurringStatus,
    pub last_posted_at: Option<DateTimeWithTimeZone>,
    pub total_posted: i64,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recurring_entry_splits::Entity")]
    RecurringEntrySplits,
}

impl Related<super::recurring_entry_splits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringEntrySplits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
