//! `SeaORM` Entity for the bank_statement_lines table.
//!
//! A partial unique index on matched_split_id guarantees that a split is
//! never referenced by two statement lines, beyond the in-run exclusion
//! set maintained by the auto-matcher.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReconciliationStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_statement_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub line_date: Date,
    pub description: String,
    /// Signed amount claimed by the bank (positive = money in).
    pub amount: Decimal,
    pub reference: Option<String>,
    pub status: ReconciliationStatus,
    pub matched_split_id: Option<Uuid>,
    pub reconciled_by: Option<Uuid>,
    pub reconciled_at: Option<DateTimeWithTimeZone>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transaction_splits::Entity",
        from = "Column::MatchedSplitId",
        to = "super::transaction_splits::Column::Id"
    )]
    TransactionSplits,
}

impl Related<super::transaction_splits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionSplits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
