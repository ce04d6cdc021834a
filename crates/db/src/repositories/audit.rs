//! Audit trail repository.
//!
//! Audit rows are inserted through the same connection (usually an open
//! database transaction) as the mutation they describe, so a rollback
//! discards the audit row together with the business change.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};
use uuid::Uuid;

use crate::entities::audit_logs;

/// Input for one audit trail row.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    /// User performing the action.
    pub actor_id: Uuid,
    /// Action name, e.g. `journal_entry.posted`.
    pub action: String,
    /// Resource type, e.g. `journal_entry`.
    pub resource_type: String,
    /// ID of the affected resource (or batch).
    pub resource_id: Uuid,
    /// Peer address when the action came over the wire.
    pub ip: Option<String>,
    /// Optional structured details.
    pub changes: Option<serde_json::Value>,
}

/// Repository for writing audit trail rows.
#[derive(Debug, Clone, Copy)]
pub struct AuditRepository;

impl AuditRepository {
    /// Records one audit row on the given connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn record<C: ConnectionTrait>(
        conn: &C,
        log: NewAuditLog,
    ) -> Result<audit_logs::Model, DbErr> {
        let row = audit_logs::ActiveModel {
            id: Set(Uuid::now_v7()),
            actor_id: Set(log.actor_id),
            action: Set(log.action),
            resource_type: Set(log.resource_type),
            resource_id: Set(log.resource_id),
            ip: Set(log.ip),
            changes: Set(log.changes),
            created_at: Set(Utc::now().into()),
        };

        row.insert(conn).await
    }
}
