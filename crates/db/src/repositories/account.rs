//! Account repository for chart of accounts lookups and maintenance.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::accounts;
use crate::repositories::audit::{AuditRepository, NewAuditLog};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found by ID.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Account not found by code.
    #[error("No account with code '{0}'")]
    CodeNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Unique account code, e.g. `1010`.
    pub code: String,
    /// Human-readable account name.
    pub name: String,
    /// User creating the account.
    pub created_by: Uuid,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new active account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if the code is taken, or a database error.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(input.code.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let txn = self.db.begin().await?;

        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(input.code.clone()),
            name: Set(input.name),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        };
        let account = account.insert(&txn).await?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: input.created_by,
                action: "account.created".to_string(),
                resource_type: "account".to_string(),
                resource_id: account.id,
                ip: None,
                changes: Some(serde_json::json!({ "code": input.code })),
            },
        )
        .await?;

        txn.commit().await?;

        info!(account_id = %account.id, code = %account.code, "account created");
        Ok(account)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this ID.
    pub async fn find_by_id(&self, account_id: Uuid) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id))
    }

    /// Finds an account by its unique code.
    ///
    /// # Errors
    ///
    /// Returns `CodeNotFound` if no account has this code.
    pub async fn find_by_code(&self, code: &str) -> Result<accounts::Model, AccountError> {
        Self::get_by_code(&self.db, code).await
    }

    /// Finds an account by code on an arbitrary connection.
    ///
    /// Other repositories use this to resolve the designated bank or cash
    /// account inside their own transactions.
    ///
    /// # Errors
    ///
    /// Returns `CodeNotFound` if no account has this code.
    pub async fn get_by_code<C: ConnectionTrait>(
        conn: &C,
        code: &str,
    ) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(conn)
            .await?
            .ok_or_else(|| AccountError::CodeNotFound(code.to_string()))
    }

    /// Deactivates an account so it can no longer be posted to.
    ///
    /// Existing splits are untouched; the ledger is append-only.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this ID.
    pub async fn deactivate(
        &self,
        account_id: Uuid,
        actor: Uuid,
    ) -> Result<accounts::Model, AccountError> {
        let account = self.find_by_id(account_id).await?;

        let txn = self.db.begin().await?;

        let mut active: accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        let account = active.update(&txn).await?;

        AuditRepository::record(
            &txn,
            NewAuditLog {
                actor_id: actor,
                action: "account.deactivated".to_string(),
                resource_type: "account".to_string(),
                resource_id: account.id,
                ip: None,
                changes: None,
            },
        )
        .await?;

        txn.commit().await?;

        info!(account_id = %account.id, "account deactivated");
        Ok(account)
    }
}
