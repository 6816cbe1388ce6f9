//! Repository for the append-only `hosting_histories` ledger.
//!
//! Renew and upgrade each write one ledger entry and update the
//! project's denormalized hosting fields inside a single transaction,
//! so the project always matches its newest ledger entry.

use chrono::NaiveDate;
use sqlx::PgPool;
use webdesk_core::dates::add_months;
use webdesk_core::types::{Amount, DbId};

use crate::models::enums::{HostingAction, HostingPackage};
use crate::models::hosting_history::{HostingHistory, NewHostingHistory};
use crate::models::project::Project;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, action, package_from, package_to, \
     price, duration_months, start_date, expiry_date, notes, created_at";

/// Project columns returned by the ledger's project updates.
const PROJECT_COLUMNS: &str = "id, client_id, name, domain_name, status, \
     using_own_hosting, hosting_package, hosting_price, hosting_start_date, \
     hosting_duration_months, hosting_expiry_date, \
     project_price, deposit_amount, remaining_amount, payment_due_date, \
     payment_status, created_at, updated_at";

/// Provides operations for the hosting ledger.
pub struct HostingHistoryRepo;

impl HostingHistoryRepo {
    /// Insert a ledger entry. Takes any executor so callers can write
    /// the entry inside their own transaction.
    pub async fn insert<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        entry: &NewHostingHistory,
    ) -> Result<HostingHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO hosting_histories
                 (project_id, action, package_from, package_to, price,
                  duration_months, start_date, expiry_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostingHistory>(&query)
            .bind(entry.project_id)
            .bind(entry.action)
            .bind(entry.package_from)
            .bind(entry.package_to)
            .bind(entry.price)
            .bind(entry.duration_months)
            .bind(entry.start_date)
            .bind(entry.expiry_date)
            .bind(&entry.notes)
            .fetch_one(executor)
            .await
    }

    /// List a project's ledger entries, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<HostingHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hosting_histories
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HostingHistory>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Renew a project's hosting term by `duration_months` calendar
    /// months.
    ///
    /// The new term starts at the current expiry (or `today` when the
    /// project has none), so renewing early does not shorten the term.
    /// The project's `hosting_duration_months` accumulates the total
    /// months ever purchased; the expiry date is authoritative for
    /// what remains. Ledger entry and project update commit together
    /// or not at all.
    ///
    /// Callers must have validated `duration_months` against
    /// [`webdesk_core::dates::MIN_RENEWAL_MONTHS`]..=[`webdesk_core::dates::MAX_RENEWAL_MONTHS`].
    pub async fn renew(
        pool: &PgPool,
        project: &Project,
        duration_months: i32,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<(HostingHistory, Project), sqlx::Error> {
        let start_date = project.hosting_expiry_date.unwrap_or(today);
        let new_expiry = add_months(start_date, duration_months as u32);

        let mut tx = pool.begin().await?;

        let history = Self::insert(
            &mut *tx,
            &NewHostingHistory {
                project_id: project.id,
                action: HostingAction::Renew,
                package_from: project.hosting_package,
                package_to: project.hosting_package,
                price: project.hosting_price,
                duration_months,
                start_date,
                expiry_date: new_expiry,
                notes,
            },
        )
        .await?;

        let query = format!(
            "UPDATE projects SET
                hosting_expiry_date = $2,
                hosting_duration_months = COALESCE(hosting_duration_months, 0) + $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(new_expiry)
            .bind(duration_months)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            project_id = project.id,
            duration_months,
            new_expiry = %new_expiry,
            "Hosting renewed"
        );

        Ok((history, updated))
    }

    /// Switch a project to a different hosting package.
    ///
    /// An upgrade never extends the term: the ledger entry carries
    /// `duration_months = 0` and the project's expiry date is left
    /// untouched. Callers must have validated `new_price >= 0`.
    pub async fn upgrade(
        pool: &PgPool,
        project: &Project,
        new_package: HostingPackage,
        new_price: Amount,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<(HostingHistory, Project), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let history = Self::insert(
            &mut *tx,
            &NewHostingHistory {
                project_id: project.id,
                action: HostingAction::Upgrade,
                package_from: project.hosting_package,
                package_to: Some(new_package),
                price: new_price,
                duration_months: 0,
                start_date: today,
                expiry_date: project.hosting_expiry_date.unwrap_or(today),
                notes,
            },
        )
        .await?;

        let query = format!(
            "UPDATE projects SET
                hosting_package = $2,
                hosting_price = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(new_package)
            .bind(new_price)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            project_id = project.id,
            package = new_package.as_str(),
            "Hosting package upgraded"
        );

        Ok((history, updated))
    }
}
