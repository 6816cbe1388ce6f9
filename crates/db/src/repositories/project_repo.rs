//! Repository for the `projects` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use webdesk_core::types::{Amount, DbId};

use crate::models::enums::{HostingAction, PaymentStatus};
use crate::models::hosting_history::NewHostingHistory;
use crate::models::project::{CreateProject, Project, ProjectWithClient};
use crate::repositories::HostingHistoryRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, domain_name, status, \
     using_own_hosting, hosting_package, hosting_price, hosting_start_date, \
     hosting_duration_months, hosting_expiry_date, \
     project_price, deposit_amount, remaining_amount, payment_due_date, \
     payment_status, created_at, updated_at";

/// Same columns qualified with the `p.` alias, plus the client contact
/// fields, for joined queries.
const JOINED_COLUMNS: &str = "p.id, p.client_id, p.name, p.domain_name, p.status, \
     p.using_own_hosting, p.hosting_package, p.hosting_price, p.hosting_start_date, \
     p.hosting_duration_months, p.hosting_expiry_date, \
     p.project_price, p.deposit_amount, p.remaining_amount, p.payment_due_date, \
     p.payment_status, p.created_at, p.updated_at, \
     c.name AS client_name, c.email AS client_email";

/// Payment-side update. Only non-`None` fields are applied;
/// `remaining_amount` is recomputed in the same statement.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdatePayment {
    pub project_price: Option<Amount>,
    pub deposit_amount: Option<Amount>,
    pub payment_due_date: Option<NaiveDate>,
    pub payment_status: Option<PaymentStatus>,
}

/// Provides operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `remaining_amount` is always `project_price - deposit_amount`.
    /// When the project starts on own hosting with both a start and an
    /// expiry date, the `initial` ledger entry is written in the same
    /// transaction.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let price = input.project_price.unwrap_or(0);
        let deposit = input.deposit_amount.unwrap_or(0);

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (client_id, name, domain_name, status,
                 using_own_hosting, hosting_package, hosting_price,
                 hosting_start_date, hosting_duration_months, hosting_expiry_date,
                 project_price, deposit_amount, remaining_amount,
                 payment_due_date, payment_status)
             VALUES ($1, $2, $3, COALESCE($4, 'pending'),
                 COALESCE($5, FALSE), $6, COALESCE($7, 0),
                 $8, $9, $10,
                 $11, $12, $13,
                 $14, COALESCE($15, 'unpaid'))
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.domain_name)
            .bind(input.status)
            .bind(input.using_own_hosting)
            .bind(input.hosting_package)
            .bind(input.hosting_price)
            .bind(input.hosting_start_date)
            .bind(input.hosting_duration_months)
            .bind(input.hosting_expiry_date)
            .bind(price)
            .bind(deposit)
            .bind(price - deposit)
            .bind(input.payment_due_date)
            .bind(input.payment_status)
            .fetch_one(&mut *tx)
            .await?;

        if project.using_own_hosting {
            if let (Some(start), Some(expiry)) =
                (project.hosting_start_date, project.hosting_expiry_date)
            {
                HostingHistoryRepo::insert(
                    &mut *tx,
                    &NewHostingHistory {
                        project_id: project.id,
                        action: HostingAction::Initial,
                        package_from: None,
                        package_to: project.hosting_package,
                        price: project.hosting_price,
                        duration_months: project.hosting_duration_months.unwrap_or(12),
                        start_date: start,
                        expiry_date: expiry,
                        notes: None,
                    },
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID together with its client's contact fields.
    pub async fn find_with_client(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p JOIN clients c ON c.id = p.client_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a payment-side update, recomputing `remaining_amount` in
    /// the same statement so the invariant can never be observed broken.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_payment(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePayment,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                project_price = COALESCE($2, project_price),
                deposit_amount = COALESCE($3, deposit_amount),
                remaining_amount = COALESCE($2, project_price) - COALESCE($3, deposit_amount),
                payment_due_date = COALESCE($4, payment_due_date),
                payment_status = COALESCE($5, payment_status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.project_price)
            .bind(input.deposit_amount)
            .bind(input.payment_due_date)
            .bind(input.payment_status)
            .fetch_optional(pool)
            .await
    }

    /// Projects whose own hosting expires on or before `threshold`
    /// (inclusive, so "end of day" for a DATE column), excluding
    /// cancelled projects. Used by the expiry scanner's hosting pass.
    pub async fn hosting_candidates(
        pool: &PgPool,
        threshold: NaiveDate,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p JOIN clients c ON c.id = p.client_id
             WHERE p.using_own_hosting
               AND p.hosting_expiry_date IS NOT NULL
               AND p.hosting_expiry_date <= $1
               AND p.status <> 'cancelled'"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(threshold)
            .fetch_all(pool)
            .await
    }

    /// Projects with an outstanding balance due on or before
    /// `threshold`, excluding cancelled projects. Used by the expiry
    /// scanner's payment pass.
    pub async fn payment_candidates(
        pool: &PgPool,
        threshold: NaiveDate,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p JOIN clients c ON c.id = p.client_id
             WHERE p.payment_due_date IS NOT NULL
               AND p.payment_due_date <= $1
               AND p.payment_status IN ('unpaid', 'deposit_paid')
               AND p.status <> 'cancelled'"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(threshold)
            .fetch_all(pool)
            .await
    }

    /// Own-hosting projects expiring on or before `threshold`, most
    /// urgent first. Past-due projects are included. Backs the
    /// `/hosting/expiring` listing.
    pub async fn list_expiring(
        pool: &PgPool,
        threshold: NaiveDate,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p JOIN clients c ON c.id = p.client_id
             WHERE p.using_own_hosting
               AND p.hosting_expiry_date IS NOT NULL
               AND p.hosting_expiry_date <= $1
             ORDER BY p.hosting_expiry_date ASC"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(threshold)
            .fetch_all(pool)
            .await
    }
}
