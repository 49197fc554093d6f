use crate::expense_repo::ExpenseRepoError::{
    ExpenseNotFound, ForecastItemNotFound, ProjectNotFound,
};
use crate::expense_repo::{Expense, ExpenseRepo, ExpenseRepoError, NewExpense};
use crate::sqlx_repo::SQLxRepo;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::QueryBuilder;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct ExpenseEntry {
    id: i32,
    #[allow(dead_code)]
    user_id: String,
    project_id: i32,
    forecast_line_item_id: Option<i32>,
    vendor: Option<String>,
    amount_spent: Decimal,
    date: NaiveDate,
    receipt_url: Option<String>,
}

impl From<ExpenseEntry> for Expense {
    fn from(value: ExpenseEntry) -> Self {
        Expense {
            id: value.id,
            project_id: value.project_id,
            forecast_line_item_id: value.forecast_line_item_id,
            vendor: value.vendor,
            amount_spent: value.amount_spent,
            date: value.date,
            receipt_url: value.receipt_url,
        }
    }
}

impl SQLxRepo {
    async fn check_expense_references(
        &self,
        user: &str,
        expense: &NewExpense,
    ) -> Result<(), ExpenseRepoError> {
        if !self.project_owned(user, expense.project_id).await? {
            return Err(ProjectNotFound(expense.project_id));
        }
        if let Some(item_id) = expense.forecast_line_item_id {
            if !self
                .forecast_item_on_project(user, item_id, expense.project_id)
                .await?
            {
                return Err(ForecastItemNotFound(item_id));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_expense(
        &self,
        user: &str,
        expense_id: i32,
    ) -> Result<Expense, ExpenseRepoError> {
        let entry: Option<ExpenseEntry> =
            sqlx::query_as("SELECT * FROM actual_expenses WHERE id = $1 AND user_id = $2")
                .bind(expense_id)
                .bind(user)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get expense {}", expense_id))?;
        entry.ok_or(ExpenseNotFound(expense_id)).map(|e| e.into())
    }

    #[instrument(skip(self))]
    async fn get_all_expenses(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<Expense>, ExpenseRepoError> {
        let mut query_builder = QueryBuilder::new("SELECT * FROM actual_expenses WHERE user_id = ");
        query_builder.push_bind(user);
        if let Some(project_id) = project_id {
            query_builder
                .push(" AND project_id = ")
                .push_bind(project_id);
        }
        query_builder.push(" ORDER BY id");

        let entries: Vec<ExpenseEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Unable to get expenses for user {}", user))?;
        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    #[instrument(skip(self, new_expense))]
    async fn create_new_expense(
        &self,
        user: &str,
        new_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        self.check_expense_references(user, &new_expense).await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO actual_expenses(user_id, project_id, forecast_line_item_id, vendor, amount_spent, date, receipt_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(user)
        .bind(new_expense.project_id)
        .bind(new_expense.forecast_line_item_id)
        .bind(&new_expense.vendor)
        .bind(new_expense.amount_spent)
        .bind(new_expense.date)
        .bind(&new_expense.receipt_url)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert expense")?;

        Ok(new_expense.to_expense(id))
    }

    #[instrument(skip(self, updated_expense))]
    async fn update_expense(
        &self,
        user: &str,
        expense_id: i32,
        updated_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        self.check_expense_references(user, &updated_expense).await?;

        let result = sqlx::query(
            "UPDATE actual_expenses SET project_id = $1, forecast_line_item_id = $2, vendor = $3, amount_spent = $4, date = $5, receipt_url = $6 \
             WHERE user_id = $7 AND id = $8",
        )
        .bind(updated_expense.project_id)
        .bind(updated_expense.forecast_line_item_id)
        .bind(&updated_expense.vendor)
        .bind(updated_expense.amount_spent)
        .bind(updated_expense.date)
        .bind(&updated_expense.receipt_url)
        .bind(user)
        .bind(expense_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to update expense {}", expense_id))?;

        if result.rows_affected() == 0 {
            Err(ExpenseNotFound(expense_id))
        } else {
            Ok(updated_expense.to_expense(expense_id))
        }
    }

    #[instrument(skip(self))]
    async fn delete_expense(
        &self,
        user: &str,
        expense_id: i32,
    ) -> Result<Expense, ExpenseRepoError> {
        let entry: Option<ExpenseEntry> = sqlx::query_as(
            "DELETE FROM actual_expenses WHERE user_id = $1 AND id = $2 \
             RETURNING id, user_id, project_id, forecast_line_item_id, vendor, amount_spent, date, receipt_url",
        )
        .bind(user)
        .bind(expense_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete expense {}", expense_id))?;
        entry.ok_or(ExpenseNotFound(expense_id)).map(|e| e.into())
    }
}
