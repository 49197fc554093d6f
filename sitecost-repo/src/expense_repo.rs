use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait ExpenseRepo: Sync + Send {
    async fn get_expense(&self, user: &str, expense_id: i32)
        -> Result<Expense, ExpenseRepoError>;

    async fn get_all_expenses(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<Expense>, ExpenseRepoError>;

    async fn create_new_expense(
        &self,
        user: &str,
        new_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError>;

    /// Full replace with a create-shaped payload.
    async fn update_expense(
        &self,
        user: &str,
        expense_id: i32,
        updated_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError>;

    async fn delete_expense(
        &self,
        user: &str,
        expense_id: i32,
    ) -> Result<Expense, ExpenseRepoError>;
}

#[derive(Error, Debug)]
pub enum ExpenseRepoError {
    #[error("Expense with id {0} not found")]
    ExpenseNotFound(i32),
    #[error("Project with id {0} not found")]
    ProjectNotFound(i32),
    #[error("Forecast line item with id {0} not found")]
    ForecastItemNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Expense {
    pub id: i32,
    pub project_id: i32,
    pub forecast_line_item_id: Option<i32>,
    pub vendor: Option<String>,
    pub amount_spent: Decimal,
    pub date: NaiveDate,
    pub receipt_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct NewExpense {
    pub project_id: i32,
    #[serde(default)]
    pub forecast_line_item_id: Option<i32>,
    #[serde(default)]
    pub vendor: Option<String>,
    pub amount_spent: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

impl NewExpense {
    pub const fn new(
        project_id: i32,
        forecast_line_item_id: Option<i32>,
        vendor: Option<String>,
        amount_spent: Decimal,
        date: NaiveDate,
        receipt_url: Option<String>,
    ) -> NewExpense {
        NewExpense {
            project_id,
            forecast_line_item_id,
            vendor,
            amount_spent,
            date,
            receipt_url,
        }
    }

    pub fn to_expense(self, id: i32) -> Expense {
        Expense {
            id,
            project_id: self.project_id,
            forecast_line_item_id: self.forecast_line_item_id,
            vendor: self.vendor,
            amount_spent: self.amount_spent,
            date: self.date,
            receipt_url: self.receipt_url,
        }
    }
}
