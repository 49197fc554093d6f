use crate::expense_repo::ExpenseRepoError::{
    ExpenseNotFound, ForecastItemNotFound, ProjectNotFound,
};
use crate::expense_repo::{Expense, ExpenseRepo, ExpenseRepoError, NewExpense};
use crate::mem_repo::{MemRepo, State};
use async_trait::async_trait;
use std::collections::HashSet;

fn check_references(state: &State, user: &str, expense: &NewExpense) -> Result<(), ExpenseRepoError> {
    if !state.user_owns_project(user, expense.project_id) {
        return Err(ProjectNotFound(expense.project_id));
    }
    if let Some(item_id) = expense.forecast_line_item_id {
        let linked = state
            .forecast_items
            .get(&item_id)
            .map_or(false, |item| item.project_id == expense.project_id);
        if !linked {
            return Err(ForecastItemNotFound(item_id));
        }
    }
    Ok(())
}

#[async_trait]
impl ExpenseRepo for MemRepo {
    async fn get_expense(
        &self,
        user: &str,
        expense_id: i32,
    ) -> Result<Expense, ExpenseRepoError> {
        let read_guard = self.read_lock()?;

        let Some(expense_ids) = read_guard.user_expenses.get(user) else {
            return Err(ExpenseNotFound(expense_id));
        };
        if !expense_ids.contains(&expense_id) {
            return Err(ExpenseNotFound(expense_id));
        }

        let expense = read_guard
            .expenses
            .get(&expense_id)
            .expect("expenses should contain same ids as user_expenses")
            .clone();
        Ok(expense)
    }

    async fn get_all_expenses(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<Expense>, ExpenseRepoError> {
        let read_guard = self.read_lock()?;

        let Some(expense_ids) = read_guard.user_expenses.get(user) else {
            return Ok(Vec::new());
        };

        let mut expenses: Vec<Expense> = expense_ids
            .iter()
            .map(|id| {
                read_guard
                    .expenses
                    .get(id)
                    .expect("expenses should have all the ids from user_expenses")
            })
            .filter(|expense| project_id.map_or(true, |pid| expense.project_id == pid))
            .cloned()
            .collect();
        expenses.sort_by_key(|expense| expense.id);
        Ok(expenses)
    }

    async fn create_new_expense(
        &self,
        user: &str,
        new_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        let mut write_guard = self.write_lock()?;

        check_references(&write_guard, user, &new_expense)?;

        let id = write_guard.next_id();
        let expense = new_expense.to_expense(id);

        write_guard.expenses.insert(id, expense.clone());
        write_guard
            .user_expenses
            .entry(user.to_owned())
            .or_insert_with(HashSet::new)
            .insert(id);

        Ok(expense)
    }

    async fn update_expense(
        &self,
        user: &str,
        expense_id: i32,
        updated_expense: NewExpense,
    ) -> Result<Expense, ExpenseRepoError> {
        let mut write_guard = self.write_lock()?;

        check_references(&write_guard, user, &updated_expense)?;

        let owns_expense = write_guard
            .user_expenses
            .get(user)
            .map_or(false, |ids| ids.contains(&expense_id));
        if !owns_expense {
            return Err(ExpenseNotFound(expense_id));
        }

        let expense = updated_expense.to_expense(expense_id);
        write_guard.expenses.insert(expense_id, expense.clone());
        Ok(expense)
    }

    async fn delete_expense(
        &self,
        user: &str,
        expense_id: i32,
    ) -> Result<Expense, ExpenseRepoError> {
        let mut write_guard = self.write_lock()?;

        let owns_expense = write_guard
            .user_expenses
            .get(user)
            .map_or(false, |ids| ids.contains(&expense_id));
        if !owns_expense {
            return Err(ExpenseNotFound(expense_id));
        }

        let expense = write_guard
            .expenses
            .remove(&expense_id)
            .ok_or(ExpenseNotFound(expense_id))?;
        write_guard
            .user_expenses
            .get_mut(user)
            .expect("ids in expenses should be present in user_expenses")
            .remove(&expense_id);
        Ok(expense)
    }
}
