use crate::forecast_repo::ForecastRepoError::{ForecastItemNotFound, ProjectNotFound};
use crate::forecast_repo::{
    ForecastLineItem, ForecastRepo, ForecastRepoError, NewForecastLineItem,
};
use crate::mem_repo::MemRepo;
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
impl ForecastRepo for MemRepo {
    async fn get_forecast_item(
        &self,
        user: &str,
        item_id: i32,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        let read_guard = self.read_lock()?;

        let Some(item_ids) = read_guard.user_forecast_items.get(user) else {
            return Err(ForecastItemNotFound(item_id));
        };
        if !item_ids.contains(&item_id) {
            return Err(ForecastItemNotFound(item_id));
        }

        let item = read_guard
            .forecast_items
            .get(&item_id)
            .expect("forecast_items should contain same ids as user_forecast_items")
            .clone();
        Ok(item)
    }

    async fn get_all_forecast_items(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<ForecastLineItem>, ForecastRepoError> {
        let read_guard = self.read_lock()?;

        let Some(item_ids) = read_guard.user_forecast_items.get(user) else {
            return Ok(Vec::new());
        };

        let mut items: Vec<ForecastLineItem> = item_ids
            .iter()
            .map(|id| {
                read_guard
                    .forecast_items
                    .get(id)
                    .expect("forecast_items should have all the ids from user_forecast_items")
            })
            .filter(|item| project_id.map_or(true, |pid| item.project_id == pid))
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn create_new_forecast_item(
        &self,
        user: &str,
        new_item: NewForecastLineItem,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.user_owns_project(user, new_item.project_id) {
            return Err(ProjectNotFound(new_item.project_id));
        }

        let id = write_guard.next_id();
        let item = new_item.to_forecast_item(id);

        write_guard.forecast_items.insert(id, item.clone());
        write_guard
            .user_forecast_items
            .entry(user.to_owned())
            .or_insert_with(HashSet::new)
            .insert(id);

        Ok(item)
    }

    async fn update_forecast_item(
        &self,
        user: &str,
        item_id: i32,
        updated_item: NewForecastLineItem,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.user_owns_project(user, updated_item.project_id) {
            return Err(ProjectNotFound(updated_item.project_id));
        }

        let owns_item = write_guard
            .user_forecast_items
            .get(user)
            .map_or(false, |ids| ids.contains(&item_id));
        if !owns_item {
            return Err(ForecastItemNotFound(item_id));
        }

        let item = updated_item.to_forecast_item(item_id);
        write_guard.forecast_items.insert(item_id, item.clone());
        Ok(item)
    }

    async fn delete_forecast_item(
        &self,
        user: &str,
        item_id: i32,
    ) -> Result<ForecastLineItem, ForecastRepoError> {
        let mut write_guard = self.write_lock()?;

        let owns_item = write_guard
            .user_forecast_items
            .get(user)
            .map_or(false, |ids| ids.contains(&item_id));
        if !owns_item {
            return Err(ForecastItemNotFound(item_id));
        }

        let item = write_guard
            .forecast_items
            .remove(&item_id)
            .ok_or(ForecastItemNotFound(item_id))?;
        write_guard
            .user_forecast_items
            .get_mut(user)
            .expect("ids in forecast_items should be present in user_forecast_items")
            .remove(&item_id);

        // Unlink expenses that pointed at the deleted line item, like the
        // ON DELETE SET NULL foreign key in the SQL schema.
        for expense in write_guard.expenses.values_mut() {
            if expense.forecast_line_item_id == Some(item_id) {
                expense.forecast_line_item_id = None;
            }
        }

        Ok(item)
    }
}
