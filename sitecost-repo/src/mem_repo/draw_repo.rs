use crate::draw_repo::DrawRepoError::{DrawNotFound, ProjectNotFound};
use crate::draw_repo::{DrawRepo, DrawRepoError, DrawTracker, NewDrawTracker};
use crate::mem_repo::MemRepo;
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
impl DrawRepo for MemRepo {
    async fn get_draw(&self, user: &str, draw_id: i32) -> Result<DrawTracker, DrawRepoError> {
        let read_guard = self.read_lock()?;

        let Some(draw_ids) = read_guard.user_draws.get(user) else {
            return Err(DrawNotFound(draw_id));
        };
        if !draw_ids.contains(&draw_id) {
            return Err(DrawNotFound(draw_id));
        }

        let draw = read_guard
            .draws
            .get(&draw_id)
            .expect("draws should contain same ids as user_draws")
            .clone();
        Ok(draw)
    }

    async fn get_all_draws(
        &self,
        user: &str,
        project_id: Option<i32>,
    ) -> Result<Vec<DrawTracker>, DrawRepoError> {
        let read_guard = self.read_lock()?;

        let Some(draw_ids) = read_guard.user_draws.get(user) else {
            return Ok(Vec::new());
        };

        let mut draws: Vec<DrawTracker> = draw_ids
            .iter()
            .map(|id| {
                read_guard
                    .draws
                    .get(id)
                    .expect("draws should have all the ids from user_draws")
            })
            .filter(|draw| project_id.map_or(true, |pid| draw.project_id == pid))
            .cloned()
            .collect();
        draws.sort_by_key(|draw| draw.id);
        Ok(draws)
    }

    async fn create_new_draw(
        &self,
        user: &str,
        new_draw: NewDrawTracker,
    ) -> Result<DrawTracker, DrawRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.user_owns_project(user, new_draw.project_id) {
            return Err(ProjectNotFound(new_draw.project_id));
        }

        let id = write_guard.next_id();
        let draw = new_draw.to_draw_tracker(id);

        write_guard.draws.insert(id, draw.clone());
        write_guard
            .user_draws
            .entry(user.to_owned())
            .or_insert_with(HashSet::new)
            .insert(id);

        Ok(draw)
    }

    async fn update_draw(
        &self,
        user: &str,
        draw_id: i32,
        updated_draw: NewDrawTracker,
    ) -> Result<DrawTracker, DrawRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.user_owns_project(user, updated_draw.project_id) {
            return Err(ProjectNotFound(updated_draw.project_id));
        }

        let owns_draw = write_guard
            .user_draws
            .get(user)
            .map_or(false, |ids| ids.contains(&draw_id));
        if !owns_draw {
            return Err(DrawNotFound(draw_id));
        }

        let draw = updated_draw.to_draw_tracker(draw_id);
        write_guard.draws.insert(draw_id, draw.clone());
        Ok(draw)
    }

    async fn delete_draw(&self, user: &str, draw_id: i32) -> Result<DrawTracker, DrawRepoError> {
        let mut write_guard = self.write_lock()?;

        let owns_draw = write_guard
            .user_draws
            .get(user)
            .map_or(false, |ids| ids.contains(&draw_id));
        if !owns_draw {
            return Err(DrawNotFound(draw_id));
        }

        let draw = write_guard
            .draws
            .remove(&draw_id)
            .ok_or(DrawNotFound(draw_id))?;
        write_guard
            .user_draws
            .get_mut(user)
            .expect("ids in draws should be present in user_draws")
            .remove(&draw_id);
        Ok(draw)
    }
}
