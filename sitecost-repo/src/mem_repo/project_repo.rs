use crate::mem_repo::MemRepo;
use crate::project_repo::ProjectRepoError::ProjectNotFound;
use crate::project_repo::{NewProject, Project, ProjectRepo, ProjectRepoError, ProjectUpdate};
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
impl ProjectRepo for MemRepo {
    async fn get_project(
        &self,
        user: &str,
        project_id: i32,
    ) -> Result<Project, ProjectRepoError> {
        let read_guard = self.read_lock()?;

        if !read_guard.user_owns_project(user, project_id) {
            return Err(ProjectNotFound(project_id));
        }

        let project = read_guard
            .projects
            .get(&project_id)
            .expect("projects should contain same ids as user_projects")
            .clone();
        Ok(project)
    }

    async fn get_all_projects(&self, user: &str) -> Result<Vec<Project>, ProjectRepoError> {
        let read_guard = self.read_lock()?;

        let Some(project_ids) = read_guard.user_projects.get(user) else {
            return Ok(Vec::new());
        };

        let mut projects: Vec<Project> = project_ids
            .iter()
            .map(|id| {
                read_guard
                    .projects
                    .get(id)
                    .expect("projects should have all the ids from user_projects")
            })
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    async fn create_new_project(
        &self,
        user: &str,
        new_project: NewProject,
    ) -> Result<Project, ProjectRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id();
        let project = new_project.to_project(id);

        write_guard.projects.insert(id, project.clone());
        write_guard
            .user_projects
            .entry(user.to_owned())
            .or_insert_with(HashSet::new)
            .insert(id);

        Ok(project)
    }

    async fn update_project(
        &self,
        user: &str,
        project_id: i32,
        update: ProjectUpdate,
    ) -> Result<Project, ProjectRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.user_owns_project(user, project_id) {
            return Err(ProjectNotFound(project_id));
        }

        let project = write_guard
            .projects
            .get_mut(&project_id)
            .ok_or(ProjectNotFound(project_id))?;
        update.apply(project);
        Ok(project.clone())
    }

    async fn delete_project(
        &self,
        user: &str,
        project_id: i32,
    ) -> Result<Project, ProjectRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.user_owns_project(user, project_id) {
            return Err(ProjectNotFound(project_id));
        }

        let project = write_guard
            .projects
            .remove(&project_id)
            .ok_or(ProjectNotFound(project_id))?;
        write_guard
            .user_projects
            .get_mut(user)
            .expect("ids in projects should be present in user_projects")
            .remove(&project_id);

        // Children go with the project, mirroring the cascading foreign keys
        // of the SQL schema.
        let orphaned_items: Vec<i32> = write_guard
            .forecast_items
            .iter()
            .filter(|(_, item)| item.project_id == project_id)
            .map(|(id, _)| *id)
            .collect();
        for id in orphaned_items {
            write_guard.forecast_items.remove(&id);
            if let Some(ids) = write_guard.user_forecast_items.get_mut(user) {
                ids.remove(&id);
            }
        }

        let orphaned_expenses: Vec<i32> = write_guard
            .expenses
            .iter()
            .filter(|(_, expense)| expense.project_id == project_id)
            .map(|(id, _)| *id)
            .collect();
        for id in orphaned_expenses {
            write_guard.expenses.remove(&id);
            if let Some(ids) = write_guard.user_expenses.get_mut(user) {
                ids.remove(&id);
            }
        }

        let orphaned_draws: Vec<i32> = write_guard
            .draws
            .iter()
            .filter(|(_, draw)| draw.project_id == project_id)
            .map(|(id, _)| *id)
            .collect();
        for id in orphaned_draws {
            write_guard.draws.remove(&id);
            if let Some(ids) = write_guard.user_draws.get_mut(user) {
                ids.remove(&id);
            }
        }

        Ok(project)
    }
}
