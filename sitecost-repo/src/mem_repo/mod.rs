mod draw_repo;
mod expense_repo;
mod forecast_repo;
mod project_repo;

use crate::draw_repo::{DrawRepo, DrawTracker};
use crate::expense_repo::{Expense, ExpenseRepo};
use crate::forecast_repo::{ForecastLineItem, ForecastRepo};
use crate::project_repo::{Project, ProjectRepo};
use crate::HealthCheck;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    projects: HashMap<i32, Project>,
    user_projects: HashMap<String, HashSet<i32>>,
    forecast_items: HashMap<i32, ForecastLineItem>,
    user_forecast_items: HashMap<String, HashSet<i32>>,
    expenses: HashMap<i32, Expense>,
    user_expenses: HashMap<String, HashSet<i32>>,
    draws: HashMap<i32, DrawTracker>,
    user_draws: HashMap<String, HashSet<i32>>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn user_owns_project(&self, user: &str, project_id: i32) -> bool {
        self.user_projects
            .get(user)
            .map_or(false, |ids| ids.contains(&project_id))
    }
}

pub struct MemRepo {
    state: RwLock<State>,
}

impl MemRepo {
    pub fn new() -> MemRepo {
        let state = State {
            projects: HashMap::new(),
            user_projects: HashMap::new(),
            forecast_items: HashMap::new(),
            user_forecast_items: HashMap::new(),
            expenses: HashMap::new(),
            user_expenses: HashMap::new(),
            draws: HashMap::new(),
            user_draws: HashMap::new(),
            next_id: 0,
        };
        MemRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

impl Default for MemRepo {
    fn default() -> Self {
        MemRepo::new()
    }
}

#[async_trait]
impl HealthCheck for MemRepo {
    async fn check(&self) -> bool {
        self.state.read().is_ok()
    }
}

pub fn create_repos() -> (
    Arc<dyn ProjectRepo>,
    Arc<dyn ForecastRepo>,
    Arc<dyn ExpenseRepo>,
    Arc<dyn DrawRepo>,
    Arc<dyn HealthCheck>,
) {
    let repo = Arc::new(MemRepo::new());
    (
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo,
    )
}
