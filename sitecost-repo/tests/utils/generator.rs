use chrono::NaiveDate;
use fake::faker::address::en::StreetName;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use sitecost_repo::draw_repo::NewDrawTracker;
use sitecost_repo::expense_repo::NewExpense;
use sitecost_repo::forecast_repo::{ForecastStatus, NewForecastLineItem};
use sitecost_repo::project_repo::{NewProject, ProjectStatus};

const CATEGORIES: [&str; 7] = [
    "Foundation",
    "Framing",
    "Electrical",
    "Plumbing",
    "Roofing",
    "HVAC",
    "Finishes",
];

const UNITS: [&str; 3] = ["sqft", "lump sum", "per unit"];

fn pick<const N: usize>(values: [&str; N]) -> String {
    values
        .choose(&mut rand::thread_rng())
        .expect("values should not be empty")
        .to_string()
}

fn money() -> Decimal {
    Decimal::new(rand::thread_rng().gen_range(100..10_000_000), 2)
}

fn date() -> NaiveDate {
    let days = rand::thread_rng().gen_range(0..365);
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(days)
}

pub fn generate_new_project() -> NewProject {
    NewProject::new(
        CompanyName().fake::<String>() + " build",
        Some(StreetName().fake()),
        Some(date()),
        Some(date()),
        ProjectStatus::NotStarted,
        Some(rand::thread_rng().gen_range(800..10_000)),
        Some(money()),
    )
}

pub fn generate_new_project_with_name(name: &str) -> NewProject {
    NewProject {
        name: name.to_owned(),
        ..generate_new_project()
    }
}

pub fn generate_new_forecast_item(project_id: i32) -> NewForecastLineItem {
    NewForecastLineItem::new(
        project_id,
        pick(CATEGORIES),
        Some(Sentence(3..8).fake()),
        money(),
        Decimal::ZERO,
        Some(pick(UNITS)),
        None,
        0,
        ForecastStatus::NotStarted,
    )
}

pub fn generate_new_expense(project_id: i32) -> NewExpense {
    NewExpense::new(
        project_id,
        None,
        Some(CompanyName().fake()),
        money(),
        date(),
        None,
    )
}

pub fn generate_new_expense_with_link(project_id: i32, item_id: i32) -> NewExpense {
    NewExpense {
        forecast_line_item_id: Some(item_id),
        ..generate_new_expense(project_id)
    }
}

pub fn generate_new_draw(project_id: i32) -> NewDrawTracker {
    NewDrawTracker::new(project_id, money(), Some(date()), false, None)
}
