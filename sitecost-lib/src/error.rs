use crate::auth::provider::ProviderError;
use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sitecost_repo::draw_repo::DrawRepoError;
use sitecost_repo::expense_repo::ExpenseRepoError;
use sitecost_repo::forecast_repo::ForecastRepoError;
use sitecost_repo::project_repo::ProjectRepoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Project(#[from] ProjectRepoError),
    #[error(transparent)]
    Forecast(#[from] ForecastRepoError),
    #[error(transparent)]
    Expense(#[from] ExpenseRepoError),
    #[error(transparent)]
    Draw(#[from] DrawRepoError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl HandlerError {
    fn is_not_found(&self) -> bool {
        matches!(
            self,
            HandlerError::Project(ProjectRepoError::ProjectNotFound(_))
                | HandlerError::Forecast(ForecastRepoError::ForecastItemNotFound(_))
                | HandlerError::Forecast(ForecastRepoError::ProjectNotFound(_))
                | HandlerError::Expense(ExpenseRepoError::ExpenseNotFound(_))
                | HandlerError::Expense(ExpenseRepoError::ProjectNotFound(_))
                | HandlerError::Expense(ExpenseRepoError::ForecastItemNotFound(_))
                | HandlerError::Draw(DrawRepoError::DrawNotFound(_))
                | HandlerError::Draw(DrawRepoError::ProjectNotFound(_))
        )
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        if self.is_not_found() {
            return StatusCode::NOT_FOUND;
        }
        match self {
            HandlerError::Provider(ProviderError::Rejected { status, .. }) => {
                StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            HandlerError::Provider(ProviderError::Transport(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        let detail = if status.is_server_error() {
            "internal error".to_owned()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(serde_json::json!({ "detail": detail }))
    }
}
