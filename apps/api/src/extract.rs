use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` extractor whose rejection is an `AppError`, so a body that does not parse
/// gets the usual `{"error": ..}` envelope with a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
