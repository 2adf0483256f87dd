//! HTTP API module for the labor-day calendar.
//!
//! This module provides the REST endpoints for pricing labor-days, editing
//! entries, reading statistics, managing settings and data, and syncing
//! with the remote mirror.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateRequest, EntriesQuery, PullQuery, SaveSettingsRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculateResponse, EntryView, ImportResponse,
    MonthSummaryResponse, SaveSettingsResponse,
};
pub use state::{AppState, MirrorHandle};
