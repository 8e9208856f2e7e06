pub mod resource_routes;
pub mod system_routes;

use crate::errors::ApiError;

/// Shared 404 for unmatched paths and unsupported methods.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
