use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::errors::ApiError;
use crate::http::{Envelope, JsonBody};
use crate::state::schema::{Record, RecordId, Schema};
use crate::state::store::SharedStore;

/// Build the CRUD routes for one collection under `/{S::PATH}`.
pub fn routes<S: Schema>(store: SharedStore<S>) -> Router {
    Router::new()
        .route(
            &format!("/{}", S::PATH),
            get(list_records::<S>)
                .post(create_record::<S>)
                .fallback(super::route_not_found),
        )
        .route(
            &format!("/{}/:id", S::PATH),
            get(find_record::<S>)
                .put(update_record::<S>)
                .patch(update_record::<S>)
                .delete(delete_record::<S>)
                .fallback(super::route_not_found),
        )
        .with_state(store)
}

/// A non-numeric id can never match a record, so it is reported the same
/// way as an unknown one.
fn parse_id<S: Schema>(raw: &str) -> Result<RecordId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("{} not found", S::LABEL)))
}

//
// ─────────────────────────────────────────────────────────────
// GET /{resource}
// Return the whole collection in insertion order
// ─────────────────────────────────────────────────────────────
//
async fn list_records<S: Schema>(
    State(store): State<SharedStore<S>>,
) -> Envelope<Vec<Record>>
{
    Envelope::ok(format!("All {}", S::PLURAL), store.list())
}

//
// ─────────────────────────────────────────────────────────────
// POST /{resource}
// Validate the required field and append a new record
// ─────────────────────────────────────────────────────────────
//
async fn create_record<S: Schema>(
    State(store): State<SharedStore<S>>,
    JsonBody(fields): JsonBody,
) -> Result<Envelope<Record>, ApiError>
{
    let record = store.create(fields)?;
    tracing::debug!(resource = S::PATH, id = ?record.get("id"), "record created");
    Ok(Envelope::created(format!("{} created", S::LABEL), record))
}

//
// ─────────────────────────────────────────────────────────────
// GET /{resource}/{id}
// Return one record or 404
// ─────────────────────────────────────────────────────────────
//
async fn find_record<S: Schema>(
    Path(id): Path<String>,
    State(store): State<SharedStore<S>>,
) -> Result<Envelope<Record>, ApiError>
{
    let id = parse_id::<S>(&id)?;
    store
        .find_by_id(id)
        .map(|record| Envelope::ok(format!("{} found", S::LABEL), record))
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", S::LABEL)))
}

//
// ─────────────────────────────────────────────────────────────
// PUT|PATCH /{resource}/{id}
// Merge the payload into an existing record
// ─────────────────────────────────────────────────────────────
//
async fn update_record<S: Schema>(
    Path(id): Path<String>,
    State(store): State<SharedStore<S>>,
    JsonBody(patch): JsonBody,
) -> Result<Envelope<Record>, ApiError>
{
    let id = parse_id::<S>(&id)?;
    let record = store.update_by_id(id, patch)?;
    Ok(Envelope::ok(format!("{} updated", S::LABEL), record))
}

//
// ─────────────────────────────────────────────────────────────
// DELETE /{resource}/{id}
// Remove a record and return it; unknown ids are 404
// ─────────────────────────────────────────────────────────────
//
async fn delete_record<S: Schema>(
    Path(id): Path<String>,
    State(store): State<SharedStore<S>>,
) -> Result<Envelope<Record>, ApiError>
{
    let id = parse_id::<S>(&id)?;
    let record = store.delete_by_id(id)?;
    Ok(Envelope::ok(format!("{} deleted", S::LABEL), record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::schema::{Posts, Users};

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id::<Users>("42"), Ok(42));
        assert_eq!(
            parse_id::<Users>("abc"),
            Err(ApiError::NotFound("User not found".to_string()))
        );
        assert_eq!(
            parse_id::<Posts>("-1"),
            Err(ApiError::NotFound("Tweet not found".to_string()))
        );
    }
}
