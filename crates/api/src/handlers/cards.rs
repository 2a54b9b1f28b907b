//! Handlers for cards, their field values and bulk operations.
//!
//! Field values are always checked through a [`CardForm`] built from the
//! card type's schema before they are written.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use futures::future::join_all;
use validator::Validate;
use worldweaver_core::card_form::CardForm;
use worldweaver_core::error::CoreError;
use worldweaver_core::naming::generate_slug;
use worldweaver_core::types::EntityId;
use worldweaver_db::models::card::{
    BulkDeleteRequest, BulkMoveRequest, BulkResult, Card, CardDetail, CreateCard, UpdateCard,
};
use worldweaver_db::models::card_data::{values_from_rows, UpdateCardFields};
use worldweaver_db::models::card_type::CardType;
use worldweaver_db::models::folder::{Folder, FolderSummary};
use worldweaver_db::repositories::{CardDataRepo, CardRepo, CardTypeRepo, FolderRepo};
use worldweaver_db::ServiceConn;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::CardListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_card(conn: &ServiceConn<'_>, card_id: EntityId) -> AppResult<Card> {
    CardRepo::find(conn, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card", card_id))
}

async fn find_card_type(conn: &ServiceConn<'_>, type_id: EntityId) -> AppResult<CardType> {
    CardTypeRepo::find(conn, type_id)
        .await?
        .ok_or_else(|| AppError::not_found("CardType", type_id))
}

/// The folder `folder_id`, which must belong to `world_id`.
async fn find_folder_in_world(
    conn: &ServiceConn<'_>,
    folder_id: EntityId,
    world_id: EntityId,
) -> AppResult<Folder> {
    match FolderRepo::find(conn, folder_id).await? {
        Some(folder) if folder.world_id == world_id => Ok(folder),
        _ => Err(AppError::Core(CoreError::Validation(
            "Folder does not exist in this world".into(),
        ))),
    }
}

/// The card's form, filled with its stored values.
async fn load_form(conn: &ServiceConn<'_>, card: &Card, card_type: &CardType) -> AppResult<CardForm> {
    let rows = CardDataRepo::list(conn, card.id).await?;
    Ok(CardForm::with_values(
        card_type.schema.clone(),
        values_from_rows(rows),
    ))
}

// ---------------------------------------------------------------------------
// Card CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/worlds/{id}/cards
///
/// One page of cards. Supports `?q=`, `?type_ids=`, `?folder_ids=` (comma
/// separated), `?sort_by=`, `?sort_order=`, `?page=` and `?limit=`.
pub async fn list_cards(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Query(query): Query<CardListQuery>,
) -> AppResult<impl IntoResponse> {
    let params = query.into_params()?;

    let page = CardRepo::list(&auth.conn(&state), world_id, &params).await?;

    Ok(Json(page))
}

/// POST /api/v1/worlds/{id}/cards
///
/// Creates the card and writes its initial field values. Fields missing from
/// `values` start at their kind default.
pub async fn create_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Json(mut input): Json<CreateCard>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.validate()?;

    let conn = auth.conn(&state);
    let card_type = find_card_type(&conn, input.type_id).await?;
    if card_type.world_id != world_id {
        return Err(AppError::Core(CoreError::Validation(
            "Card type belongs to a different world".into(),
        )));
    }

    let folder = match input.folder_id {
        Some(folder_id) => Some(find_folder_in_world(&conn, folder_id, world_id).await?),
        None => None,
    };

    let mut form = CardForm::new(card_type.schema.clone());
    if let Some(values) = input.values.take() {
        form.merge(values)?;
    }
    form.validate()?;

    let slug = generate_slug(&input.name);
    let card = CardRepo::create(&conn, world_id, &input, &slug).await?;
    if let Err(err) = CardDataRepo::upsert(&conn, card.id, form.values()).await {
        tracing::error!(card_id = %card.id, error = %err, "Writing initial field values failed");
        if let Err(cleanup) = CardRepo::delete(&conn, card.id).await {
            tracing::error!(card_id = %card.id, error = %cleanup, "Removing half-created card failed");
        }
        return Err(err.into());
    }

    tracing::info!(
        card_id = %card.id,
        world_id = %world_id,
        type_id = %card_type.id,
        user_id = %auth.user_id,
        "Card created",
    );

    let detail = CardDetail {
        card,
        card_type,
        folder: folder.as_ref().map(FolderSummary::from),
        values: form.into_values(),
        links_from: Vec::new(),
        links_to: Vec::new(),
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/cards/{id}
///
/// The card with its type, folder, field values and links. Each link
/// carries the name and type of the card at its other end.
pub async fn get_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let conn = auth.conn(&state);
    let listed = CardRepo::find_listed(&conn, card_id)
        .await?
        .ok_or_else(|| AppError::not_found("Card", card_id))?;
    let card = listed.card;
    let card_type = find_card_type(&conn, card.type_id).await?;
    let form = load_form(&conn, &card, &card_type).await?;
    let (links_from, links_to) = CardRepo::links(&conn, card_id).await?;

    let detail = CardDetail {
        card,
        card_type,
        folder: listed.folder,
        values: form.into_values(),
        links_from,
        links_to,
    };

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/cards/{id}
///
/// Updates the card's own columns. A new name also regenerates the slug.
/// A new folder must belong to the card's world.
pub async fn update_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<EntityId>,
    Json(mut input): Json<UpdateCard>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
    }
    input.validate()?;

    let conn = auth.conn(&state);
    if let Some(Some(folder_id)) = input.folder_id {
        let card = find_card(&conn, card_id).await?;
        find_folder_in_world(&conn, folder_id, card.world_id).await?;
    }

    let slug = input.name.as_deref().map(generate_slug);
    let card = CardRepo::update(&conn, card_id, &input, slug.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Card", card_id))?;

    tracing::info!(card_id = %card_id, user_id = %auth.user_id, "Card updated");

    Ok(Json(DataResponse { data: card }))
}

/// DELETE /api/v1/cards/{id}
pub async fn delete_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CardRepo::delete(&auth.conn(&state), card_id).await?;

    if !deleted {
        return Err(AppError::not_found("Card", card_id));
    }

    tracing::info!(card_id = %card_id, user_id = %auth.user_id, "Card deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// GET /api/v1/cards/{id}/form
///
/// Every field of the card's type with the control that edits it.
pub async fn get_card_form(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let conn = auth.conn(&state);
    let card = find_card(&conn, card_id).await?;
    let card_type = find_card_type(&conn, card.type_id).await?;
    let form = load_form(&conn, &card, &card_type).await?;

    Ok(Json(DataResponse {
        data: form.controls(),
    }))
}

/// PUT /api/v1/cards/{id}/fields
///
/// Applies `values` then `edits` to the stored values, validates the result
/// and writes it. Nothing is written when any field is invalid.
pub async fn update_card_fields(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<EntityId>,
    Json(input): Json<UpdateCardFields>,
) -> AppResult<impl IntoResponse> {
    let conn = auth.conn(&state);
    let card = find_card(&conn, card_id).await?;
    let card_type = find_card_type(&conn, card.type_id).await?;
    let mut form = load_form(&conn, &card, &card_type).await?;

    form.merge(input.values)?;
    for keyed in input.edits {
        form.apply(&keyed.key, keyed.edit)?;
    }
    form.validate()?;

    let cleared: Vec<String> = form
        .schema()
        .iter()
        .filter(|field| !form.values().contains_key(&field.key))
        .map(|field| field.key.clone())
        .collect();

    CardDataRepo::upsert(&conn, card_id, form.values()).await?;
    CardDataRepo::delete_keys(&conn, card_id, &cleared).await?;

    tracing::info!(
        card_id = %card_id,
        fields = form.values().len(),
        cleared = cleared.len(),
        user_id = %auth.user_id,
        "Card fields updated",
    );

    Ok(Json(DataResponse {
        data: form.into_values(),
    }))
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

/// POST /api/v1/cards/bulk-move
///
/// Move every listed card into `folder_id` (`null` = uncategorized). Each
/// card is moved independently; the response lists which ones failed.
/// Only cards of the folder's world are moved into a folder.
pub async fn bulk_move(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkMoveRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let conn = auth.conn(&state);
    let world_id = match input.folder_id {
        Some(folder_id) => Some(
            FolderRepo::find(&conn, folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder", folder_id))?
                .world_id,
        ),
        None => None,
    };

    let outcomes = join_all(
        input
            .card_ids
            .iter()
            .map(|&card_id| CardRepo::move_to_folder(&conn, card_id, input.folder_id, world_id)),
    )
    .await;

    let mut result = BulkResult::default();
    for (&card_id, outcome) in input.card_ids.iter().zip(outcomes) {
        if let Err(err) = &outcome {
            tracing::error!(card_id = %card_id, error = %err, "Bulk move failed for card");
        }
        result.record(card_id, outcome);
    }

    tracing::info!(
        moved = result.succeeded.len(),
        failed = result.failed.len(),
        folder_id = ?input.folder_id,
        user_id = %auth.user_id,
        "Bulk card move",
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/cards/bulk-delete
pub async fn bulk_delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let conn = auth.conn(&state);
    let outcomes = join_all(
        input
            .card_ids
            .iter()
            .map(|&card_id| CardRepo::delete(&conn, card_id)),
    )
    .await;

    let mut result = BulkResult::default();
    for (&card_id, outcome) in input.card_ids.iter().zip(outcomes) {
        if let Err(err) = &outcome {
            tracing::error!(card_id = %card_id, error = %err, "Bulk delete failed for card");
        }
        result.record(card_id, outcome);
    }

    tracing::info!(
        deleted = result.succeeded.len(),
        failed = result.failed.len(),
        user_id = %auth.user_id,
        "Bulk card delete",
    );

    Ok(Json(DataResponse { data: result }))
}
