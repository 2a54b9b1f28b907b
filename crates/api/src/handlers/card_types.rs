//! Handlers for card types and the template catalog.
//!
//! Every write goes through [`SchemaBuilder::submit`], so an invalid name or
//! schema is rejected before the hosted service is called.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use worldweaver_core::error::CoreError;
use worldweaver_core::field_schema::EDITOR_KINDS;
use worldweaver_core::field_value::initial_values;
use worldweaver_core::schema_builder::SchemaBuilder;
use worldweaver_core::types::EntityId;
use worldweaver_db::models::card_type::{CreateCardType, CreateFromTemplate, UpdateCardType};
use worldweaver_db::models::template::group_by_category;
use worldweaver_db::repositories::CardTypeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Card types
// ---------------------------------------------------------------------------

/// GET /api/v1/worlds/{id}/card-types
pub async fn list_card_types(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let card_types = CardTypeRepo::list(&auth.conn(&state), world_id).await?;

    Ok(Json(DataResponse { data: card_types }))
}

/// POST /api/v1/worlds/{id}/card-types
pub async fn create_card_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Json(input): Json<CreateCardType>,
) -> AppResult<impl IntoResponse> {
    let draft = input.into_builder().submit()?;

    let card_type = CardTypeRepo::create(&auth.conn(&state), world_id, &draft).await?;

    tracing::info!(
        card_type_id = %card_type.id,
        world_id = %world_id,
        fields = card_type.schema.len(),
        user_id = %auth.user_id,
        "Card type created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: card_type })))
}

/// POST /api/v1/worlds/{id}/card-types/from-template
///
/// Copy a catalog template into the world, optionally under a new name.
pub async fn create_from_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Json(input): Json<CreateFromTemplate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let conn = auth.conn(&state);
    let template = CardTypeRepo::find_template(&conn, input.template_id)
        .await?
        .ok_or_else(|| AppError::not_found("CardTypeTemplate", input.template_id))?;

    let mut builder = SchemaBuilder::from_draft(template.into());
    if let Some(name) = input.name {
        builder.name = name;
    }
    let draft = builder.submit()?;

    let card_type = CardTypeRepo::create(&conn, world_id, &draft).await?;

    tracing::info!(
        card_type_id = %card_type.id,
        template_id = %input.template_id,
        world_id = %world_id,
        user_id = %auth.user_id,
        "Card type created from template",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: card_type })))
}

/// GET /api/v1/card-types/{id}
pub async fn get_card_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_type_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let card_type = CardTypeRepo::find(&auth.conn(&state), card_type_id)
        .await?
        .ok_or_else(|| AppError::not_found("CardType", card_type_id))?;

    Ok(Json(DataResponse { data: card_type }))
}

/// PUT /api/v1/card-types/{id}
///
/// The patch is merged over the stored card type and the result is
/// validated as a whole. A new `schema` replaces the old one.
pub async fn update_card_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_type_id): Path<EntityId>,
    Json(input): Json<UpdateCardType>,
) -> AppResult<impl IntoResponse> {
    let conn = auth.conn(&state);
    let current = CardTypeRepo::find(&conn, card_type_id)
        .await?
        .ok_or_else(|| AppError::not_found("CardType", card_type_id))?;

    let draft = SchemaBuilder::from_draft(input.merged_with(&current)).submit()?;

    let card_type = CardTypeRepo::replace(&conn, card_type_id, &draft)
        .await?
        .ok_or_else(|| AppError::not_found("CardType", card_type_id))?;

    tracing::info!(card_type_id = %card_type_id, user_id = %auth.user_id, "Card type updated");

    Ok(Json(DataResponse { data: card_type }))
}

/// DELETE /api/v1/card-types/{id}
///
/// Fails with 409 while cards of this type still exist.
pub async fn delete_card_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_type_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CardTypeRepo::delete(&auth.conn(&state), card_type_id)
        .await
        .map_err(|err| match err.code() {
            Some("23503") => AppError::Core(CoreError::Conflict(
                "Card type is still used by one or more cards".into(),
            )),
            _ => AppError::Service(err),
        })?;

    if !deleted {
        return Err(AppError::not_found("CardType", card_type_id));
    }

    tracing::info!(card_type_id = %card_type_id, user_id = %auth.user_id, "Card type deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/card-types/{id}/defaults
///
/// The value map a new card of this type starts with.
pub async fn card_type_defaults(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_type_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let card_type = CardTypeRepo::find(&auth.conn(&state), card_type_id)
        .await?
        .ok_or_else(|| AppError::not_found("CardType", card_type_id))?;

    Ok(Json(DataResponse {
        data: initial_values(&card_type.schema),
    }))
}

// ---------------------------------------------------------------------------
// Template catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/field-kinds
///
/// The field kinds the card type editor offers, in menu order.
pub async fn list_field_kinds(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse { data: EDITOR_KINDS }))
}

/// GET /api/v1/card-type-templates
///
/// The catalog grouped by category.
pub async fn list_templates(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let templates = CardTypeRepo::list_templates(&auth.conn(&state)).await?;

    Ok(Json(DataResponse {
        data: group_by_category(templates),
    }))
}
