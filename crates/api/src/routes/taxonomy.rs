//! Taxonomy lookup routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use budgetry_core::taxonomy::{ItemTemplate, SubCategory, Taxonomy};

use crate::{AppState, error::ApiError};

/// Creates the taxonomy routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/taxonomy", get(get_taxonomy))
        .route("/taxonomy/{main}/sub-categories", get(list_sub_categories))
        .route(
            "/taxonomy/sub-categories/{sub}/templates",
            get(list_item_templates),
        )
        .route(
            "/taxonomy/sub-categories/{sub}/item-codes/{index}",
            get(get_item_code),
        )
}

/// A sub-category option for forms.
#[derive(Debug, Serialize)]
pub struct SubCategoryOption {
    /// Sub-category key.
    pub key: SubCategory,
    /// Display label.
    pub label: String,
}

/// Generated item code.
#[derive(Debug, Serialize)]
pub struct ItemCodeResponse {
    /// Sub-category key.
    pub sub_category: SubCategory,
    /// Item index.
    pub index: u32,
    /// Code, e.g. `I-MS-001`.
    pub item_code: String,
}

async fn get_taxonomy(State(state): State<AppState>) -> Json<Taxonomy> {
    Json(state.taxonomy.as_ref().clone())
}

/// Unknown main categories yield an empty list.
async fn list_sub_categories(
    State(state): State<AppState>,
    Path(main): Path<String>,
) -> Json<Vec<SubCategoryOption>> {
    let options = state
        .taxonomy
        .sub_category_options_for(&main)
        .into_iter()
        .map(|key| SubCategoryOption {
            label: state.taxonomy.sub_category_display_name(&key),
            key,
        })
        .collect();
    Json(options)
}

async fn list_item_templates(
    State(state): State<AppState>,
    Path(sub): Path<String>,
) -> Json<Vec<ItemTemplate>> {
    Json(state.taxonomy.item_templates(&SubCategory::new(sub)).to_vec())
}

async fn get_item_code(
    State(state): State<AppState>,
    Path((sub, index)): Path<(String, u32)>,
) -> Result<Json<ItemCodeResponse>, ApiError> {
    let sub_category = SubCategory::new(sub);
    let item_code = state.taxonomy.generate_item_code(&sub_category, index)?;
    Ok(Json(ItemCodeResponse {
        sub_category,
        index,
        item_code,
    }))
}
