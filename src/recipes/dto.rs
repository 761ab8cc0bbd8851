use serde::Deserialize;

use crate::validation::{Constraint, Field, Schema};

/// Strict schema for `POST /recipes/create`: every field required.
pub const RECIPE_CREATE_SCHEMA: Schema = Schema {
    fields: &[
        Field {
            name: "title",
            required: true,
            constraint: Constraint::Text {
                min: Some(3),
                max: Some(20),
            },
        },
        Field {
            name: "description",
            required: true,
            constraint: Constraint::Text {
                min: Some(3),
                max: Some(200),
            },
        },
        Field {
            name: "image",
            required: true,
            constraint: Constraint::Text {
                min: Some(1),
                max: None,
            },
        },
        Field {
            name: "rating",
            required: true,
            constraint: Constraint::Number { min: 1.0, max: 5.0 },
        },
        Field {
            name: "category",
            required: true,
            constraint: Constraint::Text {
                min: Some(3),
                max: Some(20),
            },
        },
        Field {
            name: "ingredients",
            required: true,
            constraint: Constraint::TextList { min_items: 1 },
        },
        Field {
            name: "instructions",
            required: true,
            constraint: Constraint::TextList { min_items: 1 },
        },
    ],
};

/// Relaxed schema for `PUT /recipes/update/:id`: same bounds, every
/// field optional.
pub const RECIPE_UPDATE_SCHEMA: Schema = Schema {
    fields: &[
        Field {
            name: "title",
            required: false,
            constraint: Constraint::Text {
                min: Some(3),
                max: Some(20),
            },
        },
        Field {
            name: "description",
            required: false,
            constraint: Constraint::Text {
                min: Some(3),
                max: Some(200),
            },
        },
        Field {
            name: "image",
            required: false,
            constraint: Constraint::Text {
                min: Some(1),
                max: None,
            },
        },
        Field {
            name: "rating",
            required: false,
            constraint: Constraint::Number { min: 1.0, max: 5.0 },
        },
        Field {
            name: "category",
            required: false,
            constraint: Constraint::Text {
                min: Some(3),
                max: Some(20),
            },
        },
        Field {
            name: "ingredients",
            required: false,
            constraint: Constraint::TextList { min_items: 1 },
        },
        Field {
            name: "instructions",
            required: false,
            constraint: Constraint::TextList { min_items: 1 },
        },
    ],
};

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub category: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub category: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
}
