// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Combined query-condition set handed to the downstream search call.

use serde::Serialize;

use crate::logic::condition_set::ConditionSet;
use crate::models::condition::FieldId;

/// Active values of one field; values of the same field combine with logical OR.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryCondition {
    pub field: FieldId,
    pub values: Vec<String>,
}

/// Flatten the active conditions in panel order, values in selection order.
pub fn build_query(set: &ConditionSet) -> Vec<QueryCondition> {
    set.iter()
        .map(|(field, active)| QueryCondition {
            field: field.clone(),
            values: active.values().map(str::to_string).collect(),
        })
        .collect()
}

/// Pretty JSON rendering of a query, used for the panel's preview.
pub fn to_json(query: &[QueryCondition]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(query)
}
