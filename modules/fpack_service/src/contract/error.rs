//! Contract error types for the F-Pack service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Relation that prevents a deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    /// Referencing relation (e.g. "equipment", "prices", "template_columns")
    pub relation: String,
    /// Number of referencing rows
    pub count: usize,
    /// Display names of the referencing rows, when they have one
    pub names: Vec<String>,
}

impl Dependent {
    pub fn new(relation: impl Into<String>, count: usize, names: Vec<String>) -> Self {
        Self {
            relation: relation.into(),
            count,
            names,
        }
    }
}

/// F-Pack service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FpackError {
    /// Entity not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (template, client, product, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Uniqueness violation
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Deletion blocked by referencing rows
    #[error("{resource} {id} is still referenced by {}", describe(.dependents))]
    DependentsExist {
        resource: String,
        id: String,
        dependents: Vec<Dependent>,
    },
    /// Malformed input
    #[error("Validation error: {message}")]
    Validation { message: String },
    /// Storage failure
    #[error("Internal error")]
    Internal,
}

impl FpackError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

fn describe(dependents: &[Dependent]) -> String {
    dependents
        .iter()
        .map(|d| {
            if d.names.is_empty() {
                format!("{} {}", d.count, d.relation)
            } else {
                format!("{} {} ({})", d.count, d.relation, d.names.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
