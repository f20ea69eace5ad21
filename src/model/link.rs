//! Link entity: endpoints, carried attributes, derived flags and geometry.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{Category, NodeIdx};
use crate::dataset::{LinkRecord, ReportedAs};
use crate::layout::types::{LinkDirection, LinkPath};

/// Attributes copied from the input record. Opaque to the layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkAttributes {
    pub frequency: Option<String>,
    pub failure_point: Option<bool>,
    pub failure_resilient: Option<bool>,
    pub from_specialised: Option<bool>,
    pub reported_as: Option<ReportedAs>,
    pub services: Vec<String>,
    pub extra: BTreeMap<String, Value>,
}

impl From<&LinkRecord> for LinkAttributes {
    fn from(record: &LinkRecord) -> Self {
        Self {
            frequency: record.frequency.clone(),
            failure_point: record.failure_point,
            failure_resilient: record.failure_resilient,
            from_specialised: record.from_specialised,
            reported_as: record.reported_as,
            services: record.services.clone(),
            extra: record.extra.clone(),
        }
    }
}

/// Categories of both endpoints, recorded once classification has converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkEndpoints {
    pub from: Option<Category>,
    pub to: Option<Category>,
}

#[derive(Debug, Clone)]
pub struct Link {
    /// Unique, creation-ordered id (the arena edge index).
    pub id: usize,
    pub from: NodeIdx,
    pub to: NodeIdx,
    pub attrs: LinkAttributes,
    pub is_loop: bool,
    pub is_return: bool,
    pub endpoints: Option<LinkEndpoints>,
    pub path: Option<LinkPath>,
    pub direction: Option<LinkDirection>,
}

impl Link {
    pub(crate) fn new(id: usize, from: NodeIdx, to: NodeIdx, attrs: LinkAttributes) -> Self {
        Self {
            id,
            from,
            to,
            attrs,
            is_loop: from == to,
            is_return: false,
            endpoints: None,
            path: None,
            direction: None,
        }
    }
}
