//! Error types for graph construction, policy validation and the layout pipeline.

/// Faults raised while building a [`crate::model::SupplyGraph`] from records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("link #{link} references unknown node '{node_id}'")]
    UnknownNode { link: usize, node_id: String },

    #[error("node '{id}' is defined more than once")]
    DuplicateNode { id: String },
}

/// Faults raised by [`crate::config::LayoutPolicy::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must lie within [0, 1] (got {value})")]
    RatioOutOfRange { field: &'static str, value: f64 },

    #[error("margins along the {axis} axis leave no room for the chart")]
    MarginsExceedExtent { axis: &'static str },

    #[error("{field} range is inverted ({start} > {end})")]
    InvertedRange {
        field: &'static str,
        start: f64,
        end: f64,
    },
}

/// Top-level error for the public API.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no node with id '{0}'")]
    UnknownTraceTarget(String),
}
