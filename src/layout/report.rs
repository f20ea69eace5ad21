//! Serializable projection of a layout result, keyed by node and link ids.

use serde::Serialize;

use super::position::LayoutMetrics;
use super::types::{LinkDirection, LinkPath, Point, Size};
use super::LayoutResult;
use crate::config::Extent;
use crate::model::{Category, Classification, LinkAttributes, LinkEndpoints, LinkStats, NodeIdx};
use crate::svg::path_data;
use crate::trace::TraceReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub id: String,
    pub label: String,
    pub responsible_entity: bool,
    pub category: Option<Category>,
    pub class: Classification,
    pub sequence: Option<usize>,
    pub tier: Option<f64>,
    pub layer: Option<usize>,
    pub position: Point,
    pub size: Size,
    pub radius: Option<f64>,
    pub return_nodes: Vec<String>,
    pub stats: LinkStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkReport {
    pub id: usize,
    pub from: String,
    pub to: String,
    pub is_loop: bool,
    pub is_return: bool,
    pub endpoints: Option<LinkEndpoints>,
    pub attrs: LinkAttributes,
    pub path: Option<LinkPath>,
    /// SVG path data for `path`, in chart coordinates.
    pub svg: Option<String>,
    pub direction: Option<LinkDirection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterReport {
    pub source: Vec<String>,
    pub sink: Vec<String>,
    pub unconnected: Vec<String>,
    pub intermediate_source: Vec<String>,
    pub intermediate_sink: Vec<String>,
    pub intermediate_edges: Vec<String>,
    pub inner: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub extent: Extent,
    /// Add to chart coordinates to get canvas coordinates.
    pub chart_offset: Point,
    pub metrics: LayoutMetrics,
    pub clusters: ClusterReport,
    pub nodes: Vec<NodeReport>,
    pub links: Vec<LinkReport>,
}

impl LayoutReport {
    pub fn new(result: &LayoutResult, include_traces: bool) -> Self {
        let graph = &result.graph;
        let ids = |group: &[NodeIdx]| -> Vec<String> {
            group.iter().map(|&n| graph.node(n).id.clone()).collect()
        };
        let c = &result.clusters;
        let clusters = ClusterReport {
            source: ids(&c.source),
            sink: ids(&c.sink),
            unconnected: ids(&c.unconnected),
            intermediate_source: ids(&c.intermediate_source),
            intermediate_sink: ids(&c.intermediate_sink),
            intermediate_edges: ids(&c.intermediate_edges),
            inner: ids(&c.inner),
        };

        let nodes = graph
            .nodes()
            .map(|n| {
                let node = graph.node(n);
                NodeReport {
                    id: node.id.clone(),
                    label: node.label().to_string(),
                    responsible_entity: node.responsible_entity,
                    category: node.layout.category,
                    class: *node.class(),
                    sequence: node.layout.sequence,
                    tier: node.layout.tier,
                    layer: node.layout.layer,
                    position: node.layout.position,
                    size: node.layout.size,
                    radius: node.layout.radius,
                    return_nodes: ids(&node.return_nodes),
                    stats: node.stats.clone(),
                    trace: node
                        .trace
                        .as_ref()
                        .filter(|_| include_traces)
                        .map(|t| t.to_report(graph)),
                }
            })
            .collect();

        let links = graph
            .links()
            .map(|l| {
                let link = graph.link(l);
                LinkReport {
                    id: link.id,
                    from: graph.node(link.from).id.clone(),
                    to: graph.node(link.to).id.clone(),
                    is_loop: link.is_loop,
                    is_return: link.is_return,
                    endpoints: link.endpoints,
                    attrs: link.attrs.clone(),
                    svg: link.path.as_ref().map(path_data),
                    path: link.path.clone(),
                    direction: link.direction,
                }
            })
            .collect();

        Self {
            extent: result.extent.clone(),
            chart_offset: result.chart_offset(),
            metrics: result.metrics.clone(),
            clusters,
            nodes,
            links,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
