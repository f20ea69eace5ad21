//! Input records: nodes, links and the schema lookup tables.
//!
//! Field names follow the spreadsheet export (`entity-name`, `node-from`,
//! `failure-point-yes-no`, ...); snake_case spellings are accepted as aliases.
//! Unknown keys are kept in `extra` and carried through untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

static RE_FLAG_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^isRE_(\d{4})$").expect("valid isRE key pattern"));

// ─── Yes/no flags ────────────────────────────────────────────────────────────

/// Parse the loose yes/no spellings found in the export.
///
/// Returns `None` for blanks and anything unrecognised.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "y" => Some(true),
            "no" | "false" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn de_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_flag(&value))
}

/// Accept either a JSON array of ids or a single (possibly empty) string.
fn de_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// ─── NodeRecord ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, alias = "entity-name", deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub label: Option<String>,
    #[serde(
        default,
        rename = "label-short",
        alias = "label_short",
        deserialize_with = "de_opt_string"
    )]
    pub label_short: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_id_list")]
    pub services: Vec<String>,
    #[serde(
        default,
        rename = "essential-services",
        alias = "essential_services",
        alias = "essential-waste-services",
        deserialize_with = "de_id_list"
    )]
    pub essential_services: Vec<String>,
    #[serde(
        default,
        rename = "responsible-entity",
        alias = "responsible_entity"
    )]
    pub responsible_entity: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A record already flagged as a responsible entity.
    pub fn responsible(id: impl Into<String>) -> Self {
        Self {
            responsible_entity: true,
            ..Self::new(id)
        }
    }

    /// Responsible-entity flag for a reporting year, read from an `isRE_<year>` key.
    pub fn responsible_entity_for(&self, year: u16) -> Option<bool> {
        self.extra.iter().find_map(|(key, value)| {
            let caps = RE_FLAG_KEY.captures(key)?;
            let key_year: u16 = caps[1].parse().ok()?;
            if key_year == year {
                parse_flag(value)
            } else {
                None
            }
        })
    }

    /// Every reporting year that has an `isRE_<year>` column on this record.
    pub fn reporting_years(&self) -> Vec<u16> {
        self.extra
            .keys()
            .filter_map(|key| RE_FLAG_KEY.captures(key)?[1].parse().ok())
            .collect()
    }
}

// ─── LinkRecord ──────────────────────────────────────────────────────────────

/// Which side's survey reported the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedAs {
    Upstream,
    Downstream,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(rename = "node-from", alias = "from")]
    pub from: String,
    #[serde(rename = "node-to", alias = "to")]
    pub to: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub frequency: Option<String>,
    #[serde(
        default,
        rename = "failure-point-yes-no",
        alias = "failure_point",
        deserialize_with = "de_flag"
    )]
    pub failure_point: Option<bool>,
    #[serde(
        default,
        rename = "failure-resilience-yes-no",
        alias = "failure_resilient",
        deserialize_with = "de_flag"
    )]
    pub failure_resilient: Option<bool>,
    #[serde(
        default,
        rename = "node-from-specialised-yes-no",
        alias = "from_specialised",
        deserialize_with = "de_flag"
    )]
    pub from_specialised: Option<bool>,
    #[serde(default, rename = "reported-as", alias = "reported_as")]
    pub reported_as: Option<ReportedAs>,
    #[serde(
        default,
        rename = "assigned-services",
        alias = "rv-assigned-services",
        alias = "services",
        deserialize_with = "de_id_list"
    )]
    pub services: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl LinkRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ..Self::default()
        }
    }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

/// Lookup tables: category name → id → descriptive record.
///
/// Only used for statistics and labelling, never for geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub tables: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Schema {
    pub fn lookup(&self, category: &str, id: &str) -> Option<&Value> {
        self.tables.get(category)?.get(id)
    }

    /// Ids of a category in key order; empty when the table is absent.
    pub fn ids(&self, category: &str) -> Vec<&str> {
        self.tables
            .get(category)
            .map(|t| t.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Human label for an id, falling back to the id itself.
    pub fn label<'a>(&'a self, category: &str, id: &'a str) -> &'a str {
        self.lookup(category, id)
            .and_then(|v| v.get("label").or_else(|| v.get("name")))
            .and_then(Value::as_str)
            .unwrap_or(id)
    }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(alias = "node-master")]
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
    #[serde(default)]
    pub schema: Schema,
}

impl Dataset {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Select the node set for one reporting year.
    ///
    /// Responsible entities are the master records flagged `isRE_<year>`; every
    /// other node is an endpoint of some link, ordered by id, with metadata taken
    /// from the master list when present.
    pub fn for_year(&self, year: u16) -> Dataset {
        let master: BTreeMap<&str, &NodeRecord> =
            self.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let mut nodes: Vec<NodeRecord> = self
            .nodes
            .iter()
            .filter(|n| n.responsible_entity_for(year) == Some(true))
            .map(|n| NodeRecord {
                responsible_entity: true,
                ..n.clone()
            })
            .collect();
        let responsible: BTreeSet<String> = nodes.iter().map(|n| n.id.clone()).collect();

        let endpoints: BTreeSet<&str> = self
            .links
            .iter()
            .flat_map(|l| [l.from.as_str(), l.to.as_str()])
            .filter(|id| !responsible.contains(*id))
            .collect();
        for id in endpoints {
            let record = match master.get(id) {
                Some(n) => NodeRecord {
                    responsible_entity: false,
                    ..(*n).clone()
                },
                None => NodeRecord::new(id),
            };
            nodes.push(record);
        }

        tracing::debug!(
            year,
            responsible = responsible.len(),
            total = nodes.len(),
            "selected reporting year"
        );

        Dataset {
            nodes,
            links: self.links.clone(),
            schema: self.schema.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_dataset.rs"]
mod tests;
