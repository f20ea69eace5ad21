use super::*;
use serde_json::json;

#[test]
fn test_parse_flag_spellings() {
    assert_eq!(parse_flag(&json!("Yes")), Some(true));
    assert_eq!(parse_flag(&json!(" no ")), Some(false));
    assert_eq!(parse_flag(&json!(true)), Some(true));
    assert_eq!(parse_flag(&json!("")), None);
    assert_eq!(parse_flag(&json!("maybe")), None);
    assert_eq!(parse_flag(&json!(null)), None);
}

#[test]
fn test_node_record_export_keys() {
    let record: NodeRecord = serde_json::from_value(json!({
        "id": "N1",
        "entity-name": "Water Co",
        "label-short": "WC",
        "responsible-entity": true,
        "essential-services": ["E1", "E2"],
        "isRE_2023": "Yes",
        "isRE_2022": "",
        "region": "north"
    }))
    .unwrap();
    assert_eq!(record.name.as_deref(), Some("Water Co"));
    assert_eq!(record.label_short.as_deref(), Some("WC"));
    assert!(record.responsible_entity);
    assert_eq!(record.essential_services, vec!["E1", "E2"]);
    assert_eq!(record.extra.get("region"), Some(&json!("north")));
}

#[test]
fn test_responsible_entity_for_year() {
    let record: NodeRecord = serde_json::from_value(json!({
        "id": "N1",
        "isRE_2023": "Yes",
        "isRE_2022": "No",
        "isRE_draft": "Yes"
    }))
    .unwrap();
    assert_eq!(record.responsible_entity_for(2023), Some(true));
    assert_eq!(record.responsible_entity_for(2022), Some(false));
    assert_eq!(record.responsible_entity_for(2021), None);
    assert_eq!(record.reporting_years(), vec![2022, 2023]);
}

#[test]
fn test_link_record_export_keys() {
    let record: LinkRecord = serde_json::from_value(json!({
        "node-from": "A",
        "node-to": "B",
        "failure-point-yes-no": "Yes",
        "failure-resilience-yes-no": "no",
        "node-from-specialised-yes-no": "",
        "reported-as": "upstream",
        "assigned-services": "S1",
        "frequency": 3
    }))
    .unwrap();
    assert_eq!(record.from, "A");
    assert_eq!(record.to, "B");
    assert_eq!(record.failure_point, Some(true));
    assert_eq!(record.failure_resilient, Some(false));
    assert_eq!(record.from_specialised, None);
    assert_eq!(record.reported_as, Some(ReportedAs::Upstream));
    assert_eq!(record.services, vec!["S1"]);
    assert_eq!(record.frequency.as_deref(), Some("3"));
}

#[test]
fn test_link_record_short_keys() {
    let record: LinkRecord = serde_json::from_value(json!({"from": "A", "to": "B"})).unwrap();
    assert_eq!(record, LinkRecord::new("A", "B"));
}

#[test]
fn test_schema_labels() {
    let schema: Schema = serde_json::from_value(json!({
        "services": {
            "S1": {"label": "Collection"},
            "S2": {"name": "Treatment"},
            "S3": {}
        }
    }))
    .unwrap();
    assert_eq!(schema.ids("services"), vec!["S1", "S2", "S3"]);
    assert_eq!(schema.label("services", "S1"), "Collection");
    assert_eq!(schema.label("services", "S2"), "Treatment");
    assert_eq!(schema.label("services", "S3"), "S3");
    assert!(schema.ids("missing").is_empty());
}

#[test]
fn test_dataset_accepts_node_master_key() {
    let dataset = Dataset::from_json(r#"{"node-master": [{"id": "A"}], "links": []}"#).unwrap();
    assert_eq!(dataset.nodes.len(), 1);
    assert!(dataset.schema.tables.is_empty());
}

#[test]
fn test_for_year_selects_responsible_entities_and_endpoints() {
    let dataset = Dataset::from_json(
        r#"{
            "nodes": [
                {"id": "A", "isRE_2023": "Yes", "responsible-entity": false},
                {"id": "B", "entity-name": "Bee", "isRE_2023": "No", "responsible-entity": true},
                {"id": "Z", "isRE_2023": "No"}
            ],
            "links": [
                {"node-from": "C", "node-to": "A"},
                {"node-from": "B", "node-to": "A"}
            ]
        }"#,
    )
    .unwrap();
    let year = dataset.for_year(2023);
    let ids: Vec<&str> = year.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert!(year.nodes[0].responsible_entity);
    assert!(!year.nodes[1].responsible_entity);
    assert_eq!(year.nodes[1].name.as_deref(), Some("Bee"));
    assert_eq!(year.nodes[2], NodeRecord::new("C"));
    assert_eq!(year.links.len(), 2);
}
