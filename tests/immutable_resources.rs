mod common;

use common::{drain, governance_client, json_response, serve_sequence};
use okta_governance_rs::provider::convert::AuditState;
use okta_governance_rs::provider::resources::request_v2::{
    RequestLifecycle, RequestV2Resource, RequestV2State, RequestedBlock, RequestedForBlock,
    RequesterFieldBlock,
};
use okta_governance_rs::provider::resources::{
    EndUserMyRequestsResource, RequestSequenceResource, RequestSequenceState,
};
use okta_governance_rs::{Resource, Value};
use serde_json::json;

fn request_plan(entry_id: &str) -> RequestV2State {
    RequestV2State {
        id: Value::Unknown,
        requested: Some(RequestedBlock {
            entry_id: Value::from(entry_id),
            kind: Value::Null,
        }),
        requested_for: Some(RequestedForBlock {
            external_id: Value::from("00u1"),
            kind: Value::Null,
        }),
        requester_field_values: vec![RequesterFieldBlock {
            id: Value::from("field1"),
            kind: Value::from("TEXT"),
            value: Value::from("quarter end close"),
            ..Default::default()
        }],
        lifecycle: RequestLifecycle::unknown(),
        audit: AuditState::unknown(),
    }
}

#[tokio::test]
async fn request_update_warns_and_keeps_the_read_state() {
    let created = json!({
        "id": "req1",
        "requested": {"entryId": "cat1", "type": "CATALOG_ENTRY"},
        "requestedFor": {"externalId": "00u1", "type": "OKTA_USER"},
        "requesterFieldValues": [{"id": "field1", "type": "TEXT", "value": "quarter end close"}],
        "status": "PENDING",
        "created": "2025-01-01T00:00:00Z",
        "createdBy": "00u1",
        "lastUpdated": "2025-01-01T00:00:00Z",
        "lastUpdatedBy": "00u1"
    });
    let (base_url, mut rx) = serve_sequence(vec![json_response("200 OK", &created.to_string())]).await;
    let resource = RequestV2Resource::new(governance_client(&base_url));

    let state = resource
        .create(request_plan("cat1"))
        .await
        .state
        .expect("created state");
    assert_eq!(state.id, Value::from("req1"));
    assert_eq!(state.lifecycle.status, Value::from("PENDING"));
    assert!(state.lifecycle.granted.is_null());
    let body = drain(&mut rx).remove(0).json();
    assert_eq!(
        body,
        json!({
            "requested": {"entryId": "cat1", "type": "CATALOG_ENTRY"},
            "requestedFor": {"externalId": "00u1", "type": "OKTA_USER"},
            "requesterFieldValues": [{"id": "field1", "type": "TEXT", "value": "quarter end close"}]
        })
    );

    let response = resource.update(state.clone(), request_plan("cat2")).await;

    assert!(!response.has_error());
    assert_eq!(response.state, Some(state));
    let warnings: Vec<_> = response.diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].summary, "Update Not Supported");
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn request_sequence_cannot_be_created() {
    let resource = RequestSequenceResource::default();
    let plan = RequestSequenceState {
        resource_id: Value::from("0oares"),
        name: Value::from("Manager then app owner"),
        ..Default::default()
    };
    let response = resource.create(plan).await;
    assert!(!response.has_error());
    let warnings: Vec<_> = response.diagnostics.warnings().collect();
    assert_eq!(warnings[0].summary, "Create Not Supported");
}

#[test]
fn composite_import_ids_are_checked() {
    let sequences = RequestSequenceResource::default();
    let state = sequences.import_state("0oares/seq1").state.expect("state");
    assert_eq!(state.resource_id, Value::from("0oares"));
    assert_eq!(state.id, Value::from("seq1"));
    assert!(sequences.import_state("a/b/c").has_error());

    let my_requests = EndUserMyRequestsResource::default();
    let state = my_requests.import_state("req1/cat1").state.expect("state");
    assert_eq!(state.id, Value::from("req1"));
    assert_eq!(state.entry_id, Value::from("cat1"));
    let response = my_requests.import_state("req1");
    let errors: Vec<_> = response.diagnostics.errors().collect();
    assert!(errors[0].detail.contains("request_id/entry_id"));
}
