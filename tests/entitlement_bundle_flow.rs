mod common;

use common::{drain, empty_response, governance_client, json_response, serve_sequence};
use okta_governance_rs::provider::convert::{AuditState, ExternalRefBlock, GrantBlock, IdBlock};
use okta_governance_rs::provider::resources::entitlement_bundle::{
    EntitlementBundleResource, EntitlementBundleState,
};
use okta_governance_rs::{Resource, Value};
use serde_json::json;

fn grant(id: &str, values: &[&str]) -> GrantBlock {
    GrantBlock {
        id: Value::from(id),
        values: values.iter().map(|v| IdBlock::new(*v)).collect(),
    }
}

fn plan() -> EntitlementBundleState {
    EntitlementBundleState {
        id: Value::Unknown,
        name: Value::from("Finance approvers"),
        status: Value::Unknown,
        target: Some(ExternalRefBlock {
            external_id: Value::from("0oa7"),
            kind: Value::from("APPLICATION"),
        }),
        target_resource_orn: Value::Unknown,
        entitlements_bundles: vec![grant("ent2", &["v9", "v3"]), grant("ent1", &["v1"])],
        audit: AuditState::unknown(),
        ..Default::default()
    }
}

fn server_bundle() -> String {
    json!({
        "id": "enb1",
        "name": "Finance approvers",
        "status": "ACTIVE",
        "target": {"externalId": "0oa7", "type": "APPLICATION"},
        "targetResourceOrn": "orn:okta:idp:00o1:apps:netsuite:0oa7",
        "entitlements": [
            {"id": "ent2", "values": [{"id": "v9"}, {"id": "v3"}]},
            {"id": "ent1", "values": [{"id": "v1"}]}
        ],
        "created": "2025-02-01T00:00:00Z",
        "createdBy": "00u1",
        "lastUpdated": "2025-02-01T00:00:00Z",
        "lastUpdatedBy": "00u1"
    })
    .to_string()
}

#[tokio::test]
async fn create_sends_canonical_entitlements_and_fills_computed_fields() {
    let (base_url, mut rx) = serve_sequence(vec![json_response("201 Created", &server_bundle())]).await;
    let resource = EntitlementBundleResource::new(governance_client(&base_url));

    let response = resource.create(plan()).await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");
    assert_eq!(state.id, Value::from("enb1"));
    assert_eq!(state.status, Value::from("ACTIVE"));
    assert_eq!(
        state.target_resource_orn,
        Value::from("orn:okta:idp:00o1:apps:netsuite:0oa7")
    );
    assert_eq!(
        state.entitlements_bundles,
        vec![grant("ent1", &["v1"]), grant("ent2", &["v3", "v9"])]
    );

    let requests = drain(&mut rx);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].line(), "POST /governance/api/v1/entitlement-bundles");
    let body = requests[0].json();
    assert_eq!(
        body["entitlements"],
        json!([
            {"id": "ent1", "values": [{"id": "v1"}]},
            {"id": "ent2", "values": [{"id": "v3"}, {"id": "v9"}]}
        ])
    );
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn update_replaces_by_prior_id() {
    let (base_url, mut rx) = serve_sequence(vec![json_response("200 OK", &server_bundle())]).await;
    let resource = EntitlementBundleResource::new(governance_client(&base_url));
    let mut prior = plan();
    prior.id = Value::from("enb1");

    let response = resource.update(prior, plan()).await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let requests = drain(&mut rx);
    assert_eq!(requests[0].line(), "PUT /governance/api/v1/entitlement-bundles/enb1");
    assert_eq!(requests[0].json()["id"], "enb1");
}

#[tokio::test]
async fn empty_entitlements_never_reach_the_server() {
    let (base_url, mut rx) = serve_sequence(vec![json_response("200 OK", "{}")]).await;
    let resource = EntitlementBundleResource::new(governance_client(&base_url));
    let mut bundle = plan();
    bundle.entitlements_bundles.clear();

    let response = resource.create(bundle).await;

    assert!(response.state.is_none());
    let diag = response.diagnostics.errors().next().expect("error");
    assert_eq!(diag.path.as_ref().expect("path").to_string(), "entitlements_bundles");
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn delete_calls_the_bundle_endpoint() {
    let (base_url, mut rx) = serve_sequence(vec![empty_response("204 No Content")]).await;
    let resource = EntitlementBundleResource::new(governance_client(&base_url));
    let mut prior = plan();
    prior.id = Value::from("enb1");

    let response = resource.delete(prior).await;

    assert!(!response.has_error(), "{:?}", response.diagnostics);
    assert!(response.state.is_none());
    assert_eq!(
        drain(&mut rx)[0].line(),
        "DELETE /governance/api/v1/entitlement-bundles/enb1"
    );
}
