mod common;

use common::{drain, governance_client, json_response, serve_sequence};
use okta_governance_rs::provider::convert::{AuditState, GrantBlock, IdBlock};
use okta_governance_rs::provider::resources::risk_rule::{
    ConflictCriteriaBlock, CriterionBlock, CriterionValueBlock, RiskRuleResource, RiskRuleState,
    RuleResourceBlock,
};
use okta_governance_rs::{Resource, Value};
use serde_json::json;

const ORN: &str = "orn:okta:idp:00o1:apps:netsuite:0oa7";

fn plan(name: &str) -> RiskRuleState {
    RiskRuleState {
        id: Value::Unknown,
        name: Value::from(name),
        kind: Value::from("SEPARATION_OF_DUTIES"),
        resources: vec![RuleResourceBlock {
            resource_orn: Value::from(ORN),
        }],
        conflict_criteria: Some(ConflictCriteriaBlock {
            and: vec![CriterionBlock {
                name: Value::from("approver"),
                attribute: Value::from("principal.effective_grants"),
                operation: Value::from("CONTAINS_ONE"),
                value: Some(CriterionValueBlock {
                    kind: Value::from("ENTITLEMENTS"),
                    value: vec![GrantBlock {
                        id: Value::from("ent1"),
                        values: vec![IdBlock::new("v1")],
                    }],
                }),
            }],
        }),
        audit: AuditState::unknown(),
        ..Default::default()
    }
}

fn server_rule(name: &str) -> String {
    json!({
        "id": "rr1",
        "name": name,
        "type": "SEPARATION_OF_DUTIES",
        "resources": [{"resourceOrn": ORN}],
        "conflictCriteria": {"and": [{
            "name": "approver",
            "attribute": "principal.effective_grants",
            "operation": "CONTAINS_ONE",
            "value": {"type": "ENTITLEMENTS", "value": [{"id": "ent1", "values": [{"id": "v1"}]}]}
        }]},
        "created": "2025-02-01T00:00:00Z",
        "createdBy": "00u1",
        "lastUpdated": "2025-02-02T00:00:00Z",
        "lastUpdatedBy": "00u2"
    })
    .to_string()
}

#[tokio::test]
async fn create_posts_criteria_and_mirrors_the_rule() {
    let (base_url, mut rx) =
        serve_sequence(vec![json_response("201 Created", &server_rule("Approve and pay"))]).await;
    let resource = RiskRuleResource::new(governance_client(&base_url));

    let response = resource.create(plan("Approve and pay")).await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.expect("state");
    assert_eq!(state.id, Value::from("rr1"));
    assert_eq!(state.audit.last_updated_by, Value::from("00u2"));

    let requests = drain(&mut rx);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].line(), "POST /governance/api/v1/risk-rules");
    let body = requests[0].json();
    assert!(body.get("id").is_none());
    assert_eq!(body["resources"], json!([{"resourceOrn": ORN}]));
    assert_eq!(
        body["conflictCriteria"]["and"][0]["value"],
        json!({"type": "ENTITLEMENTS", "value": [{"id": "ent1", "values": [{"id": "v1"}]}]})
    );
}

#[tokio::test]
async fn update_puts_the_body_with_its_id() {
    let (base_url, mut rx) =
        serve_sequence(vec![json_response("200 OK", &server_rule("Renamed rule"))]).await;
    let resource = RiskRuleResource::new(governance_client(&base_url));
    let mut prior = plan("Approve and pay");
    prior.id = Value::from("rr1");

    let response = resource.update(prior, plan("Renamed rule")).await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    assert_eq!(response.state.expect("state").name, Value::from("Renamed rule"));
    let requests = drain(&mut rx);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].line(), "PUT /governance/api/v1/risk-rules/rr1");
    let body = requests[0].json();
    assert_eq!(body["id"], "rr1");
    assert_eq!(body["name"], "Renamed rule");
}

#[tokio::test]
async fn read_rebuilds_the_criteria_tree() {
    let (base_url, mut rx) =
        serve_sequence(vec![json_response("200 OK", &server_rule("Approve and pay"))]).await;
    let resource = RiskRuleResource::new(governance_client(&base_url));

    let response = resource
        .read(RiskRuleState {
            id: Value::from("rr1"),
            ..Default::default()
        })
        .await;

    let state = response.state.expect("state");
    let criteria = state.conflict_criteria.expect("criteria");
    let value = criteria.and[0].value.as_ref().expect("value");
    assert_eq!(value.kind, Value::from("ENTITLEMENTS"));
    assert_eq!(value.value[0].values, vec![IdBlock::new("v1")]);
    assert_eq!(drain(&mut rx)[0].line(), "GET /governance/api/v1/risk-rules/rr1");
}

#[tokio::test]
async fn rule_without_criteria_never_reaches_the_server() {
    let (base_url, mut rx) = serve_sequence(vec![json_response("200 OK", "{}")]).await;
    let resource = RiskRuleResource::new(governance_client(&base_url));
    let mut rule = plan("Approve and pay");
    rule.conflict_criteria = None;

    let response = resource.create(rule).await;

    assert!(response.state.is_none());
    let diag = response.diagnostics.errors().next().expect("error");
    assert_eq!(diag.summary, "Invalid Attribute Value");
    assert!(drain(&mut rx).is_empty());
}
