//! Lookup endpoint tests: header propagation, empty-is-not-found,
//! downstream failure propagation.

use serde_json::{json, Value};

use audit_bff::clients::{SystemIdMapperClient, HEADER_CORRELATION_ID, HEADER_USER};

mod common;

const CORR: &str = "corr-test-1";

#[tokio::test]
async fn user_id_lookup_forwards_list_unchanged_with_headers() {
    let downstream = common::start_json_downstream(
        200,
        r#"{"users":[
            {"id":"u2","firstName":"Beth","lastName":"Brown","email":"b@example.com"},
            {"id":"u1","firstName":"Ada","lastName":"Adams","email":"a@example.com"}
        ]}"#,
    )
    .await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/user/id?userIds=u2,u1", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    // Order-preserving, no de-duplication, no reshaping.
    assert_eq!(
        body,
        json!([
            {"id":"u2","firstName":"Beth","lastName":"Brown","email":"b@example.com"},
            {"id":"u1","firstName":"Ada","lastName":"Adams","email":"a@example.com"}
        ])
    );

    let requests = downstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get(HEADER_USER).unwrap(), "test-cpp-uid");
    assert_eq!(requests[0].headers.get(HEADER_CORRELATION_ID).unwrap(), CORR);
    assert!(requests[0].path.contains("usersgroups"));
    assert!(requests[0].query.replace("%2C", ",").contains("userIds=u2,u1"));
}

#[tokio::test]
async fn user_id_lookup_with_no_matches_is_404() {
    let downstream = common::start_json_downstream(200, r#"{"users":[]}"#).await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/user/id?userIds=missing-id", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let envelope: Value = response.json().await.unwrap();
    assert_eq!(envelope["status"], 404);
    assert_eq!(envelope["error"], "Not Found");
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .contains("No users found for the provided User IDs"));
    assert_eq!(envelope["path"], "/user/id");
    assert_eq!(envelope["correlationId"], CORR);
}

#[tokio::test]
async fn null_user_envelope_degrades_to_404_not_500() {
    let downstream = common::start_json_downstream(200, r#"{"users":null}"#).await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/user/email?emails=a@example.com", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let envelope: Value = response.json().await.unwrap();
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .contains("No users found for the provided email addresses"));
}

#[tokio::test]
async fn case_urn_lookup_applies_case_id_discriminator() {
    let downstream = common::start_json_downstream(
        200,
        r#"{"systemIds":[{"sourceId":"U1","targetId":"C1","targetType":"CASE_ID"}]}"#,
    )
    .await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/case/urn?caseUrns=U1", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([{"caseUrn":"U1","caseId":"C1","targetType":"CASE_ID"}])
    );

    let requests = downstream.requests();
    assert!(requests[0].query.contains("sourceIds=U1"));
    assert!(requests[0].query.contains("targetType=CASE_ID"));
}

#[tokio::test]
async fn case_id_lookup_with_no_matches_is_404() {
    let downstream = common::start_json_downstream(200, r#"{"systemIds":[]}"#).await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/case/id?caseIds=C404", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let envelope: Value = response.json().await.unwrap();
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .contains("No Case URNs found for the provided Case IDs"));

    assert!(downstream.requests()[0].query.contains("targetIds=C404"));
}

#[tokio::test]
async fn mapper_client_round_trips_legacy_field_names() {
    let downstream = common::start_json_downstream(
        200,
        r#"{"systemIds":[{"sourceId":"U1","targetId":"C1","targetType":"TFL"}]}"#,
    )
    .await;

    let config = common::test_config(&downstream.base_url());
    let client = SystemIdMapperClient::new(reqwest::Client::new(), &config.cqrs);
    let mappings = client
        .get_mappings_by_case_urns("U1", "TFL", CORR)
        .await
        .unwrap();

    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].case_urn.as_deref(), Some("U1"));
    assert_eq!(mappings[0].case_id.as_deref(), Some("C1"));
    assert_eq!(mappings[0].target_type.as_deref(), Some("TFL"));
}

#[tokio::test]
async fn material_lookup_tolerates_null_fields_and_maps_empty_to_404() {
    let downstream = common::start_json_downstream(
        200,
        r#"{"materialIds":[{"materialId":"m1","caseUrn":"U1"}]}"#,
    )
    .await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/material/id?materialIds=m1", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body[0]["materialId"], "m1");
    assert_eq!(body[0]["courtDocumentId"], Value::Null);

    let empty_downstream = common::start_json_downstream(200, r#"{"materialIds":[]}"#).await;
    let empty_bff = common::start_bff(common::test_config(&empty_downstream.base_url())).await;

    let response = client
        .get(format!("http://{}/material/id?materialIds=m404", empty_bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let envelope: Value = response.json().await.unwrap();
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .contains("No Material Cases found for the provided Material IDs"));
}

#[tokio::test]
async fn missing_correlation_header_is_400_envelope() {
    let downstream = common::start_json_downstream(200, r#"{"users":[]}"#).await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/user/id?userIds=u1", bff))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let envelope: Value = response.json().await.unwrap();
    assert_eq!(envelope["status"], 400);
    assert_eq!(envelope["error"], "Bad Request");
    assert!(envelope["message"]
        .as_str()
        .unwrap()
        .contains("Missing required header: CPPCLIENTCORRELATIONID"));
    assert_eq!(envelope["correlationId"], "N/A");
    assert_eq!(envelope["path"], "/user/id");

    // The header is checked before any downstream call.
    assert_eq!(downstream.hits(), 0);
}

#[tokio::test]
async fn missing_query_parameter_is_400_envelope() {
    let downstream = common::start_json_downstream(200, r#"{"users":[]}"#).await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/user/id", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let envelope: Value = response.json().await.unwrap();
    assert!(envelope["message"].as_str().unwrap().contains("userIds"));
    assert_eq!(downstream.hits(), 0);
}

#[tokio::test]
async fn downstream_failure_propagates_status_and_is_never_404() {
    let downstream = common::start_json_downstream(500, r#"{"oops":true}"#).await;
    let bff = common::start_bff(common::test_config(&downstream.base_url())).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/case/urn?caseUrns=U1", bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let envelope: Value = response.json().await.unwrap();
    assert_eq!(envelope["status"], 500);
    assert_eq!(envelope["correlationId"], CORR);

    // A 502 from upstream is forwarded as 502, not flattened to 500.
    let gateway = common::start_json_downstream(502, "{}").await;
    let gateway_bff = common::start_bff(common::test_config(&gateway.base_url())).await;
    let response = reqwest::Client::new()
        .get(format!("http://{}/case/urn?caseUrns=U1", gateway_bff))
        .header(HEADER_CORRELATION_ID, CORR)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
}
