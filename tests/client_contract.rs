//! Contract tests for the REST client against a mocked API.

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hospital_admin::api::HospitalClient;
use hospital_admin::config::{ResponseFormat, Settings};
use hospital_admin::error::ClientError;
use hospital_admin::models::{MedicamentPayload, NursePayload};

fn settings(server: &MockServer, format: ResponseFormat) -> Settings {
    Settings {
        base_url: format!("{}/hospital/api", server.uri()),
        authorization: "admin".to_string(),
        response_format: format,
    }
}

fn client(server: &MockServer) -> HospitalClient {
    HospitalClient::new(&settings(server, ResponseFormat::Json)).expect("client should build")
}

#[tokio::test]
async fn nurses_list_sends_authorization_and_parses_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospital/api/nurses/"))
        .and(header("Authorization", "admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nurses_list": [
                {"name": "Mateo", "surname": "Gil",
                 "link": {"rel": "self", "href": "/hospital/api/nurses/nur-0/"}},
                {"name": "Jussi", "surname": "Hiltunen",
                 "link": {"rel": "self", "href": "/hospital/api/nurses/nur-1/"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let nurses = client(&server).nurses_list().await.expect("list should load");

    assert_eq!(nurses.len(), 2);
    assert_eq!(nurses[0].name, "Mateo");
    assert_eq!(nurses[0].id(), "nur-0");
    assert_eq!(nurses[1].id(), "nur-1");
}

#[tokio::test]
async fn nurse_detail_maps_spaced_response_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospital/api/nurses/nur-0/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nurse": {
                "name": "Mateo", "surname": "Gil",
                "phone number": 987654321,
                "address": "Bahia Pikachu N 4",
                "link": {"title": "patient list", "rel": "related",
                         "href": "/hospital/api/nurses/nur-0/patients/"}
            },
            "link": {"title": "nurses list", "rel": "related", "href": "/hospital/api/nurses/"}
        })))
        .mount(&server)
        .await;

    let envelope = client(&server)
        .nurse("/hospital/api/nurses/nur-0/")
        .await
        .expect("detail should load");

    assert_eq!(envelope.nurse.phone_number.as_deref(), Some("987654321"));
    assert_eq!(
        envelope.nurse.link.href,
        "/hospital/api/nurses/nur-0/patients/"
    );
}

#[tokio::test]
async fn create_nurse_returns_the_location_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hospital/api/nurses/"))
        .and(header("Authorization", "admin"))
        .and(body_json(json!({"name": "Ana", "surname": "Ruiz"})))
        .respond_with(
            ResponseTemplate::new(201).insert_header("Location", "/hospital/api/nurses/nur-2/"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let location = client(&server)
        .create_nurse(&NursePayload::from_form("Ana", "Ruiz", "", ""))
        .await
        .expect("creation should succeed");

    assert_eq!(location, "/hospital/api/nurses/nur-2/");
}

#[tokio::test]
async fn create_without_location_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hospital/api/nurses/"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let result = client(&server)
        .create_nurse(&NursePayload::from_form("Ana", "", "", ""))
        .await;

    assert!(matches!(result, Err(ClientError::MissingLocation)));
}

#[tokio::test]
async fn non_success_status_maps_to_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospital/api/nurses/nur-9/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client(&server).nurse("/hospital/api/nurses/nur-9/").await;

    assert!(matches!(
        result,
        Err(ClientError::UnexpectedStatus { status, .. }) if status == StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn update_nurse_sends_only_filled_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/hospital/api/nurses/nur-0/"))
        .and(body_json(json!({"name": "Mateo"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_nurse(
            "/hospital/api/nurses/nur-0/",
            &NursePayload::from_form("Mateo", "", "", ""),
        )
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn create_medicament_posts_to_the_medication_list_href() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hospital/api/nurses/nur-0/patients/pat-1/medication/"))
        .and(body_json(json!({
            "name": "Betadine",
            "dosage": "20ml",
            "patientid": "pat-1"
        })))
        .respond_with(ResponseTemplate::new(201).insert_header(
            "Location",
            "/hospital/api/nurses/nur-0/patients/pat-1/medication/med-2/",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let payload = MedicamentPayload::from_form("Betadine", "20ml", "", "", "", "")
        .with_patient("pat-1".to_string());
    let location = client(&server)
        .create_medicament("/hospital/api/nurses/nur-0/patients/pat-1/medication/", &payload)
        .await
        .expect("creation should succeed");

    assert_eq!(
        location,
        "/hospital/api/nurses/nur-0/patients/pat-1/medication/med-2/"
    );
}

#[tokio::test]
async fn delete_hits_the_resource_href() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/hospital/api/nurses/nur-0/patients/pat-1/medication/med-0/"))
        .and(header("Authorization", "admin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete_medicament("/hospital/api/nurses/nur-0/patients/pat-1/medication/med-0/")
        .await
        .expect("deletion should succeed");
}

#[tokio::test]
async fn xml_format_fails_closed_without_touching_the_network() {
    let server = MockServer::start().await;
    let client =
        HospitalClient::new(&settings(&server, ResponseFormat::Xml)).expect("client should build");

    let result = client.nurses_list().await;

    assert!(matches!(
        result,
        Err(ClientError::UnsupportedFormat(ResponseFormat::Xml))
    ));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
