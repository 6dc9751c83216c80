use hospital_crm_core::db::open_db_in_memory;
use hospital_crm_core::{
    Patient, PatientListQuery, PatientRepository, PatientService, RepoError,
    SqlitePatientRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;

fn patient(first: &str, last: &str, phone: Option<&str>, email: Option<&str>) -> Patient {
    let mut patient = Patient::new(first, last);
    patient.phone = phone.map(str::to_string);
    patient.email = email.map(str::to_string);
    patient
}

fn seed(conn: &Connection) -> Vec<String> {
    let service = PatientService::new(SqlitePatientRepository::new(conn));
    [
        patient("Ada", "Lovelace", Some("555-0101"), Some("ada@example.org")),
        patient("Grace", "Hopper", Some("555-0199"), None),
        patient("Alan", "Turing", None, Some("alan@BLETCHLEY.uk")),
        patient("Katherine", "Johnson", Some("555-7777"), Some("kj@nasa.gov")),
    ]
    .iter()
    .map(|p| service.create_patient(p).unwrap().to_string())
    .collect()
}

fn names(conn: &Connection, q: &str) -> HashSet<String> {
    let service = PatientService::new(SqlitePatientRepository::new(conn));
    service
        .list_patients(&PatientListQuery::search(q))
        .unwrap()
        .into_iter()
        .map(|doc| doc.body.last_name)
        .collect()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = PatientService::new(SqlitePatientRepository::new(&conn));

    let mut input = patient("Ada", "Lovelace", Some("555-0101"), Some("ada@example.org"));
    input.mrn = Some("MRN-1".to_string());
    input.consent_sms = true;
    input.address = serde_json::json!({"line1": "12 St James's Sq", "city": "London"})
        .as_object()
        .cloned();
    let id = service.create_patient(&input).unwrap();

    let loaded = service.get_patient(&id.to_string()).unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.body, input);
}

#[test]
fn search_matches_any_contact_field_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    assert_eq!(names(&conn, "LOVE"), HashSet::from(["Lovelace".to_string()]));
    assert_eq!(names(&conn, "grace"), HashSet::from(["Hopper".to_string()]));
    assert_eq!(
        names(&conn, "555-01"),
        HashSet::from(["Lovelace".to_string(), "Hopper".to_string()])
    );
    assert_eq!(names(&conn, "bletchley"), HashSet::from(["Turing".to_string()]));
    assert_eq!(names(&conn, "nasa.GOV"), HashSet::from(["Johnson".to_string()]));
    assert!(names(&conn, "nobody").is_empty());
}

#[test]
fn search_folds_case_beyond_ascii() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let service = PatientService::new(SqlitePatientRepository::new(&conn));
    service.create_patient(&Patient::new("Émile", "Żółć")).unwrap();

    assert_eq!(names(&conn, "émile"), HashSet::from(["Żółć".to_string()]));
    assert_eq!(names(&conn, "ŻÓŁĆ"), HashSet::from(["Żółć".to_string()]));
    assert_eq!(names(&conn, "ÉMI"), HashSet::from(["Żółć".to_string()]));
}

#[test]
fn search_treats_pattern_characters_literally() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    assert!(names(&conn, "%").is_empty());
    assert!(names(&conn, ".*").is_empty());
    assert_eq!(names(&conn, "a@e").len(), 1);
}

#[test]
fn list_without_query_returns_everything_up_to_limit() {
    let conn = open_db_in_memory().unwrap();
    let ids = seed(&conn);
    let service = PatientService::new(SqlitePatientRepository::new(&conn));

    let all = service.list_patients(&PatientListQuery::default()).unwrap();
    assert_eq!(all.len(), ids.len());

    let capped = PatientListQuery {
        q: None,
        limit: Some(2),
    };
    assert_eq!(service.list_patients(&capped).unwrap().len(), 2);

    let none = PatientListQuery {
        q: None,
        limit: Some(0),
    };
    assert!(service.list_patients(&none).unwrap().is_empty());
}

#[test]
fn get_unknown_or_malformed_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let service = PatientService::new(SqlitePatientRepository::new(&conn));

    let unknown = service
        .get_patient("6f9619ff-8b86-4011-b42d-00c04fc964ff")
        .unwrap_err();
    assert!(matches!(unknown, RepoError::NotFound { collection: "patient", .. }));

    let malformed = service.get_patient("not-an-object-id").unwrap_err();
    assert!(matches!(malformed, RepoError::NotFound { .. }));
}

#[test]
fn insert_rejects_invalid_payload_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePatientRepository::new(&conn);

    let err = repo
        .insert_patient(&patient("", "Lovelace", None, Some("bad")))
        .unwrap_err();
    match err {
        RepoError::Validation(validation) => assert_eq!(validation.issues().len(), 2),
        other => panic!("unexpected error: {other}"),
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM patients;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn email_is_stored_trimmed() {
    let conn = open_db_in_memory().unwrap();
    let service = PatientService::new(SqlitePatientRepository::new(&conn));

    let id = service
        .create_patient(&patient("Ada", "Lovelace", None, Some("  ada@example.org \t")))
        .unwrap();

    let loaded = service.get_patient(&id.to_string()).unwrap();
    assert_eq!(loaded.body.email.as_deref(), Some("ada@example.org"));
}

#[test]
fn corrupt_address_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let ids = seed(&conn);
    conn.execute(
        "UPDATE patients SET address = '[1, 2]' WHERE id = ?1;",
        [ids[0].as_str()],
    )
    .unwrap();

    let service = PatientService::new(SqlitePatientRepository::new(&conn));
    let err = service.get_patient(&ids[0]).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
