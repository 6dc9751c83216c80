use hospital_crm_core::db::open_db_in_memory;
use hospital_crm_core::{
    Provider, ProviderListQuery, ProviderRepository, ProviderService, RepoError,
    SqliteProviderRepository,
};

#[test]
fn create_then_search_by_name_fragment() {
    let conn = open_db_in_memory().unwrap();
    let service = ProviderService::new(SqliteProviderRepository::new(&conn));

    let mut grey = Provider::new("Dr. Meredith Grey");
    grey.specialty = Some("General Surgery".to_string());
    grey.npi = Some("1234567890".to_string());
    let grey_id = service.create_provider(&grey).unwrap();
    service.create_provider(&Provider::new("Dr. Derek Shepherd")).unwrap();

    let hits = service
        .list_providers(&ProviderListQuery::search("GREY"))
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, grey_id);
    assert_eq!(hits[0].body, grey);

    let by_title = service
        .list_providers(&ProviderListQuery::search("dr."))
        .unwrap();
    assert_eq!(by_title.len(), 2);
}

#[test]
fn search_does_not_look_at_other_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = ProviderService::new(SqliteProviderRepository::new(&conn));

    let mut provider = Provider::new("Dr. Bailey");
    provider.location = Some("Seattle Grace".to_string());
    service.create_provider(&provider).unwrap();

    let hits = service
        .list_providers(&ProviderListQuery::search("seattle"))
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn list_is_capped_by_limit() {
    let conn = open_db_in_memory().unwrap();
    let service = ProviderService::new(SqliteProviderRepository::new(&conn));
    for index in 0..5 {
        service
            .create_provider(&Provider::new(format!("Provider {index}")))
            .unwrap();
    }

    let query = ProviderListQuery {
        q: None,
        limit: Some(4),
    };
    assert_eq!(service.list_providers(&query).unwrap().len(), 4);
    assert_eq!(
        service
            .list_providers(&ProviderListQuery::default())
            .unwrap()
            .len(),
        5
    );
}

#[test]
fn blank_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProviderRepository::new(&conn);

    let err = repo.insert_provider(&Provider::new("   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}
