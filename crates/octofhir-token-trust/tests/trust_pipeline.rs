//! End-to-end re-validation against the in-memory stores.

use std::sync::Arc;
use std::time::Duration;

use octofhir_token_trust::prelude::*;
use octofhir_token_trust::{
    CacheConfig, InMemoryClientStore, InMemorySubjectStore, MemoryCache, Subject,
    ValidationConfig,
};

fn stores() -> (Arc<InMemorySubjectStore>, Arc<InMemoryClientStore>) {
    let subjects = Arc::new(InMemorySubjectStore::new());
    subjects.upsert(Subject::new("u1", "alice")).unwrap();

    let clients = Arc::new(InMemoryClientStore::new());
    clients.upsert(Client::new("c1", "Patient Portal")).unwrap();

    (subjects, clients)
}

fn access_claims() -> ClaimSet {
    ClaimSet::new()
        .with(claim_types::SUBJECT, "u1")
        .with(claim_types::CLIENT_ID, "c1")
        .with("scope", "patient/*.rs")
}

#[tokio::test]
async fn revocations_after_issuance_are_caught() {
    let (subjects, clients) = stores();
    let validator = DefaultTokenTrustValidator::new(subjects.clone(), clients.clone());

    let verdict = validator
        .validate_access_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert!(!verdict.is_error());
    assert_eq!(verdict.claims().len(), 3);

    clients.set_enabled("c1", false);
    let verdict = validator
        .validate_access_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert!(verdict.is_error());
    assert_eq!(verdict.error(), Some("expired_token"));
    assert!(verdict.claims().is_empty());

    clients.set_enabled("c1", true);
    subjects.set_active("u1", false);
    let verdict = validator
        .validate_identity_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert_eq!(verdict.error(), Some("expired_token"));
}

#[tokio::test]
async fn deleted_client_is_rejected() {
    let (subjects, clients) = stores();
    let validator = DefaultTokenTrustValidator::new(subjects, clients.clone());

    clients.remove("c1");

    let verdict = validator
        .validate_access_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert_eq!(verdict.error(), Some("expired_token"));
}

#[tokio::test]
async fn cached_status_expires_with_ttl() {
    let (subjects, clients) = stores();
    let validator = DefaultTokenTrustValidator::from_config(
        subjects.clone(),
        clients,
        &ValidationConfig {
            cache_status_lookups: true,
            ..ValidationConfig::default()
        },
        &CacheConfig {
            ttl: Duration::from_millis(50),
        },
    )
    .unwrap();

    let verdict = validator
        .validate_access_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert!(!verdict.is_error());

    // still served from cache
    subjects.set_active("u1", false);
    let verdict = validator
        .validate_access_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert!(!verdict.is_error());

    tokio::time::sleep(Duration::from_millis(120)).await;

    let verdict = validator
        .validate_access_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert_eq!(verdict.error(), Some("expired_token"));
}

#[tokio::test]
async fn config_driven_validator() {
    let config = TrustConfig::from_toml_str(
        r#"
        [validation]
        cache_status_lookups = false
        short_circuit_identity_errors = true
        "#,
    )
    .unwrap();

    let (subjects, clients) = stores();
    let validator: Arc<dyn TokenTrustValidator> = Arc::new(
        DefaultTokenTrustValidator::from_config(
            subjects.clone(),
            clients,
            &config.validation,
            &config.cache,
        )
        .unwrap(),
    );

    subjects.set_active("u1", false);
    let verdict = validator
        .validate_access_token(TokenVerdict::success(access_claims()))
        .await
        .unwrap();
    assert_eq!(verdict.error(), Some("expired_token"));

    let failed = TokenVerdict::failed("invalid_token");
    let verdict = validator.validate_identity_token(failed.clone()).await.unwrap();
    assert_eq!(verdict, failed);
}

#[tokio::test]
async fn cache_aside_scenario() {
    let cache = MemoryCache::new(Duration::from_secs(60));

    let first = get_or_compute(&cache, "k", || async { Ok(Some("v".to_string())) })
        .await
        .unwrap();
    assert_eq!(first.as_deref(), Some("v"));

    let second = get_or_compute(&cache, "k", || async {
        Err::<Option<String>, _>(TrustError::storage("compute must not run on a hit"))
    })
    .await
    .unwrap();
    assert_eq!(second.as_deref(), Some("v"));
}
