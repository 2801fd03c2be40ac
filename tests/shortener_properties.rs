mod common;

use std::collections::HashSet;
use std::sync::Arc;

use shrtn::application::services::ShortenerService;
use shrtn::domain::errors::ShortenError;
use shrtn::domain::repositories::MappingRepository;
use shrtn::infrastructure::persistence::InMemoryMappingRepository;
use shrtn::utils::token_generator::{RandomTokenGenerator, SHORT_LENGTH, is_valid_token};

#[tokio::test]
async fn test_same_url_always_same_token() {
    let service = common::create_test_service();

    let first = service.shorten("https://example.com/idem").await.unwrap();
    for _ in 0..10 {
        let again = service.shorten("https://example.com/idem").await.unwrap();
        assert_eq!(again, first);
    }

    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_distinct_urls_distinct_tokens() {
    let service = common::create_test_service();
    let mut tokens = HashSet::new();

    for i in 0..200 {
        let mapping = service
            .shorten(&format!("https://example.com/page/{i}"))
            .await
            .unwrap();
        assert!(tokens.insert(mapping.short_token));
    }

    assert_eq!(service.count().await.unwrap(), 200);
}

#[tokio::test]
async fn test_urls_are_not_normalized() {
    let service = common::create_test_service();

    let a = service.shorten("https://example.com/path").await.unwrap();
    let b = service.shorten("https://example.com/path/").await.unwrap();
    let c = service.shorten("HTTPS://EXAMPLE.COM/path").await.unwrap();

    assert_ne!(a.short_token, b.short_token);
    assert_ne!(a.short_token, c.short_token);
    assert_eq!(c.long_url, "HTTPS://EXAMPLE.COM/path");
}

#[tokio::test]
async fn test_round_trip() {
    let service = common::create_test_service();

    let created = service
        .shorten("https://example.com/a?b=c#d")
        .await
        .unwrap();
    let resolved = service.lookup(&created.short_token).await.unwrap();

    assert_eq!(resolved, created);
    assert_eq!(resolved.long_url, "https://example.com/a?b=c#d");
}

#[tokio::test]
async fn test_tokens_have_expected_shape() {
    let service = common::create_test_service();

    for i in 0..50 {
        let mapping = service
            .shorten(&format!("https://example.com/{i}"))
            .await
            .unwrap();
        assert_eq!(mapping.short_token.len(), SHORT_LENGTH);
        assert!(is_valid_token(&mapping.short_token));
    }
}

#[tokio::test]
async fn test_invalid_urls_are_rejected_without_writes() {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let service = ShortenerService::new(
        repository.clone(),
        Arc::new(RandomTokenGenerator::new()),
    );

    for bad in [
        "",
        "not a url",
        " https://example.com",
        "/relative/path",
        "https://example.com/a\nb",
        "https://exa\tmple.com/",
        "https://example.com/a\0b",
        "https://example.com/a b",
    ] {
        let err = service.shorten(bad).await.unwrap_err();
        assert!(
            matches!(err, ShortenError::InvalidUrl { .. }),
            "{bad:?} gave {err:?}"
        );
    }

    let too_long = format!("https://example.com/{}", "x".repeat(4096));
    assert!(matches!(
        service.shorten(&too_long).await,
        Err(ShortenError::InvalidUrl { .. })
    ));

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_unknown_token_not_found() {
    let service = common::create_test_service();

    for token in ["", "abcdefghij", "short", "with space"] {
        let err = service.lookup(token).await.unwrap_err();
        assert!(matches!(err, ShortenError::UrlNotFound { token: t } if t == token));
    }
}

#[tokio::test]
async fn test_lookup_is_case_sensitive() {
    let service = common::create_test_service();

    let mapping = service.shorten("https://example.com/").await.unwrap();
    let swapped = common::swap_case(&mapping.short_token);

    if swapped != mapping.short_token {
        assert!(matches!(
            service.lookup(&swapped).await,
            Err(ShortenError::UrlNotFound { .. })
        ));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_shorten_of_same_url() {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let service = Arc::new(ShortenerService::new(
        repository.clone(),
        Arc::new(RandomTokenGenerator::new()),
    ));

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.shorten("https://example.com/race").await })
        })
        .collect();

    let mut tokens = HashSet::new();
    for handle in handles {
        let mapping = handle.await.unwrap().unwrap();
        tokens.insert(mapping.short_token);
    }

    assert_eq!(tokens.len(), 1);
    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_shorten_of_distinct_urls() {
    let service = common::create_test_service();

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .shorten(&format!("https://example.com/{}", i % 16))
                    .await
            })
        })
        .collect();

    let mut by_url = std::collections::HashMap::new();
    for handle in handles {
        let mapping = handle.await.unwrap().unwrap();
        let token = by_url
            .entry(mapping.long_url.clone())
            .or_insert_with(|| mapping.short_token.clone());
        assert_eq!(*token, mapping.short_token);
    }

    assert_eq!(by_url.len(), 16);
    let distinct: HashSet<_> = by_url.values().collect();
    assert_eq!(distinct.len(), 16);
    assert_eq!(service.count().await.unwrap(), 16);
}
