use library_backend::domain::entities::NewUrlProcessLog;
use library_backend::domain::repositories::UrlLogRepository;
use library_backend::infrastructure::persistence::PgUrlLogRepository;
use library_backend::utils::url_normalizer::UrlOperation;
use sqlx::PgPool;
use std::sync::Arc;

fn entry(operation: UrlOperation) -> NewUrlProcessLog {
    NewUrlProcessLog {
        original_url: "https://Example.com/a/?q=1".to_string(),
        processed_url: "https://example.com/a".to_string(),
        operation,
        ip_address: Some("127.0.0.1".to_string()),
        user_agent: Some("curl/8.0".to_string()),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_record(pool: PgPool) {
    let repo = PgUrlLogRepository::new(Arc::new(pool));

    let log = repo.record(entry(UrlOperation::Canonical)).await.unwrap();

    assert!(log.id > 0);
    assert_eq!(log.operation, UrlOperation::Canonical);
    assert_eq!(log.ip_address.as_deref(), Some("127.0.0.1"));
    assert!(log.lifecycle.is_live());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_stats_groups_by_operation(pool: PgPool) {
    let repo = PgUrlLogRepository::new(Arc::new(pool));

    for op in [UrlOperation::All, UrlOperation::All, UrlOperation::Redirection] {
        repo.record(entry(op)).await.unwrap();
    }

    let stats = repo.stats().await.unwrap();

    assert_eq!(stats.total_requests, 3);
    assert_eq!(stats.by_operation.get("all"), Some(&2));
    assert_eq!(stats.by_operation.get("redirection"), Some(&1));
    assert!(stats.by_operation.get("canonical").is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn test_stats_empty(pool: PgPool) {
    let repo = PgUrlLogRepository::new(Arc::new(pool));

    let stats = repo.stats().await.unwrap();

    assert_eq!(stats.total_requests, 0);
    assert!(stats.by_operation.is_empty());
}
