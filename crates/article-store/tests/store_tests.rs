//! Integration tests for the article store.

use article_store::{ArticleStore, StoreCounts, HISTORY_FILE, QUEUE_FILE};
use news_core::Article;

#[tokio::test]
async fn test_open_seeds_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("temp");

    let store = ArticleStore::open(&data_dir).await.unwrap();

    let queue = std::fs::read_to_string(data_dir.join(QUEUE_FILE)).unwrap();
    let history = std::fs::read_to_string(data_dir.join(HISTORY_FILE)).unwrap();
    assert_eq!(queue, "[]");
    assert_eq!(history, "[]");
    assert_eq!(store.counts().await, StoreCounts::default());
}

#[tokio::test]
async fn test_queue_roundtrip_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path()).await.unwrap();

    let queue = vec![
        Article::new("http://a", "A").with_source("Wire"),
        Article::new("http://b", "B").with_description("second"),
    ];

    let store_lock = store.lock().await;
    store_lock.save_queue(&queue).await.unwrap();
    let loaded = store_lock.load_queue().await;

    assert_eq!(loaded, queue);
}

#[tokio::test]
async fn test_append_history_trims_to_cap() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open_with_cap(dir.path(), 3).await.unwrap();

    let store_lock = store.lock().await;
    for url in ["a", "b", "c"] {
        store_lock.append_history(url).await.unwrap();
    }
    let history = store_lock.append_history("d").await.unwrap();

    assert_eq!(history, vec!["b", "c", "d"]);
    assert_eq!(store_lock.load_history().await, vec!["b", "c", "d"]);
}

#[tokio::test]
async fn test_corrupt_queue_loads_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path()).await.unwrap();
    std::fs::write(store.queue_path(), "this is not json").unwrap();

    let store_lock = store.lock().await;
    assert!(store_lock.load_queue().await.is_empty());

    store_lock
        .save_queue(&[Article::new("http://x", "Hi")])
        .await
        .unwrap();
    assert_eq!(store_lock.load_queue().await.len(), 1);
}

#[tokio::test]
async fn test_reopen_keeps_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = ArticleStore::open(dir.path()).await.unwrap();
        let store_lock = store.lock().await;
        store_lock.append_history("http://a").await.unwrap();
        store_lock
            .save_queue(&[Article::new("http://b", "B")])
            .await
            .unwrap();
    }

    let store = ArticleStore::open(dir.path()).await.unwrap();
    assert_eq!(store.counts().await, StoreCounts { posted: 1, queued: 1 });
}

#[tokio::test]
async fn test_lock_serializes_writers() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let store_lock = store.lock().await;
            let mut queue = store_lock.load_queue().await;
            tokio::task::yield_now().await;
            queue.push(Article::new(format!("http://{}", i), "t"));
            store_lock.save_queue(&queue).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.counts().await.queued, 20);
}
