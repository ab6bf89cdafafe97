//! Failure injection tests for HTTP-backed endpoint selection.

use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use flate2::{write::GzEncoder, Compression};
use ha_selector::config::loader::parse_config;
use ha_selector::config::{ConfigError, SelectorConfig};
use ha_selector::fetch::{CompressionType, FetchError, HttpStreamFetcher, StreamFetcher};
use ha_selector::selector::ReselectOutcome;
use ha_selector::{EndpointSelector, SelectorError, VerifyOutcome};

mod common;

fn config_for(candidates: &[String]) -> SelectorConfig {
    let mut config = SelectorConfig::with_candidates(candidates.iter().cloned());
    config.backoff.delay_ms = 10;
    config.probe.timeout_secs = 2;
    config
}

fn gzip(body: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_failover_to_standby() {
    let primary = common::closed_addr();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let standby = common::start_programmable_backend(move |target| {
        let recorded = recorded.clone();
        async move {
            recorded.lock().unwrap().push(target);
            (200, b"{\"clusterInfo\":{\"haState\":\"ACTIVE\"}}".to_vec())
        }
    })
    .await;

    let candidates = vec![format!("http://{}", primary), format!("http://{}", standby)];
    let selector = EndpointSelector::from_config(&config_for(&candidates)).unwrap();

    assert_eq!(selector.current_endpoint(), candidates[0]);
    let outcome = selector.verify().await.unwrap();
    assert_eq!(
        outcome,
        VerifyOutcome::Switched {
            from: candidates[0].clone(),
            to: candidates[1].clone(),
        }
    );
    assert_eq!(selector.current_endpoint(), candidates[1]);
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["/ws/v1/cluster/info?anonymous=true".to_string()]
    );

    // The standby keeps answering, so the next verification is a no-op.
    assert_eq!(selector.verify().await.unwrap(), VerifyOutcome::Healthy);
}

#[tokio::test]
async fn test_unavailable_status_counts_as_dead() {
    let primary_hits = Arc::new(AtomicU32::new(0));
    let hits = primary_hits.clone();
    let primary = common::start_programmable_backend(move |_| {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            (503, b"standby".to_vec())
        }
    })
    .await;
    let standby = common::start_mock_backend("active").await;

    let candidates = vec![format!("http://{}", primary), format!("http://{}", standby)];
    let selector = EndpointSelector::from_config(&config_for(&candidates)).unwrap();

    let outcome = selector.reselect().await.unwrap();
    assert_eq!(outcome, ReselectOutcome::Selected(candidates[1].clone()));
    // Two attempts per candidate by default.
    assert_eq!(primary_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_primary_preferred_after_recovery() {
    let primary_up = Arc::new(AtomicBool::new(false));
    let up = primary_up.clone();
    let primary = common::start_programmable_backend(move |_| {
        let up = up.clone();
        async move {
            if up.load(Ordering::SeqCst) {
                (200, b"primary".to_vec())
            } else {
                (500, b"down".to_vec())
            }
        }
    })
    .await;

    let standby_up = Arc::new(AtomicBool::new(true));
    let up = standby_up.clone();
    let standby = common::start_programmable_backend(move |_| {
        let up = up.clone();
        async move {
            if up.load(Ordering::SeqCst) {
                (200, b"standby".to_vec())
            } else {
                (500, b"down".to_vec())
            }
        }
    })
    .await;
    let tertiary = common::start_mock_backend("tertiary").await;

    let candidates = vec![
        format!("http://{}", primary),
        format!("http://{}", standby),
        format!("http://{}", tertiary),
    ];
    let selector = EndpointSelector::from_config(&config_for(&candidates)).unwrap();
    selector.verify().await.unwrap();
    assert_eq!(selector.current_endpoint(), candidates[1]);

    primary_up.store(true, Ordering::SeqCst);
    standby_up.store(false, Ordering::SeqCst);

    selector.verify().await.unwrap();
    assert_eq!(selector.current_endpoint(), candidates[0]);
}

#[tokio::test]
async fn test_all_candidates_down() {
    let candidates = vec![
        format!("http://{}", common::closed_addr()),
        format!("http://{}", common::closed_addr()),
    ];
    let selector = EndpointSelector::from_config(&config_for(&candidates)).unwrap();

    let err = selector.verify().await.unwrap_err();
    assert_eq!(
        err,
        SelectorError::NoAliveEndpoint {
            candidates: candidates.clone(),
        }
    );
    assert_eq!(selector.current_endpoint(), candidates[0]);
    assert!(!selector.is_reselecting());
}

#[tokio::test]
async fn test_gzip_hint() {
    let compressed = common::start_programmable_backend(|_| async { (200, gzip(b"active")) }).await;
    let plain = common::start_mock_backend("not compressed").await;

    // A plain body cannot be decoded with the gzip hint, so the first candidate is skipped.
    let candidates = vec![format!("http://{}", plain), format!("http://{}", compressed)];
    let mut config = config_for(&candidates);
    config.compression = CompressionType::Gzip;
    let selector = EndpointSelector::from_config(&config).unwrap();

    let outcome = selector.verify().await.unwrap();
    assert_eq!(
        outcome,
        VerifyOutcome::Switched {
            from: candidates[0].clone(),
            to: candidates[1].clone(),
        }
    );
}

#[tokio::test]
async fn test_fetcher_reads_decoded_body() {
    let addr = common::start_programmable_backend(|_| async { (200, gzip(b"cluster info")) }).await;
    let fetcher = HttpStreamFetcher::new();

    let mut stream = fetcher
        .open(&format!("http://{}/ws/v1/cluster/info", addr), CompressionType::Gzip)
        .await
        .unwrap();
    let mut body = String::new();
    stream.read_to_string(&mut body).unwrap();
    assert_eq!(body, "cluster info");

    let err = fetcher
        .open(&format!("http://{}/", common::closed_addr()), CompressionType::None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Request(_)));

    let err = fetcher.open("not a url", CompressionType::None).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_https_candidate_rejected_at_load() {
    let live = common::start_mock_backend("active").await;

    let toml = format!(
        "candidates = [\"http://{}\", \"https://{}\"]",
        common::closed_addr(),
        live
    );
    let err = parse_config(&toml).unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1, "{:?}", errors);
            assert!(errors[0].to_string().contains(&format!("https://{}", live)));
        }
        other => panic!("unexpected error: {}", other),
    }

    // The same endpoint over plain http is accepted and answers.
    let config = parse_config(&format!("candidates = [\"http://{}\"]", live)).unwrap();
    let selector = EndpointSelector::from_config(&config).unwrap();
    assert_eq!(selector.verify().await.unwrap(), VerifyOutcome::Healthy);
}
