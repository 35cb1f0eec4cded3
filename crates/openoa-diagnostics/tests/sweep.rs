//! End-to-end sweeps against a fake backend.

mod common;

use std::sync::Arc;

use openoa_diagnostics::{Diagnostics, ProbeResult, Registry, default_contact_sample};

use common::{client_for, dead_address, healthy_backend, spawn_backend};

#[tokio::test]
async fn healthy_backend_sweep_all_succeed() {
    let addr = spawn_backend(healthy_backend()).await;
    let registry = Arc::new(Registry::standard(&client_for(addr)));
    let diagnostics = Diagnostics::new(registry.clone());

    let report = diagnostics.test_all().await.unwrap();

    let ids: Vec<&str> = report.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, registry.ids());

    let stats = diagnostics.aggregate();
    assert_eq!(stats.success_count, 9);
    assert_eq!(stats.error_count, 0);
    assert_eq!(stats.total_tested, registry.len());
    assert!(stats.average_latency_ms.is_some());

    match diagnostics.snapshot().result("overview").unwrap() {
        ProbeResult::Success {
            status_code,
            payload,
            ..
        } => {
            assert_eq!(*status_code, 200);
            assert_eq!(payload["title"], "overview");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn backend_down_every_probe_fails() {
    let addr = dead_address().await;
    let registry = Arc::new(Registry::standard(&client_for(addr)));
    let diagnostics = Diagnostics::new(registry);

    let report = diagnostics.test_all().await.unwrap();
    assert_eq!(report.entries.len(), 9);

    let stats = diagnostics.aggregate();
    assert_eq!(stats.error_count, 9);
    assert_eq!(stats.success_count, 0);
    assert_eq!(stats.total_tested, 9);

    for result in diagnostics.snapshot().results.values() {
        assert_eq!(result.status_code(), None);
        assert!(matches!(
            result,
            ProbeResult::Failure { error_message, .. }
                if error_message == openoa_client::UNREACHABLE_MESSAGE
        ));
    }
}

#[tokio::test]
async fn contact_probe_surfaces_server_detail() {
    let addr = spawn_backend(healthy_backend()).await;
    let registry = Arc::new(Registry::with_contact_probe(
        &client_for(addr),
        &default_contact_sample(),
    ));
    let diagnostics = Diagnostics::new(registry);

    let result = diagnostics.test_one("contact").await.unwrap();
    match result {
        ProbeResult::Failure {
            status_code,
            error_message,
            ..
        } => {
            assert_eq!(status_code, Some(500));
            assert_eq!(error_message, "invalid email");
        }
        other => panic!("unexpected result {other:?}"),
    }

    let stats = diagnostics.test_all().await.unwrap().aggregate();
    assert_eq!((stats.success_count, stats.error_count), (9, 1));
}

#[tokio::test]
async fn activation_sweep_populates_results() {
    let addr = spawn_backend(healthy_backend()).await;
    let registry = Arc::new(Registry::standard(&client_for(addr)));
    let diagnostics = Arc::new(Diagnostics::new(registry));

    let handle = diagnostics.activate().unwrap();
    assert!(diagnostics.activate().is_none());
    handle.await.unwrap().unwrap();

    let snapshot = diagnostics.snapshot();
    assert!(!snapshot.sweeping);
    assert_eq!(snapshot.results.len(), 9);
    assert!(snapshot.results.values().all(ProbeResult::is_success));
}
