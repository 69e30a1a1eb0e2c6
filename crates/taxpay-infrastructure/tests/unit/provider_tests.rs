//! Service provider tests

use crate::support::{
    failing, gated_storage, memory_config, memory_registry, registry_with, slow_storage,
};
use std::sync::Arc;
use std::time::Duration;
use taxpay_domain::ServiceName;
use taxpay_domain::error::Error;
use taxpay_domain::value_objects::PaymentRequest;
use taxpay_infrastructure::config::StorageBackend;
use taxpay_infrastructure::di::{
    LanguageKey, ProviderOptions, ProviderPhase, ProviderState, ServiceContext, ServiceMode,
    ServiceProvider, ServiceRegistry, Services, mount_app, use_named_service,
};
use tempfile::TempDir;
use tokio::sync::Notify;

#[tokio::test]
async fn test_mount_publishes_live_services() {
    let registry = Arc::new(memory_registry());
    let provider = ServiceProvider::mount(Arc::clone(&registry), ProviderOptions::default())
        .unwrap();

    let ctx = provider.ready().await.unwrap();
    assert_eq!(ctx.mode(), &ServiceMode::Live);
    assert!(!ctx.is_degraded());
    assert_eq!(provider.phase(), ProviderPhase::Live);
    assert_eq!(ctx.get(ServiceName::Storage).provider_name(), "memory");
    assert!(registry.is_initialized());
}

#[tokio::test]
async fn test_context_identity_is_stable() {
    let provider = ServiceProvider::mount(Arc::new(memory_registry()), ProviderOptions::default())
        .unwrap();

    let first = provider.ready().await.unwrap();
    let second = provider.ready().await.unwrap();
    let third = provider.context().unwrap();

    assert!(first.ptr_eq(&second));
    assert!(first.ptr_eq(&third));
    assert!(Arc::ptr_eq(first.services(), third.services()));
}

#[tokio::test]
async fn test_state_changes_once_per_mount() {
    let gate = Arc::new(Notify::new());
    let provider = ServiceProvider::mount(
        Arc::new(registry_with(gated_storage(Arc::clone(&gate)))),
        ProviderOptions::default(),
    )
    .unwrap();
    let mut rx = provider.subscribe();
    assert!(matches!(*rx.borrow_and_update(), ProviderState::Initializing));

    gate.notify_one();
    rx.changed().await.unwrap();
    assert!(matches!(*rx.borrow_and_update(), ProviderState::Ready(_)));

    // Give any stray publication a chance to land
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!rx.has_changed().unwrap());

    provider.unmount();
    assert!(rx.has_changed().unwrap());
    assert!(matches!(*rx.borrow_and_update(), ProviderState::Unmounted));
}

#[tokio::test]
async fn test_context_not_ready_while_initializing() {
    let gate = Arc::new(Notify::new());
    let provider = ServiceProvider::mount(
        Arc::new(registry_with(gated_storage(Arc::clone(&gate)))),
        ProviderOptions::default(),
    )
    .unwrap();

    assert_eq!(provider.phase(), ProviderPhase::Initializing);
    assert!(matches!(provider.context(), Err(Error::NotReady)));

    gate.notify_one();
    provider.ready().await.unwrap();
    assert!(provider.context().is_ok());
}

#[tokio::test]
async fn test_failing_factory_publishes_full_fallback() {
    let provider = ServiceProvider::mount(
        Arc::new(registry_with(failing(ServiceName::Payment))),
        ProviderOptions::default(),
    )
    .unwrap();

    let ctx = provider.ready().await.unwrap();
    assert!(ctx.is_degraded());
    assert_eq!(provider.phase(), ProviderPhase::Degraded);
    match ctx.mode() {
        ServiceMode::Degraded { reason } => assert!(reason.contains("backend offline")),
        ServiceMode::Live => panic!("expected degraded mode"),
    }

    // Every service is a stand-in, not only the one that failed
    for (name, provider_name) in ctx.services().provider_names() {
        assert_eq!(provider_name, "null", "{name} should be a fallback");
    }

    let services = ctx.services();
    assert!(services.storage().get("anything").is_none());
    assert!(matches!(
        services.storage().set("k", "v"),
        Err(Error::ServiceUnavailable {
            service: ServiceName::Storage
        })
    ));
    assert_eq!(services.api().get("/health").await.unwrap().status, 503);
    assert_eq!(services.event_bus().publish("topic", serde_json::json!({})).await.unwrap(), 0);

    let outcome = services
        .payment()
        .process_payment(PaymentRequest::new("stay-42", 350, "EUR"))
        .await
        .unwrap();
    assert!(!outcome.success);
    assert!(outcome.transaction_id.is_none());
}

#[test]
fn test_mount_outside_runtime_is_an_error() {
    let err = ServiceProvider::mount(Arc::new(memory_registry()), ProviderOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, Error::Internal { .. }), "got {err:?}");
    assert!(err.to_string().contains("tokio runtime"));

    let err = mount_app(memory_config()).err().unwrap();
    assert!(matches!(err, Error::Internal { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_failing_storage_reads_none_in_scope() {
    let dir = TempDir::new().unwrap();
    let mut config = memory_config();
    config.storage.backend = StorageBackend::File;
    config.storage.path = dir.path().to_path_buf();

    let provider = mount_app(config).unwrap();
    let read = provider
        .scope(async {
            let handle = use_named_service(ServiceName::Storage)?;
            assert_eq!(handle.name(), ServiceName::Storage);
            Ok::<_, Error>(handle.as_storage().and_then(|storage| storage.get("reservation")))
        })
        .await
        .unwrap()
        .unwrap();

    assert!(read.is_none());
    assert_eq!(provider.phase(), ProviderPhase::Degraded);
}

#[tokio::test]
async fn test_fallback_language_uses_configured_default() {
    let mut config = memory_config();
    config.language.default = "de".to_string();
    let registry = ServiceRegistry::builder(config)
        .with_defaults()
        .replace(failing(ServiceName::Language))
        .build()
        .unwrap();

    let options = ProviderOptions::from_config(registry.config()).unwrap();
    let provider = ServiceProvider::mount(Arc::new(registry), options).unwrap();

    let ctx = provider.ready().await.unwrap();
    assert!(ctx.is_degraded());
    assert_eq!(ctx.service::<LanguageKey>().current().as_str(), "de");
}

#[tokio::test(start_paused = true)]
async fn test_init_timeout_triggers_fallback() {
    let registry = Arc::new(registry_with(slow_storage(Duration::from_secs(60))));
    let options = ProviderOptions::default().with_init_timeout(Duration::from_millis(100));
    let provider = ServiceProvider::mount(Arc::clone(&registry), options).unwrap();

    let ctx = provider.ready().await.unwrap();
    assert!(ctx.is_degraded());
    match ctx.mode() {
        ServiceMode::Degraded { reason } => assert!(reason.contains("Timed out after 100ms")),
        ServiceMode::Live => panic!("expected degraded mode"),
    }
    // The abandoned pass never completed
    assert!(!registry.is_initialized());
}

#[tokio::test]
async fn test_unmount_during_initialization_discards_result() {
    let gate = Arc::new(Notify::new());
    let registry = Arc::new(registry_with(gated_storage(Arc::clone(&gate))));
    let provider = ServiceProvider::mount(Arc::clone(&registry), ProviderOptions::default())
        .unwrap();
    let rx = provider.subscribe();

    tokio::task::yield_now().await;
    provider.unmount();
    gate.notify_one();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(provider.phase(), ProviderPhase::Unmounted);
    assert!(matches!(*rx.borrow(), ProviderState::Unmounted));
    assert!(matches!(provider.ready().await, Err(Error::Unmounted)));
    assert!(matches!(provider.context(), Err(Error::Unmounted)));
    assert!(!registry.is_initialized());
}

#[tokio::test]
async fn test_unmount_after_ready() {
    let provider = ServiceProvider::mount(Arc::new(memory_registry()), ProviderOptions::default())
        .unwrap();
    let ctx = provider.ready().await.unwrap();

    provider.unmount();
    provider.unmount();

    assert_eq!(provider.phase(), ProviderPhase::Unmounted);
    assert!(matches!(provider.context(), Err(Error::Unmounted)));
    // Contexts already handed out keep working
    assert_eq!(ctx.get(ServiceName::Api).provider_name(), "reqwest");
}

#[tokio::test]
async fn test_drop_unmounts() {
    let provider = ServiceProvider::mount(Arc::new(memory_registry()), ProviderOptions::default())
        .unwrap();
    let rx = provider.subscribe();

    drop(provider);

    assert!(matches!(*rx.borrow(), ProviderState::Unmounted));
}

#[tokio::test]
async fn test_from_services_is_ready_immediately() {
    let provider = ServiceProvider::from_services(Services::fallback());

    assert_eq!(provider.phase(), ProviderPhase::Live);
    assert!(provider.registry().is_none());
    let ctx = provider.context().unwrap();
    assert!(!ctx.is_degraded());
}

#[tokio::test]
async fn test_from_context_keeps_identity() {
    let ctx = ServiceContext::degraded("testing", Services::fallback());
    let provider = ServiceProvider::from_context(ctx.clone());

    assert_eq!(provider.phase(), ProviderPhase::Degraded);
    assert!(provider.ready().await.unwrap().ptr_eq(&ctx));
}
