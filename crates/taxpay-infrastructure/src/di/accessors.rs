//! Service accessors
//!
//! Read the [`ServiceContext`] installed by the nearest provider scope.
//! Outside a scope every accessor fails with [`Error::OutsideProvider`];
//! none of them ever returns an empty value.
//!
//! ```ignore
//! provider
//!     .scope(async {
//!         let storage = use_service::<StorageKey>()?;
//!         storage.set("reservation", "stay-42")
//!     })
//!     .await??;
//! ```

use crate::di::provider::{ServiceContext, ServiceMode};
use crate::di::services::{ServiceHandle, ServiceKey};
use std::future::Future;
use std::sync::Arc;
use taxpay_domain::ServiceName;
use taxpay_domain::error::{Error, Result};
use tokio::task::futures::TaskLocalFuture;

tokio::task_local! {
    static CURRENT_SERVICES: ServiceContext;
}

pub(crate) fn run_scoped<F: Future>(
    context: ServiceContext,
    fut: F,
) -> TaskLocalFuture<ServiceContext, F> {
    CURRENT_SERVICES.scope(context, fut)
}

pub(crate) fn run_scoped_sync<R>(context: ServiceContext, f: impl FnOnce() -> R) -> R {
    CURRENT_SERVICES.sync_scope(context, f)
}

fn with_context<R>(f: impl FnOnce(&ServiceContext) -> R) -> Result<R> {
    CURRENT_SERVICES
        .try_with(f)
        .map_err(|_| Error::OutsideProvider)
}

/// The context of the enclosing provider scope
pub fn use_services() -> Result<ServiceContext> {
    with_context(ServiceContext::clone)
}

/// One service by name
pub fn use_named_service(name: ServiceName) -> Result<ServiceHandle> {
    with_context(|ctx| ctx.get(name))
}

/// One service by key
pub fn use_service<K: ServiceKey>() -> Result<Arc<K::Service>> {
    with_context(ServiceContext::service::<K>)
}

/// Whether the enclosing scope runs on live or fallback services
pub fn use_service_mode() -> Result<ServiceMode> {
    with_context(|ctx| ctx.mode().clone())
}
