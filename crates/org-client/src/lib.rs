//! # org-client
//!
//! Client layer for the organization directory: the REST implementation of
//! the organization ports, the shared organization store, the service the
//! views call, and notification presenters.

pub mod context;
pub mod http;
pub mod notify;
pub mod paths;
pub mod profile;
pub mod service;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types at crate root
pub use context::{ClientContext, ClientContextBuilder};
pub use http::{HttpOrganizationApi, RestClient};
pub use notify::{ChannelNotifier, MemoryNotifier, TracingNotifier};
pub use profile::HttpProfileProvider;
pub use service::OrganizationService;
pub use store::OrganizationStore;
