// nfconsole-api: Async client for the mobile-network configuration and subscriber APIs

pub mod client;
mod device_groups;
pub mod error;
mod inventory;
mod k4;
pub mod models;
mod network_slices;
mod subscribers;
pub mod transport;

pub use client::{ApiClient, ApiSurface, BasePaths, DEFAULT_CONFIG_BASE, DEFAULT_SUBSCRIBER_BASE};
pub use error::Error;
pub use models::{
    DeviceGroup, GNodeB, Gnb, IpDomainExpanded, K4Key, NetworkSlice, Plmn, SiteInfo, SliceId,
    Subscriber, SubscriberAuth, UeDnnQos, Upf,
};
pub use transport::{TlsMode, TransportConfig};
