//! Configuration module

mod site;

pub use site::CacheConfig;
pub use site::DefaultsConfig;
pub use site::ProviderConfig;
pub use site::SiteConfig;
