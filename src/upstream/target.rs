//! Upstream service identities and their configured base URLs.

use std::fmt;
use std::sync::Arc;

use crate::config::UpstreamsConfig;

/// One of the two backend services the gateway forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Product,
    Order,
}

impl Service {
    /// Capitalised name used in client-facing error envelopes.
    pub fn display_name(self) -> &'static str {
        match self {
            Service::Product => "Product",
            Service::Order => "Order",
        }
    }

    /// Name the service is reported under by the health endpoints.
    pub fn api_name(self) -> &'static str {
        match self {
            Service::Product => "product-api",
            Service::Order => "order-api",
        }
    }

    /// Short lowercase label for logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Service::Product => "product",
            Service::Order => "order",
        }
    }

    /// Envelope `error` text for a failed call to this service.
    pub fn unavailable_message(self) -> String {
        format!("{} service unavailable", self.display_name())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// A service paired with its base URL. Fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    service: Service,
    base_url: Arc<str>,
}

impl UpstreamTarget {
    pub fn new(service: Service, base_url: impl AsRef<str>) -> Self {
        Self {
            service,
            base_url: Arc::from(base_url.as_ref().trim_end_matches('/')),
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, appended verbatim to the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Both upstream targets, built once from configuration.
#[derive(Debug, Clone)]
pub struct Upstreams {
    pub product: UpstreamTarget,
    pub order: UpstreamTarget,
}

impl Upstreams {
    pub fn from_config(config: &UpstreamsConfig) -> Self {
        Self {
            product: UpstreamTarget::new(Service::Product, &config.product_url),
            order: UpstreamTarget::new(Service::Order, &config.order_url),
        }
    }

    pub fn get(&self, service: Service) -> &UpstreamTarget {
        match service {
            Service::Product => &self.product,
            Service::Order => &self.order,
        }
    }
}
