//! Gateway operations and their upstream mapping.
//!
//! Each exposed API operation is described once here: which service it
//! targets, which method and path it uses upstream, which deadline class
//! applies and which status a success is reported with.

use axum::http::{Method, StatusCode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::resilience::CallClass;
use crate::upstream::Service;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProducts,
    GetProduct,
    CreateProduct,
    ListOrders,
    GetOrder,
    CreateOrder,
    ProductHealth,
    OrderHealth,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::ListProducts,
        Operation::GetProduct,
        Operation::CreateProduct,
        Operation::ListOrders,
        Operation::GetOrder,
        Operation::CreateOrder,
        Operation::ProductHealth,
        Operation::OrderHealth,
    ];

    /// Stable identifier for logs.
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListProducts => "list_products",
            Operation::GetProduct => "get_product",
            Operation::CreateProduct => "create_product",
            Operation::ListOrders => "list_orders",
            Operation::GetOrder => "get_order",
            Operation::CreateOrder => "create_order",
            Operation::ProductHealth => "product_health",
            Operation::OrderHealth => "order_health",
        }
    }

    pub fn service(self) -> Service {
        match self {
            Operation::ListProducts
            | Operation::GetProduct
            | Operation::CreateProduct
            | Operation::ProductHealth => Service::Product,
            Operation::ListOrders
            | Operation::GetOrder
            | Operation::CreateOrder
            | Operation::OrderHealth => Service::Order,
        }
    }

    pub fn method(self) -> Method {
        if self.is_create() {
            Method::POST
        } else {
            Method::GET
        }
    }

    pub fn is_create(self) -> bool {
        matches!(self, Operation::CreateProduct | Operation::CreateOrder)
    }

    pub fn call_class(self) -> CallClass {
        match self {
            Operation::ProductHealth | Operation::OrderHealth => CallClass::Health,
            _ => CallClass::Data,
        }
    }

    /// Status reported to the client on success. Creates always report 201,
    /// whatever 2xx the upstream answered with.
    pub fn success_status(self) -> StatusCode {
        if self.is_create() {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        }
    }

    /// Path on the upstream. `id` is only used by the single-item reads.
    pub fn upstream_path(self, id: Option<&str>) -> String {
        match self {
            Operation::ListProducts | Operation::CreateProduct => "/products".to_string(),
            Operation::GetProduct => format!("/products/{}", encode_segment(id.unwrap_or_default())),
            Operation::ListOrders | Operation::CreateOrder => "/orders".to_string(),
            Operation::GetOrder => format!("/orders/{}", encode_segment(id.unwrap_or_default())),
            Operation::ProductHealth | Operation::OrderHealth => "/health".to_string(),
        }
    }

    /// Log line emitted before the upstream call.
    pub fn intent_message(self) -> &'static str {
        match self {
            Operation::ListProducts => "Fetching products from Product API",
            Operation::GetProduct => "Fetching product details",
            Operation::CreateProduct => "Creating new product",
            Operation::ListOrders => "Fetching orders from Order API",
            Operation::GetOrder => "Fetching order details",
            Operation::CreateOrder => "Creating new order",
            Operation::ProductHealth => "Probing Product API health",
            Operation::OrderHealth => "Probing Order API health",
        }
    }

    /// Log line emitted after a successful upstream call.
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::ListProducts => "Products fetched successfully",
            Operation::GetProduct => "Product details fetched",
            Operation::CreateProduct => "Product created successfully",
            Operation::ListOrders => "Orders fetched successfully",
            Operation::GetOrder => "Order details fetched",
            Operation::CreateOrder => "Order created successfully",
            Operation::ProductHealth => "Product API healthy",
            Operation::OrderHealth => "Order API healthy",
        }
    }

    /// Log line emitted when the upstream call fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListProducts => "Failed to fetch products",
            Operation::GetProduct => "Failed to fetch product",
            Operation::CreateProduct => "Failed to create product",
            Operation::ListOrders => "Failed to fetch orders",
            Operation::GetOrder => "Failed to fetch order",
            Operation::CreateOrder => "Failed to create order",
            Operation::ProductHealth => "Product API health check failed",
            Operation::OrderHealth => "Order API health check failed",
        }
    }
}

/// Bytes that cannot appear raw in a single path segment. Sub-delims,
/// `:` and `@` are legal there and stay as received.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}
