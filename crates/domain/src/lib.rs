//! Domain layer for the order-management backend.
//!
//! This crate provides:
//! - the [`Validate`] contract every entity implements
//! - directory records (customers, users, offers, categories, suppliers)
//! - the Order aggregate with its status state machine and price snapshots
//! - repository ports and the use-case services built on them

pub mod directory;
pub mod error;
pub mod money;
pub mod order;
pub mod ports;
pub mod validation;

pub use directory::{
    Category, Customer, DirectoryService, NewOffer, Offer, OfferKind, Role, Supplier, User,
};
pub use error::{DomainError, RepositoryError};
pub use money::Money;
pub use order::{
    AddOrderItem, ChangeOrderStatus, CreateOrder, CustomerSummary, OfferSummary, Order,
    OrderError, OrderItem, OrderItemRecord, OrderItemResponse, OrderLine, OrderRecord,
    OrderResponse, OrderService, OrderStatus, RemoveOrderItem, UnknownStatus, UpdateOrder,
    UpdateOrderItemQuantity, UserSummary,
};
pub use ports::{
    CategoryRepository, CustomerRepository, OfferRepository, OrderRepository, RepositoryResult,
    SupplierRepository, UserRepository,
};
pub use validation::{Validate, ValidationErrors, Violation};
