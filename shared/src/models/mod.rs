//! Domain models
//!
//! One file per concern, each carrying the entity plus its request payloads.

pub mod inventory;
pub mod message;
pub mod order;
pub mod product;
pub mod role;
pub mod tent;
pub mod user;

pub use inventory::{
    InventoryRequest, InventoryRequestCreate, InventoryRequestDetail, InventoryStatus,
};
pub use message::{Message, MessageCreate, MessageDeletion, MessageDetail};
pub use order::{
    CartItem, Order, OrderDetail, OrderItemDetail, OrderRequest, OrderStatus, PaymentStatus,
    PlacedOrder, StatusUpdate,
};
pub use product::{Product, ProductCreate, ProductUpdate, StockAdjustment, StockOperation};
pub use role::Role;
pub use tent::{Tent, TentCreate, TentUpdate};
pub use user::{User, UserPublic};
