//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod appointment;
pub mod offer;
pub mod order;
pub mod review;
pub mod vehicle;

// Re-export specific types to avoid conflicts
pub use appointment::{
    AppointmentStatus, Column as AppointmentColumn, Entity as Appointment,
    Model as AppointmentModel, PreferredTime,
};
pub use offer::{Column as OfferColumn, Entity as Offer, Model as OfferModel, OfferStatus};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use vehicle::{Column as VehicleColumn, Entity as Vehicle, Model as VehicleModel};
