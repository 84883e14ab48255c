//! Row structs (`FromRow`) and create/update DTOs, one module per table.

pub mod booking;
pub mod cart_item;
pub mod feedback;
pub mod fine;
pub mod payment;
pub mod return_record;
