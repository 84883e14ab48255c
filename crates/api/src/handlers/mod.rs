pub mod booking;
pub mod cart;
pub mod feedback;
pub mod loan;
pub mod payment;
pub mod returns;
