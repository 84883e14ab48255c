//! Repositories: stateless structs with pool-first async methods.

pub mod booking_repo;
pub mod cart_repo;
pub mod feedback_repo;
pub mod fine_repo;
pub mod loan_repo;
pub mod payment_repo;
pub mod return_repo;

pub use booking_repo::BookingRepo;
pub use cart_repo::CartRepo;
pub use feedback_repo::FeedbackRepo;
pub use fine_repo::FineRepo;
pub use loan_repo::LoanRepo;
pub use payment_repo::PaymentRepo;
pub use return_repo::ReturnRepo;
