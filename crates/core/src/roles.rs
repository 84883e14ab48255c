//! Role name constants, as resolved by the upstream auth proxy.

/// Back-office staff: approves, rejects, and completes bookings, records
/// returns, and manages fines.
pub const ROLE_ADMIN: &str = "admin";

/// Regular renter: owns a cart, checks out bookings, pays, leaves feedback.
pub const ROLE_CUSTOMER: &str = "customer";
