pub mod bookings;
pub mod flights;
