pub mod booking_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use user_repo::UserRepo;
