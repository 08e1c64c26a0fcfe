pub mod users;

pub use users::{JsonUserStore, UserRepository};

#[cfg(test)]
pub use users::MockUserRepository;
