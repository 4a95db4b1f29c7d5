pub mod link;
pub mod user;

pub use link::Entity as LinkEntity;
pub use user::Entity as UserEntity;
