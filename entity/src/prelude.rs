pub use super::account::Entity as Account;
pub use super::commission::Entity as Commission;
pub use super::post::Entity as Post;
pub use super::purchase::Entity as Purchase;
