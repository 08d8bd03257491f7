//! Data models: the assembled receipt and the store profile.

pub mod profile;
pub mod receipt;

pub use profile::{FileProfileProvider, ProfileKey, ProfileProvider, ProfileUpdate, StoreProfile};
pub use receipt::{Customer, Item, Payment, Receipt};
