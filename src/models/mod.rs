pub mod subscription;

pub use subscription::{CreateSubscriptionDto, Provider, Status, Subscription};
