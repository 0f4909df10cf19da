pub mod admin;
pub use self::admin::AdminState;

pub mod health;
pub use self::health::health;

pub mod types;
