pub mod generate;
pub mod health;
pub mod schemas;

pub use generate::generate_handler;
pub use health::health_handler;
pub use schemas::schemas_handler;
