//! Data types shared across parsing, extraction, and rendering.

pub mod kind;
pub mod record;

pub use kind::SchemaKind;
pub use record::{
    Article, Availability, Event, FaqPage, HowTo, HowToStep, Product, QaPair, SchemaRecord,
};
