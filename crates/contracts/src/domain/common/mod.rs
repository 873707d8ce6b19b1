//! Common types and traits for all entities

pub mod admin_entity;

pub use admin_entity::AdminEntity;
