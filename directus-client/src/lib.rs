pub mod client;
pub mod models;

// Re-export the client and configuration for easy access
pub use client::{Configuration, DirectusClient, DirectusError};
