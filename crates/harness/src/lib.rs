pub mod client;

pub use client::TestClient;
