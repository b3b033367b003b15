//! The client for the expenses backend that analyses statements and stores transactions.

mod client;

pub use client::ApiClient;
