mod client;

pub use client::VmmsClient;
