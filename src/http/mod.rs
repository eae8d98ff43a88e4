pub mod client;


pub use client::HttpStateApi;
