pub mod adapter;
pub mod client;
pub mod method;
#[cfg(test)]
pub mod mock;
pub mod request;
pub mod response;
