pub mod batch;
pub mod client;
pub mod notification;
pub mod order;
pub mod request;
pub mod response;
