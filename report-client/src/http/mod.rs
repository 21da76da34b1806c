pub mod client;
pub mod response_decoder;

pub use client::HttpReportClient;
pub use response_decoder::decode_json;
