pub mod gateway;
pub mod gemini;
pub mod history;
pub mod rate_limit;

pub use gateway::{Reply, ReplySource, ResponseGateway, ResponseRequest, TextGenerator};
