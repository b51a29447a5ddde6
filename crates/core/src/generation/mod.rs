pub mod config;
pub mod request;
pub mod response;

pub use config::{
    system_instruction, GenerationConfig, HarmBlockThreshold, HarmCategory, ResponseModality,
    SafetySetting, CSV_HEADER, DEFAULT_MODEL,
};
pub use request::{build_request, endpoint_url, GenerateContentRequest};
pub use response::{GenerateContentResponse, ResponseError};
