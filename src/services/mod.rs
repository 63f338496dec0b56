pub mod config;
pub mod ocr;
pub mod pipeline;
pub mod verification;
