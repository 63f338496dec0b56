//! Label verification: compares the text read from a beverage label against
//! the values submitted on its application form.

pub mod commands;
pub mod models;
pub mod services;
pub mod utils;

pub use models::config::AppConfig;
pub use models::form::{FieldName, FormError, FormFields};
pub use models::verdict::{
    AggregationPolicy, Verdict, VerdictList, VerdictStatus, VerificationReport,
};
pub use services::ocr::{OcrEngine, RecognitionError, RecognizedText};
pub use services::pipeline::{LabelVerificationService, PipelineError};
pub use services::verification::{verify, VerificationCase, Verifier};
