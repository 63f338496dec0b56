//! Label verification engine
//!
//! Compares recognized label text against operator form data and produces one
//! verdict per field. Pure and synchronous: no I/O and no shared state, so
//! calls can run on any number of threads at once.

pub mod alcohol;
pub mod brand;
pub mod matcher;
pub mod net_contents;
pub mod normalizer;
pub mod product_type;
pub mod warning;

pub use matcher::{contains, similarity_ratio, DEFAULT_THRESHOLD};
pub use normalizer::normalize;

use crate::models::config::MatchingConfig;
use crate::models::form::{FormError, FormFields};
use crate::models::verdict::VerdictList;
use crate::services::ocr::{RecognitionError, RecognizedText};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Runs the field verifiers with a fixed set of thresholds
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: MatchingConfig,
}

impl Verifier {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Verify every applicable field
    ///
    /// Order is fixed: brand name, product type, alcohol content, net contents
    /// (only when supplied), government warning.
    pub fn verify(&self, form: &FormFields, text: &str) -> VerdictList {
        info!("Starting label verification");
        debug!(text_len = text.len(), "Recognized text length");

        let mut verdicts = VerdictList::new();

        verdicts.push(brand::verify_brand_name(
            &form.brand_name,
            text,
            self.config.brand_threshold,
        ));
        verdicts.push(product_type::verify_product_type(
            &form.product_type,
            text,
            self.config.product_type_threshold,
        ));
        verdicts.push(alcohol::verify_alcohol_content(
            &form.alcohol_content,
            text,
            self.config.abv_tolerance,
        ));

        if let Some(verdict) =
            net_contents::verify_net_contents(form.net_contents(), text, self.config.volume_tolerance)
        {
            verdicts.push(verdict);
        }

        verdicts.push(warning::verify_government_warning(
            text,
            self.config.warning_min_phrases,
        ));

        info!(checks = verdicts.len(), "Verification completed");
        verdicts
    }

    /// Verify from a raw field-name -> value mapping
    pub fn verify_map(
        &self,
        form: &HashMap<String, String>,
        text: &str,
    ) -> Result<VerdictList, FormError> {
        let form = FormFields::from_map(form)?;
        Ok(self.verify(&form, text))
    }

    /// Approximate phrase search at the configured default threshold
    pub fn contains(&self, text: &str, phrase: &str) -> bool {
        contains(text, phrase, self.config.default_threshold)
    }

    /// Verify many cases in parallel, keeping input order
    ///
    /// A case whose text is empty or a provider failure marker fails on its
    /// own without producing verdicts.
    pub fn verify_batch(
        &self,
        cases: &[VerificationCase],
    ) -> Vec<Result<VerdictList, RecognitionError>> {
        cases
            .par_iter()
            .map(|case| {
                let text = RecognizedText::from_raw(case.text.as_str())?;
                Ok(self.verify(&case.form, text.as_str()))
            })
            .collect()
    }
}

/// Verify with the default thresholds
pub fn verify(form: &FormFields, text: &str) -> VerdictList {
    Verifier::default().verify(form, text)
}

/// One form plus the text recognized from its label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationCase {
    #[serde(default)]
    pub id: Option<String>,
    pub form: FormFields,
    pub text: String,
}
