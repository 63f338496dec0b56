use crate::models::config::AppConfig;
use crate::models::form::{FieldName, FormError, FormFields};
use crate::models::verdict::{AggregationPolicy, VerdictList};
use crate::services::ocr::{build_engine, RecognitionError, RecognizedText};
use crate::services::pipeline::{LabelVerificationService, PipelineError};
use crate::services::verification::{VerificationCase, Verifier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

/// Shape returned for one label, as consumed by front ends
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VerificationResponse {
    pub success: bool,
    pub message: String,
    pub details: VerdictList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognized_text: Option<String>,
    /// Set only when the label could not be read; `details` is then empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl VerificationResponse {
    pub fn from_verdicts(
        verdicts: VerdictList,
        recognized_text: Option<String>,
        checked_at: DateTime<Utc>,
        policy: AggregationPolicy,
    ) -> Self {
        Self {
            success: verdicts.passes(policy),
            message: verdicts.summary(policy).to_string(),
            details: verdicts,
            recognized_text,
            error: None,
            checked_at,
        }
    }

    /// Response for a label whose text could not be read
    pub fn ocr_failed(error: &RecognitionError) -> Self {
        Self {
            success: false,
            message: "OCR Failed or no text found.".to_string(),
            details: VerdictList::new(),
            recognized_text: None,
            error: Some(error.to_string()),
            checked_at: Utc::now(),
        }
    }
}

/// Per-case entry of a batch run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub success: bool,
    pub details: VerdictList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build form fields from command-line values
pub fn build_form(
    brand: &str,
    product_type: &str,
    abv: &str,
    net: Option<&str>,
) -> Result<FormFields, FormError> {
    let mut map = HashMap::new();
    map.insert(FieldName::BrandName.form_key().to_string(), brand.to_string());
    map.insert(FieldName::ProductType.form_key().to_string(), product_type.to_string());
    map.insert(FieldName::AlcoholContent.form_key().to_string(), abv.to_string());
    if let Some(net) = net {
        map.insert(FieldName::NetContents.form_key().to_string(), net.to_string());
    }
    FormFields::from_map(&map)
}

/// Verify a label image on disk
///
/// Returns whether the result passes `policy`. Recognition failures are
/// printed as an OCR-failed response and returned as an error.
pub async fn verify_image(
    config: &AppConfig,
    image_path: &Path,
    form: &FormFields,
    policy: AggregationPolicy,
    json: bool,
) -> Result<bool, String> {
    // Blocking HTTP clients must be built off the async runtime
    let ocr_config = config.ocr.clone();
    let engine = tokio::task::spawn_blocking(move || build_engine(&ocr_config))
        .await
        .map_err(|e| format!("Failed to start OCR provider: {}", e))?
        .map_err(|e| e.to_string())?;
    let service = LabelVerificationService::new(engine, config);

    match service.verify_file(image_path, form).await {
        Ok(report) => {
            let response = VerificationResponse::from_verdicts(
                report.verdicts,
                Some(report.recognized_text),
                report.checked_at,
                policy,
            );
            print_response(&response, json)?;
            Ok(response.success)
        }
        Err(PipelineError::Recognition(e)) => {
            error!(error = %e, "Label could not be read");
            print_response(&VerificationResponse::ocr_failed(&e), json)?;
            Err(PipelineError::Recognition(e).to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Verify text read from a file, or stdin when `source` is "-"
pub fn verify_text(
    config: &AppConfig,
    source: &str,
    form: &FormFields,
    policy: AggregationPolicy,
    json: bool,
) -> Result<bool, String> {
    let raw = read_source(source)?;
    let text = match RecognizedText::from_raw(raw) {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Label text unusable");
            print_response(&VerificationResponse::ocr_failed(&e), json)?;
            return Err(PipelineError::Recognition(e).to_string());
        }
    };

    let verifier = Verifier::new(config.matching.clone());
    let verdicts = verifier.verify(form, text.as_str());
    let response = VerificationResponse::from_verdicts(verdicts, None, Utc::now(), policy);
    print_response(&response, json)?;
    Ok(response.success)
}

/// Verify a JSON array of cases; passes only when every case passes
pub fn verify_batch(
    config: &AppConfig,
    cases_path: &str,
    policy: AggregationPolicy,
    json: bool,
) -> Result<bool, String> {
    let content = read_source(cases_path)?;
    let cases: Vec<VerificationCase> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse cases file: {}", e))?;
    info!(cases = cases.len(), "Running batch verification");

    let entries = run_batch(&Verifier::new(config.matching.clone()), cases, policy);
    let all_passed = entries.iter().all(|e| e.success);

    if json {
        let out = serde_json::to_string_pretty(&entries)
            .map_err(|e| format!("Failed to serialize results: {}", e))?;
        println!("{}", out);
    } else {
        for (index, entry) in entries.iter().enumerate() {
            let label = entry.id.clone().unwrap_or_else(|| format!("#{}", index + 1));
            println!("{} {}", label, if entry.success { "PASS" } else { "FAIL" });
            match &entry.error {
                Some(reason) => println!("  OCR Failed or no text found: {}", reason),
                None => println!("{}", render_details(&entry.details)),
            }
        }
    }

    Ok(all_passed)
}

/// Verify cases in parallel, keeping input order
pub fn run_batch(
    verifier: &Verifier,
    cases: Vec<VerificationCase>,
    policy: AggregationPolicy,
) -> Vec<BatchEntry> {
    let results = verifier.verify_batch(&cases);

    cases
        .into_iter()
        .zip(results)
        .map(|(case, result)| match result {
            Ok(details) => BatchEntry {
                id: case.id,
                success: details.passes(policy),
                details,
                error: None,
            },
            Err(e) => BatchEntry {
                id: case.id,
                success: false,
                details: VerdictList::new(),
                error: Some(e.to_string()),
            },
        })
        .collect()
}

fn read_source(source: &str) -> Result<String, String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(buffer);
    }

    fs::read_to_string(source).map_err(|e| format!("Failed to read '{}': {}", source, e))
}

fn print_response(response: &VerificationResponse, json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(response)
            .map_err(|e| format!("Failed to serialize response: {}", e))?;
        println!("{}", out);
    } else {
        println!("{}", render_response(response));
    }
    Ok(())
}

/// Human-readable rendering of a response
pub fn render_response(response: &VerificationResponse) -> String {
    match &response.error {
        Some(reason) => format!("{}\n  {}", response.message, reason),
        None => format!("{}\n{}", response.message, render_details(&response.details)),
    }
}

fn render_details(details: &VerdictList) -> String {
    details
        .iter()
        .map(|v| format!("  {:<20} {:<10} {}", v.field.label(), v.status.as_str(), v.message))
        .collect::<Vec<_>>()
        .join("\n")
}
