use crate::models::config::AppConfig;
use crate::services::config::ConfigManager;
use crate::services::ocr::build_engine;
use tracing::{info, warn};

/// One line of the startup check report
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

/// Startup checks: configuration validity and provider availability
pub fn run_checks(manager: &ConfigManager, config: &AppConfig) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(CheckResult {
        name: "config",
        ok: config.validate().is_ok(),
        detail: match config.validate() {
            Ok(()) if manager.config_exists() => {
                format!("Loaded {}", manager.config_file_path().display())
            }
            Ok(()) => format!(
                "Using defaults ({} not found)",
                manager.config_file_path().display()
            ),
            Err(e) => e,
        },
    });

    let provider = match build_engine(&config.ocr).and_then(|engine| engine.health_check()) {
        Ok(detail) => CheckResult {
            name: "ocr",
            ok: true,
            detail,
        },
        Err(e) => CheckResult {
            name: "ocr",
            ok: false,
            detail: e.to_string(),
        },
    };
    results.push(provider);

    for result in &results {
        if result.ok {
            info!(check = result.name, detail = %result.detail, "Check passed");
        } else {
            warn!(check = result.name, detail = %result.detail, "Check failed");
        }
    }

    results
}

/// Render check results, one per line
pub fn render_checks(results: &[CheckResult]) -> String {
    results
        .iter()
        .map(|r| format!("[{}] {}: {}", if r.ok { "ok" } else { "FAIL" }, r.name, r.detail))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OcrProvider;

    #[test]
    fn test_checks_report_missing_tesseract() {
        let manager = ConfigManager::with_path(std::env::temp_dir().join("label-verify-absent/config.json"));
        let mut config = AppConfig::default();
        config.ocr.provider = OcrProvider::Tesseract;
        config.ocr.tesseract.binary_path = "/nonexistent/tesseract".to_string();

        let results = run_checks(&manager, &config);
        assert_eq!(results.len(), 2);
        assert!(results[0].ok, "Default config should be valid");
        assert!(results[0].detail.starts_with("Using defaults"));
        assert!(!results[1].ok, "Missing binary should fail the OCR check");
    }

    #[test]
    fn test_render_checks() {
        let results = vec![
            CheckResult { name: "config", ok: true, detail: "fine".to_string() },
            CheckResult { name: "ocr", ok: false, detail: "down".to_string() },
        ];
        assert_eq!(render_checks(&results), "[ok] config: fine\n[FAIL] ocr: down");
    }
}
