//! WASM bindings for loan request extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use loanx_core::{LoanRequestParser, RequestExtractor, ValidationFailure};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a loan request from free text.
///
/// Returns the record object, or throws an `Error` whose `missing` property
/// lists the required fields that were not found, in order.
#[wasm_bindgen(js_name = extractLoanRequest)]
pub fn extract_loan_request(text: &str) -> Result<JsValue, JsValue> {
    let record = loanx_core::extract(text).map_err(|f| failure_to_js(&f))?;
    to_js(&record)
}

/// Normalize an SSN to `XXX-XX-XXXX`. Returns `undefined` unless the input
/// holds exactly nine digits.
#[wasm_bindgen(js_name = normalizeSsn)]
pub fn normalize_ssn(text: &str) -> Option<String> {
    loanx_core::normalize_ssn(text)
}

/// Format a number in US style, e.g. `50000` → `"50,000"`.
#[wasm_bindgen(js_name = formatUsAmount)]
pub fn format_us_amount(amount: f64) -> Result<String, JsValue> {
    let amount = Decimal::try_from(amount)
        .map_err(|e| JsValue::from_str(&format!("Invalid amount: {}", e)))?;
    Ok(loanx_core::format_us_amount(amount))
}

/// Loan request extractor class for browser use.
#[wasm_bindgen]
pub struct LoanRequestExtractor {
    parser: LoanRequestParser,
}

#[wasm_bindgen]
impl LoanRequestExtractor {
    /// Create a new extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: LoanRequestParser::new(),
        }
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let record = self.parser.extract(text).map_err(|f| failure_to_js(&f))?;
        to_js(&record)
    }

    /// Extract a record together with the matched rules and defaulted fields.
    #[wasm_bindgen(js_name = extractWithTrace)]
    pub fn extract_with_trace(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text).map_err(|f| failure_to_js(&f))?;
        to_js(&result)
    }
}

impl Default for LoanRequestExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `Error` carrying the serialized failure's `missing` and `prompt`.
fn failure_to_js(failure: &ValidationFailure) -> JsValue {
    let error = js_sys::Error::new(&failure.to_string());

    match serde_wasm_bindgen::to_value(failure) {
        Ok(details) => {
            for key in ["missing", "prompt"] {
                if let Ok(value) = js_sys::Reflect::get(&details, &key.into()) {
                    js_sys::Reflect::set(&error, &key.into(), &value).ok();
                }
            }
        }
        Err(e) => {
            js_sys::Reflect::set(&error, &"cause".into(), &e.to_string().into()).ok();
        }
    }

    error.into()
}
