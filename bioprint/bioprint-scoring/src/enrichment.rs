//! Optional print-quality enrichment by an external text generator.

use std::time::Duration;

use bioprint_types::{
    ParameterImpact, PolymerType, PrintParameters, PrintQuality, QualityDistribution,
    QualityPrediction, Recommendations,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EnrichmentError, Result};
use crate::quality::score_print_quality;

/// Tolerance on the 100-point totals of impact and distribution groups.
pub const TOTAL_TOLERANCE: f64 = 1.0;

/// Settings for an enrichment attempt.
///
/// # Example
///
/// ```
/// use bioprint_scoring::EnrichmentConfig;
///
/// let config = EnrichmentConfig::default().with_timeout_ms(2_000);
/// assert_eq!(config.timeout().as_secs(), 2);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentConfig {
    /// Upper bound on the collaborator call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

impl EnrichmentConfig {
    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns `true` if the timeout is positive.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.timeout_ms > 0
    }
}

/// What the collaborator is asked.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRequest {
    /// Parameters under assessment.
    pub parameters: PrintParameters,
    /// Rendered instruction text.
    pub prompt: String,
}

impl EnrichmentRequest {
    /// Builds a request with the standard prompt.
    #[must_use]
    pub fn new(parameters: PrintParameters) -> Self {
        let prompt = render_prompt(&parameters);
        Self { parameters, prompt }
    }
}

/// Renders the analysis prompt for a parameter set.
#[must_use]
pub fn render_prompt(params: &PrintParameters) -> String {
    format!(
        r#"You are an expert in 3D bioprinting. Analyze the following parameters for a 3D print:
- Polymer Type: {polymer}
- Layer Thickness: {thickness}mm
- Print Speed: {speed}mm/s
- Temperature: {temperature}°C

Provide a structured analysis of the expected print quality based on these parameters.
Return your response as a JSON object with the following structure:
{{
  "printQuality": "Good" | "Medium" | "Bad",
  "confidenceScore": number between 0-100,
  "insights": [array of string insights about the parameters],
  "recommendations": {{
    "polymerType": optional string recommendation,
    "layerThickness": optional number recommendation (must be a number, not a string),
    "printSpeed": optional number recommendation (must be a number, not a string),
    "temperature": optional number recommendation (must be a number, not a string)
  }},
  "parameterImpact": {{
    "polymerType": number between 0-100,
    "layerThickness": number between 0-100,
    "printSpeed": number between 0-100,
    "temperature": number between 0-100
  }},
  "qualityDistribution": {{
    "good": probability as number between 0-100,
    "medium": probability as number between 0-100,
    "bad": probability as number between 0-100
  }}
}}

IMPORTANT: All numeric values must be numbers, not strings. Do not wrap numbers in quotes.
"#,
        polymer = params.polymer_type,
        thickness = params.layer_thickness,
        speed = params.print_speed,
        temperature = params.temperature,
    )
}

/// External text generator used to refine print-quality assessments.
///
/// Implementations return the raw completion text; parsing and validation
/// happen in this crate.
#[async_trait::async_trait]
pub trait QualityEnricher: Send + Sync {
    /// Sends the request and returns the completion text.
    async fn complete(&self, request: &EnrichmentRequest) -> Result<String>;
}

/// Locates the JSON payload inside a completion.
///
/// Tries a fenced ```` ```json ```` block, then the span from the first `{`
/// to the last `}`, then the whole text.
#[must_use]
pub fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
    }

    if let (Some(open), Some(close)) = (text.find('{'), text.rfind('}')) {
        if open < close {
            return &text[open..=close];
        }
    }

    text
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn coerce(self, field: &str) -> Result<f64> {
        let value = match self {
            Self::Number(v) => v,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| EnrichmentError::schema(format!("{field} is not a number: {s:?}")))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EnrichmentError::schema(format!("{field} must be finite")))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecommendations {
    polymer_type: Option<String>,
    layer_thickness: Option<NumberOrString>,
    print_speed: Option<NumberOrString>,
    temperature: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnrichment {
    print_quality: String,
    confidence_score: f64,
    insights: Vec<String>,
    recommendations: RawRecommendations,
    parameter_impact: ParameterImpact,
    quality_distribution: QualityDistribution,
}

fn check_group(name: &str, values: &[f64]) -> Result<()> {
    if let Some(v) = values.iter().find(|v| !(0.0..=100.0).contains(*v)) {
        return Err(EnrichmentError::schema(format!(
            "{name} value {v} outside [0, 100]"
        )));
    }
    let total: f64 = values.iter().sum();
    if (total - 100.0).abs() > TOTAL_TOLERANCE {
        return Err(EnrichmentError::schema(format!(
            "{name} sums to {total}, expected 100"
        )));
    }
    Ok(())
}

/// Parses and validates a completion into a [`QualityPrediction`].
///
/// # Errors
///
/// Returns [`EnrichmentError::Parse`] if no JSON object can be decoded and
/// [`EnrichmentError::Schema`] if a value is unknown or out of range.
pub fn parse_enrichment(text: &str) -> Result<QualityPrediction> {
    let raw: RawEnrichment = serde_json::from_str(extract_json(text))?;

    let print_quality: PrintQuality = raw
        .print_quality
        .parse()
        .map_err(|e| EnrichmentError::schema(format!("printQuality: {e}")))?;

    if !(0.0..=100.0).contains(&raw.confidence_score) {
        return Err(EnrichmentError::schema(format!(
            "confidenceScore {} outside [0, 100]",
            raw.confidence_score
        )));
    }

    check_group("parameterImpact", &raw.parameter_impact.to_array())?;
    check_group("qualityDistribution", &raw.quality_distribution.to_array())?;

    let polymer_type = raw
        .recommendations
        .polymer_type
        .map(|name| {
            name.parse::<PolymerType>()
                .map_err(|e| EnrichmentError::schema(format!("recommendations.polymerType: {e}")))
        })
        .transpose()?;

    let recommendations = Recommendations {
        polymer_type,
        layer_thickness: raw
            .recommendations
            .layer_thickness
            .map(|v| v.coerce("recommendations.layerThickness"))
            .transpose()?,
        print_speed: raw
            .recommendations
            .print_speed
            .map(|v| v.coerce("recommendations.printSpeed"))
            .transpose()?,
        temperature: raw
            .recommendations
            .temperature
            .map(|v| v.coerce("recommendations.temperature"))
            .transpose()?,
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let confidence_score = raw.confidence_score.round() as u8;

    Ok(QualityPrediction {
        print_quality,
        confidence_score,
        insights: raw.insights,
        recommendations,
        parameter_impact: raw.parameter_impact,
        quality_distribution: raw.quality_distribution,
    })
}

/// Runs one bounded enrichment attempt.
///
/// # Errors
///
/// Returns [`EnrichmentError::InvalidConfig`] for a zero timeout without
/// calling the collaborator, [`EnrichmentError::Timeout`] if it does not
/// answer in time, or any transport, parse or schema error.
pub async fn enrich_print_quality(
    params: &PrintParameters,
    enricher: &dyn QualityEnricher,
    config: EnrichmentConfig,
) -> Result<QualityPrediction> {
    if !config.is_valid() {
        return Err(EnrichmentError::invalid_config("timeoutMs must be positive"));
    }
    let request = EnrichmentRequest::new(*params);
    let text = tokio::time::timeout(config.timeout(), enricher.complete(&request))
        .await
        .map_err(|_| EnrichmentError::Timeout(config.timeout()))??;
    parse_enrichment(&text)
}

/// Scores print quality, preferring a validated enrichment when available.
///
/// Never fails: without an enricher, or when the single attempt errors,
/// times out or returns an invalid payload, the heuristic result from
/// [`score_print_quality`] is returned and the failure is logged.
pub async fn score_print_quality_enriched(
    params: &PrintParameters,
    enricher: Option<&dyn QualityEnricher>,
    config: EnrichmentConfig,
) -> QualityPrediction {
    let Some(enricher) = enricher else {
        return score_print_quality(params);
    };

    match enrich_print_quality(params, enricher, config).await {
        Ok(prediction) => {
            debug!(quality = %prediction.print_quality, "accepted enriched prediction");
            prediction
        }
        Err(err) => {
            warn!(error = %err, polymer = %params.polymer_type, "enrichment failed; using heuristic");
            score_print_quality(params)
        }
    }
}
