//! `viability` and `quality` commands.

use anyhow::Result;
use bioprint_scoring::{
    EnrichmentConfig, ViabilityAssessment, assess_viability, score_print_quality_enriched,
    viability_tips,
};
use bioprint_types::{PolymerType, PrintParameters, ProcessParameters};
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViabilityReport {
    #[serde(flatten)]
    assessment: ViabilityAssessment,
    tips: Vec<String>,
}

pub fn viability(params: ProcessParameters) -> Result<()> {
    params.validate()?;

    let report = ViabilityReport {
        assessment: assess_viability(&params),
        tips: viability_tips(&params),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub async fn quality(
    polymer: PolymerType,
    layer_thickness: f64,
    print_speed: f64,
    temperature: f64,
) -> Result<()> {
    let params = PrintParameters::new(polymer, layer_thickness, print_speed, temperature);
    if let Err(err) = params.validate() {
        warn!(error = %err, "print settings outside the supported range");
    }

    // No enrichment client ships with the CLI.
    let prediction = score_print_quality_enriched(&params, None, EnrichmentConfig::default()).await;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}
