//! Prompt and output-schema builders for the five design request kinds
//!
//! Each request is a system prompt (role + instructions + declared JSON
//! schema) and a user payload. Schemas use camelCase field names matching
//! the `model` types.

use crate::core::error::Result;
use crate::model::{ClimateData, FloorPlan, PerformanceMetrics, Priority};
use serde_json::{json, Value};

/// A ready-to-send request
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Which request this prompt belongs to (used for logging and parse errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RequestKind {
    #[display(fmt = "climate")]
    Climate,
    #[display(fmt = "design")]
    Design,
    #[display(fmt = "refinement")]
    Refinement,
    #[display(fmt = "diagnostics")]
    Diagnostics,
    #[display(fmt = "evaluation")]
    Evaluation,
}

const ARCHITECT_ROLE: &str = "You are an expert in climate-responsive, passive \
architecture. You reason about sun paths, prevailing winds, thermal mass and \
daylight before placing any room.";

fn with_schema(instructions: &str, schema: &Value) -> String {
    let schema_text =
        serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    format!(
        "{}\n\n{}\n\nOUTPUT FORMAT (a single JSON object, no explanation, matching this JSON schema):\n{}",
        ARCHITECT_ROLE, instructions, schema_text
    )
}

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn level() -> Value {
    json!({ "type": "string", "enum": ["low", "medium", "high"] })
}

pub fn climate_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "location": { "type": "string" },
            "climateZone": { "type": "string" },
            "avgTempRange": { "type": "string" },
            "solarPotential": { "type": "string" },
            "prevailingWinds": { "type": "string" },
            "challenges": string_array(),
            "strategies": string_array(),
            "orientationGuidance": { "type": "string" },
            "windowGuidance": { "type": "string" },
            "zoningGuidance": { "type": "string" }
        },
        "required": [
            "location", "climateZone", "avgTempRange", "solarPotential",
            "prevailingWinds", "challenges", "strategies",
            "orientationGuidance", "windowGuidance", "zoningGuidance"
        ]
    })
}

pub fn diagnostics_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "heatRisks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "room": { "type": "string" },
                        "roomId": { "type": "string" },
                        "risk": level()
                    },
                    "required": ["room", "risk"]
                }
            },
            "airflow": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "from": { "type": "string" },
                        "to": { "type": "string" },
                        "fromId": { "type": "string" },
                        "toId": { "type": "string" },
                        "strength": level()
                    },
                    "required": ["from", "to", "strength"]
                }
            },
            "daylight": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "room": { "type": "string" },
                        "roomId": { "type": "string" },
                        "quality": level()
                    },
                    "required": ["room", "quality"]
                }
            }
        },
        "required": ["heatRisks", "airflow", "daylight"]
    })
}

fn metrics_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "daylight": { "type": "number", "minimum": 0, "maximum": 1 },
            "ventilation": { "type": "number", "minimum": 0, "maximum": 1 },
            "thermalMass": { "type": "number", "minimum": 0, "maximum": 1 },
            "solarControl": { "type": "number", "minimum": 0, "maximum": 1 }
        },
        "required": ["daylight", "ventilation", "thermalMass", "solarControl"]
    })
}

pub fn floor_plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "orientation": { "type": "number", "description": "degrees clockwise from true north" },
            "rooms": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "type": {
                            "type": "string",
                            "enum": ["living", "bedroom", "kitchen", "bathroom", "utility", "buffer", "circulation"]
                        },
                        "x": { "type": "number", "description": "meters" },
                        "y": { "type": "number", "description": "meters" },
                        "width": { "type": "number", "description": "meters, positive" },
                        "height": { "type": "number", "description": "meters, positive" },
                        "windows": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "side": { "type": "string", "enum": ["north", "south", "east", "west"] },
                                    "position": { "type": "number", "minimum": 0, "maximum": 1 },
                                    "width": { "type": "number" },
                                    "shaded": { "type": "boolean" }
                                },
                                "required": ["side", "position", "width", "shaded"]
                            }
                        },
                        "rationale": { "type": "string" }
                    },
                    "required": ["id", "name", "type", "x", "y", "width", "height", "windows", "rationale"]
                }
            },
            "totalArea": { "type": "number" },
            "metrics": metrics_schema(),
            "reasoning": { "type": "string" },
            "rejectedAlternatives": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "option": { "type": "string" },
                        "reason": { "type": "string" }
                    },
                    "required": ["option", "reason"]
                }
            },
            "diagnostics": diagnostics_schema()
        },
        "required": [
            "title", "orientation", "rooms", "totalArea", "metrics",
            "reasoning", "rejectedAlternatives", "diagnostics"
        ]
    })
}

pub fn refinement_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "plan": floor_plan_schema(),
            "changes": string_array(),
            "improvements": {
                "type": "object",
                "properties": {
                    "thermalExplanation": { "type": "string" },
                    "daylightExplanation": { "type": "string" },
                    "thermalGainPercent": { "type": "number" },
                    "daylightGainPercent": { "type": "number" }
                },
                "required": [
                    "thermalExplanation", "daylightExplanation",
                    "thermalGainPercent", "daylightGainPercent"
                ]
            }
        },
        "required": ["plan", "changes", "improvements"]
    })
}

pub fn evaluation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "furtherIteration": { "type": "boolean" },
            "adjustments": string_array(),
            "expectedBenefit": { "type": "string" }
        },
        "required": ["furtherIteration", "adjustments", "expectedBenefit"]
    })
}

pub fn climate_prompt(location: &str, plot_dimensions: &str, priority: Priority) -> Prompt {
    Prompt {
        system: with_schema(
            "Analyze the climate of the given site for passive building design. \
             Identify the climate zone, typical temperature range, solar potential \
             and prevailing winds, then list the main design challenges and the \
             passive strategies that answer them. Finish with concrete guidance on \
             building orientation, window placement and thermal zoning.",
            &climate_schema(),
        ),
        user: format!(
            "LOCATION: {}\nPLOT DIMENSIONS: {}\nOPTIMIZATION PRIORITY: {}\n\nAnalyze this site:",
            location.trim(),
            plot_dimensions.trim(),
            priority
        ),
    }
}

pub fn design_prompt(
    climate: &ClimateData,
    plot_dimensions: &str,
    requirements: &str,
) -> Result<Prompt> {
    let climate_json = serde_json::to_string_pretty(climate)?;
    Ok(Prompt {
        system: with_schema(
            "Design a single-storey floor plan that fits inside the plot. Rooms are \
             axis-aligned rectangles in meters with the origin at the north-west \
             corner of the plot, x growing east and y growing south. Rooms must not \
             overlap. Give every room a short unique id, place windows by wall side \
             and relative position, and explain each placement. Score the plan for \
             daylight, ventilation, thermal mass and solar control between 0 and 1, \
             list the alternatives you rejected with reasons, and include an initial \
             diagnostics bundle that references rooms by both name and id.",
            &floor_plan_schema(),
        ),
        user: format!(
            "CLIMATE PROFILE:\n{}\n\nPLOT DIMENSIONS: {}\n\nREQUIREMENTS:\n{}\n\nDesign the floor plan:",
            climate_json,
            plot_dimensions.trim(),
            if requirements.trim().is_empty() {
                "(none given)"
            } else {
                requirements.trim()
            }
        ),
    })
}

/// The whole plan is embedded verbatim; no size guard is applied
pub fn refine_prompt(plan: &FloorPlan, climate: &ClimateData) -> Result<Prompt> {
    let plan_json = serde_json::to_string_pretty(plan)?;
    let climate_json = serde_json::to_string_pretty(climate)?;
    Ok(Prompt {
        system: with_schema(
            "Refine the given floor plan for its climate. Keep what works, fix the \
             weakest performance scores first, and return the complete revised plan \
             together with a list of concrete changes and the expected thermal and \
             daylight improvements in percent.",
            &refinement_schema(),
        ),
        user: format!(
            "CLIMATE PROFILE:\n{}\n\nCURRENT PLAN:\n{}\n\nRefine this plan:",
            climate_json, plan_json
        ),
    })
}

pub fn diagnostics_prompt(plan: &FloorPlan) -> Result<Prompt> {
    let plan_json = serde_json::to_string_pretty(plan)?;
    Ok(Prompt {
        system: with_schema(
            "Audit the floor plan room by room. Rate each room's overheating risk \
             and daylight quality, and trace the main natural airflow paths between \
             rooms with their strength. Reference rooms by their exact name and id \
             as given in the plan.",
            &diagnostics_schema(),
        ),
        user: format!("PLAN:\n{}\n\nRun the climate diagnostics:", plan_json),
    })
}

pub fn evaluation_prompt(metrics: &PerformanceMetrics) -> Result<Prompt> {
    let metrics_json = serde_json::to_string_pretty(metrics)?;
    Ok(Prompt {
        system: with_schema(
            "Decide whether another refinement iteration is justified given these \
             performance scores. If it is, recommend specific adjustments; in either \
             case state the expected benefit of continuing.",
            &evaluation_schema(),
        ),
        user: format!("PERFORMANCE METRICS:\n{}\n\nEvaluate convergence:", metrics_json),
    })
}
