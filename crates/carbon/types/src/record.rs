//! Facility telemetry record and its ingestion from raw JSON.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::InputShapeError;
use crate::numeric::{clamp_percent, coerce_number, percent_of};

/// Default for [`AnalysisPolicy::default_facility_id`](crate::AnalysisPolicy),
/// stamped on certificates when the payload does not name a facility.
pub const DEFAULT_FACILITY_ID: &str = "DEMO-FACILITY";

/// A validated snapshot of one facility's monthly emission telemetry.
///
/// Every numeric field is finite. Absent or non-numeric inputs were coerced
/// to 0 at ingestion, except the forecast, which keeps its presence so the
/// compliance stage can report missing data.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FacilityRecord {
    pub facility_id: Option<String>,
    pub total_emission_tons: f64,
    pub total_production_units: f64,
    pub peak_emission_tons: f64,
    pub previous_month_emission_tons: f64,
    pub predicted_next_month_emission_tons: Option<f64>,
    pub hourly_emissions: Vec<f64>,
    pub anomaly_count: f64,
    pub total_hours: f64,
    pub downtime_minutes: f64,
    pub total_runtime_minutes: f64,
    pub industry_benchmark_intensity: f64,
}

impl FacilityRecord {
    /// Parse and coerce a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, InputShapeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| InputShapeError::Malformed(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Coerce a raw JSON payload into a typed record.
    ///
    /// Rejects non-object payloads and payloads whose required emission
    /// fields are not numbers. Every other field degrades to 0 / empty.
    pub fn from_value(value: &Value) -> Result<Self, InputShapeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| InputShapeError::NotAnObject(json_kind(value)))?;

        let total_emission_tons = required_number(obj, "total_emission_tons")?;
        let previous_month_emission_tons = required_number(obj, "previous_month_emission_tons")?;

        let facility_id = match obj.get("facility_id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) if id.is_empty() => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(_) => {
                return Err(InputShapeError::WrongType {
                    field: "facility_id",
                    expected: "string",
                })
            }
        };

        let hourly_emissions = obj
            .get("hourly_emissions")
            .or_else(|| obj.get("hourly_emissions_array"))
            .and_then(Value::as_array)
            .map(|values| values.iter().map(|v| coerce_number(Some(v))).collect())
            .unwrap_or_default();

        let predicted_next_month_emission_tons = obj
            .get("predicted_next_month_emission_tons")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite());

        Ok(Self {
            facility_id,
            total_emission_tons,
            total_production_units: coerce_number(obj.get("total_production_units")),
            peak_emission_tons: coerce_number(obj.get("peak_emission_tons")),
            previous_month_emission_tons,
            predicted_next_month_emission_tons,
            hourly_emissions,
            anomaly_count: coerce_number(obj.get("anomaly_count")),
            total_hours: coerce_number(obj.get("total_hours")),
            downtime_minutes: coerce_number(obj.get("downtime_minutes")),
            total_runtime_minutes: coerce_number(obj.get("total_runtime_minutes")),
            industry_benchmark_intensity: coerce_number(obj.get("industry_benchmark_intensity")),
        })
    }

    /// Forecast emission, or 0 when the payload carried none.
    pub fn predicted_next(&self) -> f64 {
        self.predicted_next_month_emission_tons.unwrap_or(0.0)
    }

    /// Anomalies per operating hour, as a percentage (unclamped).
    pub fn anomaly_rate_percent(&self) -> f64 {
        percent_of(self.anomaly_count, self.total_hours)
    }

    /// Share of downtime in total scheduled minutes, clamped to `[0, 100]`.
    pub fn downtime_percent(&self) -> f64 {
        clamp_percent(percent_of(
            self.downtime_minutes,
            self.downtime_minutes + self.total_runtime_minutes,
        ))
    }
}

/// Absent or null is missing; any other non-number is the wrong type.
fn required_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, InputShapeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(InputShapeError::MissingRequiredField(field)),
        Some(value) => value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or(InputShapeError::WrongType {
                field,
                expected: "number",
            }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
