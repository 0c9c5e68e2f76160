//! Wire types of the SL APIs
//!
//! Travel Planner v3 (`TravelplannerV3/trip.json`, HAFAS ReST dialect) and
//! the typeahead station lookup (`typeahead.json`). Only the fields the bot
//! reads are declared; everything else in the payloads is ignored.

use serde::Deserialize;

// --- Travel Planner v3 ---

/// Top-level trip search response
#[derive(Debug, Default, Deserialize)]
pub struct RawTripResponse {
    #[serde(rename = "Trip", default)]
    pub trips: Vec<RawTrip>,
    /// Set instead of `Trip` when the planner rejects the request
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "errorText")]
    pub error_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrip {
    #[serde(rename = "LegList", default)]
    pub leg_list: Option<RawLegList>,
    pub checksum: Option<String>,
    pub trip_id: Option<String>,
    /// ISO 8601 duration (`PT20M`), informational only
    pub duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLegList {
    #[serde(rename = "Leg", default)]
    pub legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
pub struct RawLeg {
    #[serde(rename = "Origin")]
    pub origin: RawStopCall,
    #[serde(rename = "Destination")]
    pub destination: RawStopCall,
    #[serde(rename = "Product", default)]
    pub product: Option<RawProduct>,
    #[serde(rename = "Messages", default)]
    pub messages: Option<RawMessages>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub direction: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStopCall {
    #[serde(default)]
    pub name: String,
    pub ext_id: Option<String>,
    pub id: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub time: String,
    pub date: Option<String>,
    pub track: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub line: Option<String>,
    pub cat_out_s: Option<String>,
    pub cat_out_l: Option<String>,
    pub name: Option<String>,
    pub num: Option<String>,
    pub operator: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMessages {
    #[serde(rename = "Message", default)]
    pub messages: Vec<RawMessage>,
}

#[derive(Debug, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub text: String,
}

// --- Typeahead ---

/// Station lookup response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawLookupResponse {
    pub status_code: i64,
    pub message: Option<serde_json::Value>,
    pub execution_time: Option<i64>,
    #[serde(default)]
    pub response_data: Option<Vec<RawSite>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSite {
    pub name: String,
    pub site_id: String,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    /// Longitude in micro-degrees
    pub x: Option<String>,
    /// Latitude in micro-degrees
    pub y: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_response_tolerates_missing_lists() {
        let raw: RawTripResponse = serde_json::from_str(r#"{"Trip":[{"checksum":"c1"}]}"#).unwrap();
        assert_eq!(raw.trips.len(), 1);
        assert!(raw.trips[0].leg_list.is_none());
    }

    #[test]
    fn error_response_decodes() {
        let raw: RawTripResponse = serde_json::from_str(
            r#"{"errorCode":"SVC_LOC","errorText":"Location missing or invalid"}"#,
        )
        .unwrap();
        assert!(raw.trips.is_empty());
        assert_eq!(raw.error_code.as_deref(), Some("SVC_LOC"));
    }

    #[test]
    fn lookup_response_decodes() {
        let raw: RawLookupResponse = serde_json::from_str(
            r#"{"StatusCode":0,"Message":null,"ExecutionTime":3,
                "ResponseData":[{"Name":"Slussen (Stockholm)","SiteId":"9192","Type":"Station","X":"18071860","Y":"59320284"}]}"#,
        )
        .unwrap();
        let sites = raw.response_data.unwrap();
        assert_eq!(sites[0].site_id, "9192");
        assert_eq!(sites[0].x.as_deref(), Some("18071860"));
    }
}
