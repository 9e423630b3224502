//! Flight-offer search payload as returned by the provider.
//!
//! Only the fields the aggregation reads are modelled; everything else in
//! the provider document is ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Airline name used when a carrier code is missing from the dictionary.
pub const UNKNOWN_AIRLINE: &str = "Unknown Airline";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
    #[serde(default)]
    pub dictionaries: Option<Dictionaries>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dictionaries {
    /// Carrier code to airline name
    #[serde(default)]
    pub carriers: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub price: OfferPrice,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferPrice {
    /// Grand total as a decimal string, e.g. "123.45"
    pub total: String,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub carrier_code: String,
}

impl FlightOffersResponse {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolves a carrier code to a display name.
    pub fn airline_name(&self, carrier_code: &str) -> &str {
        self.dictionaries
            .as_ref()
            .and_then(|d| d.carriers.get(carrier_code))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_AIRLINE)
    }
}

impl FlightOffer {
    /// Carrier of the first segment of the first itinerary.
    pub fn operating_carrier(&self) -> Option<&str> {
        self.itineraries
            .first()
            .and_then(|itinerary| itinerary.segments.first())
            .map(|segment| segment.carrier_code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_document() {
        let json = r#"{
            "meta": { "count": 1 },
            "data": [{
                "type": "flight-offer",
                "price": { "currency": "EUR", "total": "123.45", "base": "100.00" },
                "itineraries": [{ "duration": "PT2H", "segments": [
                    { "carrierCode": "TP", "number": "1001" },
                    { "carrierCode": "IB", "number": "2002" }
                ] }]
            }],
            "dictionaries": { "carriers": { "TP": "TAP PORTUGAL" } }
        }"#;

        let response: FlightOffersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 1);

        let offer = &response.data[0];
        assert_eq!(offer.price.total, "123.45");
        assert_eq!(offer.operating_carrier(), Some("TP"));
        assert_eq!(response.airline_name("TP"), "TAP PORTUGAL");
        assert_eq!(response.airline_name("IB"), UNKNOWN_AIRLINE);
    }

    #[test]
    fn test_missing_data_is_empty() {
        let response: FlightOffersResponse = serde_json::from_str("{}").unwrap();
        assert!(response.is_empty());
        assert_eq!(response.airline_name("XX"), UNKNOWN_AIRLINE);
    }
}
