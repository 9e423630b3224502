/// A destination the dashboard offers in its selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    /// IATA code sent to the server
    pub code: &'static str,
    /// Human readable city name
    pub city: &'static str,
}

/// Destinations reachable from the default origin in the provider's test data.
pub const DESTINATIONS: &[Destination] = &[
    Destination { code: "LIS", city: "Lisbon" },
    Destination { code: "BCN", city: "Barcelona" },
    Destination { code: "PAR", city: "Paris" },
    Destination { code: "LON", city: "London" },
    Destination { code: "ROM", city: "Rome" },
    Destination { code: "AMS", city: "Amsterdam" },
    Destination { code: "BER", city: "Berlin" },
    Destination { code: "MUC", city: "Munich" },
    Destination { code: "NYC", city: "New York" },
    Destination { code: "MEX", city: "Mexico City" },
];
