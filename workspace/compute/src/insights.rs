use common::{DemandInsights, PopularRoute, PriceTrends};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

use crate::error::{ComputeError, Result};
use crate::offers::FlightOffersResponse;

/// Turns a provider flight-offer search into demand insights.
///
/// Every offer contributes its grand total to the price trends and one deal
/// to the airline operating its first segment. Routes come out ordered by
/// deal count, most deals first, with ties ordered by airline name.
#[derive(Debug, Clone)]
pub struct InsightsComputer {
    currency: String,
}

/// Running count and total for one airline.
#[derive(Debug, Default, Clone, Copy)]
struct RouteAccumulator {
    deals: u32,
    total: Decimal,
}

impl InsightsComputer {
    /// Creates a computer labelling its insights with `currency`.
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_uppercase(),
        }
    }

    /// Computes insights for one search result.
    ///
    /// Returns `Ok(None)` when the search holds no offers.
    #[instrument(skip(self, response), fields(num_offers = response.data.len(), currency = %self.currency))]
    pub fn compute(&self, response: &FlightOffersResponse) -> Result<Option<DemandInsights>> {
        if response.is_empty() {
            debug!("No offers to aggregate");
            return Ok(None);
        }

        let mut priced = Vec::with_capacity(response.data.len());
        for (offer_index, offer) in response.data.iter().enumerate() {
            let price = Decimal::from_str(offer.price.total.trim()).map_err(|_| {
                warn!(offer_index, total = %offer.price.total, "Unparsable offer price");
                ComputeError::InvalidPrice {
                    offer_index,
                    value: offer.price.total.clone(),
                }
            })?;
            let carrier = offer
                .operating_carrier()
                .ok_or(ComputeError::MissingSegment { offer_index })?;
            priced.push((response.airline_name(carrier), price));
        }

        let prices: Vec<Decimal> = priced.iter().map(|(_, price)| *price).collect();
        let price_trends = price_trends(&prices)?;
        let popular_routes = popular_routes(&priced)?;

        info!(
            routes = popular_routes.len(),
            offers = prices.len(),
            "Aggregated demand insights"
        );

        Ok(Some(DemandInsights {
            popular_routes,
            price_trends,
            currency: self.currency.clone(),
        }))
    }
}

impl Default for InsightsComputer {
    fn default() -> Self {
        Self::new(common::DEFAULT_CURRENCY)
    }
}

fn price_trends(prices: &[Decimal]) -> Result<Option<PriceTrends>> {
    let (Some(min_price), Some(max_price)) = (prices.iter().min(), prices.iter().max()) else {
        return Ok(None);
    };

    let total = checked_sum(prices.iter().copied(), "price trends")?;
    let avg_price = total / Decimal::from(prices.len() as u64);

    Ok(Some(PriceTrends {
        min_price: *min_price,
        avg_price,
        max_price: *max_price,
    }))
}

fn popular_routes(priced: &[(&str, Decimal)]) -> Result<Vec<PopularRoute>> {
    let mut by_airline: BTreeMap<&str, RouteAccumulator> = BTreeMap::new();
    for (airline, price) in priced {
        let entry = by_airline.entry(*airline).or_default();
        entry.deals = entry
            .deals
            .checked_add(1)
            .ok_or_else(|| ComputeError::Overflow(format!("deal count of {airline}")))?;
        entry.total = entry
            .total
            .checked_add(*price)
            .ok_or_else(|| ComputeError::Overflow(format!("prices of {airline}")))?;
    }

    // BTreeMap iteration is alphabetical and sort_by is stable, so equal
    // deal counts stay in airline order.
    let mut routes: Vec<PopularRoute> = by_airline
        .into_iter()
        .map(|(airline, acc)| PopularRoute {
            airline: airline.to_string(),
            deal_count: acc.deals,
            avg_price: acc.total / Decimal::from(acc.deals),
        })
        .collect();
    routes.sort_by(|a, b| b.deal_count.cmp(&a.deal_count));

    Ok(routes)
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>, what: &str) -> Result<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value)
            .ok_or_else(|| ComputeError::Overflow(what.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::{Dictionaries, FlightOffer, Itinerary, OfferPrice, Segment, UNKNOWN_AIRLINE};
    use std::collections::HashMap;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn offer(carrier: &str, total: &str) -> FlightOffer {
        FlightOffer {
            price: OfferPrice {
                total: total.to_string(),
                currency: Some("EUR".to_string()),
            },
            itineraries: vec![Itinerary {
                segments: vec![Segment {
                    carrier_code: carrier.to_string(),
                }],
            }],
        }
    }

    fn search(offers: Vec<FlightOffer>) -> FlightOffersResponse {
        let carriers = HashMap::from([
            ("IB".to_string(), "IBERIA".to_string()),
            ("TP".to_string(), "TAP PORTUGAL".to_string()),
            ("UX".to_string(), "AIR EUROPA".to_string()),
        ]);
        FlightOffersResponse {
            data: offers,
            dictionaries: Some(Dictionaries { carriers }),
        }
    }

    #[test]
    fn test_checked_sum() {
        let total = checked_sum([dec("100.10"), dec("0.90")].into_iter(), "prices").unwrap();
        assert_eq!(total, dec("101"));

        let overflow = checked_sum([Decimal::MAX, Decimal::ONE].into_iter(), "prices");
        assert_eq!(overflow, Err(ComputeError::Overflow("prices".to_string())));
    }

    #[test]
    fn test_empty_search_yields_no_insights() {
        let computer = InsightsComputer::default();
        assert_eq!(computer.compute(&FlightOffersResponse::default()), Ok(None));
    }

    #[test]
    fn test_routes_grouped_and_sorted_by_deal_count() {
        let response = search(vec![
            offer("TP", "100.00"),
            offer("IB", "80.00"),
            offer("TP", "120.00"),
            offer("TP", "110.00"),
            offer("IB", "90.50"),
            offer("UX", "70.00"),
        ]);

        let insights = InsightsComputer::new("eur").compute(&response).unwrap().unwrap();
        assert_eq!(insights.currency, "EUR");

        let summary: Vec<_> = insights
            .popular_routes
            .iter()
            .map(|r| (r.airline.as_str(), r.deal_count, r.avg_price))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("TAP PORTUGAL", 3, dec("110")),
                ("IBERIA", 2, dec("85.25")),
                ("AIR EUROPA", 1, dec("70")),
            ]
        );
    }

    #[test]
    fn test_equal_deal_counts_ordered_by_airline() {
        let response = search(vec![offer("UX", "50"), offer("IB", "60"), offer("TP", "70")]);

        let insights = InsightsComputer::default().compute(&response).unwrap().unwrap();
        let airlines: Vec<_> = insights.popular_routes.iter().map(|r| r.airline.as_str()).collect();
        assert_eq!(airlines, vec!["AIR EUROPA", "IBERIA", "TAP PORTUGAL"]);
    }

    #[test]
    fn test_price_trends() {
        let response = search(vec![offer("TP", "100.00"), offer("IB", "50.00"), offer("IB", "150.00")]);

        let trends = InsightsComputer::default()
            .compute(&response)
            .unwrap()
            .unwrap()
            .price_trends
            .unwrap();
        assert_eq!(trends.min_price, dec("50"));
        assert_eq!(trends.avg_price, dec("100"));
        assert_eq!(trends.max_price, dec("150"));
    }

    #[test]
    fn test_unknown_carrier_falls_back() {
        let response = search(vec![offer("ZZ", "42.00")]);

        let insights = InsightsComputer::default().compute(&response).unwrap().unwrap();
        assert_eq!(insights.popular_routes[0].airline, UNKNOWN_AIRLINE);
    }

    #[test]
    fn test_invalid_price_is_an_error() {
        let response = search(vec![offer("TP", "100.00"), offer("IB", "n/a")]);

        let err = InsightsComputer::default().compute(&response).unwrap_err();
        assert_eq!(
            err,
            ComputeError::InvalidPrice {
                offer_index: 1,
                value: "n/a".to_string()
            }
        );
    }

    #[test]
    fn test_offer_without_segments_is_an_error() {
        let mut broken = offer("TP", "10.00");
        broken.itineraries.clear();
        let response = search(vec![broken]);

        let err = InsightsComputer::default().compute(&response).unwrap_err();
        assert_eq!(err, ComputeError::MissingSegment { offer_index: 0 });
    }
}
