//! Prompt text for the natural-language demand summary.

use common::{format_price, DemandInsights};

/// Summary used when there is nothing to summarize.
pub const NO_DATA_SUMMARY: &str = "No data available to generate a summary.";

/// Summary used when the language-model call fails.
pub const SUMMARY_UNAVAILABLE: &str = "Could not generate AI summary due to an error.";

/// System message framing the assistant.
pub const SYSTEM_PROMPT: &str = "You are a helpful travel market analyst.";

/// Builds the user prompt asking for a short manager-facing summary.
pub fn build_summary_prompt(insights: &DemandInsights) -> String {
    let currency = insights.currency.as_str();
    let mut prompt = String::from(
        "You are a market analyst. Using the airline booking data below, write a short, \
         actionable summary for a manager. Focus on pricing and airline popularity.\n\nData:\n",
    );

    if let Some(trends) = &insights.price_trends {
        prompt.push_str(&format!(
            "- Average flight price: {}\n- Price range: from {} to {}\n",
            format_price(trends.avg_price, currency),
            format_price(trends.min_price, currency),
            format_price(trends.max_price, currency),
        ));
    }

    prompt.push_str("- Airline deals:\n");
    for route in &insights.popular_routes {
        prompt.push_str(&format!(
            "  - {}: {} deals, avg {}\n",
            route.airline,
            route.deal_count,
            format_price(route.avg_price, currency),
        ));
    }

    prompt.push_str("\nKeep it concise and professional, 2-3 sentences.");
    prompt
}
