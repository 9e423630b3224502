use common::{format_price, PopularRoute};
use web_sys::{Document, HtmlElement};
use yew::NodeRef;

/// CSS class that hides a panel
pub const HIDDEN_CLASS: &str = "hidden";

/// Text cells of one results table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow {
    pub airline: String,
    pub deal_count: String,
    pub avg_price: String,
}

impl RouteRow {
    pub fn from_route(route: &PopularRoute, currency: &str) -> Self {
        Self {
            airline: route.airline.clone(),
            deal_count: route.deal_count.to_string(),
            avg_price: format_price(route.avg_price, currency),
        }
    }

    pub fn cells(&self) -> [&str; 3] {
        [&self.airline, &self.deal_count, &self.avg_price]
    }
}

/// The panels the dashboard controller drives.
///
/// Every text goes in as plain text, never as markup.
pub trait DashboardView {
    fn set_loading(&mut self, visible: bool);

    fn set_results_visible(&mut self, visible: bool);

    /// Shows the error panel with exactly `text`.
    fn show_error(&mut self, text: &str);

    fn hide_error(&mut self);

    fn set_summary(&mut self, text: &str);

    /// Replaces every row of the results table body.
    fn set_rows(&mut self, rows: &[RouteRow]);
}

/// Element handles captured from the dashboard component
#[derive(Debug, Clone)]
pub struct DashboardHandles {
    pub loading: HtmlElement,
    pub results: HtmlElement,
    pub error: HtmlElement,
    pub summary: HtmlElement,
    pub table_body: HtmlElement,
}

impl DashboardHandles {
    /// `None` until every ref is attached to a rendered element.
    pub fn from_refs(
        loading: &NodeRef,
        results: &NodeRef,
        error: &NodeRef,
        summary: &NodeRef,
        table_body: &NodeRef,
    ) -> Option<Self> {
        Some(Self {
            loading: loading.cast::<HtmlElement>()?,
            results: results.cast::<HtmlElement>()?,
            error: error.cast::<HtmlElement>()?,
            summary: summary.cast::<HtmlElement>()?,
            table_body: table_body.cast::<HtmlElement>()?,
        })
    }
}

/// `DashboardView` over real DOM elements
pub struct DomView {
    document: Document,
    handles: DashboardHandles,
}

impl DomView {
    pub fn new(handles: DashboardHandles) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document, handles })
    }
}

fn set_hidden(element: &HtmlElement, hidden: bool) {
    if let Err(e) = element.class_list().toggle_with_force(HIDDEN_CLASS, hidden) {
        log::error!("Failed to toggle visibility of #{}: {:?}", element.id(), e);
    }
}

impl DashboardView for DomView {
    fn set_loading(&mut self, visible: bool) {
        set_hidden(&self.handles.loading, !visible);
    }

    fn set_results_visible(&mut self, visible: bool) {
        set_hidden(&self.handles.results, !visible);
    }

    fn show_error(&mut self, text: &str) {
        self.handles.error.set_text_content(Some(text));
        set_hidden(&self.handles.error, false);
    }

    fn hide_error(&mut self) {
        set_hidden(&self.handles.error, true);
    }

    fn set_summary(&mut self, text: &str) {
        self.handles.summary.set_text_content(Some(text));
    }

    fn set_rows(&mut self, rows: &[RouteRow]) {
        // Dropping the text content removes every child row
        self.handles.table_body.set_text_content(None);

        for row in rows {
            let tr = match self.document.create_element("tr") {
                Ok(tr) => tr,
                Err(e) => {
                    log::error!("Failed to create table row: {:?}", e);
                    return;
                }
            };
            for cell in row.cells() {
                match self.document.create_element("td") {
                    Ok(td) => {
                        td.set_text_content(Some(cell));
                        if let Err(e) = tr.append_child(&td) {
                            log::error!("Failed to append table cell: {:?}", e);
                        }
                    }
                    Err(e) => log::error!("Failed to create table cell: {:?}", e),
                }
            }
            if let Err(e) = self.handles.table_body.append_child(&tr) {
                log::error!("Failed to append table row: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_route_row_cells() {
        let route = PopularRoute {
            airline: "AirX".to_string(),
            deal_count: 12,
            avg_price: Decimal::new(875, 1),
        };

        let row = RouteRow::from_route(&route, "EUR");
        assert_eq!(row.cells(), ["AirX", "12", "€87.50"]);
    }

    #[test]
    fn test_route_row_keeps_markup_as_text() {
        let route = PopularRoute {
            airline: "<b>Air</b>".to_string(),
            deal_count: 1,
            avg_price: Decimal::new(100, 0),
        };

        assert_eq!(RouteRow::from_route(&route, "EUR").airline, "<b>Air</b>");
    }
}
