//! Submit/response cycle of the market demand dashboard.
//!
//! A submit goes `Idle -> Loading(token) -> Idle`. The controller is
//! split into a synchronous begin step and a synchronous complete step so
//! that callers holding it in a `RefCell` never keep it borrowed while the
//! request is pending.

use std::cell::RefCell;

use common::{DemandRequest, DemandResponse};
use thiserror::Error;

use super::chart::{BarChartSpec, ChartSurface};
use super::view::{DashboardView, RouteRow};
use crate::api_client::{DemandClient, RequestError};

pub const VALIDATION_MESSAGE: &str = "Please select a destination city.";

/// Identifies one accepted submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading(RequestToken),
}

/// A submit that passed validation and now needs its network call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub request: DemandRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select a destination city.")]
    Validation,
    #[error("A market demand request is already in flight")]
    Busy,
}

/// What a completion did to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Rendered { routes: usize },
    Failed(RequestError),
    /// Token did not match the in-flight request; nothing changed
    Stale,
}

pub struct DashboardController<V: DashboardView, S: ChartSurface> {
    view: V,
    surface: S,
    chart: Option<S::Handle>,
    phase: Phase,
    next_token: u64,
}

impl<V: DashboardView, S: ChartSurface> DashboardController<V, S> {
    pub fn new(view: V, surface: S) -> Self {
        Self {
            view,
            surface,
            chart: None,
            phase: Phase::Idle,
            next_token: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Validate the selected destination and switch to loading.
    pub fn begin_submit(&mut self, destination: &str) -> Result<PendingRequest, SubmitError> {
        if let Phase::Loading(token) = self.phase {
            log::debug!("Ignoring submit while request {:?} is in flight", token);
            return Err(SubmitError::Busy);
        }

        let destination = destination.trim();
        if destination.is_empty() {
            log::debug!("Submit without a destination");
            self.show_error(VALIDATION_MESSAGE);
            return Err(SubmitError::Validation);
        }

        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.phase = Phase::Loading(token);

        self.view.set_loading(true);
        self.view.set_results_visible(false);
        self.view.hide_error();

        log::debug!("Request {:?} started for destination {}", token, destination);
        Ok(PendingRequest {
            token,
            request: DemandRequest::new(destination),
        })
    }

    /// Apply the outcome of the request identified by `token`.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<DemandResponse, RequestError>,
    ) -> Completion {
        if self.phase != Phase::Loading(token) {
            log::debug!("Ignoring stale completion of request {:?}", token);
            return Completion::Stale;
        }

        let completion = match outcome.and_then(|response| self.render(&response)) {
            Ok(routes) => Completion::Rendered { routes },
            Err(e) => {
                self.show_error(&e.to_string());
                Completion::Failed(e)
            }
        };

        self.view.set_loading(false);
        self.phase = Phase::Idle;
        completion
    }

    /// Draws the chart first so a drawing failure leaves the summary and
    /// table as they were. The previous plot shares the element and is
    /// purged either way.
    fn render(&mut self, response: &DemandResponse) -> Result<usize, RequestError> {
        let insights = &response.insights;
        let chart_spec = BarChartSpec::from_routes(&insights.popular_routes);

        if let Some(previous) = self.chart.take() {
            self.surface.dispose(previous);
        }

        // Plotly sizes its plot from the container, which must be displayed
        self.view.set_results_visible(true);
        let handle = match self.surface.draw(&chart_spec) {
            Ok(handle) => handle,
            Err(e) => {
                self.view.set_results_visible(false);
                return Err(RequestError::Chart(e.to_string()));
            }
        };
        self.chart = Some(handle);

        self.view.set_summary(&response.ai_summary);
        let rows: Vec<RouteRow> = insights
            .popular_routes
            .iter()
            .map(|route| RouteRow::from_route(route, &insights.currency))
            .collect();
        self.view.set_rows(&rows);

        self.view.hide_error();
        Ok(rows.len())
    }

    fn show_error(&mut self, message: &str) {
        self.view.show_error(&format!("Error: {}", message));
    }
}

/// Run one full submit: begin, await the client, complete.
///
/// The controller is only borrowed on either side of the await.
pub async fn submit<V, S, C>(
    controller: &RefCell<DashboardController<V, S>>,
    client: &C,
    destination: &str,
) -> Result<Completion, SubmitError>
where
    V: DashboardView,
    S: ChartSurface,
    C: DemandClient + ?Sized,
{
    let pending = controller.borrow_mut().begin_submit(destination)?;

    let outcome = client.fetch_demand(&pending.request).await;

    let completion = controller.borrow_mut().complete(pending.token, outcome);
    match &completion {
        Completion::Rendered { routes } => {
            log::info!("Rendered {} routes for {}", routes, pending.request.destination)
        }
        Completion::Failed(e) => {
            log::warn!("Market demand for {} failed: {}", pending.request.destination, e)
        }
        Completion::Stale => {}
    }
    Ok(completion)
}
