use std::cell::RefCell;
use std::rc::Rc;

use common::DESTINATIONS;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::chart::PlotlySurface;
use super::controller::{submit, DashboardController, SubmitError};
use super::view::{DashboardHandles, DomView};
use crate::api_client::HttpDemandClient;
use crate::ui::loading::Loading;

pub const CHART_ELEMENT_ID: &str = "airline-chart";

type BrowserController = DashboardController<DomView, PlotlySurface>;

#[function_component(DemandDashboard)]
pub fn demand_dashboard() -> Html {
    let select_ref = use_node_ref();
    let loading_ref = use_node_ref();
    let results_ref = use_node_ref();
    let error_ref = use_node_ref();
    let summary_ref = use_node_ref();
    let table_body_ref = use_node_ref();

    let controller = use_mut_ref(|| None::<Rc<RefCell<BrowserController>>>);
    let client = use_memo((), |_| HttpDemandClient::from_settings());

    {
        let controller = controller.clone();
        let refs = (
            loading_ref.clone(),
            results_ref.clone(),
            error_ref.clone(),
            summary_ref.clone(),
            table_body_ref.clone(),
        );
        use_effect_with((), move |_| {
            let (loading, results, error, summary, table_body) = &refs;
            match DashboardHandles::from_refs(loading, results, error, summary, table_body)
                .and_then(DomView::new)
            {
                Some(view) => {
                    let surface = PlotlySurface::new(CHART_ELEMENT_ID);
                    *controller.borrow_mut() =
                        Some(Rc::new(RefCell::new(DashboardController::new(view, surface))));
                    log::debug!("Demand dashboard bound to its elements");
                }
                None => log::error!("Demand dashboard elements are not mounted"),
            }
            || ()
        });
    }

    let onsubmit = {
        let controller = controller.clone();
        let select_ref = select_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(controller) = controller.borrow().clone() else {
                log::warn!("Submit before the dashboard was mounted");
                return;
            };
            let destination = select_ref
                .cast::<HtmlSelectElement>()
                .map(|select| select.value())
                .unwrap_or_default();
            let client = client.clone();

            spawn_local(async move {
                match submit(&*controller, &*client, &destination).await {
                    Ok(completion) => log::trace!("Submit finished: {:?}", completion),
                    Err(SubmitError::Busy) => log::debug!("Submit ignored, request in flight"),
                    Err(SubmitError::Validation) => log::debug!("Submit rejected: no destination"),
                }
            });
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <form id="demand-form" class="flex flex-col md:flex-row gap-4 items-end" {onsubmit}>
                    <label class="form-control w-full max-w-xs">
                        <div class="label">
                            <span class="label-text">{"Destination"}</span>
                        </div>
                        <select id="destination-select" ref={select_ref} class="select select-bordered">
                            <option value="" selected=true>{"Select a city"}</option>
                            { for DESTINATIONS.iter().map(|d| html! {
                                <option value={d.code}>{format!("{} ({})", d.city, d.code)}</option>
                            }) }
                        </select>
                    </label>
                    <button type="submit" class="btn btn-primary">{"Analyze Demand"}</button>
                </form>

                <div id="loading-spinner" ref={loading_ref} class="hidden">
                    <Loading text={"Analyzing market demand..."} />
                </div>

                <div id="error-message" ref={error_ref} class="alert alert-error mt-4 hidden"></div>

                <div id="results-container" ref={results_ref} class="mt-6 hidden">
                    <div class="card bg-base-200">
                        <div class="card-body">
                            <h2 class="card-title">{"AI Summary"}</h2>
                            <p id="ai-summary-text" ref={summary_ref}></p>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                        <div class="overflow-x-auto">
                            <table id="routes-table" class="table table-zebra">
                                <thead>
                                    <tr>
                                        <th>{"Airline"}</th>
                                        <th>{"Deals Found"}</th>
                                        <th>{"Average Price"}</th>
                                    </tr>
                                </thead>
                                <tbody ref={table_body_ref}></tbody>
                            </table>
                        </div>
                        <div id={CHART_ELEMENT_ID} class="chart-container" style="height: 300px;"></div>
                    </div>
                </div>
            </div>
        </div>
    }
}
