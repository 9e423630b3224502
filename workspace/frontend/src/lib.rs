use yew::prelude::*;

mod components;
pub mod api_client;
pub mod settings;
pub mod ui;

use components::demand::DemandDashboard;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <main class="min-h-screen bg-base-200 p-6">
            <div class="max-w-6xl mx-auto">
                <h1 class="text-3xl font-bold mb-2">{"Airline Market Demand"}</h1>
                <p class="text-sm text-gray-500 mb-6">{"Deals found from Madrid for tomorrow's departures"}</p>
                <DemandDashboard />
            </div>
        </main>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== SkyDemand Frontend Application Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API endpoint: {}", settings.api_url(common::MARKET_DEMAND_PATH));
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
