#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use flowbit_catalog::{Engine, HttpFlowSource, WorkflowFetcher};
    use flowbit_dispatch::{HttpTriggerBackend, PlaceholderRuns};
    use flowbit_gateway::GatewayState;
    use flowbit_server::{app::App, config::ServerConfig, server_helpers::DashboardServices};
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use std::sync::Arc;
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from the optional config file and environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        api_url = %config.api_url,
        langflow_base_url = %config.langflow_base_url,
        public_base_url = %config.public_base_url,
        "Loaded configuration"
    );

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()
        .expect("failed to build HTTP client");

    // Dashboard services, reached from server functions
    let fetcher = WorkflowFetcher::new(config.catalog.clone()).with_source(
        Engine::Langflow,
        Arc::new(HttpFlowSource::new(http.clone(), &config.api_url)),
    );
    let services = Arc::new(DashboardServices {
        fetcher,
        backend: Arc::new(HttpTriggerBackend::new(http.clone(), &config.api_url)),
        api_url: config.api_url.clone(),
    });

    // Webhook relay and run endpoints
    let gateway = GatewayState::new(
        config.public_base_url.clone(),
        Arc::new(HttpTriggerBackend::new(http, &config.langflow_base_url)),
        Arc::new(PlaceholderRuns),
    )
    .with_stream_interval(config.stream_interval());

    let conf = get_configuration(None).expect("failed to get leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler::<LeptosOptions, _>(shell))
        .nest_service("/pkg", ServeDir::new("target/site/pkg"))
        // Provide dashboard services as a request extension for server functions
        .layer(axum::Extension(services))
        .with_state(leptos_options)
        .merge(flowbit_gateway::router(gateway));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

#[cfg(feature = "ssr")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::prelude::LeptosOptions) -> impl leptos::prelude::IntoView {
    use flowbit_server::app::App;
    use leptos::prelude::*;
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="/pkg/flowbit.css"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This main function is only used for WASM builds
    // The actual hydration happens in lib.rs
}
