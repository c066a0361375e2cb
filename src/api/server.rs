use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use log::info;
use std::net::SocketAddr;

use crate::api::routes;
use crate::models::config::ServerConfig;
use crate::store::event_store::EventStore;
use crate::utils::error::DashboardResult;

/// A bound, not yet awaited, API server
pub struct BoundServer {
    pub server: Server,
    pub addrs: Vec<SocketAddr>,
}

/// Bind the API server for `store` on `host:port`.
///
/// Port 0 binds an ephemeral port; the chosen address is in `addrs`.
pub fn bind(store: EventStore, host: &str, port: u16) -> DashboardResult<BoundServer> {
    let store = web::Data::new(store);

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?;

    let addrs = http_server.addrs();
    info!("API server bound to {:?}", addrs);

    Ok(BoundServer {
        server: http_server.run(),
        addrs,
    })
}

/// Run the development backend until it is stopped
pub async fn serve(config: &ServerConfig, store: EventStore) -> DashboardResult<()> {
    let (host, port) = config.bind_address()?;
    let bound = bind(store, &host, port)?;

    for addr in &bound.addrs {
        info!("Dashboard API available at http://{}", addr);
    }

    bound.server.await?;
    Ok(())
}
