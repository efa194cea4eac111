/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;
mod vehicles;

use kfz_core::SiteServer;

/// Re-export kfz-core for convenience
pub use kfz_core;
pub use vehicles::VehicleClient;

/// Extension trait that converts a `SiteServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for SiteServer {
  fn into_axum_router(self) -> axum::Router {
    handler::build_router(self.into_parts())
  }

  async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("kfz-portal running on http://localhost:{}", local_addr.port());
    axum::serve(listener, router).await?;
    Ok(())
  }
}
