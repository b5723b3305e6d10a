use std::sync::Arc;

use idealink_config::Config;
use idealink_service::IdeaLinkService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<IdeaLinkService>,
}
impl AppState {
	pub fn new(config: Config) -> color_eyre::Result<Self> {
		let service = IdeaLinkService::new(config)?;

		Ok(Self { service: Arc::new(service) })
	}
}
