pub mod analysis_fetch;
pub mod colors;
pub mod fake_feed;
pub mod filters;
pub mod http_client;
pub mod provider;
pub mod reference_fetch;
pub mod request;
pub mod state;
pub mod transform;
