pub mod app_config;
pub mod config;
pub mod geo;
pub mod provider;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use geo::{format_distance, haversine_distance, EARTH_RADIUS_METERS};
pub use provider::{PlaceSearch, ProviderError};
pub use types::{Coordinate, CoreError, OpenState, RawPlaceRecord, Shop};
