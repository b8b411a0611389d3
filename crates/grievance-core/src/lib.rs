pub mod error;
pub mod geo;
pub mod labels;
pub mod record;

pub use error::ParseError;
pub use geo::{EARTH_RADIUS_KM, GeoPoint, distance_km, haversine_km};
pub use labels::{Department, Priority, Status};
pub use record::{GrievanceRecord, Location};
