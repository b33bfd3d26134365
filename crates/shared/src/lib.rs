//! Venue map state shared by the frontend and the catalog service.

pub mod arbiter;
pub mod callout;
pub mod camera;
pub mod carousel;
pub mod filters;
pub mod interaction;
pub mod marker;
pub mod models;
pub mod venue_index;
