pub mod detail_panel;
pub mod event_callout;
pub mod event_list;
pub mod filter_bar;
pub mod map_marker;
pub mod map_surface;
