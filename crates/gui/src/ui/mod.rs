pub mod side_panel;
pub mod status_bar;
