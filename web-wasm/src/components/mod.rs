pub mod header;
pub mod dataset_panel;
pub mod capture_area;
pub mod identify_form;
pub mod result_view;
