mod coordinate_form;
mod readout;
pub use coordinate_form::WidgetCoordinateForm;
pub use readout::WidgetReadout;
