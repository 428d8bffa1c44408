pub mod defaults;
pub mod field;
pub mod form;
pub mod handle_form_change;
pub mod mix;
pub mod move_liquid;
pub mod patch_updaters;
pub mod value;
pub mod well_ratio;
