pub mod confirm;
pub mod form;
pub mod input_buffer;
pub mod table;
