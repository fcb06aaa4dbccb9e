pub mod extract;

pub mod form;
