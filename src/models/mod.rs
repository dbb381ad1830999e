pub mod employee;
pub mod trip;
