pub mod customer;
pub mod credit;
