pub mod erp;
pub mod queue;
