pub mod goal;
pub mod memo;
pub mod schedule;
pub mod state;
