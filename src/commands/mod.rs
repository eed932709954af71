pub mod run;
pub mod teardown;
