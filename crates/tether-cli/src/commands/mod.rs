pub mod dispatch;
pub mod install;
pub mod run;
pub mod shared;
pub mod status;
pub mod uninstall;
