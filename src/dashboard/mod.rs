pub mod activity;
pub mod model;
pub mod notification;
pub mod report;
