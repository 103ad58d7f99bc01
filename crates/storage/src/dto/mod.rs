pub mod event;
pub mod home;
pub mod participant;
pub mod sport;
pub mod team;
