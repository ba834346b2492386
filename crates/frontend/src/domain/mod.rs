pub mod a001_room;
pub mod a002_guest;
pub mod a003_reservation;
pub mod a004_payment;
