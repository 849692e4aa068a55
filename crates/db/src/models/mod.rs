pub mod book;
pub mod plot;
pub mod plot_reference;
pub mod series;
pub mod user;
pub mod weapon;
