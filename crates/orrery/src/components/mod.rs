pub mod orbit;
pub mod ring;
pub mod body;
