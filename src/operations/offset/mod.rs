mod setback;

pub use setback::Setback;
