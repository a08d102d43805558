pub mod dscr;
pub mod loan;
pub mod normalize;
pub mod project;
