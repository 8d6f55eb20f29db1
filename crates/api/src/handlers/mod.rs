pub mod discs;
