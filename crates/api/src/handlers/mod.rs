pub mod titles;
